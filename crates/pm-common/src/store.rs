use std::path::Path;

use crate::error::IngestError;
use crate::Profile;

/// Append-only, position-iterable profile store.
///
/// Position N here always corresponds to position N in the vector index and
/// to row N of the skills matrix; the retrieval layer joins on position, not
/// id. Profiles are immutable once appended; there is no update or delete.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    /// Load the ordered seed file (JSON array of profiles).
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let raw = std::fs::read_to_string(path)?;
        let profiles: Vec<Profile> = serde_json::from_str(&raw)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        Ok(Self { profiles })
    }

    /// Rewrite the seed file with the current contents. The durable write
    /// of the append path; called before the in-memory snapshot swap.
    pub fn persist(&self, path: &Path) -> Result<(), IngestError> {
        let raw = serde_json::to_string_pretty(&self.profiles)
            .map_err(|err| IngestError::Storage(err.to_string()))?;
        std::fs::write(path, raw).map_err(|err| IngestError::Storage(err.to_string()))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Profile> {
        self.profiles.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    /// Next free id, one past the current maximum.
    pub fn next_id(&self) -> u64 {
        self.profiles.iter().map(|p| p.id).max().map_or(1, |m| m + 1)
    }

    pub fn push(&mut self, profile: Profile) -> usize {
        self.profiles.push(profile);
        self.profiles.len() - 1
    }
}
