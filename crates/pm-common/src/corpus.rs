use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{error, info, warn};

use crate::embedding::{similarity::l2_normalize, EmbeddingProvider};
use crate::error::{CorpusError, IngestError, MatchError};
use crate::index::FlatIpIndex;
use crate::store::ProfileStore;
use crate::{Availability, Mobility, Profile};

/// One immutable view of the corpus: profile store, full-text index and
/// skills matrix, all position-aligned and built from the same ordered
/// source. Searches hold an `Arc` to one of these for their whole duration,
/// so an in-flight append is never observed mid-mutation.
#[derive(Debug, Clone)]
pub struct CorpusSnapshot {
    pub store: ProfileStore,
    pub index: FlatIpIndex,
    pub skills: FlatIpIndex,
}

impl CorpusSnapshot {
    pub fn empty(dimension: usize) -> Self {
        Self {
            store: ProfileStore::default(),
            index: FlatIpIndex::new(dimension),
            skills: FlatIpIndex::new(dimension),
        }
    }

    /// Embed every profile and build both matrices in store order.
    pub fn build(
        embedder: &dyn EmbeddingProvider,
        store: ProfileStore,
    ) -> Result<Self, CorpusError> {
        let dimension = embedder.dimension();
        let full_texts: Vec<String> = store.iter().map(|p| p.full_text.clone()).collect();
        let skills_texts: Vec<String> = store.iter().map(|p| p.skills_text()).collect();

        let mut index = FlatIpIndex::new(dimension);
        for mut vector in embedder.embed_batch(&full_texts)? {
            l2_normalize(&mut vector);
            index.add(vector)?;
        }

        let mut skills = FlatIpIndex::new(dimension);
        for mut vector in embedder.embed_batch(&skills_texts)? {
            l2_normalize(&mut vector);
            skills.add(vector)?;
        }

        Ok(Self {
            store,
            index,
            skills,
        })
    }
}

/// Corpus lifecycle. Requests gate on `Ready` and fail fast otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
    Failed(String),
}

/// Input for the add-profile path. The canonical full text is composed
/// here, from labeled segments, exactly once.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub experience_years: u32,
    pub diploma: String,
    pub certifications: String,
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub languages: Vec<String>,
    pub location: String,
    pub mobility: Mobility,
    pub availability: Availability,
    /// Narrative work history.
    pub experiences: String,
    pub searched_role: Option<String>,
}

impl ProfileDraft {
    fn into_profile(self, id: u64) -> Profile {
        let full_text = format!(
            "Expériences: {}. Diplômes: {}. Certifications: {}. \
             Compétences techniques: {}. Compétences comportementales: {}. \
             Langues: {}. Localisation: {}. Mobilité: {}. Disponibilité: {}.",
            self.experiences,
            self.diploma,
            self.certifications,
            self.hard_skills.join(", "),
            self.soft_skills.join(", "),
            self.languages.join(", "),
            self.location,
            self.mobility.label(),
            self.availability.label(),
        );

        Profile {
            id,
            experience_years: self.experience_years,
            hard_skills: self.hard_skills,
            soft_skills: self.soft_skills,
            languages: self.languages,
            location: self.location,
            mobility: self.mobility,
            availability: self.availability,
            diploma: self.diploma,
            certifications: self.certifications,
            searched_role: self.searched_role,
            full_text,
        }
    }
}

/// Result of an append. `degraded` marks the partial-failure case: the
/// durable store holds the profile but the live index does not; the service
/// keeps serving the prior snapshot and a restart rebuilds both from the
/// same ordered source.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub profile_id: u64,
    pub ingested_at: chrono::DateTime<chrono::Utc>,
    pub degraded: bool,
    pub detail: Option<String>,
}

/// Owner of the corpus shared state, constructed once at startup and passed
/// by reference. Replaces the original's process-wide resource dictionary.
pub struct CorpusService {
    embedder: Arc<dyn EmbeddingProvider>,
    snapshot: RwLock<Arc<CorpusSnapshot>>,
    state: RwLock<LoadState>,
    /// Ingestion is rare and serialized; a single writer gate suffices.
    write_gate: Mutex<()>,
    persist_path: Option<PathBuf>,
}

impl CorpusService {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, persist_path: Option<PathBuf>) -> Self {
        let dimension = embedder.dimension();
        Self {
            embedder,
            snapshot: RwLock::new(Arc::new(CorpusSnapshot::empty(dimension))),
            state: RwLock::new(LoadState::Uninitialized),
            write_gate: Mutex::new(()),
            persist_path,
        }
    }

    /// Build a Ready service over an already-loaded store, without a
    /// backing file. For embedded setups and tests.
    pub fn from_store(
        embedder: Arc<dyn EmbeddingProvider>,
        store: ProfileStore,
    ) -> Result<Self, CorpusError> {
        let snapshot = CorpusSnapshot::build(embedder.as_ref(), store)?;
        let service = Self::new(embedder, None);
        service.publish(snapshot);
        service.set_state(LoadState::Ready);
        Ok(service)
    }

    pub fn state(&self) -> LoadState {
        self.state.read().expect("corpus state lock poisoned").clone()
    }

    fn set_state(&self, state: LoadState) {
        *self.state.write().expect("corpus state lock poisoned") = state;
    }

    /// Load the seed file and rebuild index and store together, from the
    /// same ordered source. Transitions Loading → Ready, or Failed with the
    /// load error.
    pub fn load(&self) -> Result<(), CorpusError> {
        self.set_state(LoadState::Loading);

        match self.rebuild() {
            Ok(snapshot) => {
                let count = snapshot.store.len();
                self.publish(snapshot);
                self.set_state(LoadState::Ready);
                info!(profiles = count, "corpus loaded");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "corpus load failed");
                self.set_state(LoadState::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    fn rebuild(&self) -> Result<CorpusSnapshot, CorpusError> {
        let store = match &self.persist_path {
            Some(path) if path.exists() => ProfileStore::load(path)
                .map_err(|err| CorpusError::Storage(err.to_string()))?,
            Some(path) => {
                warn!(path = %path.display(), "profile store file missing; starting empty");
                ProfileStore::default()
            }
            None => ProfileStore::default(),
        };

        CorpusSnapshot::build(self.embedder.as_ref(), store)
    }

    fn publish(&self, snapshot: CorpusSnapshot) {
        *self.snapshot.write().expect("corpus snapshot lock poisoned") = Arc::new(snapshot);
    }

    /// Atomic read view for one search. Fails fast unless Ready.
    pub fn snapshot(&self) -> Result<Arc<CorpusSnapshot>, MatchError> {
        match self.state() {
            LoadState::Ready => Ok(self
                .snapshot
                .read()
                .expect("corpus snapshot lock poisoned")
                .clone()),
            LoadState::Failed(reason) => {
                Err(MatchError::NotReady(format!("corpus load failed: {reason}")))
            }
            LoadState::Loading => Err(MatchError::NotReady("corpus is loading".into())),
            LoadState::Uninitialized => Err(MatchError::NotReady("corpus not initialized".into())),
        }
    }

    /// Append path: durable store write first, then embeddings, then the
    /// three in-memory appends in lock-step, published as one new snapshot.
    ///
    /// There is no rollback of the durable write when the index phase fails
    /// (kept from the original design, reported instead of hidden): the
    /// outcome is `degraded`, the prior snapshot keeps serving, and the
    /// one-record skew heals at the next rebuild.
    pub fn ingest(&self, draft: ProfileDraft) -> Result<IngestOutcome, IngestError> {
        if self.state() != LoadState::Ready {
            return Err(IngestError::NotReady("corpus not ready".into()));
        }
        if draft.experiences.trim().is_empty() && draft.hard_skills.is_empty() {
            return Err(IngestError::InvalidProfile(
                "profile needs at least experiences text or hard skills".into(),
            ));
        }

        let _gate = self.write_gate.lock().expect("corpus write gate poisoned");

        let current = self
            .snapshot
            .read()
            .expect("corpus snapshot lock poisoned")
            .clone();
        let profile_id = current.store.next_id();
        let profile = draft.into_profile(profile_id);

        let mut new_store = current.store.clone();
        let position = new_store.push(profile.clone());
        if let Some(path) = &self.persist_path {
            new_store.persist(path)?;
        }

        match self.append_vectors(&current, &profile) {
            Ok((index, skills)) => {
                debug_assert_eq!(index.len() - 1, position);
                self.publish(CorpusSnapshot {
                    store: new_store,
                    index,
                    skills,
                });
                info!(profile_id, position, "profile ingested");
                Ok(IngestOutcome {
                    profile_id,
                    ingested_at: chrono::Utc::now(),
                    degraded: false,
                    detail: None,
                })
            }
            Err(reason) => {
                warn!(
                    profile_id,
                    reason,
                    "profile persisted but index update failed; serving prior index (store and index skewed by one record until next rebuild)"
                );
                Ok(IngestOutcome {
                    profile_id,
                    ingested_at: chrono::Utc::now(),
                    degraded: true,
                    detail: Some(reason),
                })
            }
        }
    }

    fn append_vectors(
        &self,
        current: &CorpusSnapshot,
        profile: &Profile,
    ) -> Result<(FlatIpIndex, FlatIpIndex), String> {
        let mut full_vector = self
            .embedder
            .embed(&profile.full_text)
            .map_err(|err| err.to_string())?;
        let mut skills_vector = self
            .embedder
            .embed(&profile.skills_text())
            .map_err(|err| err.to_string())?;
        l2_normalize(&mut full_vector);
        l2_normalize(&mut skills_vector);

        let mut index = current.index.clone();
        let mut skills = current.skills.clone();
        index.add(full_vector).map_err(|err| err.to_string())?;
        skills.add(skills_vector).map_err(|err| err.to_string())?;

        Ok((index, skills))
    }
}
