use crate::embedding::similarity::inner_product;
use crate::error::IndexError;

/// One retrieval hit: inner-product score and the position of the vector in
/// insertion order. Positions are the join key to the profile store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub score: f32,
    pub position: usize,
}

/// Exact nearest-neighbor index over unit-normalized vectors, ranked by
/// inner product (cosine similarity for unit vectors).
///
/// Append-only: `add` returns the position of the vector, which must always
/// equal the offset of the matching profile in the store. The same structure
/// doubles as the skills-embedding matrix (positional row access via
/// `vector`).
#[derive(Debug, Clone, Default)]
pub struct FlatIpIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIpIndex {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Append a vector, returning its position.
    pub fn add(&mut self, vector: Vec<f32>) -> Result<usize, IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    /// Row access by position.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position).map(Vec::as_slice)
    }

    /// Exhaustive scan returning the top `k` hits by inner product,
    /// descending; exact ties keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, v)| SearchHit {
                score: inner_product(query, v),
                position,
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(x: f32, y: f32, z: f32) -> Vec<f32> {
        let mut v = vec![x, y, z];
        crate::embedding::similarity::l2_normalize(&mut v);
        v
    }

    #[test]
    fn add_returns_sequential_positions() {
        let mut index = FlatIpIndex::new(3);

        assert_eq!(index.add(unit(1.0, 0.0, 0.0)).unwrap(), 0);
        assert_eq!(index.add(unit(0.0, 1.0, 0.0)).unwrap(), 1);
        assert_eq!(index.add(unit(0.0, 0.0, 1.0)).unwrap(), 2);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn add_rejects_wrong_dimension() {
        let mut index = FlatIpIndex::new(3);

        let err = index.add(vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::IndexError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert!(index.is_empty());
    }

    #[test]
    fn search_ranks_by_inner_product() {
        let mut index = FlatIpIndex::new(3);
        index.add(unit(1.0, 0.0, 0.0)).unwrap();
        index.add(unit(1.0, 1.0, 0.0)).unwrap();
        index.add(unit(0.0, 0.0, 1.0)).unwrap();

        let hits = index.search(&unit(1.0, 0.0, 0.0), 2);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[1].position, 1);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn search_ties_keep_insertion_order() {
        let mut index = FlatIpIndex::new(3);
        index.add(unit(0.0, 1.0, 0.0)).unwrap();
        index.add(unit(0.0, 1.0, 0.0)).unwrap();

        let hits = index.search(&unit(0.0, 1.0, 0.0), 2);

        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[1].position, 1);
    }

    #[test]
    fn search_caps_at_corpus_size() {
        let mut index = FlatIpIndex::new(3);
        index.add(unit(1.0, 0.0, 0.0)).unwrap();

        let hits = index.search(&unit(1.0, 0.0, 0.0), 10);
        assert_eq!(hits.len(), 1);
    }
}
