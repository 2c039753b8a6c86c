//! Correspondence vectors between two point sets.
//!
//! Every (source, target) pair votes for the translation `target - source`.
//! Vectors are stored flat, source-major: the vector for the `s`-th selected
//! source point and target `t` lives at `s * |target| + t`.

use crate::error::{AlignmentError, Result};
use crate::types::{point, validate_point_set, DataMatrix, Vector};

/// All displacement vectors from a (subset of a) source set to a target set.
#[derive(Debug, Clone)]
pub struct CorrespondenceSet {
    vectors: Vec<Vector>,
    source_indices: Vec<usize>,
    target_len: usize,
}

impl CorrespondenceSet {
    /// Correspondences for the full `source x target` product.
    pub fn new(source: &DataMatrix, target: &DataMatrix) -> Result<Self> {
        validate_point_set(source, "source")?;
        let all: Vec<usize> = (0..source.nrows()).collect();
        Self::build(source, target, all)
    }

    /// Correspondences for `source[indices] x target`.
    ///
    /// Indices may repeat; each occurrence produces its own block of vectors.
    pub fn from_source_subset(
        source: &DataMatrix,
        target: &DataMatrix,
        indices: &[usize],
    ) -> Result<Self> {
        validate_point_set(source, "source")?;
        if indices.is_empty() {
            return Err(AlignmentError::InvalidInput(
                "source sample is empty".to_string(),
            ));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= source.nrows()) {
            return Err(AlignmentError::InvalidInput(format!(
                "source index {bad} out of range for {} points",
                source.nrows()
            )));
        }
        Self::build(source, target, indices.to_vec())
    }

    fn build(source: &DataMatrix, target: &DataMatrix, source_indices: Vec<usize>) -> Result<Self> {
        validate_point_set(target, "target")?;

        let target_len = target.nrows();
        let mut vectors = Vec::with_capacity(source_indices.len() * target_len);
        for &s in &source_indices {
            let from = point(source, s);
            vectors.extend((0..target_len).map(|t| point(target, t) - from));
        }

        Ok(Self {
            vectors,
            source_indices,
            target_len,
        })
    }

    /// Number of correspondence vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// `true` when there are no correspondences.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Number of target points each source point was paired with.
    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// All displacement vectors, source-major.
    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    /// Displacement `target - source` of correspondence `flat`.
    #[inline]
    pub fn vector(&self, flat: usize) -> Vector {
        self.vectors[flat]
    }

    /// `(source_index, target_index)` that produced vector `flat`.
    #[inline]
    pub fn pair(&self, flat: usize) -> (usize, usize) {
        (
            self.source_indices[flat / self.target_len],
            flat % self.target_len,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::points_from_xy;

    #[test]
    fn full_product_is_source_major() {
        let source = points_from_xy(&[(0.0, 0.0), (1.0, 1.0)]);
        let target = points_from_xy(&[(2.0, 0.0), (0.0, 3.0), (5.0, 5.0)]);
        let set = CorrespondenceSet::new(&source, &target).unwrap();

        assert_eq!(set.len(), 6);
        assert_eq!(set.target_len(), 3);
        assert_eq!(set.vector(0), Vector::new(2.0, 0.0));
        assert_eq!(set.vector(4), Vector::new(-1.0, 2.0));
        assert_eq!(set.pair(4), (1, 1));
        assert_eq!(set.pair(5), (1, 2));
    }

    #[test]
    fn subset_maps_back_to_original_indices() {
        let source = points_from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let target = points_from_xy(&[(10.0, 10.0), (20.0, 20.0)]);
        let set = CorrespondenceSet::from_source_subset(&source, &target, &[2, 0]).unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(set.pair(0), (2, 0));
        assert_eq!(set.vector(0), Vector::new(8.0, 10.0));
        assert_eq!(set.pair(3), (0, 1));
        assert_eq!(set.vector(3), Vector::new(20.0, 20.0));
    }

    #[test]
    fn rejects_empty_and_out_of_range_inputs() {
        let source = points_from_xy(&[(0.0, 0.0)]);
        let empty = DataMatrix::zeros(0, 2);

        assert!(CorrespondenceSet::new(&source, &empty).is_err());
        assert!(CorrespondenceSet::new(&empty, &source).is_err());
        assert!(CorrespondenceSet::from_source_subset(&source, &source, &[]).is_err());
        assert!(CorrespondenceSet::from_source_subset(&source, &source, &[1]).is_err());
    }
}
