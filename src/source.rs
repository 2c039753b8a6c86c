//! Where point sets come from.
//!
//! A [`PointSource`] yields the microscope centroids and biosensor peaks of an
//! experiment, keyed by well name. How they are produced (image segmentation,
//! peak localisation, file formats) is the implementor's business; this crate
//! only pairs them up by key and provides the centroid reduction of a labelled
//! segmentation mask.

use std::collections::BTreeMap;

use nalgebra::DMatrix;

use crate::error::{AlignmentError, Result};
use crate::types::{validate_point_set, DataMatrix, PointPair};

/// Provider of keyed microscope and biosensor point sets.
pub trait PointSource {
    /// Microscope cell centroids per well.
    fn microscope_points(&self) -> Result<BTreeMap<String, DataMatrix>>;

    /// Biosensor signal peaks per well.
    fn biosensor_points(&self) -> Result<BTreeMap<String, DataMatrix>>;
}

/// Point sets already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPointSource {
    microscope: BTreeMap<String, DataMatrix>,
    biosensor: BTreeMap<String, DataMatrix>,
}

impl InMemoryPointSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_microscope(mut self, key: impl Into<String>, points: DataMatrix) -> Self {
        self.microscope.insert(key.into(), points);
        self
    }

    pub fn with_biosensor(mut self, key: impl Into<String>, points: DataMatrix) -> Self {
        self.biosensor.insert(key.into(), points);
        self
    }
}

impl PointSource for InMemoryPointSource {
    fn microscope_points(&self) -> Result<BTreeMap<String, DataMatrix>> {
        Ok(self.microscope.clone())
    }

    fn biosensor_points(&self) -> Result<BTreeMap<String, DataMatrix>> {
        Ok(self.biosensor.clone())
    }
}

/// Pair microscope (source) and biosensor (target) sets by key.
///
/// A key present on only one side is a [`AlignmentError::MissingPair`].
pub fn pair_by_key<S: PointSource + ?Sized>(source: &S) -> Result<BTreeMap<String, PointPair>> {
    let microscope = source.microscope_points()?;
    let mut biosensor = source.biosensor_points()?;

    let mut pairs = BTreeMap::new();
    for (key, points) in microscope {
        let Some(peaks) = biosensor.remove(&key) else {
            return Err(AlignmentError::MissingPair(key));
        };
        pairs.insert(key, PointPair::new(points, peaks));
    }
    if let Some(key) = biosensor.into_keys().next() {
        return Err(AlignmentError::MissingPair(key));
    }
    Ok(pairs)
}

/// Centroids of a labelled segmentation mask.
///
/// Label 0 is background; labels `1..=max` are cells. Row `id - 1` of the
/// result holds the mean pixel position of label `id`, with x the column and
/// y the row index.
pub fn centroids_from_labels(mask: &DMatrix<u32>) -> Result<DataMatrix> {
    let max_label = mask.iter().copied().max().unwrap_or(0) as usize;
    if max_label == 0 {
        return Err(AlignmentError::InvalidInput(
            "segmentation mask contains no labelled cells".to_string(),
        ));
    }

    let mut sums = vec![(0.0f64, 0.0f64, 0usize); max_label];
    for row in 0..mask.nrows() {
        for col in 0..mask.ncols() {
            let label = mask[(row, col)] as usize;
            if label > 0 {
                let entry = &mut sums[label - 1];
                entry.0 += col as f64;
                entry.1 += row as f64;
                entry.2 += 1;
            }
        }
    }

    if let Some(missing) = sums.iter().position(|&(_, _, count)| count == 0) {
        return Err(AlignmentError::InvalidInput(format!(
            "label {} has no pixels (labels must be contiguous up to {max_label})",
            missing + 1
        )));
    }

    let centroids = DataMatrix::from_fn(max_label, 2, |row, col| {
        let (x, y, count) = sums[row];
        if col == 0 {
            x / count as f64
        } else {
            y / count as f64
        }
    });
    validate_point_set(&centroids, "centroid")?;
    Ok(centroids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::points_from_xy;
    use approx::assert_relative_eq;

    #[test]
    fn centroids_average_label_pixels() {
        let mask = DMatrix::from_row_slice(
            3,
            6,
            &[
                1, 1, 2, 2, 2, 3, //
                1, 2, 2, 2, 3, 3, //
                1, 0, 0, 0, 0, 0,
            ],
        );
        let centroids = centroids_from_labels(&mask).unwrap();
        let expected = points_from_xy(&[(0.25, 0.75), (2.5, 0.5), (14.0 / 3.0, 2.0 / 3.0)]);
        assert_relative_eq!(centroids, expected, epsilon = 1e-12);
    }

    #[test]
    fn gaps_and_empty_masks_are_rejected() {
        let gap = DMatrix::from_row_slice(1, 3, &[1u32, 0, 3]);
        assert!(matches!(
            centroids_from_labels(&gap),
            Err(AlignmentError::InvalidInput(msg)) if msg.contains("label 2")
        ));

        let background = DMatrix::<u32>::zeros(4, 4);
        assert!(centroids_from_labels(&background).is_err());
    }

    #[test]
    fn pairs_by_key_and_reports_strays() {
        let pts = points_from_xy(&[(0.0, 0.0)]);
        let source = InMemoryPointSource::new()
            .with_microscope("A1", pts.clone())
            .with_biosensor("A1", pts.clone());
        let pairs = pair_by_key(&source).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains_key("A1"));

        let stray = source.clone().with_biosensor("B2", pts.clone());
        assert_eq!(
            pair_by_key(&stray).unwrap_err(),
            AlignmentError::MissingPair("B2".to_string())
        );

        let orphan = source.with_microscope("C3", pts);
        assert_eq!(
            pair_by_key(&orphan).unwrap_err(),
            AlignmentError::MissingPair("C3".to_string())
        );
    }
}
