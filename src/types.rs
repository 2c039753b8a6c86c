//! Core shared types for point-set alignment.
//!
//! Point sets keep the `DataMatrix` layout used throughout the crate: one point
//! per row, column 0 holding x and column 1 holding y. Displacements between
//! points are plain `nalgebra` 2-vectors.

use nalgebra::{DMatrix, Vector2};

use crate::error::{AlignmentError, Result};

/// Dynamic matrix of `f64`. Point sets are `N x 2` instances of it.
pub type DataMatrix = DMatrix<f64>;

/// A 2D displacement `(x, y)`: correspondence vectors and translations alike.
pub type Vector = Vector2<f64>;

/// A source/target pair of point sets, as handed to the batch driver.
#[derive(Debug, Clone)]
pub struct PointPair {
    pub source: DataMatrix,
    pub target: DataMatrix,
}

impl PointPair {
    pub fn new(source: DataMatrix, target: DataMatrix) -> Self {
        Self { source, target }
    }
}

/// Build an `N x 2` point set from `(x, y)` tuples.
pub fn points_from_xy(points: &[(f64, f64)]) -> DataMatrix {
    DataMatrix::from_fn(points.len(), 2, |row, col| {
        let (x, y) = points[row];
        if col == 0 { x } else { y }
    })
}

/// Read row `index` of a point set as a vector.
#[inline]
pub fn point(points: &DataMatrix, index: usize) -> Vector {
    Vector::new(points[(index, 0)], points[(index, 1)])
}

/// Check that `points` is a non-empty `N x 2` matrix of finite values.
///
/// `name` only feeds the error message.
pub fn validate_point_set(points: &DataMatrix, name: &str) -> Result<()> {
    if points.ncols() != 2 {
        return Err(AlignmentError::InvalidInput(format!(
            "{name} points must be an Nx2 matrix, got {} columns",
            points.ncols()
        )));
    }
    if points.nrows() == 0 {
        return Err(AlignmentError::InvalidInput(format!(
            "{name} point set is empty"
        )));
    }
    if let Some(row) = (0..points.nrows()).find(|&r| !point(points, r).iter().all(|v| v.is_finite()))
    {
        return Err(AlignmentError::InvalidInput(format!(
            "{name} point {row} has a non-finite coordinate"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_from_xy_lays_out_rows() {
        let pts = points_from_xy(&[(1.0, 2.0), (3.0, 4.0)]);
        assert_eq!(pts.nrows(), 2);
        assert_eq!(pts.ncols(), 2);
        assert_eq!(point(&pts, 1), Vector::new(3.0, 4.0));
    }

    #[test]
    fn validation_rejects_bad_shapes_and_values() {
        assert!(validate_point_set(&DataMatrix::zeros(0, 2), "source").is_err());
        assert!(validate_point_set(&DataMatrix::zeros(3, 3), "source").is_err());

        let mut pts = points_from_xy(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(validate_point_set(&pts, "target").is_ok());
        pts[(1, 1)] = f64::NAN;
        let err = validate_point_set(&pts, "target").unwrap_err();
        assert!(err.to_string().contains("target point 1"));
    }
}
