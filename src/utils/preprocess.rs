//! Column centering and scaling of data blocks.
//!
//! Training blocks are preprocessed with [`preprocess`], which returns the
//! center and scale vectors it used. Held-out rows must then be transformed
//! with [`apply_preprocessing`] using those same vectors, never with
//! statistics recomputed on the held-out data.

use crate::core::PreprocessMode;
use crate::solvers::PlsError;
use faer::{Col, Mat};
use statrs::statistics::Statistics;

/// A preprocessed block together with the transform that produced it.
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Centered (and possibly scaled) data.
    pub data: Mat<f64>,
    /// Value subtracted from each column.
    pub center: Col<f64>,
    /// Value each centered column was divided by.
    pub scale: Col<f64>,
}

/// Center and/or scale the columns of `x`.
///
/// - [`PreprocessMode::None`]: center 0, scale 1.
/// - [`PreprocessMode::MeanCenter`]: center = column means, scale 1.
/// - [`PreprocessMode::Autoscale`]: center = column means, scale = population
///   standard deviation of each column.
///
/// Columns with zero (or numerically negligible) spread get scale 1, so they
/// are centered but never divided by zero.
pub fn preprocess(x: &Mat<f64>, mode: PreprocessMode) -> Preprocessed {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let mut center = Col::zeros(n_cols);
    let mut scale = Col::from_fn(n_cols, |_| 1.0);

    if n_rows > 0 && mode != PreprocessMode::None {
        for j in 0..n_cols {
            let values: Vec<f64> = (0..n_rows).map(|i| x[(i, j)]).collect();
            let mean = values.iter().mean();
            center[j] = mean;

            if mode == PreprocessMode::Autoscale {
                let std = values.iter().population_std_dev();
                // Spread below the rounding error of the mean counts as constant
                if std.is_finite() && std > n_rows as f64 * f64::EPSILON * mean.abs() {
                    scale[j] = std;
                }
            }
        }
    }

    let data = Mat::from_fn(n_rows, n_cols, |i, j| (x[(i, j)] - center[j]) / scale[j]);

    Preprocessed {
        data,
        center,
        scale,
    }
}

/// Transform rows with a previously computed center and scale: `(row - center) / scale`.
pub fn apply_preprocessing(
    x: &Mat<f64>,
    center: &Col<f64>,
    scale: &Col<f64>,
) -> Result<Mat<f64>, PlsError> {
    if center.nrows() != x.ncols() {
        return Err(PlsError::DimensionMismatch {
            what: "center vector length",
            expected: x.ncols(),
            got: center.nrows(),
        });
    }
    if scale.nrows() != x.ncols() {
        return Err(PlsError::DimensionMismatch {
            what: "scale vector length",
            expected: x.ncols(),
            got: scale.nrows(),
        });
    }

    Ok(Mat::from_fn(x.nrows(), x.ncols(), |i, j| {
        (x[(i, j)] - center[j]) / scale[j]
    }))
}
