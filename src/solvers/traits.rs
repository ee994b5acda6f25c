//! Core traits and errors for PLS estimators.

use faer::Mat;
use thiserror::Error;

/// Errors that can occur while validating inputs or fitting a model.
#[derive(Debug, Error)]
pub enum PlsError {
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("dimension mismatch in {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("number of blocks must be in (2, {n}], got {blocks}")]
    InvalidBlocks { blocks: usize, n: usize },

    #[error("fold {fold} holds no samples")]
    EmptyFold { fold: usize },

    #[error("decomposition failed: {0}")]
    Decomposition(String),

    #[error("invalid options: {0}")]
    InvalidOptions(#[from] crate::core::OptionsError),
}

/// An estimator fit from cross-product matrices rather than raw data.
///
/// `sxx` is `X'X` (M x M) and `sxy` is `X'Y` (M x O), both built from
/// already preprocessed blocks.
pub trait CrossProductFit {
    /// The type of the fitted model.
    type Fitted;

    /// Fit the model to the cross-products.
    fn fit(&self, sxx: &Mat<f64>, sxy: &Mat<f64>) -> Result<Self::Fitted, PlsError>;
}
