//! Matrix helpers and block preprocessing.

mod matrix;
mod preprocess;

pub use matrix::{
    column, cross_product, dominant_eigenvector, frobenius_norm, norm, numerical_rank,
    select_rows, trace,
};
pub use preprocess::{apply_preprocessing, preprocess, Preprocessed};
