//! Model-size selection by cross-validation.
//!
//! - **Folds**: random row permutation cut into contiguous blocks
//! - **PRESS**: prediction error sums for every requested number of latent variables
//!
//! # Example
//!
//! ```rust,ignore
//! use pls_rs::core::CrossValidationOptions;
//! use pls_rs::evaluation::crossval_pls;
//!
//! let options = CrossValidationOptions::builder()
//!     .lvs(&[0, 1, 2, 3, 4, 5])
//!     .blocks(10)
//!     .seed(42)
//!     .build()?;
//!
//! let cv = crossval_pls(&x, &y, &options)?;
//! println!("best model: {:?} latent variables", cv.best_lv());
//! ```

mod crossval;
mod folds;

pub use crossval::{crossval_pls, crossval_pls_with_plot, crossval_pls_with_rng};
pub use folds::FoldPartition;
