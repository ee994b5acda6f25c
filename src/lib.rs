//! Partial least squares regression with cross-validated model selection.
//!
//! This library fits PLS2 models with the kernel algorithm, which works on the
//! cross-product matrices `X'X` and `X'Y` instead of the raw data, and uses it
//! to estimate the prediction error of every model size by row-wise k-fold
//! cross-validation. A leverage diagnostic ranks predictor variables by their
//! share of the extracted weights.
//!
//! # Example
//!
//! ```rust,ignore
//! use pls_rs::prelude::*;
//!
//! // Choose the number of latent variables
//! let options = CrossValidationOptions::builder()
//!     .lvs(&[0, 1, 2, 3, 4, 5])
//!     .blocks(10)
//!     .seed(7)
//!     .build()?;
//! let cv = crossval_pls(&x, &y, &options)?;
//! println!("PRESS: {:?}", cv.cumpress);
//!
//! // Inspect which variables drive a two-component model
//! let lev = leverages_pls(&x, &y, &LeverageOptions::builder().lvs(&[2]).build()?)?;
//! println!("leverages: {:?}", lev.leverages);
//! ```

pub mod core;
pub mod diagnostics;
pub mod evaluation;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        parse_latent_variables, CrossValidationOptions, CrossValidationOptionsBuilder,
        CrossValidationResult, LeverageOptions, LeverageOptionsBuilder, LeveragePlot,
        LeverageResult, OptionsError, PreprocessMode, PressPlot,
    };
    pub use crate::diagnostics::{high_leverage_variables, leverages_pls, leverages_pls_with_plot};
    pub use crate::evaluation::{
        crossval_pls, crossval_pls_with_plot, crossval_pls_with_rng, FoldPartition,
    };
    pub use crate::solvers::{
        fit_kernel_pls, CrossProductFit, FittedKernelPls, KernelPls, KernelPlsBuilder, PlsError,
    };
    pub use crate::utils::{apply_preprocessing, preprocess, Preprocessed};
}

pub use crate::core::{
    CrossValidationOptions, CrossValidationResult, LeverageOptions, LeverageResult,
    PreprocessMode,
};
pub use crate::diagnostics::leverages_pls;
pub use crate::evaluation::crossval_pls;
pub use crate::solvers::{fit_kernel_pls, FittedKernelPls, KernelPls, PlsError};
