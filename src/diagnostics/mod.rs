//! Variable diagnostics for PLS models.
//!
//! - **Leverage**: how strongly each predictor variable takes part in the
//!   extracted weight structure, `diag(W W')`
//!
//! # Example
//!
//! ```rust,ignore
//! use pls_rs::core::LeverageOptions;
//! use pls_rs::diagnostics::{high_leverage_variables, leverages_pls};
//!
//! let options = LeverageOptions::builder().lvs(&[2]).build()?;
//! let result = leverages_pls(&x, &y, &options)?;
//! let influential = high_leverage_variables(&result.leverages, None);
//! ```

mod leverage;

pub use leverage::{high_leverage_variables, leverages_pls, leverages_pls_with_plot};
