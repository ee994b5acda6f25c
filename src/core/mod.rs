//! Core types: options, results and rendering hooks.

mod options;
mod plot;
mod result;

pub use options::{
    normalize_latent_variables, parse_latent_variables, CrossValidationOptions,
    CrossValidationOptionsBuilder, LeverageOptions, LeverageOptionsBuilder, OptionsError,
    PreprocessMode,
};
pub use plot::{LeveragePlot, PressPlot};
pub use result::{CrossValidationResult, LeverageResult};
