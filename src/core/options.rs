//! Cross-validation and leverage options.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Column preprocessing applied to a data block.
///
/// The numeric codes (0, 1, 2) are accepted through `TryFrom<u8>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreprocessMode {
    /// Leave the data untouched (center 0, scale 1).
    None,
    /// Subtract column means.
    MeanCenter,
    /// Subtract column means and divide by column standard deviations (default).
    #[default]
    Autoscale,
}

impl TryFrom<u8> for PreprocessMode {
    type Error = OptionsError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PreprocessMode::None),
            1 => Ok(PreprocessMode::MeanCenter),
            2 => Ok(PreprocessMode::Autoscale),
            other => Err(OptionsError::InvalidPreprocessMode(other)),
        }
    }
}

/// Errors that can occur when validating options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("preprocessing mode must be 0, 1 or 2, got {0}")]
    InvalidPreprocessMode(u8),
    #[error("latent variable counts must be non-negative integers, got {0}")]
    InvalidLatentVariable(f64),
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
}

/// Convert floating-point latent-variable counts into a deduplicated,
/// ascending list.
///
/// Fails on negative, fractional or non-finite entries.
pub fn parse_latent_variables(values: &[f64]) -> Result<Vec<usize>, OptionsError> {
    let mut lvs = Vec::with_capacity(values.len());
    for &value in values {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
            return Err(OptionsError::InvalidLatentVariable(value));
        }
        lvs.push(value as usize);
    }
    Ok(normalize_latent_variables(&lvs))
}

/// Sort and deduplicate latent-variable counts.
pub fn normalize_latent_variables(lvs: &[usize]) -> Vec<usize> {
    let mut sorted = lvs.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

fn validate_tolerance(tolerance: f64) -> Result<(), OptionsError> {
    if !(tolerance > 0.0 && tolerance.is_finite()) {
        return Err(OptionsError::InvalidTolerance(tolerance));
    }
    Ok(())
}

/// Configuration for [`crossval_pls`](crate::evaluation::crossval_pls).
#[derive(Debug, Clone)]
pub struct CrossValidationOptions {
    /// Latent-variable counts to evaluate (default: `0..=rank(X)`).
    pub lvs: Option<Vec<usize>>,
    /// Number of row-wise blocks (default: number of rows, i.e. leave-one-out).
    pub blocks: Option<usize>,
    /// Preprocessing of the predictor block (default: autoscale).
    pub prep_x: PreprocessMode,
    /// Preprocessing of the response block (default: autoscale).
    pub prep_y: PreprocessMode,
    /// Whether to hand the PRESS curve to a plot hook (default: false).
    pub plot: bool,
    /// Seed for the fold permutation. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Relative tolerance for rank detection in the kernel algorithm.
    pub tolerance: f64,
}

impl Default for CrossValidationOptions {
    fn default() -> Self {
        Self {
            lvs: None,
            blocks: None,
            prep_x: PreprocessMode::Autoscale,
            prep_y: PreprocessMode::Autoscale,
            plot: false,
            seed: None,
            tolerance: 1e-10,
        }
    }
}

impl CrossValidationOptions {
    /// Create a new builder for cross-validation options.
    pub fn builder() -> CrossValidationOptionsBuilder {
        CrossValidationOptionsBuilder::default()
    }

    /// Validate the options that do not depend on the data.
    ///
    /// The block count is checked against the number of rows at call time.
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_tolerance(self.tolerance)
    }

    /// Random source for the fold permutation: seeded from `seed` when set,
    /// otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Builder for `CrossValidationOptions`.
#[derive(Debug, Clone, Default)]
pub struct CrossValidationOptionsBuilder {
    options: CrossValidationOptions,
}

impl CrossValidationOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latent-variable counts to evaluate. Duplicates are removed.
    pub fn lvs(mut self, lvs: &[usize]) -> Self {
        self.options.lvs = Some(normalize_latent_variables(lvs));
        self
    }

    /// Set the number of row-wise blocks.
    pub fn blocks(mut self, blocks: usize) -> Self {
        self.options.blocks = Some(blocks);
        self
    }

    /// Set the preprocessing of the predictor block.
    pub fn prep_x(mut self, mode: PreprocessMode) -> Self {
        self.options.prep_x = mode;
        self
    }

    /// Set the preprocessing of the response block.
    pub fn prep_y(mut self, mode: PreprocessMode) -> Self {
        self.options.prep_y = mode;
        self
    }

    /// Enable or disable the plot hook.
    pub fn plot(mut self, plot: bool) -> Self {
        self.options.plot = plot;
        self
    }

    /// Fix the seed of the fold permutation.
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    /// Set the rank tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.options.tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<CrossValidationOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> CrossValidationOptions {
        self.options
    }
}

/// Configuration for [`leverages_pls`](crate::diagnostics::leverages_pls).
#[derive(Debug, Clone)]
pub struct LeverageOptions {
    /// Latent-variable counts (default: `1..=rank(X)`). Zeros are ignored.
    pub lvs: Option<Vec<usize>>,
    /// Preprocessing of the predictor block (default: autoscale).
    pub prep_x: PreprocessMode,
    /// Preprocessing of the response block (default: autoscale).
    pub prep_y: PreprocessMode,
    /// Whether to hand the leverages to a plot hook (default: false).
    pub plot: bool,
    /// Optional variable labels, one per predictor column.
    pub labels: Option<Vec<String>>,
    /// Optional variable classes, one per predictor column.
    pub classes: Option<Vec<usize>>,
    /// Relative tolerance for rank detection in the kernel algorithm.
    pub tolerance: f64,
}

impl Default for LeverageOptions {
    fn default() -> Self {
        Self {
            lvs: None,
            prep_x: PreprocessMode::Autoscale,
            prep_y: PreprocessMode::Autoscale,
            plot: false,
            labels: None,
            classes: None,
            tolerance: 1e-10,
        }
    }
}

impl LeverageOptions {
    /// Create a new builder for leverage options.
    pub fn builder() -> LeverageOptionsBuilder {
        LeverageOptionsBuilder::default()
    }

    /// Validate the options that do not depend on the data.
    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_tolerance(self.tolerance)
    }
}

/// Builder for `LeverageOptions`.
#[derive(Debug, Clone, Default)]
pub struct LeverageOptionsBuilder {
    options: LeverageOptions,
}

impl LeverageOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latent-variable counts. Duplicates are removed.
    pub fn lvs(mut self, lvs: &[usize]) -> Self {
        self.options.lvs = Some(normalize_latent_variables(lvs));
        self
    }

    /// Set the preprocessing of the predictor block.
    pub fn prep_x(mut self, mode: PreprocessMode) -> Self {
        self.options.prep_x = mode;
        self
    }

    /// Set the preprocessing of the response block.
    pub fn prep_y(mut self, mode: PreprocessMode) -> Self {
        self.options.prep_y = mode;
        self
    }

    /// Enable or disable the plot hook.
    pub fn plot(mut self, plot: bool) -> Self {
        self.options.plot = plot;
        self
    }

    /// Attach variable labels.
    pub fn labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.options.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Attach variable classes.
    pub fn classes(mut self, classes: &[usize]) -> Self {
        self.options.classes = Some(classes.to_vec());
        self
    }

    /// Set the rank tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.options.tolerance = tol;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<LeverageOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> LeverageOptions {
        self.options
    }
}
