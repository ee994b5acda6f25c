//! Cross-validation and leverage result structures.

use faer::{Col, Mat};

/// PRESS curves produced by [`crossval_pls`](crate::evaluation::crossval_pls).
///
/// Rows are indexed by latent-variable count: row `a` holds the statistics of
/// the model with `a` components, row 0 the mean-only model. Rows for counts
/// that were not requested stay zero.
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    /// Cumulative PRESS (summed over responses), length `max(lvs) + 1`.
    pub cumpress: Col<f64>,

    /// PRESS per response variable, `(max(lvs) + 1) x n_responses`.
    pub press: Mat<f64>,

    /// Evaluated latent-variable counts, ascending and deduplicated.
    pub lvs: Vec<usize>,

    /// Number of blocks the rows were split into.
    pub blocks: usize,

    /// Components actually extracted in each fold. A value below `max(lvs)`
    /// means the training cross-products became rank deficient.
    pub fold_components: Vec<usize>,
}

impl CrossValidationResult {
    /// Largest evaluated latent-variable count.
    pub fn max_lv(&self) -> usize {
        self.cumpress.nrows().saturating_sub(1)
    }

    /// Cumulative PRESS for `lv` components, if that count was evaluated.
    pub fn cumpress_for(&self, lv: usize) -> Option<f64> {
        self.lvs.binary_search(&lv).ok().map(|_| self.cumpress[lv])
    }

    /// Per-response PRESS for `lv` components, if that count was evaluated.
    pub fn press_for(&self, lv: usize) -> Option<Col<f64>> {
        self.lvs
            .binary_search(&lv)
            .ok()
            .map(|_| Col::from_fn(self.press.ncols(), |k| self.press[(lv, k)]))
    }

    /// Evaluated count with the smallest cumulative PRESS (smallest count on ties).
    pub fn best_lv(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &lv in &self.lvs {
            match best {
                Some(b) if self.cumpress[lv] >= self.cumpress[b] => {}
                _ => best = Some(lv),
            }
        }
        best
    }

    /// True when any fold extracted fewer components than requested.
    pub fn is_degraded(&self) -> bool {
        let max_lv = self.max_lv();
        self.fold_components.iter().any(|&a| a < max_lv)
    }
}

/// Variable leverages produced by [`leverages_pls`](crate::diagnostics::leverages_pls).
#[derive(Debug, Clone)]
pub struct LeverageResult {
    /// Leverage of each predictor variable, `diag(W W')`.
    pub leverages: Col<f64>,

    /// Components requested (`max(lvs)`).
    pub max_components: usize,

    /// Components actually extracted.
    pub n_components: usize,

    /// Variable labels, if supplied.
    pub labels: Option<Vec<String>>,

    /// Variable classes, if supplied.
    pub classes: Option<Vec<usize>>,
}

impl LeverageResult {
    /// True when fewer components were extracted than requested.
    pub fn is_degraded(&self) -> bool {
        self.n_components < self.max_components
    }
}
