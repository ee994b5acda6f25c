//! Rendering hooks.
//!
//! The crate draws nothing itself. Callers that want a PRESS curve or a
//! leverage chart implement one of these traits and pass it to
//! [`crossval_pls_with_plot`](crate::evaluation::crossval_pls_with_plot) or
//! [`leverages_pls_with_plot`](crate::diagnostics::leverages_pls_with_plot).

use faer::Col;

/// Receives the cumulative PRESS curve after cross-validation.
pub trait PressPlot {
    /// `cumpress` is indexed by latent-variable count; `lvs` lists the counts
    /// that were actually evaluated.
    fn render_press(&mut self, cumpress: &Col<f64>, lvs: &[usize]);
}

/// Receives per-variable leverages.
pub trait LeveragePlot {
    fn render_leverages(
        &mut self,
        leverages: &Col<f64>,
        labels: Option<&[String]>,
        classes: Option<&[usize]>,
    );
}

impl<F> PressPlot for F
where
    F: FnMut(&Col<f64>, &[usize]),
{
    fn render_press(&mut self, cumpress: &Col<f64>, lvs: &[usize]) {
        self(cumpress, lvs)
    }
}
