//! Variable leverages from the PLS weight structure.

use crate::core::{
    normalize_latent_variables, LeverageOptions, LeveragePlot, LeverageResult,
};
use crate::solvers::{CrossProductFit, KernelPls, PlsError};
use crate::utils::{cross_product, numerical_rank, preprocess};
use faer::{Col, Mat};
use log::debug;

/// Diagonal of W W': the squared weights of each variable summed over components.
fn weight_leverage(weights: &Mat<f64>) -> Col<f64> {
    Col::from_fn(weights.nrows(), |j| {
        (0..weights.ncols()).map(|a| weights[(j, a)].powi(2)).sum()
    })
}

fn check_annotation_len(what: &'static str, len: Option<usize>, m: usize) -> Result<(), PlsError> {
    match len {
        Some(got) if got != m => Err(PlsError::DimensionMismatch {
            what,
            expected: m,
            got,
        }),
        _ => Ok(()),
    }
}

/// Compute the leverage of every predictor variable in a PLS model.
///
/// The full data set is preprocessed once, kernel PLS is fit with `max(lvs)`
/// components and the leverage of variable `j` is `sum_a W[j, a]^2`. Zero
/// entries in `lvs` are dropped.
///
/// # Properties
/// - leverages are non-negative
/// - they sum to the number of extracted components (weights have unit norm)
pub fn leverages_pls(
    x: &Mat<f64>,
    y: &Mat<f64>,
    options: &LeverageOptions,
) -> Result<LeverageResult, PlsError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(PlsError::MissingInput("predictor matrix is empty"));
    }
    if y.nrows() != x.nrows() {
        return Err(PlsError::DimensionMismatch {
            what: "response rows",
            expected: x.nrows(),
            got: y.nrows(),
        });
    }
    if y.ncols() == 0 {
        return Err(PlsError::MissingInput("response matrix has no columns"));
    }
    options.validate()?;

    let m = x.ncols();
    check_annotation_len("variable labels", options.labels.as_ref().map(Vec::len), m)?;
    check_annotation_len("variable classes", options.classes.as_ref().map(Vec::len), m)?;

    let requested: Vec<usize> = match &options.lvs {
        Some(lvs) => normalize_latent_variables(lvs),
        None => (1..=numerical_rank(x, options.tolerance)).collect(),
    };

    let max_lv = match requested.iter().rev().find(|&&lv| lv > 0) {
        Some(&lv) => lv,
        None => return Err(PlsError::MissingInput("no non-zero latent-variable counts")),
    };

    let px = preprocess(x, options.prep_x);
    let py = preprocess(y, options.prep_y);

    let fitted = KernelPls::builder()
        .max_components(max_lv)
        .tolerance(options.tolerance)
        .build()
        .fit(
            &cross_product(&px.data, &px.data),
            &cross_product(&px.data, &py.data),
        )?;

    let leverages = weight_leverage(fitted.weights());
    debug!(
        "leverages from {} of {} components over {} variables",
        fitted.n_components(),
        max_lv,
        m
    );

    Ok(LeverageResult {
        leverages,
        max_components: max_lv,
        n_components: fitted.n_components(),
        labels: options.labels.clone(),
        classes: options.classes.clone(),
    })
}

/// Compute leverages and, when `options.plot` is set, pass them to `plot`.
pub fn leverages_pls_with_plot<P: LeveragePlot + ?Sized>(
    x: &Mat<f64>,
    y: &Mat<f64>,
    options: &LeverageOptions,
    plot: &mut P,
) -> Result<LeverageResult, PlsError> {
    let result = leverages_pls(x, y, options)?;
    if options.plot {
        plot.render_leverages(
            &result.leverages,
            result.labels.as_deref(),
            result.classes.as_deref(),
        );
    }
    Ok(result)
}

/// Identify high leverage variables.
///
/// Returns indices of variables with leverage > threshold.
/// Default threshold is twice the mean leverage.
pub fn high_leverage_variables(leverage: &Col<f64>, threshold: Option<f64>) -> Vec<usize> {
    let m = leverage.nrows();
    if m == 0 {
        return Vec::new();
    }
    let cutoff = threshold.unwrap_or_else(|| 2.0 * leverage.iter().sum::<f64>() / m as f64);

    leverage
        .iter()
        .enumerate()
        .filter(|(_, &h)| h > cutoff)
        .map(|(j, _)| j)
        .collect()
}
