//! Row-wise k-fold cross-validation of kernel PLS models.
//!
//! ## Purpose
//!
//! Estimates the prediction error (PRESS) of PLS models of every requested
//! size so the number of latent variables can be chosen.
//!
//! ## Procedure
//!
//! 1. Shuffle the rows and cut them into `blocks` contiguous folds.
//! 2. For each fold, preprocess the calibration rows and apply the same
//!    center and scale to the held-out rows.
//! 3. Fit kernel PLS once with `max(lvs)` components on the calibration
//!    cross-products.
//! 4. For each requested count, predict the held-out responses and add the
//!    squared residuals to that count's PRESS. Zero components predicts the
//!    calibration mean, i.e. the residual is the preprocessed held-out block.
//!
//! ## Invariants
//!
//! * Calibration and held-out rows are disjoint in each fold.
//! * Held-out rows never influence the preprocessing or the model.
//! * Folds are accumulated in order, so a fixed seed gives bit-identical output.

use crate::core::{
    normalize_latent_variables, CrossValidationOptions, CrossValidationResult, PressPlot,
};
use crate::evaluation::folds::FoldPartition;
use crate::solvers::{CrossProductFit, KernelPls, PlsError};
use crate::utils::{
    apply_preprocessing, cross_product, numerical_rank, preprocess, select_rows,
};
use faer::{Col, Mat};
use log::{debug, warn};
use rand::Rng;

/// Inputs checked and defaults resolved against the data.
struct Plan {
    lvs: Vec<usize>,
    blocks: usize,
}

fn validate_blocks(x: &Mat<f64>, y: &Mat<f64>) -> Result<(), PlsError> {
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
    Ok(())
}

fn plan(
    x: &Mat<f64>,
    y: &Mat<f64>,
    options: &CrossValidationOptions,
) -> Result<Plan, PlsError> {
    validate_blocks(x, y)?;

    let n = x.nrows();
    let blocks = options.blocks.unwrap_or(n);
    if blocks <= 2 || blocks > n {
        return Err(PlsError::InvalidBlocks { blocks, n });
    }
    options.validate()?;

    let lvs = match &options.lvs {
        Some(lvs) => normalize_latent_variables(lvs),
        None => (0..=numerical_rank(x, options.tolerance)).collect(),
    };
    if lvs.is_empty() {
        return Err(PlsError::MissingInput("no latent-variable counts to evaluate"));
    }

    Ok(Plan { lvs, blocks })
}

/// Cross-validate kernel PLS models of the requested sizes.
///
/// The fold permutation is drawn from `options.seed` when set, otherwise from
/// OS entropy.
///
/// # Errors
///
/// * [`PlsError::MissingInput`] for empty matrices or an empty `lvs`.
/// * [`PlsError::DimensionMismatch`] when `y` and `x` differ in rows.
/// * [`PlsError::InvalidBlocks`] when `blocks` is not in `(2, n]`.
/// * [`PlsError::InvalidOptions`] for a non-positive tolerance.
pub fn crossval_pls(
    x: &Mat<f64>,
    y: &Mat<f64>,
    options: &CrossValidationOptions,
) -> Result<CrossValidationResult, PlsError> {
    crossval_pls_with_rng(x, y, options, &mut options.rng())
}

/// Cross-validate with a caller-supplied random source and, when
/// `options.plot` is set, pass the PRESS curve to `plot`.
///
/// Use [`CrossValidationOptions::rng`] to draw the permutation from
/// `options.seed`.
pub fn crossval_pls_with_plot<R, P>(
    x: &Mat<f64>,
    y: &Mat<f64>,
    options: &CrossValidationOptions,
    rng: &mut R,
    plot: &mut P,
) -> Result<CrossValidationResult, PlsError>
where
    R: Rng + ?Sized,
    P: PressPlot + ?Sized,
{
    let result = crossval_pls_with_rng(x, y, options, rng)?;
    if options.plot {
        plot.render_press(&result.cumpress, &result.lvs);
    }
    Ok(result)
}

/// Cross-validate using a caller-supplied random source for the fold permutation.
///
/// `options.seed` is ignored.
pub fn crossval_pls_with_rng<R: Rng + ?Sized>(
    x: &Mat<f64>,
    y: &Mat<f64>,
    options: &CrossValidationOptions,
    rng: &mut R,
) -> Result<CrossValidationResult, PlsError> {
    let Plan { lvs, blocks } = plan(x, y, options)?;

    let n = x.nrows();
    let o = y.ncols();
    let max_lv = lvs[lvs.len() - 1];

    let partition = FoldPartition::random(n, blocks, rng)?;
    let model = KernelPls::builder()
        .max_components(max_lv)
        .tolerance(options.tolerance)
        .build();

    let mut press = Mat::zeros(max_lv + 1, o);
    let mut fold_components = Vec::with_capacity(blocks);

    for fold in 0..blocks {
        let test_rows = partition.fold(fold);
        let train_rows = partition.training(fold);

        let calibration_x = preprocess(&select_rows(x, &train_rows), options.prep_x);
        let calibration_y = preprocess(&select_rows(y, &train_rows), options.prep_y);

        let test_x = apply_preprocessing(
            &select_rows(x, test_rows),
            &calibration_x.center,
            &calibration_x.scale,
        )?;
        let test_y = apply_preprocessing(
            &select_rows(y, test_rows),
            &calibration_y.center,
            &calibration_y.scale,
        )?;

        let sxx = cross_product(&calibration_x.data, &calibration_x.data);
        let sxy = cross_product(&calibration_x.data, &calibration_y.data);
        let fitted = model.fit(&sxx, &sxy)?;

        if fitted.is_degraded() {
            warn!(
                "fold {}: only {} of {} latent variables could be extracted",
                fold,
                fitted.n_components(),
                max_lv
            );
        }
        fold_components.push(fitted.n_components());

        for &lv in &lvs {
            let residuals = if lv == 0 {
                test_y.clone()
            } else {
                &test_y - &fitted.predict(&test_x, lv)?
            };
            for k in 0..o {
                let sq: f64 = (0..residuals.nrows())
                    .map(|i| residuals[(i, k)].powi(2))
                    .sum();
                press[(lv, k)] += sq;
            }
        }

        debug!(
            "fold {}/{}: {} held out, {} calibration rows",
            fold + 1,
            blocks,
            test_rows.len(),
            train_rows.len()
        );
    }

    let cumpress = Col::from_fn(max_lv + 1, |lv| (0..o).map(|k| press[(lv, k)]).sum());

    Ok(CrossValidationResult {
        cumpress,
        press,
        lvs,
        blocks,
        fold_components,
    })
}
