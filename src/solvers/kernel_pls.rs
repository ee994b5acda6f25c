//! Kernel Partial Least Squares (PLS) regression.
//!
//! Fits PLS2 models directly from the cross-product matrices `X'X` and `X'Y`,
//! so the cost of each component is independent of the number of samples.
//! This makes the algorithm a good fit for cross-validation, where a model is
//! refit for every held-out block.
//!
//! # Algorithm
//!
//! The modified kernel algorithm of Dayal & MacGregor. For component `a`:
//!
//! 1. `w` is the dominant left singular direction of the residual `X'Y`
//!    (for a single response, `X'Y` itself), normalized to unit length.
//! 2. `r = w - sum_i (p_i' w) r_i` makes the implied scores `X r` orthogonal
//!    to the previous ones.
//! 3. `tt = r' X'X r`, `p = X'X r / tt`, `q = (X'Y)' r / tt`.
//! 4. `X'Y <- X'Y - tt p q'`. Only `X'Y` is deflated.
//!
//! Coefficients for any `a` up to the number of extracted components are
//! `R[:, ..a] Q[:, ..a]'`, so a single fit serves every model size.
//!
//! # References
//!
//! - Dayal, B. S. & MacGregor, J. F. (1997). Improved PLS algorithms.
//!   Journal of Chemometrics, 11, 73-85.
//! - Lindgren, F., Geladi, P. & Wold, S. (1993). The kernel algorithm for PLS.
//!   Journal of Chemometrics, 7, 45-59.

use crate::solvers::traits::{CrossProductFit, PlsError};
use crate::utils::{column, cross_product, dominant_eigenvector, frobenius_norm, norm, trace};
use faer::{Col, Mat};
use log::{debug, warn};

/// Kernel PLS estimator.
///
/// # Example
///
/// ```rust,ignore
/// use pls_rs::solvers::{CrossProductFit, KernelPls};
/// use pls_rs::utils::cross_product;
///
/// let sxx = cross_product(&xc, &xc);
/// let sxy = cross_product(&xc, &yc);
///
/// let fitted = KernelPls::builder()
///     .max_components(5)
///     .build()
///     .fit(&sxx, &sxy)?;
///
/// let beta_3 = fitted.coefficients(3);
/// ```
#[derive(Debug, Clone)]
pub struct KernelPls {
    /// Maximum number of latent variables to extract
    max_components: usize,
    /// Relative tolerance for rank detection
    tolerance: f64,
}

impl KernelPls {
    /// Create a new estimator extracting at most `max_components` components.
    pub fn new(max_components: usize) -> Self {
        Self {
            max_components,
            tolerance: 1e-10,
        }
    }

    /// Create a builder for configuring the estimator.
    pub fn builder() -> KernelPlsBuilder {
        KernelPlsBuilder::default()
    }

    /// Fit from preprocessed data blocks instead of precomputed cross-products.
    pub fn fit_blocks(&self, x: &Mat<f64>, y: &Mat<f64>) -> Result<FittedKernelPls, PlsError> {
        if x.nrows() != y.nrows() {
            return Err(PlsError::DimensionMismatch {
                what: "response rows",
                expected: x.nrows(),
                got: y.nrows(),
            });
        }
        self.fit(&cross_product(x, x), &cross_product(x, y))
    }

    /// Unnormalized weight direction for the current residual `X'Y`.
    fn weight_direction(sxy: &Mat<f64>) -> Result<Col<f64>, PlsError> {
        let m = sxy.nrows();
        let o = sxy.ncols();

        if o == 1 {
            return Ok(column(sxy, 0));
        }

        // Dominant eigenvector of (X'Y)'(X'Y) mapped back to predictor space
        let syy = cross_product(sxy, sxy);
        let (_, c) = dominant_eigenvector(&syy)?;
        Ok(Col::from_fn(m, |j| (0..o).map(|k| sxy[(j, k)] * c[k]).sum()))
    }
}

/// Flip `w` so that its largest-magnitude entry is positive (first index on ties).
fn orient(w: &mut Col<f64>) {
    let mut lead = 0;
    for j in 1..w.nrows() {
        if w[j].abs() > w[lead].abs() {
            lead = j;
        }
    }
    if w.nrows() > 0 && w[lead] < 0.0 {
        for j in 0..w.nrows() {
            w[j] = -w[j];
        }
    }
}

fn validate_cross_products(sxx: &Mat<f64>, sxy: &Mat<f64>) -> Result<(), PlsError> {
    let m = sxx.nrows();
    if m == 0 {
        return Err(PlsError::MissingInput("predictor cross-product is empty"));
    }
    if sxx.ncols() != m {
        return Err(PlsError::DimensionMismatch {
            what: "X'X columns",
            expected: m,
            got: sxx.ncols(),
        });
    }
    if sxy.nrows() != m {
        return Err(PlsError::DimensionMismatch {
            what: "X'Y rows",
            expected: m,
            got: sxy.nrows(),
        });
    }
    if sxy.ncols() == 0 {
        return Err(PlsError::MissingInput("response cross-product is empty"));
    }
    Ok(())
}

impl CrossProductFit for KernelPls {
    type Fitted = FittedKernelPls;

    fn fit(&self, sxx: &Mat<f64>, sxy: &Mat<f64>) -> Result<Self::Fitted, PlsError> {
        validate_cross_products(sxx, sxy)?;

        let m = sxx.nrows();
        let o = sxy.ncols();
        let a_max = self.max_components;

        let mut weights = Mat::zeros(m, a_max); // W: m x a_max
        let mut x_loadings = Mat::zeros(m, a_max); // P: m x a_max
        let mut y_loadings = Mat::zeros(o, a_max); // Q: o x a_max
        let mut rotations = Mat::zeros(m, a_max); // R: m x a_max

        let mut sxy_res = sxy.clone();

        // Rank floors are relative to the size of the cross-products
        let sxy_size = frobenius_norm(sxy);
        let sxx_size = trace(sxx).abs();
        let extractable = sxy_size.is_finite()
            && sxy_size > 0.0
            && sxx_size.is_finite()
            && sxx_size > 0.0;
        let w_floor = self.tolerance * sxy_size;
        let tt_floor = self.tolerance * sxx_size;
        let limit = if extractable { a_max } else { 0 };

        let mut n_components = 0;

        for a in 0..limit {
            let mut w = Self::weight_direction(&sxy_res)?;
            let w_norm = norm(&w);
            if !(w_norm > w_floor) {
                break;
            }
            for j in 0..m {
                w[j] /= w_norm;
            }
            orient(&mut w);

            // Orthogonalize against previous components
            let mut r = w.clone();
            for i in 0..a {
                let pw: f64 = (0..m).map(|j| x_loadings[(j, i)] * w[j]).sum();
                for j in 0..m {
                    r[j] -= pw * rotations[(j, i)];
                }
            }

            let sxx_r = Col::from_fn(m, |j| (0..m).map(|k| sxx[(j, k)] * r[k]).sum::<f64>());
            let tt: f64 = (0..m).map(|j| r[j] * sxx_r[j]).sum();
            if !(tt > tt_floor) {
                break;
            }

            for j in 0..m {
                weights[(j, a)] = w[j];
                rotations[(j, a)] = r[j];
                x_loadings[(j, a)] = sxx_r[j] / tt;
            }
            for k in 0..o {
                let rq: f64 = (0..m).map(|j| r[j] * sxy_res[(j, k)]).sum();
                y_loadings[(k, a)] = rq / tt;
            }

            // Deflate X'Y
            for k in 0..o {
                for j in 0..m {
                    sxy_res[(j, k)] -= tt * x_loadings[(j, a)] * y_loadings[(k, a)];
                }
            }

            n_components = a + 1;
        }

        if n_components < a_max {
            warn!(
                "kernel PLS stopped after {} of {} components: cross-products are rank deficient",
                n_components, a_max
            );
        } else {
            debug!(
                "kernel PLS extracted {} components ({} predictors, {} responses)",
                n_components, m, o
            );
        }

        Ok(FittedKernelPls {
            n_components,
            max_components: a_max,
            weights,
            x_loadings,
            y_loadings,
            rotations,
        })
    }
}

/// Fit a kernel PLS model with default tolerance.
pub fn fit_kernel_pls(
    sxx: &Mat<f64>,
    sxy: &Mat<f64>,
    max_components: usize,
) -> Result<FittedKernelPls, PlsError> {
    KernelPls::new(max_components).fit(sxx, sxy)
}

/// A fitted kernel PLS model.
///
/// All matrices have `max_components` columns; columns past
/// `n_components` are zero.
#[derive(Debug, Clone)]
pub struct FittedKernelPls {
    /// Components actually extracted
    n_components: usize,
    /// Components requested
    max_components: usize,
    /// Weight matrix W (m x max_components)
    weights: Mat<f64>,
    /// X-loadings matrix P (m x max_components)
    x_loadings: Mat<f64>,
    /// Y-loadings matrix Q (o x max_components)
    y_loadings: Mat<f64>,
    /// Rotation matrix R = W (P'W)^-1 (m x max_components)
    rotations: Mat<f64>,
}

impl FittedKernelPls {
    /// Number of components extracted.
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Number of components requested.
    pub fn max_components(&self) -> usize {
        self.max_components
    }

    /// True when fewer components were extracted than requested.
    pub fn is_degraded(&self) -> bool {
        self.n_components < self.max_components
    }

    /// Number of predictor variables.
    pub fn n_features(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of response variables.
    pub fn n_responses(&self) -> usize {
        self.y_loadings.nrows()
    }

    /// Get the weight matrix W.
    pub fn weights(&self) -> &Mat<f64> {
        &self.weights
    }

    /// Get the X-loadings matrix P.
    pub fn x_loadings(&self) -> &Mat<f64> {
        &self.x_loadings
    }

    /// Get the Y-loadings matrix Q.
    pub fn y_loadings(&self) -> &Mat<f64> {
        &self.y_loadings
    }

    /// Get the rotation matrix R, which maps preprocessed X to scores: T = X R.
    pub fn rotations(&self) -> &Mat<f64> {
        &self.rotations
    }

    /// Regression coefficients (m x o) of the model with `n_components` components.
    ///
    /// Requests beyond the extracted count are clamped to it; zero components
    /// give an all-zero matrix.
    pub fn coefficients(&self, n_components: usize) -> Mat<f64> {
        let a = n_components.min(self.n_components);
        let m = self.n_features();
        let o = self.n_responses();

        Mat::from_fn(m, o, |j, k| {
            (0..a)
                .map(|c| self.rotations[(j, c)] * self.y_loadings[(k, c)])
                .sum()
        })
    }

    /// Coefficients of the full model.
    pub fn beta(&self) -> Mat<f64> {
        self.coefficients(self.n_components)
    }

    /// Predict preprocessed responses from preprocessed predictors.
    pub fn predict(&self, x: &Mat<f64>, n_components: usize) -> Result<Mat<f64>, PlsError> {
        self.check_features(x)?;
        let beta = self.coefficients(n_components);
        Ok(x * &beta)
    }

    /// Scores of preprocessed predictors: T = X R.
    pub fn transform(&self, x: &Mat<f64>) -> Result<Mat<f64>, PlsError> {
        self.check_features(x)?;
        let m = self.n_features();
        let a = self.n_components;

        Ok(Mat::from_fn(x.nrows(), a, |i, c| {
            (0..m).map(|j| x[(i, j)] * self.rotations[(j, c)]).sum()
        }))
    }

    fn check_features(&self, x: &Mat<f64>) -> Result<(), PlsError> {
        if x.ncols() != self.n_features() {
            return Err(PlsError::DimensionMismatch {
                what: "predictor columns",
                expected: self.n_features(),
                got: x.ncols(),
            });
        }
        Ok(())
    }
}

/// Builder for `KernelPls`.
#[derive(Debug, Clone)]
pub struct KernelPlsBuilder {
    max_components: usize,
    tolerance: f64,
}

impl Default for KernelPlsBuilder {
    fn default() -> Self {
        Self {
            max_components: 2,
            tolerance: 1e-10,
        }
    }
}

impl KernelPlsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of latent components to extract.
    ///
    /// Default is 2. Fewer are extracted if the cross-products run out of rank.
    pub fn max_components(mut self, n: usize) -> Self {
        self.max_components = n;
        self
    }

    /// Set the relative tolerance for rank detection.
    ///
    /// Default is 1e-10.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Build the estimator.
    pub fn build(self) -> KernelPls {
        KernelPls {
            max_components: self.max_components,
            tolerance: self.tolerance,
        }
    }
}
