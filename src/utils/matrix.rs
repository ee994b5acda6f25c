//! Matrix utility functions.

use crate::solvers::PlsError;
use faer::{Col, Mat, Side};

/// Compute the cross-product matrix A'B.
pub fn cross_product(a: &Mat<f64>, b: &Mat<f64>) -> Mat<f64> {
    a.transpose() * b
}

/// Gather the given rows of a matrix, in the order listed.
pub fn select_rows(x: &Mat<f64>, rows: &[usize]) -> Mat<f64> {
    Mat::from_fn(rows.len(), x.ncols(), |i, j| x[(rows[i], j)])
}

/// Copy a single column of a matrix.
pub fn column(x: &Mat<f64>, j: usize) -> Col<f64> {
    Col::from_fn(x.nrows(), |i| x[(i, j)])
}

/// Euclidean norm of a vector.
pub fn norm(v: &Col<f64>) -> f64 {
    v.iter().map(|&x| x * x).sum::<f64>().sqrt()
}

/// Frobenius norm of a matrix.
pub fn frobenius_norm(x: &Mat<f64>) -> f64 {
    let mut sum = 0.0;
    for j in 0..x.ncols() {
        for i in 0..x.nrows() {
            sum += x[(i, j)].powi(2);
        }
    }
    sum.sqrt()
}

/// Sum of the diagonal of a square matrix.
pub fn trace(x: &Mat<f64>) -> f64 {
    (0..x.nrows().min(x.ncols())).map(|i| x[(i, i)]).sum()
}

/// Numerical rank of a matrix from the diagonal of its column-pivoted QR factor.
///
/// A diagonal entry counts towards the rank when its magnitude exceeds
/// `tolerance` times the magnitude of the leading entry.
pub fn numerical_rank(x: &Mat<f64>, tolerance: f64) -> usize {
    let k = x.nrows().min(x.ncols());
    if k == 0 {
        return 0;
    }

    let qr = x.col_piv_qr();
    let r = qr.R();

    let lead = r[(0, 0)].abs();
    if lead == 0.0 || !lead.is_finite() {
        return 0;
    }

    let mut rank = 0;
    for i in 0..k {
        if r[(i, i)].abs() > tolerance * lead {
            rank += 1;
        } else {
            break;
        }
    }
    rank
}

/// Eigenpair with the largest eigenvalue of a symmetric matrix.
///
/// Returns `(eigenvalue, unit eigenvector)`. On ties the lowest index in
/// faer's ordering wins.
pub fn dominant_eigenvector(s: &Mat<f64>) -> Result<(f64, Col<f64>), PlsError> {
    let n = s.nrows();
    if n == 0 {
        return Ok((0.0, Col::zeros(0)));
    }

    let eig = s
        .self_adjoint_eigen(Side::Lower)
        .map_err(|err| PlsError::Decomposition(format!("self-adjoint eigen: {err:?}")))?;
    let values = eig.S();
    let vectors = eig.U();

    let mut best = 0;
    for i in 1..n {
        if values[i] > values[best] {
            best = i;
        }
    }

    Ok((values[best], Col::from_fn(n, |i| vectors[(i, best)])))
}
