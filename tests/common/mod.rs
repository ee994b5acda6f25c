//! Common test utilities and data generators.

#![allow(dead_code)]

use faer::Mat;

/// Simple deterministic "random" stream in [-1, 1] for reproducibility.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) as f64) / (u32::MAX as f64) * 2.0 - 1.0
    }
}

/// Generate X (n x m, uniform) and Y = X[:, ..2] + noise (n x 2).
pub fn generate_two_factor_data(
    n_samples: usize,
    n_features: usize,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Mat<f64>) {
    let mut rng = Lcg::new(seed);

    let mut x = Mat::zeros(n_samples, n_features);
    for i in 0..n_samples {
        for j in 0..n_features {
            x[(i, j)] = rng.next();
        }
    }

    let mut y = Mat::zeros(n_samples, 2);
    for i in 0..n_samples {
        for k in 0..2 {
            y[(i, k)] = x[(i, k)] + noise_std * rng.next();
        }
    }

    (x, y)
}

/// Generate X (n x m) from cosine basis columns, which are exactly orthogonal
/// and zero-mean, and Y = X[:, ..2] + noise (n x 2).
pub fn generate_cosine_two_factor_data(
    n_samples: usize,
    n_features: usize,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Mat<f64>) {
    let mut rng = Lcg::new(seed);
    let n = n_samples as f64;

    let x = Mat::from_fn(n_samples, n_features, |i, j| {
        (std::f64::consts::PI * (j + 1) as f64 * (i as f64 + 0.5) / n).cos()
    });

    let mut y = Mat::zeros(n_samples, 2);
    for i in 0..n_samples {
        for k in 0..2 {
            y[(i, k)] = x[(i, k)] + noise_std * rng.next();
        }
    }

    (x, y)
}

/// Generate X (n x m) and Y = X B + noise where B (m x o) has the given rank.
pub fn generate_low_rank_data(
    n_samples: usize,
    n_features: usize,
    n_responses: usize,
    rank: usize,
    noise_std: f64,
    seed: u64,
) -> (Mat<f64>, Mat<f64>) {
    let mut rng = Lcg::new(seed);

    let mut x = Mat::zeros(n_samples, n_features);
    for i in 0..n_samples {
        for j in 0..n_features {
            x[(i, j)] = rng.next();
        }
    }

    // B = U V' with U (m x rank), V (o x rank)
    let u = Mat::from_fn(n_features, rank, |_, _| rng.next());
    let v = Mat::from_fn(n_responses, rank, |_, _| rng.next());
    let b = &u * v.transpose();

    let mut y = &x * &b;
    for i in 0..n_samples {
        for k in 0..n_responses {
            y[(i, k)] += noise_std * rng.next();
        }
    }

    (x, y)
}

/// Subtract column means.
pub fn center(x: &Mat<f64>) -> Mat<f64> {
    let n = x.nrows();
    let means: Vec<f64> = (0..x.ncols())
        .map(|j| (0..n).map(|i| x[(i, j)]).sum::<f64>() / n as f64)
        .collect();
    Mat::from_fn(n, x.ncols(), |i, j| x[(i, j)] - means[j])
}
