//! Row-wise partitioning of samples into cross-validation blocks.

use crate::solvers::PlsError;
use rand::seq::SliceRandom;
use rand::Rng;

/// A permutation of sample indices cut into contiguous blocks.
///
/// Block `i` (0-based) covers positions `round(i N / k) .. round((i + 1) N / k)`
/// of the permutation, with halves rounded away from zero. Block sizes differ
/// by at most one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldPartition {
    permutation: Vec<usize>,
    bounds: Vec<usize>,
}

/// `round(i * n / k)` in exact integer arithmetic.
fn boundary(i: usize, n: usize, k: usize) -> usize {
    (2 * i * n + k) / (2 * k)
}

impl FoldPartition {
    /// Cut an existing permutation of `0..n` into `blocks` folds.
    pub fn new(permutation: Vec<usize>, blocks: usize) -> Result<Self, PlsError> {
        let n = permutation.len();
        if blocks <= 2 || blocks > n {
            return Err(PlsError::InvalidBlocks { blocks, n });
        }

        let bounds: Vec<usize> = (0..=blocks).map(|i| boundary(i, n, blocks)).collect();
        for fold in 0..blocks {
            if bounds[fold + 1] <= bounds[fold] {
                return Err(PlsError::EmptyFold { fold });
            }
        }

        Ok(Self {
            permutation,
            bounds,
        })
    }

    /// Shuffle `0..n` with `rng` and cut it into `blocks` folds.
    pub fn random<R: Rng + ?Sized>(n: usize, blocks: usize, rng: &mut R) -> Result<Self, PlsError> {
        let mut permutation: Vec<usize> = (0..n).collect();
        permutation.shuffle(rng);
        Self::new(permutation, blocks)
    }

    /// Number of folds.
    pub fn n_folds(&self) -> usize {
        self.bounds.len() - 1
    }

    /// Number of samples.
    pub fn n_samples(&self) -> usize {
        self.permutation.len()
    }

    /// The underlying permutation.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Held-out sample indices of fold `i`, in permutation order.
    pub fn fold(&self, i: usize) -> &[usize] {
        &self.permutation[self.bounds[i]..self.bounds[i + 1]]
    }

    /// Calibration sample indices for fold `i`, in ascending order.
    pub fn training(&self, i: usize) -> Vec<usize> {
        let mut held_out = vec![false; self.n_samples()];
        for &idx in self.fold(i) {
            held_out[idx] = true;
        }
        (0..self.n_samples()).filter(|&idx| !held_out[idx]).collect()
    }

    /// Size of every fold.
    pub fn sizes(&self) -> Vec<usize> {
        self.bounds.windows(2).map(|w| w[1] - w[0]).collect()
    }
}
