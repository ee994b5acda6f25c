//! PLS solvers operating on cross-product matrices.

mod kernel_pls;
mod traits;

pub use kernel_pls::{fit_kernel_pls, FittedKernelPls, KernelPls, KernelPlsBuilder};
pub use traits::{CrossProductFit, PlsError};
