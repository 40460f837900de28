use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how row-wise operations are executed.
///
/// Every strategy visits each row exactly once and writes it from read-only inputs,
/// so the result is the same regardless of the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ParallelRows,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply `f` to every row of `dst` following the given strategy.
///
/// # Arguments
///
/// * `dst` - The destination buffer, row-major.
/// * `row_stride` - The number of elements per row.
/// * `strategy` - The execution strategy.
/// * `f` - Called with the row index and the mutable row.
///
/// A trailing chunk shorter than `row_stride` is not visited.
///
/// # Example
///
/// ```
/// use grayconv_imgproc::parallel::{for_each_row, ExecutionStrategy};
///
/// let mut dst = vec![0usize; 6];
/// for_each_row(&mut dst, 3, ExecutionStrategy::ParallelRows, |y, row| {
///     row.iter_mut().for_each(|v| *v = y);
/// })
/// .unwrap();
///
/// assert_eq!(dst, vec![0, 0, 0, 1, 1, 1]);
/// ```
pub fn for_each_row<T, F>(
    dst: &mut [T],
    row_stride: usize,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_stride == 0 {
        return Ok(());
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(|(y, row)| f(y, row));
            });
        }
    }

    Ok(())
}
