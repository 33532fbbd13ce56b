//! Parallel batch driver for terminal-value simulation.
//!
//! The path count is split into fixed-size batches. Batch `i` draws from
//! its own [`PricerRng`] seeded with [`derive_stream_seed`]`(base, i)`, so
//! no two concurrent units share a random stream. Batches are evaluated on
//! a dedicated rayon pool and their [`PathStatistics`] are summed in batch
//! order.
//!
//! Partitioning depends only on `batch_size`, never on the worker count,
//! so a given `(base_seed, batch_size)` yields bit-identical results on
//! 1 or 64 threads.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::params::VanillaParams;
use super::paths::{simulate_terminal, PathStatistics};
use super::payoff::Payoff;
use crate::error::PricingError;
use crate::rng::{derive_stream_seed, PricerRng};

/// Splits `n_paths` into `(batch_index, batch_len)` pairs of at most
/// `batch_size` paths each.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::parallel::batch_plan;
///
/// let plan: Vec<_> = batch_plan(10, 4).collect();
/// assert_eq!(plan, vec![(0, 4), (1, 4), (2, 2)]);
/// ```
pub fn batch_plan(n_paths: usize, batch_size: usize) -> impl Iterator<Item = (usize, usize)> {
    let batch_size = batch_size.max(1);
    let n_batches = n_paths.div_ceil(batch_size);

    (0..n_batches).map(move |index| {
        let start = index * batch_size;
        (index, batch_size.min(n_paths - start))
    })
}

/// Simulates `n_paths` terminal payoffs across `n_threads` workers.
///
/// # Errors
///
/// Returns `PricingError::ThreadPool` if the worker pool cannot be built.
pub fn simulate_parallel<P>(
    n_paths: usize,
    params: &VanillaParams,
    payoff: &P,
    base_seed: u64,
    batch_size: usize,
    n_threads: usize,
) -> Result<PathStatistics, PricingError>
where
    P: Payoff + Sync + ?Sized,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build()
        .map_err(|e| PricingError::ThreadPool(e.to_string()))?;

    let plan: Vec<(usize, usize)> = batch_plan(n_paths, batch_size).collect();

    let batches: Vec<PathStatistics> = pool.install(|| {
        plan.par_iter()
            .map(|&(index, len)| {
                let mut rng = PricerRng::from_seed(derive_stream_seed(base_seed, index as u64));
                simulate_terminal(len, params, payoff, &mut rng)
            })
            .collect()
    });

    Ok(batches
        .into_iter()
        .fold(PathStatistics::default(), PathStatistics::merge))
}
