//! Price command implementation
//!
//! Prices a European call and put with the pricer_pricing engine.

use pricer_pricing::analytical::BlackScholes;
use pricer_pricing::{MonteCarloConfig, MonteCarloPricer};
use tracing::info;

use crate::config::RunConfig;
use crate::report::{PricingReport, ReferencePrices};
use crate::Result;

/// Run the price command
pub fn run(config: &RunConfig, with_reference: bool) -> Result<PricingReport> {
    let n_paths = config.validate()?;
    let params = config.params();

    let mc_config = MonteCarloConfig::builder()
        .n_paths(n_paths)
        .maybe_seed(config.seed)
        .maybe_threads(config.threads)
        .batch_size(config.batch_size)
        .build()?;

    let mut pricer = MonteCarloPricer::new(mc_config)?;

    info!("Starting pricing...");
    info!("  Monte Carlo paths: {}", n_paths);
    info!("  Seed: {}", pricer.seed());
    if let Some(threads) = config.threads {
        info!("  Threads: {} (batch size {})", threads, config.batch_size);
    }

    let (call, put) = pricer.price_call_put(&params)?;

    let reference = if with_reference {
        let bs = BlackScholes::new(params.spot, params.rate, params.volatility)?;
        Some(ReferencePrices {
            call: bs.price_call(params.strike, params.maturity),
            put: bs.price_put(params.strike, params.maturity),
        })
    } else {
        None
    };

    info!("Pricing complete");

    Ok(PricingReport {
        num_sims: n_paths,
        params,
        seed: pricer.seed(),
        call,
        put,
        reference,
    })
}
