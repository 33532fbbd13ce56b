//! vanilla-mc - Monte Carlo pricer for European vanilla options
//!
//! Prices a European call and put on one underlying by simulating terminal
//! prices under Black-Scholes dynamics, then prints one labelled line per
//! input and per price.
//!
//! # Configuration
//!
//! Values are resolved from built-in defaults, then `vanilla-mc.toml` (or
//! `--config <path>`), then `VANILLA_MC_*` environment variables, then flags.
//!
//! # Exit codes
//!
//! - `0` - success
//! - `2` - an input parameter was rejected
//! - `1` - any other failure, including flag values that cannot be parsed

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod report;

pub use error::{CliError, Result};

use config::{CliArgs, LogLevel, RunConfig};
use report::OutputFormat;

/// Monte Carlo pricer for European call and put options
#[derive(Parser)]
#[command(name = "vanilla-mc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path [default: vanilla-mc.toml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of simulated paths [default: 10000000]
    #[arg(short, long, allow_negative_numbers = true)]
    num_sims: Option<i64>,

    /// Current underlying price [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    spot: Option<f64>,

    /// Strike price [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    strike: Option<f64>,

    /// Risk-free rate [default: 0.05]
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,

    /// Volatility [default: 0.2]
    #[arg(long, allow_negative_numbers = true)]
    volatility: Option<f64>,

    /// Time to maturity in years [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    maturity: Option<f64>,

    /// Seed of the random stream; drawn from OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads for the parallel driver; sequential when omitted
    #[arg(short, long)]
    threads: Option<usize>,

    /// Paths per independent random stream in the parallel driver [default: 65536]
    #[arg(long)]
    batch_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Append Black-Scholes reference prices and 95% confidence half-widths
    #[arg(short, long)]
    reference: bool,
}

impl Cli {
    fn overrides(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            num_sims: self.num_sims,
            spot: self.spot,
            strike: self.strike,
            rate: self.rate,
            volatility: self.volatility,
            maturity: self.maturity,
            seed: self.seed,
            threads: self.threads,
            batch_size: self.batch_size,
            verbose: self.verbose,
        }
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli, config: &RunConfig) -> Result<()> {
    debug!(?config, "resolved configuration");

    let report = commands::price::run(config, cli.reference)?;
    let rendered = report.render(cli.format)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn fail(err: &CliError) -> ExitCode {
    error!("{}", err);
    eprintln!("Error: {err}");
    ExitCode::from(err.exit_code())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(error::EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match config::build_config(&cli.overrides()) {
        Ok(config) => config,
        Err(err) => {
            let level = if cli.verbose {
                LogLevel::Debug
            } else {
                LogLevel::default()
            };
            init_tracing(level);
            return fail(&CliError::from(err));
        }
    };

    init_tracing(config.log_level);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}
