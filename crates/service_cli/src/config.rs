//! Run configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (`VANILLA_MC_*`)
//! 3. Config file
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_pricing::mc::{validate_num_sims, VanillaParams, DEFAULT_BATCH_SIZE, DEFAULT_PATHS};
use pricer_pricing::PricingError;
use serde::Deserialize;
use thiserror::Error;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "vanilla-mc.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid value for environment variable {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Log levels accepted by `log_level` and `VANILLA_MC_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Fully resolved inputs of one pricing run.
///
/// `num_sims` stays signed so that zero and negative counts survive until
/// the pricing engine rejects them with a named parameter error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Number of simulated paths
    pub num_sims: i64,
    /// Current underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Volatility
    pub volatility: f64,
    /// Time to maturity in years
    pub maturity: f64,
    /// Seed of the random stream; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Worker threads; absent means the sequential path
    pub threads: Option<usize>,
    /// Paths per independent random stream in the parallel driver
    pub batch_size: usize,
    /// Log level used when `RUST_LOG` is not set
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

impl Default for RunConfig {
    fn default() -> Self {
        let params = VanillaParams::default();
        Self {
            num_sims: DEFAULT_PATHS as i64,
            spot: params.spot,
            strike: params.strike,
            rate: params.rate,
            volatility: params.volatility,
            maturity: params.maturity,
            seed: None,
            threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
            log_level: LogLevel::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// The option parameters of this run.
    pub fn params(&self) -> VanillaParams {
        VanillaParams::new(
            self.spot,
            self.strike,
            self.rate,
            self.volatility,
            self.maturity,
        )
    }

    /// Checks the path count and option parameters before any work is done.
    pub fn validate(&self) -> Result<usize, PricingError> {
        let n_paths = validate_num_sims(self.num_sims)?;
        self.params().validate()?;
        Ok(n_paths)
    }

    /// Apply `VANILLA_MC_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_env_lookup(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env { var, value })
        }

        if let Some(value) = lookup("VANILLA_MC_NUM_SIMS") {
            self.num_sims = parsed("VANILLA_MC_NUM_SIMS", value)?;
        }
        if let Some(value) = lookup("VANILLA_MC_SPOT") {
            self.spot = parsed("VANILLA_MC_SPOT", value)?;
        }
        if let Some(value) = lookup("VANILLA_MC_STRIKE") {
            self.strike = parsed("VANILLA_MC_STRIKE", value)?;
        }
        if let Some(value) = lookup("VANILLA_MC_RATE") {
            self.rate = parsed("VANILLA_MC_RATE", value)?;
        }
        if let Some(value) = lookup("VANILLA_MC_VOLATILITY") {
            self.volatility = parsed("VANILLA_MC_VOLATILITY", value)?;
        }
        if let Some(value) = lookup("VANILLA_MC_MATURITY") {
            self.maturity = parsed("VANILLA_MC_MATURITY", value)?;
        }
        if let Some(value) = lookup("VANILLA_MC_SEED") {
            self.seed = Some(parsed("VANILLA_MC_SEED", value)?);
        }
        if let Some(value) = lookup("VANILLA_MC_THREADS") {
            self.threads = Some(parsed("VANILLA_MC_THREADS", value)?);
        }
        if let Some(value) = lookup("VANILLA_MC_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }

        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(num_sims) = cli.num_sims {
            self.num_sims = num_sims;
        }
        if let Some(spot) = cli.spot {
            self.spot = spot;
        }
        if let Some(strike) = cli.strike {
            self.strike = strike;
        }
        if let Some(rate) = cli.rate {
            self.rate = rate;
        }
        if let Some(volatility) = cli.volatility {
            self.volatility = volatility;
        }
        if let Some(maturity) = cli.maturity {
            self.maturity = maturity;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(threads) = cli.threads {
            self.threads = Some(threads);
        }
        if let Some(batch_size) = cli.batch_size {
            self.batch_size = batch_size;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
    }
}

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    pub num_sims: Option<i64>,
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    pub rate: Option<f64>,
    pub volatility: Option<f64>,
    pub maturity: Option<f64>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
    pub batch_size: Option<usize>,
    /// Forces the `debug` log level
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// An explicit `--config` path must exist; the implicit
/// [`DEFAULT_CONFIG_FILE`] is read only when present.
pub fn build_config(cli: &CliArgs) -> Result<RunConfig, ConfigError> {
    let mut config = load_base(cli)?.with_env_override()?;
    config.merge_with_cli(cli);
    Ok(config)
}

fn load_base(cli: &CliArgs) -> Result<RunConfig, ConfigError> {
    match &cli.config_file {
        Some(path) => RunConfig::from_file(path),
        None => {
            let implicit = Path::new(DEFAULT_CONFIG_FILE);
            if implicit.is_file() {
                RunConfig::from_file(implicit)
            } else {
                Ok(RunConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    fn build_with_env(
        cli: &CliArgs,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<RunConfig, ConfigError> {
        let mut config = load_base(cli)?.with_env_lookup(lookup)?;
        config.merge_with_cli(cli);
        Ok(config)
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.num_sims, 10_000_000);
        assert_eq!(config.spot, 100.0);
        assert_eq!(config.strike, 100.0);
        assert_eq!(config.rate, 0.05);
        assert_eq!(config.volatility, 0.2);
        assert_eq!(config.maturity, 1.0);
        assert_eq!(config.seed, None);
        assert_eq!(config.threads, None);
        assert_eq!(config.batch_size, 65_536);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let file = write_config("num_sims = 5000\nstrike = 110.0\nseed = 3\nlog_level = \"warn\"\n");
        let config = RunConfig::from_file(file.path()).unwrap();

        assert_eq!(config.num_sims, 5_000);
        assert_eq!(config.strike, 110.0);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.log_level, LogLevel::Warn);
        // Unset fields keep their defaults
        assert_eq!(config.spot, 100.0);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_from_file_rejects_unknown_fields() {
        let file = write_config("sigma = 0.3\n");
        let err = RunConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file_rejects_bad_log_level() {
        let file = write_config("log_level = \"loud\"\n");
        assert!(matches!(
            RunConfig::from_file(file.path()).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("/definitely/not/here/vanilla-mc.toml")),
            ..Default::default()
        };
        let err = build_with_env(&cli, env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let config = RunConfig::default()
            .with_env_lookup(env(&[
                ("VANILLA_MC_NUM_SIMS", "1000"),
                ("VANILLA_MC_SPOT", "95.5"),
                ("VANILLA_MC_RATE", "-0.01"),
                ("VANILLA_MC_SEED", "77"),
                ("VANILLA_MC_THREADS", "4"),
                ("VANILLA_MC_LOG_LEVEL", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.num_sims, 1_000);
        assert_eq!(config.spot, 95.5);
        assert_eq!(config.rate, -0.01);
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.strike, 100.0);
    }

    #[test]
    fn test_env_parse_error_names_variable() {
        let err = RunConfig::default()
            .with_env_lookup(env(&[("VANILLA_MC_VOLATILITY", "high")]))
            .unwrap_err();

        match err {
            ConfigError::Env { var, value } => {
                assert_eq!(var, "VANILLA_MC_VOLATILITY");
                assert_eq!(value, "high");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let file = write_config("num_sims = 100\nspot = 90.0\nstrike = 95.0\nrate = 0.02\n");
        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            spot: Some(120.0),
            ..Default::default()
        };

        let config = build_with_env(
            &cli,
            env(&[("VANILLA_MC_SPOT", "110.0"), ("VANILLA_MC_STRIKE", "105.0")]),
        )
        .unwrap();

        assert_eq!(config.num_sims, 100); // file
        assert_eq!(config.rate, 0.02); // file
        assert_eq!(config.strike, 105.0); // env over file
        assert_eq!(config.spot, 120.0); // cli over env
        assert_eq!(config.volatility, 0.2); // default
    }

    #[test]
    fn test_verbose_forces_debug() {
        let mut config = RunConfig::default();
        config.merge_with_cli(&CliArgs {
            verbose: true,
            ..Default::default()
        });
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_negative_num_sims_survives_to_pricing() {
        let mut config = RunConfig::default();
        config.merge_with_cli(&CliArgs {
            num_sims: Some(-1),
            ..Default::default()
        });
        assert_eq!(config.num_sims, -1);
    }

    #[test]
    fn test_validate_names_offending_parameter() {
        let config = RunConfig {
            num_sims: 0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), Some("num_sims"));

        let config = RunConfig {
            maturity: -1.0,
            ..Default::default()
        };
        assert_eq!(config.validate().unwrap_err().parameter(), Some("maturity"));

        assert_eq!(RunConfig::default().validate().unwrap(), 10_000_000);
    }

    #[test]
    fn test_params_mapping() {
        let config = RunConfig {
            spot: 1.0,
            strike: 2.0,
            rate: 3.0,
            volatility: 4.0,
            maturity: 5.0,
            ..Default::default()
        };
        assert_eq!(config.params(), VanillaParams::new(1.0, 2.0, 3.0, 4.0, 5.0));
    }
}
