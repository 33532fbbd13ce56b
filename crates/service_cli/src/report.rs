//! Pricing report rendering
//!
//! A [`PricingReport`] is printed either as labelled lines (one value per
//! line, parameters first) or as a single JSON object.


use clap::ValueEnum;
use pricer_pricing::{PricingResult, VanillaParams};
use serde::Serialize;

use crate::Result;

const LABEL_WIDTH: usize = 20;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Labelled lines
    #[default]
    Table,
    /// One JSON object
    Json,
}

/// Closed-form prices for the same inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferencePrices {
    pub call: f64,
    pub put: f64,
}

/// Inputs and results of one pricing run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingReport {
    pub num_sims: usize,
    #[serde(flatten)]
    pub params: VanillaParams,
    pub seed: u64,
    pub call: PricingResult,
    pub put: PricingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferencePrices>,
}

impl PricingReport {
    /// Renders the report in the requested format, newline-terminated.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.to_table()),
            OutputFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)?;
                json.push('\n');
                Ok(json)
            }
        }
    }

    /// Labelled-line rendering.
    ///
    /// Parameters print with their shortest exact representation, prices
    /// with four decimals.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        let mut line = |label: &str, value: String| {
            out.push_str(&format!("{label:<LABEL_WIDTH$}{value}\n"));
        };

        line("Number of Paths:", self.num_sims.to_string());
        line("Underlying:", self.params.spot.to_string());
        line("Strike:", self.params.strike.to_string());
        line("Risk-Free Rate:", self.params.rate.to_string());
        line("Volatility:", self.params.volatility.to_string());
        line("Maturity:", self.params.maturity.to_string());
        line("Call Price:", format!("{:.4}", self.call.price));
        line("Put Price:", format!("{:.4}", self.put.price));

        if let Some(reference) = &self.reference {
            line("Call 95% CI:", format!("+/- {:.4}", self.call.confidence_95()));
            line("Put 95% CI:", format!("+/- {:.4}", self.put.confidence_95()));
            line("Black-Scholes Call:", format!("{:.4}", reference.call));
            line("Black-Scholes Put:", format!("{:.4}", reference.put));
        }

        out
    }
}
