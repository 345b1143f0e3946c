//! Command line & environment configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::{
    orders::{DEFAULT_MAX_QUANTITY, Demand, DemandEntry, OrderSettings},
    receipt::ReceiptStyle,
    solvers::ShortfallPolicy,
};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PACKWISE_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "PACKWISE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Work out the fewest packs to ship for each product ordered.
#[derive(Debug, Parser)]
#[command(name = "packwise", version)]
pub struct Config {
    /// Catalog YAML file; the built-in bakery catalog is used when omitted
    #[arg(short, long, env = "PACKWISE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// What to do when no combination of packs matches a quantity exactly
    #[arg(
        short,
        long,
        env = "PACKWISE_POLICY",
        value_enum,
        default_value_t = ShortfallPolicy::Exact
    )]
    pub policy: ShortfallPolicy,

    /// Largest quantity accepted for a single product
    #[arg(long, env = "PACKWISE_MAX_QUANTITY", default_value_t = DEFAULT_MAX_QUANTITY)]
    pub max_quantity: usize,

    /// Receipt layout
    #[arg(short, long, env = "PACKWISE_STYLE", value_enum, default_value_t = ReceiptStyle::Plain)]
    pub style: ReceiptStyle,

    /// Quantity to order as CODE=QTY; may be repeated. Prompts for each product when omitted
    #[arg(short, long = "order", value_name = "CODE=QTY")]
    pub orders: Vec<DemandEntry>,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Order settings taken from the command line.
    pub fn settings(&self) -> OrderSettings {
        OrderSettings {
            policy: self.policy,
            max_quantity: self.max_quantity,
        }
    }

    /// Demand given with `--order`, or `None` if quantities should be prompted for.
    pub fn demand(&self) -> Option<Demand> {
        if self.orders.is_empty() {
            return None;
        }

        Some(self.orders.iter().cloned().collect())
    }
}
