use clap::Parser;
use std::env;
use tracing::debug;

use crate::harness::DEFAULT_ROUNDS;
use crate::record::Approach;

pub const DEFAULT_ITERATIONS: u32 = 10_000_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_LEVEL_ENV: &str = "NUMBENCH_LOG_LEVEL";

#[derive(Parser, Debug, Clone)]
#[command(name = "numbench")]
#[command(about = "Record formatting and /dev/null write throughput comparison", long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Config {
    /// Iteration count; anything that is not a u32 falls back to the default
    #[arg(value_name = "ITERATIONS")]
    pub raw_iterations: Option<String>,

    /// Round count; anything that is not a positive u32 falls back to the default
    #[arg(value_name = "ROUNDS")]
    pub raw_rounds: Option<String>,

    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = LOG_LEVEL_ENV)]
    pub log_level: String,

    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [Approach::Native, Approach::StdFormat, Approach::ItoaHex],
        help = "Formatting approaches to compare; the first one is the speedup baseline"
    )]
    pub approaches: Vec<Approach>,

    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = [Approach::Native, Approach::ItoaHex],
        help = "Formatting approaches used by the /dev/null write benchmark"
    )]
    pub write_approaches: Vec<Approach>,

    #[arg(long, help = "Skip the /dev/null write benchmark")]
    pub skip_write: bool,
}

impl Config {
    /// Get a configuration instance with all values resolved from CLI args and environment variables
    pub fn load() -> Self {
        Config::parse()
    }

    pub fn iterations(&self) -> u32 {
        parse_count(self.raw_iterations.as_deref(), DEFAULT_ITERATIONS)
    }

    /// Zero rounds would leave nothing to take the best of, so it counts as invalid.
    pub fn rounds(&self) -> u32 {
        match parse_count(self.raw_rounds.as_deref(), DEFAULT_ROUNDS) {
            0 => DEFAULT_ROUNDS,
            rounds => rounds,
        }
    }

    /// Format approaches with duplicates removed, preserving first-seen order.
    pub fn selected_approaches(&self) -> Vec<Approach> {
        dedup(&self.approaches)
    }

    pub fn selected_write_approaches(&self) -> Vec<Approach> {
        dedup(&self.write_approaches)
    }
}

/// Parse a positional count, keeping `default` when the input is missing or malformed.
pub fn parse_count(raw: Option<&str>, default: u32) -> u32 {
    match raw {
        None => default,
        Some(raw) => match raw.parse::<u32>() {
            Ok(value) => value,
            Err(e) => {
                debug!("Ignoring count {:?} ({}), using {}", raw, e, default);
                default
            }
        },
    }
}

fn dedup(approaches: &[Approach]) -> Vec<Approach> {
    let mut out: Vec<Approach> = Vec::with_capacity(approaches.len());
    for approach in approaches {
        if !out.contains(approach) {
            out.push(*approach);
        }
    }
    out
}

/// Log filter for the binaries that take no arguments.
pub fn env_log_level() -> String {
    env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// Install the global subscriber. Logs go to stderr so stdout only carries the report.
pub fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
