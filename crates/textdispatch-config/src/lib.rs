//! Layered configuration for the `textdispatch` host.
//!
//! Values resolve from defaults, then a TOML configuration file, then
//! `TEXTDISPATCH_*` environment variables, then command-line flags, with later
//! layers winning. The resolved [`Config`] controls logging and the options
//! handed to every dispatch table the host compiles.

mod defaults;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use textdispatch_core::{DispatchOptions, NumericDomain};

pub use self::defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_TAPE_LENGTH, default_log_filter, default_log_filter_string,
    default_log_format, default_numeric_domain, default_tape_length,
};

/// Command-line flags consumed by the configuration loader.
///
/// They must precede the subcommand; anything after the first token that is
/// not one of these flags is left to the command parser.
pub const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--numeric-domain",
    "--tape-length",
];

/// Output format of the log subscriber.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Single-line human-readable events.
    #[default]
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TEXTDISPATCH")]
pub struct Config {
    /// `tracing` filter directive, e.g. `info` or `textdispatch-core=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Integer range accepted by integer sinks.
    #[serde(default = "default_numeric_domain")]
    #[ortho_config(default = default_numeric_domain())]
    pub numeric_domain: NumericDomain,
    /// Number of cells on a byte tape.
    #[serde(default = "default_tape_length")]
    #[ortho_config(default = default_tape_length())]
    pub tape_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            numeric_domain: default_numeric_domain(),
            tape_length: default_tape_length(),
        }
    }
}

impl Config {
    /// Returns the log filter directive.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the integer sink domain.
    #[must_use]
    pub const fn numeric_domain(&self) -> NumericDomain {
        self.numeric_domain
    }

    /// Returns the byte-tape length.
    #[must_use]
    pub const fn tape_length(&self) -> usize {
        self.tape_length
    }

    /// Builds table compile options from the configuration.
    #[must_use]
    pub const fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions::new().with_numeric_domain(self.numeric_domain)
    }
}
