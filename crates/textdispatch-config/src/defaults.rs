use textdispatch_core::NumericDomain;

use crate::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default number of cells on a byte tape.
pub const DEFAULT_TAPE_LENGTH: usize = 30_000;

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default numeric domain for integer sinks.
#[must_use]
pub const fn default_numeric_domain() -> NumericDomain {
    NumericDomain::I32
}

/// Default byte-tape length.
#[must_use]
pub const fn default_tape_length() -> usize {
    DEFAULT_TAPE_LENGTH
}
