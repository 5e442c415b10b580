//! Numeric domains accepted by integer sinks, and table compile options.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Signed integer range an integer sink accepts.
///
/// A token reaches the integer sink only when it parses as a signed decimal
/// integer (optional leading `+` or `-`, ASCII digits) that fits the domain.
///
/// # Example
///
/// ```
/// use textdispatch_core::NumericDomain;
///
/// assert_eq!(NumericDomain::I8.parse("-128"), Some(-128));
/// assert_eq!(NumericDomain::I8.parse("128"), None);
/// assert_eq!(NumericDomain::I64.parse("+7"), Some(7));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NumericDomain {
    /// 8-bit signed integers.
    I8,
    /// 16-bit signed integers.
    I16,
    /// 32-bit signed integers.
    #[default]
    I32,
    /// 64-bit signed integers.
    I64,
}

impl NumericDomain {
    /// Parses `token` as an integer within this domain.
    #[must_use]
    pub fn parse(self, token: &str) -> Option<i64> {
        match self {
            Self::I8 => token.parse::<i8>().ok().map(i64::from),
            Self::I16 => token.parse::<i16>().ok().map(i64::from),
            Self::I32 => token.parse::<i32>().ok().map(i64::from),
            Self::I64 => token.parse::<i64>().ok(),
        }
    }
}

/// Options fixed when a dispatch table is compiled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    numeric_domain: NumericDomain,
}

impl DispatchOptions {
    /// Creates options with the default numeric domain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            numeric_domain: NumericDomain::I32,
        }
    }

    /// Sets the numeric domain for the integer sink.
    #[must_use]
    pub const fn with_numeric_domain(mut self, numeric_domain: NumericDomain) -> Self {
        self.numeric_domain = numeric_domain;
        self
    }

    /// Returns the numeric domain for the integer sink.
    #[must_use]
    pub const fn numeric_domain(&self) -> NumericDomain {
        self.numeric_domain
    }
}
