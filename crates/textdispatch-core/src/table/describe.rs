//! Human and machine readable listings of a compiled table.

use std::fmt;

use serde::Serialize;

use super::DispatchTable;
use crate::numeric::NumericDomain;

/// One action row of a [`TableSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSummary {
    /// Token the action answers to.
    pub token: String,
    /// Declared method name.
    pub method: String,
}

/// Serializable snapshot of a compiled table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Actions in declaration order.
    pub actions: Vec<ActionSummary>,
    /// Method bound as the integer sink, if any.
    pub integer_sink: Option<String>,
    /// Method bound as the string sink, if any.
    pub string_sink: Option<String>,
    /// Numeric domain accepted by the integer sink.
    pub numeric_domain: NumericDomain,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .actions
            .iter()
            .map(|action| action.token.chars().count())
            .max()
            .unwrap_or(0);
        for action in &self.actions {
            writeln!(f, "{:<width$}  -> {}", action.token, action.method)?;
        }
        match &self.integer_sink {
            Some(method) => writeln!(f, "integers ({}) -> {method}", self.numeric_domain)?,
            None => writeln!(f, "integers -> (none)")?,
        }
        match &self.string_sink {
            Some(method) => write!(f, "strings -> {method}"),
            None => write!(f, "strings -> (none)"),
        }
    }
}

impl<H> DispatchTable<H> {
    /// Returns a serializable snapshot of the table.
    #[must_use]
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            actions: self
                .actions
                .iter()
                .map(|action| ActionSummary {
                    token: action.token.clone(),
                    method: action.method.clone(),
                })
                .collect(),
            integer_sink: self.integer_sink.as_ref().map(|sink| sink.method.clone()),
            string_sink: self.string_sink.as_ref().map(|sink| sink.method.clone()),
            numeric_domain: self.options.numeric_domain(),
        }
    }

    /// Renders the table as aligned text, one action per line, followed by
    /// the sink fallbacks.
    #[must_use]
    pub fn describe(&self) -> String {
        self.summary().to_string()
    }
}
