//! Error types for table compilation, token dispatch, and catalog lookups.
//!
//! Compilation failures are configuration errors: they abort compilation for
//! the whole handler type and no partial table is ever produced. Dispatch and
//! codec failures are surfaced to the caller unchanged; the core performs no
//! retry or recovery of its own.

use thiserror::Error;

use crate::classify::SinkKind;
use crate::codec::{CatalogId, MAX_CATALOG_ENTRIES};

/// Errors raised while compiling a handler's method set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Two actions resolved to the same token.
    #[error("token '{token}' is claimed by both '{first}' and '{second}'")]
    DuplicateToken {
        /// The contested token.
        token: String,
        /// Method that claimed the token first.
        first: String,
        /// Method that attempted to claim it again.
        second: String,
    },

    /// A reserved sink method cannot be bound to the sink signature.
    #[error(
        "sink '{method}' takes {parameter_count} parameter(s); {sink} sinks take exactly one \
         and must be bound to a {sink} handler"
    )]
    InvalidSinkArity {
        /// Name of the offending method.
        method: String,
        /// The sink role implied by the reserved name.
        sink: SinkKind,
        /// Declared parameter count.
        parameter_count: usize,
    },

    /// More than one method qualified for the same sink role.
    #[error("{sink} sink declared more than once (declarations #{first} and #{second})")]
    DuplicateSink {
        /// The sink role declared twice.
        sink: SinkKind,
        /// Declaration index of the first candidate.
        first: usize,
        /// Declaration index of the second candidate.
        second: usize,
    },

    /// The method set declares more actions than the catalog has ids.
    #[error("{actions} actions exceed the catalog limit of {limit} ids")]
    CatalogOverflow {
        /// Number of actions declared.
        actions: usize,
        /// Largest number of actions a catalog can hold.
        limit: usize,
    },

    /// A method classified as an action has no nullary binding to invoke.
    #[error("method '{method}' is dispatchable but is not bound to a nullary action")]
    UnboundAction {
        /// Name of the offending method.
        method: String,
    },
}

impl CompileError {
    /// Creates a duplicate token error.
    pub fn duplicate_token(
        token: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateToken {
            token: token.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an invalid sink arity error.
    pub fn invalid_sink_arity(
        method: impl Into<String>,
        sink: SinkKind,
        parameter_count: usize,
    ) -> Self {
        Self::InvalidSinkArity {
            method: method.into(),
            sink,
            parameter_count,
        }
    }

    /// Creates a duplicate sink error.
    #[must_use]
    pub const fn duplicate_sink(sink: SinkKind, first: usize, second: usize) -> Self {
        Self::DuplicateSink {
            sink,
            first,
            second,
        }
    }

    /// Creates a catalog overflow error for `actions` declared actions.
    #[must_use]
    pub const fn catalog_overflow(actions: usize) -> Self {
        Self::CatalogOverflow {
            actions,
            limit: MAX_CATALOG_ENTRIES,
        }
    }

    /// Creates an unbound action error.
    pub fn unbound_action(method: impl Into<String>) -> Self {
        Self::UnboundAction {
            method: method.into(),
        }
    }
}

/// Errors raised while dispatching a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No action matched and no sink accepted the token.
    #[error("token '{token}' does not match any dispatchable method")]
    UnknownToken {
        /// The rejected token, verbatim.
        token: String,
    },
}

impl DispatchError {
    /// Creates an unknown token error.
    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::UnknownToken {
            token: token.into(),
        }
    }

    /// Returns the token that failed to dispatch.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::UnknownToken { token } => token,
        }
    }
}

/// Errors raised by [`TokenCatalog`](crate::TokenCatalog) lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The token is not an action token of this catalog.
    #[error("token '{token}' is not in the catalog")]
    UnknownToken {
        /// The rejected token, verbatim.
        token: String,
    },

    /// The identifier was not issued by this catalog.
    #[error("catalog id {id} is out of range for this catalog")]
    UnknownId {
        /// The rejected identifier.
        id: CatalogId,
    },
}

impl CodecError {
    /// Creates an unknown token error.
    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::UnknownToken {
            token: token.into(),
        }
    }
}
