//! Role classification for candidate methods.
//!
//! Every descriptor is assigned exactly one [`Role`]. Rules are evaluated in
//! a fixed precedence:
//!
//! 1. a method named `ParseInt` is the integer sink;
//! 2. a method named `ParseString` is the string sink;
//! 3. a method carrying the exclusion marker is excluded;
//! 4. a validly named method with no parameters and no return value is an
//!    action;
//! 5. anything else is ignored.
//!
//! Ignored methods are not errors: they let handler types carry helpers that
//! the dispatcher never sees.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::descriptor::MethodDescriptor;

/// Reserved name of the integer sink.
pub const PARSE_INT: &str = "ParseInt";

/// Reserved name of the string sink.
pub const PARSE_STRING: &str = "ParseString";

/// Tracing target for classification and compilation.
pub(crate) const COMPILE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::compile");

/// Role a method plays in the compiled dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Directly dispatchable by token.
    Action,
    /// Receives tokens that parse as integers.
    IntegerSink,
    /// Receives any otherwise unmatched token.
    StringSink,
    /// Explicitly excluded from dispatch.
    Excluded,
    /// Not eligible for dispatch.
    Ignored,
}

impl Role {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::IntegerSink => "integer_sink",
            Self::StringSink => "string_sink",
            Self::Excluded => "excluded",
            Self::Ignored => "ignored",
        }
    }

    /// Returns the sink kind for sink roles.
    #[must_use]
    pub const fn sink_kind(self) -> Option<SinkKind> {
        match self {
            Self::IntegerSink => Some(SinkKind::Integer),
            Self::StringSink => Some(SinkKind::String),
            Self::Action | Self::Excluded | Self::Ignored => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two fallback sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    /// The `ParseInt` sink.
    Integer,
    /// The `ParseString` sink.
    String,
}

impl SinkKind {
    /// Returns the reserved method name for this sink.
    #[must_use]
    pub const fn reserved_name(self) -> &'static str {
        match self {
            Self::Integer => PARSE_INT,
            Self::String => PARSE_STRING,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A descriptor paired with its role.
pub struct ClassifiedMethod<'a, H> {
    descriptor: &'a MethodDescriptor<H>,
    role: Role,
}

impl<'a, H> ClassifiedMethod<'a, H> {
    /// Returns the underlying descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &'a MethodDescriptor<H> {
        self.descriptor
    }

    /// Returns the assigned role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Assigns a role to one descriptor.
///
/// # Example
///
/// ```
/// use textdispatch_core::{MethodDescriptor, Role, classify};
///
/// struct Tape;
///
/// let step = MethodDescriptor::<Tape>::action("step", |_| {});
/// assert_eq!(classify(&step), Role::Action);
///
/// let helper = MethodDescriptor::<Tape>::helper("load", 1, true);
/// assert_eq!(classify(&helper), Role::Ignored);
/// ```
#[must_use]
pub fn classify<H>(method: &MethodDescriptor<H>) -> Role {
    let signature = method.signature();
    if method.name() == PARSE_INT {
        Role::IntegerSink
    } else if method.name() == PARSE_STRING {
        Role::StringSink
    } else if method.is_excluded() {
        Role::Excluded
    } else if is_valid_identifier(method.name())
        && signature.parameter_count() == 0
        && signature.returns_void()
    {
        Role::Action
    } else {
        Role::Ignored
    }
}

/// Classifies every descriptor, preserving declaration order.
#[must_use]
pub fn classify_all<H>(methods: &[MethodDescriptor<H>]) -> Vec<ClassifiedMethod<'_, H>> {
    methods
        .iter()
        .map(|descriptor| {
            let role = classify(descriptor);
            debug!(
                target: COMPILE_TARGET,
                method = descriptor.name(),
                role = role.as_str(),
                "classified method"
            );
            ClassifiedMethod { descriptor, role }
        })
        .collect()
}

/// Returns `true` when `name` is a syntactically valid identifier.
///
/// The first character must be alphabetic or `_`; the rest alphanumeric or
/// `_`. Alphabetic and numeric classes follow Unicode.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}
