//! Self-test handlers exercising every classification rule.
//!
//! [`Showcase`] declares plain actions, a static-style action, both sinks,
//! an excluded entry point, and two helpers the dispatcher must refuse:
//! `K1` takes a parameter and `K2` returns a value. [`Second`] shows that
//! several handler types compile independent tables.

use std::sync::Arc;

use textdispatch_core::{
    CompileError, Dispatch, DispatchError, DispatchOptions, DispatchTable, Handler,
    MethodDescriptor,
};
use thiserror::Error;
use tracing::debug;

const TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::showcase");

/// Tokens fed to [`Showcase`] by [`run_showcase`].
pub const SHOWCASE_TOKENS: [&str; 5] = ["M", "N", "S", "64", "'Not recognizable string'"];

/// Errors raised by the self-test run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowcaseError {
    /// A handler's method set failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A token the self-test expects to succeed was rejected.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A helper that must stay hidden was dispatched.
    #[error("helper '{token}' was dispatched but should be hidden")]
    HelperDispatched {
        /// The helper's token.
        token: String,
    },
}

/// Handler with one method of every role.
pub struct Showcase {
    table: Arc<DispatchTable<Self>>,
    lines: Vec<String>,
}

impl Showcase {
    /// Compiles the showcase table and creates an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Compile`] if the method set is rejected.
    pub fn new(options: DispatchOptions) -> Result<Self, ShowcaseError> {
        let table = Arc::new(Self::compile_table(options)?);
        Ok(Self {
            table,
            lines: Vec::new(),
        })
    }

    /// Returns the lines written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn m(&mut self) {
        self.say("OK calling an instance method.");
    }

    fn n(&mut self) {
        self.say("OK calling another instance method.");
    }

    const fn s() -> &'static str {
        "OK calling static methods."
    }

    fn parse_int(&mut self, value: i64) {
        self.say(format!("OK parsing the int got {value}"));
    }

    fn parse_string(&mut self, text: &str) {
        self.say(format!("OK parsing the string got {text}"));
    }
}

impl Handler for Showcase {
    fn methods() -> Vec<MethodDescriptor<Self>> {
        vec![
            MethodDescriptor::helper("Main", 0, true).excluded(),
            MethodDescriptor::action("M", Self::m),
            MethodDescriptor::action("N", Self::n),
            MethodDescriptor::<Self>::action("S", |showcase| showcase.say(Self::s())),
            MethodDescriptor::integer_sink(Self::parse_int),
            MethodDescriptor::string_sink(Self::parse_string),
            MethodDescriptor::helper("K1", 1, true),
            MethodDescriptor::helper("K2", 1, false),
        ]
    }
}

impl Dispatch for Showcase {
    fn dispatch_table(&self) -> Arc<DispatchTable<Self>> {
        Arc::clone(&self.table)
    }
}

/// Second handler type with a single action and no sinks.
pub struct Second {
    table: Arc<DispatchTable<Self>>,
    lines: Vec<String>,
}

impl Second {
    /// Compiles the table and creates an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Compile`] if the method set is rejected.
    pub fn new(options: DispatchOptions) -> Result<Self, ShowcaseError> {
        let table = Arc::new(Self::compile_table(options)?);
        Ok(Self {
            table,
            lines: Vec::new(),
        })
    }

    /// Returns the lines written so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn m(&mut self) {
        self.lines.push("OK having multiple dispatchers.".to_owned());
    }
}

impl Handler for Second {
    fn methods() -> Vec<MethodDescriptor<Self>> {
        vec![
            MethodDescriptor::action("M", Self::m),
            MethodDescriptor::helper("K1", 1, true),
            MethodDescriptor::helper("K2", 1, false),
        ]
    }
}

impl Dispatch for Second {
    fn dispatch_table(&self) -> Arc<DispatchTable<Self>> {
        Arc::clone(&self.table)
    }
}

/// Runs the self-test and returns the lines it produced.
///
/// # Errors
///
/// Returns the first unexpected outcome: a compile failure, a rejected
/// showcase token, or a helper that dispatched.
pub fn run_showcase(options: DispatchOptions) -> Result<Vec<String>, ShowcaseError> {
    let mut showcase = Showcase::new(options)?;
    showcase.dispatch_all(SHOWCASE_TOKENS)?;

    let mut second = Second::new(options)?;
    second.dispatch("M")?;

    let mut lines = showcase.lines;
    lines.append(&mut second.lines);
    for (token, reason) in [
        ("K1", "multiple parameters methods"),
        ("K2", "not void returning methods"),
    ] {
        match second.dispatch(token) {
            Ok(_) => {
                return Err(ShowcaseError::HelperDispatched {
                    token: token.to_owned(),
                });
            }
            Err(error) => {
                debug!(target: TARGET, %error, "helper rejected as expected");
                lines.push(format!("OK not dispatching to {reason}."));
            }
        }
    }
    Ok(lines)
}
