//! Stack interpreter fed one whitespace-separated word at a time.
//!
//! Integer literals reach the integer sink and are pushed. Arithmetic words
//! are aliased actions that pop two cells and push the result; binary words
//! take their operands in the conventional order, so `7 2 -` leaves `5`.

use std::sync::Arc;

use textdispatch_core::{
    CompileError, Dispatch, DispatchError, DispatchOptions, DispatchTable, Handler,
    MethodDescriptor,
};
use thiserror::Error;
use tracing::debug;

const TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::forth");

/// Lines and their expected printout, run by the built-in demo.
pub const SELF_TEST: [(&str, &str); 4] = [
    ("100", "50 50 + dup ."),
    ("30", "drop 30 60 swap - ."),
    ("2", "2 3 % ."),
    ("0", "deep ."),
];

/// Errors raised while executing words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForthError {
    /// A word needed more cells than the stack holds.
    #[error("'{word}' needs {needed} cell(s) but the stack holds {depth}")]
    StackUnderflow {
        /// The word that underflowed.
        word: &'static str,
        /// Cells the word consumes.
        needed: usize,
        /// Stack depth when the word ran.
        depth: usize,
    },

    /// `/` or `%` met a zero divisor.
    #[error("'{word}' divided by zero")]
    DivisionByZero {
        /// The dividing word.
        word: &'static str,
    },

    /// The handler's method set failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A word matched nothing.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Data stack plus printed output.
pub struct Forth {
    table: Arc<DispatchTable<Self>>,
    stack: Vec<i64>,
    output: String,
    fault: Option<ForthError>,
}

impl Forth {
    /// Compiles a table with `options` and creates an empty interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`ForthError::Compile`] if the method set is rejected.
    pub fn new(options: DispatchOptions) -> Result<Self, ForthError> {
        let table = Self::compile_table(options)?;
        Ok(Self::with_table(Arc::new(table)))
    }

    /// Creates an empty interpreter sharing an already compiled table.
    #[must_use]
    pub const fn with_table(table: Arc<DispatchTable<Self>>) -> Self {
        Self {
            table,
            stack: Vec::new(),
            output: String::new(),
            fault: None,
        }
    }

    /// Splits `line` on whitespace and dispatches each word in order.
    ///
    /// # Errors
    ///
    /// Returns the first failing word's error. Words before it stay applied
    /// and the failing word leaves the stack unchanged.
    pub fn exec_line(&mut self, line: &str) -> Result<(), ForthError> {
        debug!(target: TARGET, line, "executing line");
        let table = self.dispatch_table();
        for word in line.split_whitespace() {
            table.dispatch(self, word)?;
            if let Some(fault) = self.fault.take() {
                return Err(fault);
            }
        }
        Ok(())
    }

    /// Returns the stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[i64] {
        &self.stack
    }

    /// Returns everything printed so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Drains and returns everything printed so far.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    fn require(&mut self, word: &'static str, needed: usize) -> bool {
        let depth = self.stack.len();
        if depth < needed {
            self.fault = Some(ForthError::StackUnderflow {
                word,
                needed,
                depth,
            });
            return false;
        }
        true
    }

    fn binary(&mut self, word: &'static str, op: fn(i64, i64) -> Option<i64>) {
        if !self.require(word, 2) {
            return;
        }
        let (Some(rhs), Some(lhs)) = (self.stack.pop(), self.stack.pop()) else {
            return;
        };
        if let Some(result) = op(lhs, rhs) {
            self.stack.push(result);
        } else {
            self.stack.extend([lhs, rhs]);
            self.fault = Some(ForthError::DivisionByZero { word });
        }
    }

    fn push(&mut self, value: i64) {
        self.stack.push(value);
    }

    fn plus(&mut self) {
        self.binary("+", |lhs, rhs| Some(lhs.wrapping_add(rhs)));
    }

    fn minus(&mut self) {
        self.binary("-", |lhs, rhs| Some(lhs.wrapping_sub(rhs)));
    }

    fn mult(&mut self) {
        self.binary("*", |lhs, rhs| Some(lhs.wrapping_mul(rhs)));
    }

    fn div(&mut self) {
        self.binary("/", |lhs, rhs| (rhs != 0).then(|| lhs.wrapping_div(rhs)));
    }

    fn modulo(&mut self) {
        self.binary("%", |lhs, rhs| (rhs != 0).then(|| lhs.wrapping_rem(rhs)));
    }

    fn print(&mut self) {
        if let Some(value) = self.stack.pop() {
            self.output.push_str(&value.to_string());
            self.output.push(' ');
        } else {
            self.require(".", 1);
        }
    }

    fn drop_top(&mut self) {
        if self.stack.pop().is_none() {
            self.require("drop", 1);
        }
    }

    fn dup(&mut self) {
        if let Some(&top) = self.stack.last() {
            self.stack.push(top);
        } else {
            self.require("dup", 1);
        }
    }

    fn deep(&mut self) {
        let depth = i64::try_from(self.stack.len()).unwrap_or(i64::MAX);
        self.stack.push(depth);
    }

    fn swap(&mut self) {
        if self.require("swap", 2) {
            let top = self.stack.len() - 1;
            self.stack.swap(top - 1, top);
        }
    }
}

impl Handler for Forth {
    fn methods() -> Vec<MethodDescriptor<Self>> {
        vec![
            MethodDescriptor::integer_sink(Self::push),
            MethodDescriptor::action("plus", Self::plus).alias("+"),
            MethodDescriptor::action("minus", Self::minus).alias("-"),
            MethodDescriptor::action("mult", Self::mult).alias("*"),
            MethodDescriptor::action("div", Self::div).alias("/"),
            MethodDescriptor::action("mod", Self::modulo).alias("%"),
            MethodDescriptor::action("print", Self::print).alias("."),
            MethodDescriptor::action("drop", Self::drop_top),
            MethodDescriptor::action("dup", Self::dup),
            MethodDescriptor::action("deep", Self::deep),
            MethodDescriptor::action("swap", Self::swap),
            MethodDescriptor::helper("exec_line", 1, false).excluded(),
        ]
    }
}

impl Dispatch for Forth {
    fn dispatch_table(&self) -> Arc<DispatchTable<Self>> {
        Arc::clone(&self.table)
    }
}
