//! Byte-tape interpreter driven one character at a time.
//!
//! Each program character is dispatched as a single-character token. The
//! eight operators are aliased actions; every other character reaches the
//! string sink and is ignored, so programs may carry free-form comments.
//! Loop brackets seek their partner on the program text directly, since the
//! dispatcher only ever routes one flat token to one action.

mod programs;

use std::collections::VecDeque;
use std::sync::Arc;

use once_cell::sync::Lazy;
use textdispatch_core::{
    CompileError, Dispatch, DispatchError, DispatchOptions, DispatchTable, Handler,
    MethodDescriptor,
};
use thiserror::Error;
use tracing::debug;

pub use programs::{ADDER, HELLO_WORLD};

/// Number of cells on a freshly created tape.
pub const DEFAULT_TAPE_LENGTH: usize = 30_000;

/// Largest tape a machine will allocate.
pub const MAX_TAPE_LENGTH: usize = 1 << 24;

const TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::brainf");

static TABLE: Lazy<Result<Arc<DispatchTable<BrainF>>, CompileError>> =
    Lazy::new(|| BrainF::compile_table(DispatchOptions::default()).map(Arc::new));

/// Errors raised while loading or running a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrainFError {
    /// `<` moved the pointer left of the first cell.
    #[error("tape pointer moved left of cell 0 at code position {position}")]
    PointerUnderflow {
        /// Program position of the offending instruction.
        position: usize,
    },

    /// `>` moved the pointer past the last cell.
    #[error("tape pointer moved past cell {last} at code position {position}")]
    PointerOverflow {
        /// Index of the last tape cell.
        last: usize,
        /// Program position of the offending instruction.
        position: usize,
    },

    /// The requested tape is larger than [`MAX_TAPE_LENGTH`] or could not be
    /// allocated.
    #[error("tape length {length} exceeds the limit of {max} cells")]
    TapeTooLarge {
        /// Requested number of cells.
        length: usize,
        /// Largest supported number of cells.
        max: usize,
    },

    /// A bracket has no partner.
    #[error("unmatched '{bracket}' at code position {position}")]
    UnbalancedBracket {
        /// The unmatched bracket.
        bracket: char,
        /// Program position of the bracket.
        position: usize,
    },

    /// The handler's method set failed to compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// A program character could not be dispatched.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Byte-tape machine state.
pub struct BrainF {
    table: Arc<DispatchTable<Self>>,
    tape: Vec<u8>,
    pointer: usize,
    code: Vec<char>,
    cursor: usize,
    input: VecDeque<u8>,
    output: Vec<u8>,
    fault: Option<BrainFError>,
}

impl BrainF {
    /// Creates a machine with [`DEFAULT_TAPE_LENGTH`] cells.
    ///
    /// # Errors
    ///
    /// Returns [`BrainFError::Compile`] if the dispatch table failed to
    /// compile.
    pub fn new() -> Result<Self, BrainFError> {
        Self::with_tape_length(DEFAULT_TAPE_LENGTH)
    }

    /// Creates a machine with `length` cells (at least one).
    ///
    /// # Errors
    ///
    /// Returns [`BrainFError::TapeTooLarge`] when `length` exceeds
    /// [`MAX_TAPE_LENGTH`] or the tape cannot be allocated, and
    /// [`BrainFError::Compile`] if the dispatch table failed to compile.
    pub fn with_tape_length(length: usize) -> Result<Self, BrainFError> {
        let table = TABLE.as_ref().map(Arc::clone).map_err(Clone::clone)?;
        Ok(Self {
            table,
            tape: allocate_tape(length)?,
            pointer: 0,
            code: Vec::new(),
            cursor: 0,
            input: VecDeque::new(),
            output: Vec::new(),
            fault: None,
        })
    }

    /// Resets the tape, the pointer, and the loaded program.
    pub fn clear(&mut self) {
        self.tape.fill(0);
        self.pointer = 0;
        self.code.clear();
        self.cursor = 0;
        self.fault = None;
    }

    /// Loads `code`, replacing any previous program.
    ///
    /// # Errors
    ///
    /// Returns [`BrainFError::UnbalancedBracket`] for the first bracket
    /// without a partner; the previous program stays loaded.
    pub fn set_code(&mut self, code: &str) -> Result<(), BrainFError> {
        let instructions: Vec<char> = code.chars().collect();
        check_brackets(&instructions)?;
        self.code = instructions;
        self.cursor = 0;
        Ok(())
    }

    /// Runs the loaded program to completion.
    ///
    /// # Errors
    ///
    /// Returns the first interpreter error. The machine keeps the state it
    /// had when the error occurred.
    pub fn execute(&mut self) -> Result<(), BrainFError> {
        debug!(target: TARGET, length = self.code.len(), "executing program");
        let table = self.dispatch_table();
        let mut buffer = [0_u8; 4];
        while let Some(&instruction) = self.code.get(self.cursor) {
            table.dispatch(self, instruction.encode_utf8(&mut buffer))?;
            if let Some(fault) = self.fault.take() {
                return Err(fault);
            }
            self.cursor += 1;
        }
        debug!(target: TARGET, output = self.output.len(), "program finished");
        Ok(())
    }

    /// Clears the machine, loads `code`, and runs it, returning the bytes
    /// written by `.` during this run.
    ///
    /// # Errors
    ///
    /// Returns the first load or interpreter error.
    pub fn run(&mut self, code: &str) -> Result<Vec<u8>, BrainFError> {
        self.clear();
        self.output.clear();
        self.set_code(code)?;
        self.execute()?;
        Ok(self.take_output())
    }

    /// Queues bytes for `,` to read.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Drains and returns the bytes written so far.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Returns the value of cell `index`, if it exists.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<u8> {
        self.tape.get(index).copied()
    }

    /// Returns the tape pointer.
    #[must_use]
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    /// Returns the number of tape cells.
    #[must_use]
    pub const fn tape_length(&self) -> usize {
        self.tape.len()
    }

    fn current(&self) -> u8 {
        self.tape.get(self.pointer).copied().unwrap_or(0)
    }

    fn update(&mut self, f: impl FnOnce(u8) -> u8) {
        if let Some(cell) = self.tape.get_mut(self.pointer) {
            *cell = f(*cell);
        }
    }

    fn increment_pointer(&mut self) {
        let last = self.tape.len().saturating_sub(1);
        if self.pointer >= last {
            self.fault = Some(BrainFError::PointerOverflow {
                last,
                position: self.cursor,
            });
        } else {
            self.pointer += 1;
        }
    }

    fn decrement_pointer(&mut self) {
        match self.pointer.checked_sub(1) {
            Some(pointer) => self.pointer = pointer,
            None => {
                self.fault = Some(BrainFError::PointerUnderflow {
                    position: self.cursor,
                });
            }
        }
    }

    fn increment(&mut self) {
        self.update(|cell| cell.wrapping_add(1));
    }

    fn decrement(&mut self) {
        self.update(|cell| cell.wrapping_sub(1));
    }

    fn print(&mut self) {
        let value = self.current();
        self.output.push(value);
    }

    fn input(&mut self) {
        if let Some(byte) = self.input.pop_front() {
            self.update(|_| byte);
        }
    }

    fn jump_forward(&mut self) {
        if self.current() != 0 {
            return;
        }
        let mut depth = 0_usize;
        let mut position = self.cursor;
        loop {
            position += 1;
            match self.code.get(position) {
                None => {
                    self.fault = Some(BrainFError::UnbalancedBracket {
                        bracket: '[',
                        position: self.cursor,
                    });
                    return;
                }
                Some(']') if depth == 0 => break,
                Some(']') => depth -= 1,
                Some('[') => depth += 1,
                Some(_) => {}
            }
        }
        self.cursor = position;
    }

    fn jump_backward(&mut self) {
        if self.current() == 0 {
            return;
        }
        let mut depth = 0_usize;
        let mut position = self.cursor;
        loop {
            let Some(previous) = position.checked_sub(1) else {
                self.fault = Some(BrainFError::UnbalancedBracket {
                    bracket: ']',
                    position: self.cursor,
                });
                return;
            };
            position = previous;
            match self.code.get(position) {
                Some('[') if depth == 0 => break,
                Some('[') => depth -= 1,
                Some(']') => depth += 1,
                _ => {}
            }
        }
        self.cursor = position;
    }

    fn ignore(&mut self, _comment: &str) {}
}

impl Handler for BrainF {
    fn methods() -> Vec<MethodDescriptor<Self>> {
        vec![
            MethodDescriptor::string_sink(Self::ignore),
            MethodDescriptor::action("increment_pointer", Self::increment_pointer).alias(">"),
            MethodDescriptor::action("decrement_pointer", Self::decrement_pointer).alias("<"),
            MethodDescriptor::action("increment", Self::increment).alias("+"),
            MethodDescriptor::action("decrement", Self::decrement).alias("-"),
            MethodDescriptor::action("print", Self::print).alias("."),
            MethodDescriptor::action("input", Self::input).alias(","),
            MethodDescriptor::action("jump_forward", Self::jump_forward).alias("["),
            MethodDescriptor::action("jump_backward", Self::jump_backward).alias("]"),
            MethodDescriptor::helper("clear", 0, true).excluded(),
            MethodDescriptor::helper("set_code", 1, false).excluded(),
            MethodDescriptor::helper("execute", 0, false).excluded(),
        ]
    }
}

impl Dispatch for BrainF {
    fn dispatch_table(&self) -> Arc<DispatchTable<Self>> {
        Arc::clone(&self.table)
    }
}

fn allocate_tape(length: usize) -> Result<Vec<u8>, BrainFError> {
    let too_large = BrainFError::TapeTooLarge {
        length,
        max: MAX_TAPE_LENGTH,
    };
    if length > MAX_TAPE_LENGTH {
        return Err(too_large);
    }
    let cells = length.max(1);
    let mut tape = Vec::new();
    tape.try_reserve_exact(cells).map_err(|_| too_large)?;
    tape.resize(cells, 0);
    Ok(tape)
}

fn check_brackets(code: &[char]) -> Result<(), BrainFError> {
    let mut open = Vec::new();
    for (position, &instruction) in code.iter().enumerate() {
        match instruction {
            '[' => open.push(position),
            ']' => {
                if open.pop().is_none() {
                    return Err(BrainFError::UnbalancedBracket {
                        bracket: ']',
                        position,
                    });
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(position) => Err(BrainFError::UnbalancedBracket {
            bracket: '[',
            position,
        }),
        None => Ok(()),
    }
}
