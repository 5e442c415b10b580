//! Handler traits tying a type to its method set and compiled table.

use std::sync::Arc;

use crate::codec::TokenCatalog;
use crate::descriptor::MethodDescriptor;
use crate::error::{CompileError, DispatchError};
use crate::numeric::DispatchOptions;
use crate::table::{DispatchTable, Route};

/// A type whose methods can be compiled into a dispatch table.
///
/// Implementors list every method they want the compiler to see, including
/// helpers that should classify as excluded or ignored.
pub trait Handler: Sized {
    /// Returns the handler's method set in declaration order.
    fn methods() -> Vec<MethodDescriptor<Self>>;

    /// Compiles the handler's dispatch table.
    ///
    /// # Errors
    ///
    /// Propagates any [`CompileError`] raised by the method set.
    fn compile_table(options: DispatchOptions) -> Result<DispatchTable<Self>, CompileError> {
        DispatchTable::compile(&Self::methods(), options)
    }

    /// Compiles the handler's token catalog.
    ///
    /// # Errors
    ///
    /// Propagates any [`CompileError`] raised by the method set.
    fn compile_catalog() -> Result<TokenCatalog, CompileError> {
        TokenCatalog::compile(&Self::methods())
    }
}

/// A handler instance that carries a shared handle to its compiled table.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use textdispatch_core::{
///     Dispatch, DispatchOptions, DispatchTable, Handler, MethodDescriptor,
/// };
///
/// struct Counter {
///     table: Arc<DispatchTable<Self>>,
///     value: i64,
/// }
///
/// impl Handler for Counter {
///     fn methods() -> Vec<MethodDescriptor<Self>> {
///         vec![
///             MethodDescriptor::<Self>::action("inc", |c| c.value += 1),
///             MethodDescriptor::<Self>::integer_sink(|c, v| c.value = v),
///         ]
///     }
/// }
///
/// impl Dispatch for Counter {
///     fn dispatch_table(&self) -> Arc<DispatchTable<Self>> {
///         Arc::clone(&self.table)
///     }
/// }
///
/// let table = Arc::new(Counter::compile_table(DispatchOptions::default())?);
/// let mut counter = Counter { table, value: 0 };
/// counter.dispatch("40")?;
/// counter.dispatch("inc")?;
/// counter.dispatch("inc")?;
/// assert_eq!(counter.value, 42);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Dispatch: Handler {
    /// Returns the table this instance dispatches through.
    fn dispatch_table(&self) -> Arc<DispatchTable<Self>>;

    /// Dispatches one token to `self`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownToken`] when nothing accepts the
    /// token.
    fn dispatch(&mut self, token: &str) -> Result<Route, DispatchError> {
        let table = self.dispatch_table();
        table.dispatch(self, token)
    }

    /// Dispatches every token in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`DispatchError`]; earlier tokens stay applied.
    fn dispatch_all<'t, I>(&mut self, tokens: I) -> Result<usize, DispatchError>
    where
        I: IntoIterator<Item = &'t str>,
    {
        let table = self.dispatch_table();
        let mut count = 0;
        for token in tokens {
            table.dispatch(self, token)?;
            count += 1;
        }
        Ok(count)
    }
}
