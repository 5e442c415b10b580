//! Token-to-method dispatch compiler.
//!
//! `textdispatch-core` turns the method set of a handler type into an
//! immutable [`DispatchTable`] that maps text tokens to method invocations.
//! Methods are described by [`MethodDescriptor`] values, classified into a
//! [`Role`], and compiled once per handler type. The compiled table is
//! `Send + Sync` and can be shared between any number of handler instances
//! and threads.
//!
//! Dispatch follows a fixed fallback chain: an exact action token wins, then
//! an integer literal reaches the `ParseInt` sink, then any remaining token
//! reaches the `ParseString` sink, and otherwise dispatch fails with
//! [`DispatchError::UnknownToken`].
//!
//! A [`TokenCatalog`] compiled from the same method set assigns each action
//! token a compact [`CatalogId`] for storage or transmission.
//!
//! # Example
//!
//! ```
//! use textdispatch_core::{DispatchOptions, DispatchTable, MethodDescriptor, Route};
//!
//! #[derive(Default)]
//! struct Stack(Vec<i64>);
//!
//! let methods = vec![
//!     MethodDescriptor::<Stack>::action("add", |s| {
//!         let sum = s.0.iter().sum();
//!         s.0 = vec![sum];
//!     })
//!     .alias("+"),
//!     MethodDescriptor::<Stack>::integer_sink(|s, v| s.0.push(v)),
//! ];
//! let table = DispatchTable::compile(&methods, DispatchOptions::default())?;
//!
//! let mut stack = Stack::default();
//! for token in ["2", "3", "+"] {
//!     table.dispatch(&mut stack, token)?;
//! }
//! assert_eq!(stack.0, vec![5]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod classify;
mod codec;
mod compile;
mod descriptor;
mod error;
mod handler;
mod numeric;
mod symbol;
mod table;

#[cfg(test)]
mod tests;

pub use self::classify::{
    ClassifiedMethod, PARSE_INT, PARSE_STRING, Role, SinkKind, classify, classify_all,
    is_valid_identifier,
};
pub use self::codec::{CatalogEntry, CatalogId, MAX_CATALOG_ENTRIES, TokenCatalog};
pub use self::descriptor::{
    ActionFn, Binding, IntegerSinkFn, MethodDescriptor, Signature, StringSinkFn,
};
pub use self::error::{CodecError, CompileError, DispatchError};
pub use self::handler::{Dispatch, Handler};
pub use self::numeric::{DispatchOptions, NumericDomain};
pub use self::symbol::{TokenResolver, resolve_token};
pub use self::table::{ActionSummary, DispatchTable, Route, TableSummary};
