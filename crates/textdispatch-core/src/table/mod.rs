//! Compiled dispatch tables.
//!
//! A [`DispatchTable`] is compiled once per handler type and is immutable
//! afterwards. Dispatching a token walks a fixed fallback chain:
//!
//! 1. an exact, case-sensitive match against an action token invokes that
//!    action;
//! 2. otherwise, when an integer sink exists and the token parses within the
//!    configured [`NumericDomain`](crate::NumericDomain), the integer sink
//!    receives the value;
//! 3. otherwise, when a string sink exists, it receives the raw token;
//! 4. otherwise dispatch fails with [`DispatchError::UnknownToken`].
//!
//! Exact matches shadow the sinks, so a handler can claim a literal such as
//! `"+"` or `"0"` as a command.

mod describe;

use std::collections::HashMap;

use tracing::{debug, info};

use crate::classify::COMPILE_TARGET;
use crate::codec::{CatalogEntry, TokenCatalog};
use crate::compile::{BoundSink, ResolvedAction, partition};
use crate::descriptor::{ActionFn, IntegerSinkFn, MethodDescriptor, StringSinkFn};
use crate::error::{CompileError, DispatchError};
use crate::numeric::DispatchOptions;

pub use describe::{ActionSummary, TableSummary};

/// Tracing target for token dispatch.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// The branch of the fallback chain that handled a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// An action matched; carries its declaration-order slot.
    Action(usize),
    /// The integer sink received the parsed value.
    Integer(i64),
    /// The string sink received the raw token.
    Text,
}

/// A resolved route together with the callable bound to it.
enum Target<H> {
    Action { slot: usize, invoke: ActionFn<H> },
    Integer { invoke: IntegerSinkFn<H>, value: i64 },
    Text { invoke: StringSinkFn<H> },
}

impl<H> Target<H> {
    const fn route(&self) -> Route {
        match self {
            Self::Action { slot, .. } => Route::Action(*slot),
            Self::Integer { value, .. } => Route::Integer(*value),
            Self::Text { .. } => Route::Text,
        }
    }
}

/// Token-to-method dispatch table for handler type `H`.
pub struct DispatchTable<H> {
    actions: Vec<ResolvedAction<H>>,
    index: HashMap<String, usize>,
    integer_sink: Option<BoundSink<IntegerSinkFn<H>>>,
    string_sink: Option<BoundSink<StringSinkFn<H>>>,
    options: DispatchOptions,
}

impl<H> DispatchTable<H> {
    /// Compiles a dispatch table from a handler's method set.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when two actions share a token, when a
    /// reserved sink cannot be bound, when a sink is declared twice, or when
    /// an action has no nullary binding. No partial table is produced.
    ///
    /// # Example
    ///
    /// ```
    /// use textdispatch_core::{DispatchOptions, DispatchTable, MethodDescriptor, Route};
    ///
    /// #[derive(Default)]
    /// struct Acc(i64);
    ///
    /// let methods = vec![
    ///     MethodDescriptor::<Acc>::action("double", |a| a.0 *= 2).alias("*"),
    ///     MethodDescriptor::<Acc>::integer_sink(|a, v| a.0 += v),
    /// ];
    /// let table = DispatchTable::compile(&methods, DispatchOptions::default())?;
    ///
    /// let mut acc = Acc::default();
    /// assert_eq!(table.dispatch(&mut acc, "21")?, Route::Integer(21));
    /// assert_eq!(table.dispatch(&mut acc, "*")?, Route::Action(0));
    /// assert_eq!(acc.0, 42);
    /// assert!(table.dispatch(&mut acc, "double").is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn compile(
        methods: &[MethodDescriptor<H>],
        options: DispatchOptions,
    ) -> Result<Self, CompileError> {
        let partition = partition(methods)?;
        let index = partition
            .actions
            .iter()
            .enumerate()
            .map(|(slot, action)| (action.token.clone(), slot))
            .collect();
        let table = Self {
            actions: partition.actions,
            index,
            integer_sink: partition.integer_sink,
            string_sink: partition.string_sink,
            options,
        };
        info!(
            target: COMPILE_TARGET,
            actions = table.len(),
            integer_sink = table.has_integer_sink(),
            string_sink = table.has_string_sink(),
            numeric_domain = %options.numeric_domain(),
            "compiled dispatch table"
        );
        Ok(table)
    }

    /// Resolves the route for `token` without invoking anything.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownToken`] when no action matches and no
    /// sink accepts the token.
    pub fn route(&self, token: &str) -> Result<Route, DispatchError> {
        self.target(token).map(|target| target.route())
    }

    /// Dispatches `token` to `handler`.
    ///
    /// Exactly one method is invoked on success; nothing is invoked on
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownToken`] when no action matches and no
    /// sink accepts the token.
    pub fn dispatch(&self, handler: &mut H, token: &str) -> Result<Route, DispatchError> {
        let target = self.target(token)?;
        let route = target.route();
        debug!(target: DISPATCH_TARGET, token, ?route, "dispatching token");
        match target {
            Target::Action { invoke, .. } => invoke(handler),
            Target::Integer { invoke, value } => invoke(handler, value),
            Target::Text { invoke } => invoke(handler, token),
        }
        Ok(route)
    }

    fn target(&self, token: &str) -> Result<Target<H>, DispatchError> {
        let action = self
            .index
            .get(token)
            .and_then(|&slot| self.actions.get(slot).map(|action| (slot, action)));
        if let Some((slot, action)) = action {
            return Ok(Target::Action {
                slot,
                invoke: action.invoke,
            });
        }
        let parsed = self.integer_sink.as_ref().and_then(|sink| {
            self.options
                .numeric_domain()
                .parse(token)
                .map(|value| (sink, value))
        });
        if let Some((sink, value)) = parsed {
            return Ok(Target::Integer {
                invoke: sink.invoke,
                value,
            });
        }
        if let Some(sink) = self.string_sink.as_ref() {
            return Ok(Target::Text {
                invoke: sink.invoke,
            });
        }
        Err(DispatchError::unknown_token(token))
    }

    /// Returns `true` when `token` exactly matches an action.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Returns the method bound to `token`, if any.
    #[must_use]
    pub fn method_for(&self, token: &str) -> Option<&str> {
        self.index
            .get(token)
            .and_then(|&slot| self.actions.get(slot))
            .map(|action| action.method.as_str())
    }

    /// Returns the method occupying an action slot.
    #[must_use]
    pub fn method_at(&self, slot: usize) -> Option<&str> {
        self.actions.get(slot).map(|action| action.method.as_str())
    }

    /// Iterates action tokens in declaration order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|action| action.token.as_str())
    }

    /// Returns the number of actions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` when the table has no actions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns `true` when an integer sink is bound.
    #[must_use]
    pub const fn has_integer_sink(&self) -> bool {
        self.integer_sink.is_some()
    }

    /// Returns `true` when a string sink is bound.
    #[must_use]
    pub const fn has_string_sink(&self) -> bool {
        self.string_sink.is_some()
    }

    /// Returns the options the table was compiled with.
    #[must_use]
    pub const fn options(&self) -> DispatchOptions {
        self.options
    }

    /// Builds the encode/decode catalog for this table's actions.
    #[must_use]
    pub fn catalog(&self) -> TokenCatalog {
        TokenCatalog::from_entries(self.actions.iter().map(|action| CatalogEntry {
            id: action.id,
            method: action.method.clone(),
            token: action.token.clone(),
        }))
    }
}

#[cfg(test)]
mod tests;
