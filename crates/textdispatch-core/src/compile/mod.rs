//! Front half of compilation shared by the dispatch table and the catalog.
//!
//! [`partition`] classifies every descriptor, resolves action tokens, assigns
//! catalog ids, binds the sinks, and rejects every configuration error before
//! either artefact is built. Both compilers therefore see the same validated
//! method set.

use tracing::debug;

use crate::classify::{COMPILE_TARGET, Role, SinkKind, classify_all};
use crate::codec::{CatalogId, MAX_CATALOG_ENTRIES};
use crate::descriptor::{ActionFn, Binding, IntegerSinkFn, MethodDescriptor, StringSinkFn};
use crate::error::CompileError;
use crate::symbol::TokenResolver;

/// A resolved, bound action.
pub(crate) struct ResolvedAction<H> {
    pub(crate) id: CatalogId,
    pub(crate) token: String,
    pub(crate) method: String,
    pub(crate) invoke: ActionFn<H>,
}

/// A bound sink together with the method that declared it.
pub(crate) struct BoundSink<F> {
    pub(crate) method: String,
    pub(crate) invoke: F,
    declared_at: usize,
}

/// The validated method set of one handler type.
pub(crate) struct Partition<H> {
    pub(crate) actions: Vec<ResolvedAction<H>>,
    pub(crate) integer_sink: Option<BoundSink<IntegerSinkFn<H>>>,
    pub(crate) string_sink: Option<BoundSink<StringSinkFn<H>>>,
}

/// Partitions `methods` into actions and sinks.
///
/// # Errors
///
/// Returns [`CompileError::CatalogOverflow`] when there are more actions than
/// catalog ids, otherwise the first configuration error in declaration order:
/// [`CompileError::DuplicateToken`], [`CompileError::InvalidSinkArity`],
/// [`CompileError::DuplicateSink`], or [`CompileError::UnboundAction`].
pub(crate) fn partition<H>(
    methods: &[MethodDescriptor<H>],
) -> Result<Partition<H>, CompileError> {
    let classified = classify_all(methods);
    let action_count = classified
        .iter()
        .filter(|method| method.role() == Role::Action)
        .count();
    if action_count > MAX_CATALOG_ENTRIES {
        return Err(CompileError::catalog_overflow(action_count));
    }

    let mut resolver = TokenResolver::new();
    let mut partition = Partition {
        actions: Vec::with_capacity(action_count),
        integer_sink: None,
        string_sink: None,
    };

    for (index, method) in classified.iter().enumerate() {
        let descriptor = method.descriptor();
        match method.role() {
            Role::Action => {
                let token = resolver.claim(descriptor)?;
                let Some(Binding::Action(invoke)) = descriptor.binding() else {
                    return Err(CompileError::unbound_action(descriptor.name()));
                };
                let Ok(raw) = u16::try_from(partition.actions.len()) else {
                    return Err(CompileError::catalog_overflow(action_count));
                };
                partition.actions.push(ResolvedAction {
                    id: CatalogId::new(raw),
                    token: token.to_owned(),
                    method: descriptor.name().to_owned(),
                    invoke,
                });
            }
            Role::IntegerSink => {
                let Some(Binding::Integer(invoke)) = descriptor.binding() else {
                    return Err(sink_arity_error(descriptor, SinkKind::Integer));
                };
                check_sink_arity(descriptor, SinkKind::Integer)?;
                install_sink(
                    &mut partition.integer_sink,
                    SinkKind::Integer,
                    descriptor,
                    invoke,
                    index,
                )?;
            }
            Role::StringSink => {
                let Some(Binding::Text(invoke)) = descriptor.binding() else {
                    return Err(sink_arity_error(descriptor, SinkKind::String));
                };
                check_sink_arity(descriptor, SinkKind::String)?;
                install_sink(
                    &mut partition.string_sink,
                    SinkKind::String,
                    descriptor,
                    invoke,
                    index,
                )?;
            }
            Role::Excluded | Role::Ignored => {}
        }
    }

    debug!(
        target: COMPILE_TARGET,
        actions = partition.actions.len(),
        integer_sink = partition.integer_sink.is_some(),
        string_sink = partition.string_sink.is_some(),
        "partitioned method set"
    );
    Ok(partition)
}

fn sink_arity_error<H>(descriptor: &MethodDescriptor<H>, sink: SinkKind) -> CompileError {
    CompileError::invalid_sink_arity(
        descriptor.name(),
        sink,
        descriptor.signature().parameter_count(),
    )
}

fn check_sink_arity<H>(
    descriptor: &MethodDescriptor<H>,
    sink: SinkKind,
) -> Result<(), CompileError> {
    if descriptor.signature().parameter_count() == 1 {
        Ok(())
    } else {
        Err(sink_arity_error(descriptor, sink))
    }
}

fn install_sink<H, F>(
    slot: &mut Option<BoundSink<F>>,
    sink: SinkKind,
    descriptor: &MethodDescriptor<H>,
    invoke: F,
    index: usize,
) -> Result<(), CompileError> {
    if let Some(existing) = slot.as_ref() {
        return Err(CompileError::duplicate_sink(sink, existing.declared_at, index));
    }
    *slot = Some(BoundSink {
        method: descriptor.name().to_owned(),
        invoke,
        declared_at: index,
    });
    Ok(())
}

#[cfg(test)]
mod tests;
