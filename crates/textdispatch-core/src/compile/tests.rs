//! Unit tests for method-set partitioning.

use super::*;
use crate::descriptor::Signature;

#[derive(Default)]
struct Recorder {
    hits: Vec<String>,
}

fn noop(_: &mut Recorder) {}

#[test]
fn partitions_actions_in_declaration_order() {
    let methods = vec![
        MethodDescriptor::action("b", noop),
        MethodDescriptor::integer_sink(|p: &mut Recorder, v| p.hits.push(v.to_string())),
        MethodDescriptor::action("a", noop).alias("@"),
        MethodDescriptor::helper("render", 1, false),
    ];
    let partition = partition(&methods).expect("partition");
    let tokens: Vec<&str> = partition.actions.iter().map(|a| a.token.as_str()).collect();
    assert_eq!(tokens, vec!["b", "@"]);
    assert!(partition.integer_sink.is_some());
    assert!(partition.string_sink.is_none());
}

#[test]
fn sink_bound_with_wrong_shape_is_rejected() {
    let methods = vec![MethodDescriptor::action("ParseInt", noop)];
    let error = partition(&methods).err().expect("should fail");
    assert_eq!(
        error,
        CompileError::invalid_sink_arity("ParseInt", SinkKind::Integer, 0)
    );
}

#[test]
fn sink_with_right_binding_but_wrong_arity_is_rejected() {
    let methods = vec![
        MethodDescriptor::<Recorder>::new("ParseString", Signature::new(2, true))
            .bind(Binding::Text(|_, _| {})),
    ];
    let error = partition(&methods).err().expect("should fail");
    assert_eq!(
        error,
        CompileError::invalid_sink_arity("ParseString", SinkKind::String, 2)
    );
}

#[test]
fn second_sink_of_same_kind_is_rejected() {
    let methods = vec![
        MethodDescriptor::<Recorder>::string_sink(|_, _| {}),
        MethodDescriptor::action("m", noop),
        MethodDescriptor::string_sink(|_, _| {}),
    ];
    let error = partition(&methods).err().expect("should fail");
    assert_eq!(error, CompileError::duplicate_sink(SinkKind::String, 0, 2));
}

#[test]
fn unbound_action_shape_is_rejected() {
    let methods = vec![MethodDescriptor::<Recorder>::helper("tick", 0, true)];
    let error = partition(&methods).err().expect("should fail");
    assert_eq!(error, CompileError::unbound_action("tick"));
}

#[test]
fn excluded_unbound_method_is_accepted() {
    let methods = vec![MethodDescriptor::<Recorder>::helper("tick", 0, true).excluded()];
    let partition = partition(&methods).expect("partition");
    assert!(partition.actions.is_empty());
}

fn numbered_actions(count: usize) -> Vec<MethodDescriptor<Recorder>> {
    (0..count)
        .map(|n| MethodDescriptor::action(format!("a{n}"), noop))
        .collect()
}

#[test]
fn actions_beyond_catalog_range_are_rejected() {
    let methods = numbered_actions(70_000);
    let error = partition(&methods).err().expect("should fail");
    assert_eq!(error, CompileError::catalog_overflow(70_000));
}

#[test]
fn full_catalog_range_is_accepted() {
    let methods = numbered_actions(MAX_CATALOG_ENTRIES);
    let partition = partition(&methods).expect("partition");
    let last = partition.actions.last().expect("last action");
    assert_eq!(last.id, CatalogId::new(u16::MAX));
    assert_eq!(last.token, format!("a{}", u16::MAX));
}
