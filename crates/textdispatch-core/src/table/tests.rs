//! Unit tests for dispatch table compilation and the fallback chain.

use rstest::{fixture, rstest};

use super::*;
use crate::NumericDomain;

#[derive(Debug, Default, PartialEq, Eq)]
struct Recorder {
    calls: Vec<String>,
}

impl Recorder {
    fn record(&mut self, call: impl Into<String>) {
        self.calls.push(call.into());
    }
}

fn add(r: &mut Recorder) {
    r.record("add");
}

fn sub(r: &mut Recorder) {
    r.record("sub");
}

fn take_int(r: &mut Recorder, value: i64) {
    r.record(format!("int:{value}"));
}

fn take_text(r: &mut Recorder, token: &str) {
    r.record(format!("text:{token}"));
}

#[fixture]
fn arithmetic() -> DispatchTable<Recorder> {
    let methods = vec![
        MethodDescriptor::action("add", add).alias("+"),
        MethodDescriptor::action("sub", sub).alias("-"),
        MethodDescriptor::integer_sink(take_int),
    ];
    DispatchTable::compile(&methods, DispatchOptions::default()).expect("compile")
}

#[rstest]
#[case::alias("+", Route::Action(0), "add")]
#[case::second_alias("-", Route::Action(1), "sub")]
#[case::literal("7", Route::Integer(7), "int:7")]
#[case::negative_literal("-7", Route::Integer(-7), "int:-7")]
fn dispatches_through_fallback_chain(
    arithmetic: DispatchTable<Recorder>,
    #[case] token: &str,
    #[case] route: Route,
    #[case] call: &str,
) {
    let mut recorder = Recorder::default();
    assert_eq!(arithmetic.dispatch(&mut recorder, token), Ok(route));
    assert_eq!(recorder.calls, vec![call]);
}

#[rstest]
#[case::word("x")]
#[case::method_name_behind_alias("add")]
#[case::out_of_domain("2147483648")]
#[case::padded(" + ")]
#[case::empty("")]
fn unknown_tokens_invoke_nothing(arithmetic: DispatchTable<Recorder>, #[case] token: &str) {
    let mut recorder = Recorder::default();
    assert_eq!(
        arithmetic.dispatch(&mut recorder, token),
        Err(DispatchError::unknown_token(token))
    );
    assert!(recorder.calls.is_empty());
}

#[test]
fn table_without_sinks_rejects_literals() {
    let methods = vec![MethodDescriptor::action("M", add)];
    let table = DispatchTable::compile(&methods, DispatchOptions::default()).expect("compile");
    let mut recorder = Recorder::default();
    assert_eq!(table.dispatch(&mut recorder, "M"), Ok(Route::Action(0)));
    assert_eq!(
        table.dispatch(&mut recorder, "7"),
        Err(DispatchError::unknown_token("7"))
    );
    assert_eq!(recorder.calls, vec!["add"]);
}

#[test]
fn exact_match_shadows_both_sinks() {
    let methods = vec![
        MethodDescriptor::action("zero", add).alias("0"),
        MethodDescriptor::integer_sink(take_int),
        MethodDescriptor::string_sink(take_text),
    ];
    let table = DispatchTable::compile(&methods, DispatchOptions::default()).expect("compile");
    let mut recorder = Recorder::default();
    for token in ["0", "1", "zero"] {
        table.dispatch(&mut recorder, token).expect("dispatch");
    }
    assert_eq!(recorder.calls, vec!["add", "int:1", "text:zero"]);
}

#[test]
fn string_sink_catches_everything_else() {
    let methods = vec![
        MethodDescriptor::integer_sink(take_int),
        MethodDescriptor::string_sink(take_text),
    ];
    let table = DispatchTable::compile(&methods, DispatchOptions::default()).expect("compile");
    let mut recorder = Recorder::default();
    for token in ["12", "twelve", "1.5", ""] {
        table.dispatch(&mut recorder, token).expect("dispatch");
    }
    assert_eq!(
        recorder.calls,
        vec!["int:12", "text:twelve", "text:1.5", "text:"]
    );
}

#[test]
fn dispatch_invokes_exactly_what_route_reports() {
    let methods = vec![
        MethodDescriptor::action("add", add).alias("+"),
        MethodDescriptor::integer_sink(take_int),
        MethodDescriptor::string_sink(take_text),
    ];
    let table = DispatchTable::compile(&methods, DispatchOptions::default()).expect("compile");
    for token in ["+", "add", "-3", "3.0", ""] {
        let mut recorder = Recorder::default();
        let dispatched = table.dispatch(&mut recorder, token);
        assert_eq!(dispatched, table.route(token), "token {token:?}");
        assert_eq!(recorder.calls.len(), 1, "token {token:?}");
    }
}

#[rstest]
#[case::narrow(NumericDomain::I8, "300", Err(DispatchError::unknown_token("300")))]
#[case::wide(NumericDomain::I64, "2147483648", Ok(Route::Integer(2_147_483_648)))]
fn numeric_domain_bounds_the_integer_sink(
    #[case] domain: NumericDomain,
    #[case] token: &str,
    #[case] expected: Result<Route, DispatchError>,
) {
    let methods = vec![MethodDescriptor::integer_sink(take_int)];
    let options = DispatchOptions::new().with_numeric_domain(domain);
    let table = DispatchTable::compile(&methods, options).expect("compile");
    assert_eq!(table.route(token), expected);
}

#[test]
fn compilation_errors_produce_no_table() {
    let methods = vec![
        MethodDescriptor::action("plus", add).alias("+"),
        MethodDescriptor::action("add", add).alias("+"),
    ];
    let result = DispatchTable::compile(&methods, DispatchOptions::default());
    assert_eq!(
        result.err(),
        Some(CompileError::duplicate_token("+", "plus", "add"))
    );
}

#[rstest]
fn lookups_report_declared_methods(arithmetic: DispatchTable<Recorder>) {
    assert!(arithmetic.contains("+"));
    assert!(!arithmetic.contains("add"));
    assert_eq!(arithmetic.method_for("-"), Some("sub"));
    assert_eq!(arithmetic.method_at(0), Some("add"));
    assert_eq!(arithmetic.method_at(2), None);
    assert_eq!(arithmetic.tokens().collect::<Vec<_>>(), vec!["+", "-"]);
    assert_eq!(arithmetic.len(), 2);
    assert!(arithmetic.has_integer_sink());
    assert!(!arithmetic.has_string_sink());
}

#[rstest]
fn describe_lists_actions_then_sinks(arithmetic: DispatchTable<Recorder>) {
    insta::assert_snapshot!(arithmetic.describe(), @r"
    +  -> add
    -  -> sub
    integers (i32) -> ParseInt
    strings -> (none)
    ");
}

#[rstest]
fn summary_serializes_for_tooling(arithmetic: DispatchTable<Recorder>) {
    let json = serde_json::to_value(arithmetic.summary()).expect("serialize");
    assert_eq!(json["actions"][1]["method"], "sub");
    assert_eq!(json["integer_sink"], "ParseInt");
    assert_eq!(json["string_sink"], serde_json::Value::Null);
    assert_eq!(json["numeric_domain"], "i32");
}

#[test]
fn tables_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DispatchTable<Recorder>>();
}
