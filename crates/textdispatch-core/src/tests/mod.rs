//! Crate-level integration and BDD tests.

use std::sync::Arc;

use crate::{
    Dispatch, DispatchOptions, DispatchTable, Handler, MethodDescriptor, Role, Route, classify,
};


#[derive(Default)]
struct Showcase {
    log: Vec<String>,
}

impl Showcase {
    fn note(&mut self, entry: impl Into<String>) {
        self.log.push(entry.into());
    }
}

impl Handler for Showcase {
    fn methods() -> Vec<MethodDescriptor<Self>> {
        vec![
            MethodDescriptor::<Self>::action("M", |s| s.note("M")),
            MethodDescriptor::<Self>::action("N", |s| s.note("N")),
            MethodDescriptor::<Self>::integer_sink(|s, v| s.note(format!("int {v}"))),
            MethodDescriptor::<Self>::string_sink(|s, t| s.note(format!("str {t}"))),
            MethodDescriptor::helper("K1", 1, true),
            MethodDescriptor::helper("K2", 0, false),
            MethodDescriptor::<Self>::action("Main", |s| s.note("Main")).excluded(),
        ]
    }
}

struct Session {
    table: Arc<DispatchTable<Showcase>>,
    state: Showcase,
}

#[test]
fn handler_trait_compiles_declared_methods() {
    let roles: Vec<Role> = Showcase::methods().iter().map(classify).collect();
    assert_eq!(
        roles,
        vec![
            Role::Action,
            Role::Action,
            Role::IntegerSink,
            Role::StringSink,
            Role::Ignored,
            Role::Ignored,
            Role::Excluded,
        ]
    );

    let table = Showcase::compile_table(DispatchOptions::default()).expect("table");
    assert_eq!(table.tokens().collect::<Vec<_>>(), vec!["M", "N"]);
    let catalog = Showcase::compile_catalog().expect("catalog");
    assert_eq!(catalog.len(), 2);
}

#[test]
fn one_table_serves_many_instances() {
    let table = Arc::new(Showcase::compile_table(DispatchOptions::default()).expect("table"));
    let mut sessions: Vec<Session> = (0..3)
        .map(|_| Session {
            table: Arc::clone(&table),
            state: Showcase::default(),
        })
        .collect();
    for (n, session) in sessions.iter_mut().enumerate() {
        let token = n.to_string();
        session
            .table
            .dispatch(&mut session.state, &token)
            .expect("dispatch");
    }
    let logs: Vec<&[String]> = sessions.iter().map(|s| s.state.log.as_slice()).collect();
    assert_eq!(logs, vec![["int 0"], ["int 1"], ["int 2"]]);
}

struct Tally {
    table: Arc<DispatchTable<Self>>,
    total: i64,
}

impl Handler for Tally {
    fn methods() -> Vec<MethodDescriptor<Self>> {
        vec![
            MethodDescriptor::<Self>::action("neg", |t| t.total = -t.total),
            MethodDescriptor::<Self>::integer_sink(|t, v| t.total += v),
        ]
    }
}

impl Dispatch for Tally {
    fn dispatch_table(&self) -> Arc<DispatchTable<Self>> {
        Arc::clone(&self.table)
    }
}

#[test]
fn dispatch_all_stops_at_first_unknown_token() {
    let table = Arc::new(Tally::compile_table(DispatchOptions::default()).expect("table"));
    let mut tally = Tally { table, total: 0 };
    assert_eq!(tally.dispatch("5"), Ok(Route::Integer(5)));
    assert_eq!(tally.dispatch_all(["3", "neg"]), Ok(2));
    assert!(tally.dispatch_all(["1", "oops", "100"]).is_err());
    assert_eq!(tally.total, -7);
}

#[test]
fn tables_compile_concurrently() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                Showcase::compile_table(DispatchOptions::default()).map(|table| table.len())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("join"), Ok(2));
    }
}
