// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end execution through the derive macros and a fake database.

mod common;

use std::{cell::Cell, rc::Rc};

use common::{DatabaseError, FakeDatabase, init_tracing};
use procedure_derive::{
    ConfigurationError, Direction, ExecuteError, FromRow, MarshalError, ParamMap, PlanCache,
    ProcedureExecutor, ProcedureInput, ProcedureOutput, Row, SqlType, Value, marshal
};

#[derive(ProcedureInput)]
#[procedure(name = "get_user", schema = "hr", rename_all = "camelCase")]
pub struct GetUser {
    #[param(direction = "in", sql_type = SqlType::INTEGER)]
    pub user_id: i32,

    #[param(direction = "out", sql_type = SqlType::VARCHAR)]
    pub display_name: String,

    #[param(direction = "inout", sql_type = SqlType::VARCHAR, name = "p_note")]
    pub note: Option<String>,

    pub request_id: u64
}

#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: i64,

    #[column(name = "order_total")]
    pub total: f64,

    pub memo: Option<String>
}

#[derive(ProcedureOutput, Debug, Default)]
#[output(rename_all = "camelCase")]
pub struct UserResult {
    #[param(direction = "out", sql_type = SqlType::VARCHAR)]
    pub display_name: String,

    #[param(direction = "inout", sql_type = SqlType::VARCHAR, name = "p_note")]
    pub note: Option<String>,

    #[param(direction = "out", sql_type = SqlType::BIGINT)]
    pub order_count: i64,

    #[result_set(name = "orders")]
    pub orders: Vec<OrderRow>
}

fn get_user(user_id: i32) -> GetUser {
    GetUser {
        user_id,
        display_name: "never sent".to_owned(),
        note: Some("hello".to_owned()),
        request_id: 99
    }
}

fn user_values() -> ParamMap {
    ParamMap::from([
        ("displayName".to_owned(), Value::from("Alice")),
        ("p_note".to_owned(), Value::from("seen")),
        ("orderCount".to_owned(), Value::from(2_i64))
    ])
}

#[test]
fn round_trip_through_bound_names() {
    init_tracing();
    let database = FakeDatabase {
        rows: vec![
            Row::new().with("id", 1_i64).with("order_total", 9.5_f64),
            Row::new()
                .with("ID", 2_i64)
                .with("order_total", 20_i64)
                .with("memo", "gift")
        ],
        ..FakeDatabase::returning(user_values())
    };
    let executor = ProcedureExecutor::new(database);

    let result: UserResult = executor.execute(&get_user(7)).unwrap();

    assert_eq!(result.display_name, "Alice");
    assert_eq!(result.note.as_deref(), Some("seen"));
    assert_eq!(result.order_count, 2);
    assert_eq!(
        result.orders,
        vec![
            OrderRow {
                id:    1,
                total: 9.5,
                memo:  None
            },
            OrderRow {
                id:    2,
                total: 20.0,
                memo:  Some("gift".to_owned())
            },
        ]
    );
}

#[test]
fn call_carries_plan_and_inputs() {
    let executor = ProcedureExecutor::new(FakeDatabase::returning(user_values()));
    let _: UserResult = executor.execute(&get_user(7)).unwrap();

    let calls = executor.primitive().recorded();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.name, "get_user");
    assert_eq!(call.schema.as_deref(), Some("hr"));
    assert_eq!(call.call_string, "{call hr.get_user(?, ?, ?, ?, ?)}");

    let declared: Vec<(&str, Direction, SqlType)> = call
        .parameters
        .iter()
        .map(|p| (p.name(), p.direction(), p.sql_type()))
        .collect();
    assert_eq!(
        declared,
        vec![
            ("userId", Direction::In, SqlType::INTEGER),
            ("p_note", Direction::InOut, SqlType::VARCHAR),
            ("displayName", Direction::Out, SqlType::VARCHAR),
            ("p_note", Direction::InOut, SqlType::VARCHAR),
            ("orderCount", Direction::Out, SqlType::BIGINT)
        ]
    );

    assert_eq!(call.inputs.len(), 2);
    assert_eq!(call.inputs.get("userId"), Some(&Value::Int(7)));
    assert_eq!(call.inputs.get("p_note"), Some(&Value::Text("hello".to_owned())));
    assert!(!call.inputs.contains_key("displayName"));
    assert!(!call.inputs.contains_key("requestId"));
}

#[test]
fn plan_is_built_once_per_input_type() {
    let executor = ProcedureExecutor::new(FakeDatabase::returning(user_values()));
    let first: UserResult = executor.execute(&get_user(1)).unwrap();
    let second: UserResult = executor.execute(&get_user(2)).unwrap();

    assert_eq!(first.display_name, second.display_name);
    assert_eq!(executor.cache().builds(), 1);
    assert_eq!(executor.primitive().calls(), 2);
    assert!(executor.cache().contains::<GetUser>());
}

#[test]
fn missing_values_leave_zero_values() {
    let executor = ProcedureExecutor::new(FakeDatabase::default());
    let result: UserResult = executor.execute(&get_user(3)).unwrap();

    assert_eq!(result.display_name, "");
    assert_eq!(result.note, None);
    assert_eq!(result.order_count, 0);
    assert!(result.orders.is_empty());
}

#[test]
fn execution_error_reaches_caller_unchanged() {
    let executor = ProcedureExecutor::new(FakeDatabase {
        fail: Some("connection reset".to_owned()),
        ..FakeDatabase::default()
    });
    let err = executor.execute::<GetUser, UserResult>(&get_user(1)).unwrap_err();

    assert!(err.is_execution());
    assert_eq!(
        err.into_execution(),
        Some(DatabaseError("connection reset".to_owned()))
    );
}

#[test]
fn mistyped_value_is_marshal_error() {
    let executor = ProcedureExecutor::new(FakeDatabase::returning(ParamMap::from([(
        "orderCount".to_owned(),
        Value::from("many")
    )])));
    let err = executor.execute::<GetUser, UserResult>(&get_user(1)).unwrap_err();

    assert!(matches!(
        err,
        ExecuteError::Marshal(MarshalError::Write {
            type_name: "UserResult",
            ..
        })
    ));
}

#[test]
fn bad_row_fails_inside_the_database_side() {
    let executor = ProcedureExecutor::new(FakeDatabase {
        rows: vec![Row::new().with("id", "not a number")],
        ..FakeDatabase::default()
    });
    let err = executor.execute::<GetUser, UserResult>(&get_user(1)).unwrap_err();

    assert!(err.is_execution());
}

#[test]
fn one_output_type_per_input_type() {
    #[derive(ProcedureOutput, Debug, Default)]
    struct NameOnly {
        #[param(direction = "out", sql_type = SqlType::VARCHAR, name = "displayName")]
        name: String
    }

    let cache = std::sync::Arc::new(PlanCache::new());
    let executor = ProcedureExecutor::with_cache(FakeDatabase::default(), cache);
    let _: UserResult = executor.execute(&get_user(1)).unwrap();
    let err = executor.execute::<GetUser, NameOnly>(&get_user(1)).unwrap_err();

    assert!(matches!(
        err,
        ExecuteError::Configuration(ConfigurationError::OutputTypeMismatch { .. })
    ));
    assert_eq!(executor.primitive().calls(), 1);
}

#[test]
fn extract_inputs_skips_out_parameters() {
    #[derive(ProcedureInput)]
    #[procedure(name = "abc")]
    struct Abc {
        #[param(direction = "in", sql_type = 4)]
        a: i32,
        #[param(direction = "out", sql_type = 4)]
        b: i32,
        #[param(direction = "inout", sql_type = 4)]
        c: i32
    }

    let params = marshal::extract_inputs(
        &Abc {
            a: 1,
            b: 2,
            c: 3
        },
        &<Abc as ProcedureInput>::layout()
    )
    .unwrap();

    assert_eq!(
        params.keys().map(String::as_str).collect::<Vec<_>>(),
        ["a", "c"]
    );
}

#[test]
fn populate_output_by_field_name() {
    #[derive(ProcedureOutput, Default)]
    struct Totals {
        #[param(direction = "out", sql_type = 4)]
        x: i32,
        #[param(direction = "out", sql_type = 4)]
        y: Option<i32>
    }

    let layout = <Totals as ProcedureOutput>::layout();
    let totals: Totals =
        marshal::populate_output(&ParamMap::from([("x".to_owned(), Value::from(5_i32))]), &layout)
            .unwrap();
    assert_eq!(totals.x, 5);
    assert_eq!(totals.y, None);

    let empty: Totals = marshal::populate_output(&ParamMap::new(), &layout).unwrap();
    assert_eq!(empty.x, 0);
}

#[test]
fn row_type_errors_name_the_column() {
    let err = <OrderRow as FromRow>::from_row(&Row::new().with("order_total", "n/a")).unwrap_err();
    assert!(matches!(
        err,
        MarshalError::Column {
            row_type: "OrderRow",
            ..
        }
    ));
    assert!(err.to_string().contains("order_total"));
}

#[test]
fn inout_round_trip_on_a_type_deriving_both_sides() {
    #[derive(ProcedureInput, ProcedureOutput, Debug, Default)]
    #[procedure(name = "increment", rename_all = "UPPERCASE")]
    struct Counter {
        #[param(direction = "inout", sql_type = SqlType::INTEGER)]
        value: i32
    }

    let executor = ProcedureExecutor::new(FakeDatabase {
        echo: true,
        ..FakeDatabase::default()
    });
    let counter: Counter = executor.execute(&Counter { value: 41 }).unwrap();
    assert_eq!(counter.value, 41);

    let calls = executor.primitive().recorded();
    let call = &calls[0];
    let declared: Vec<(&str, Direction)> = call
        .parameters
        .iter()
        .map(|p| (p.name(), p.direction()))
        .collect();
    assert_eq!(
        declared,
        vec![("VALUE", Direction::InOut), ("VALUE", Direction::InOut)]
    );
    assert_eq!(call.inputs.get("VALUE"), Some(&Value::Int(41)));
}

#[test]
fn inputs_need_not_be_thread_safe() {
    #[derive(ProcedureInput)]
    #[procedure(name = "get_user", schema = "hr")]
    struct LocalLookup {
        #[param(direction = "in", sql_type = SqlType::INTEGER)]
        user_id: i32,

        attempts: Cell<u32>,

        owner: Rc<str>
    }

    let lookup = LocalLookup {
        user_id:  4,
        attempts: Cell::new(0),
        owner:    Rc::from("ops")
    };
    let executor = ProcedureExecutor::new(FakeDatabase::returning(user_values()));
    let result: UserResult = executor.execute(&lookup).unwrap();
    lookup.attempts.set(lookup.attempts.get() + 1);

    assert_eq!(result.display_name, "Alice");
    assert_eq!(lookup.attempts.get(), 1);
    assert_eq!(&*lookup.owner, "ops");
    assert_eq!(
        executor.primitive().recorded()[0].inputs.get("user_id"),
        Some(&Value::Int(4))
    );
}
