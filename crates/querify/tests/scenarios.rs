mod common;

use common::{init_tracing, request};
use querify::{
    core::{
        error::ErrorClass,
        format::FormatError,
        key::resolve,
    },
    error::{ErrorKind, ErrorOrigin},
    prelude::*,
};

const USERS: &[(&str, &str, &str)] = &[("id", "NUMBER(5)", "PK"), ("name", "VARCHAR2(10)", "No")];

#[test]
fn insert_escapes_quotes() {
    init_tracing();

    let generated = querify::compile(&request(
        "t",
        QueryType::Insert,
        USERS,
        &[&["id", "name"], &["1", "ab'c"]],
    ))
    .unwrap();

    assert!(
        generated
            .query
            .contains("INSERT INTO t (id, name) VALUES (1, 'ab''c');"),
        "{}",
        generated.query
    );
}

#[test]
fn merge_leaves_surrogate_id_to_the_database() {
    init_tracing();

    let generated = querify::compile(&request(
        "t",
        QueryType::Merge,
        USERS,
        &[&["id", "name"], &["1", "ab'c"]],
    ))
    .unwrap();
    let query = &generated.query;

    assert!(query.contains("WHEN NOT MATCHED THEN INSERT (name) VALUES (src.name);"), "{query}");
    assert!(query.contains("WHEN MATCHED THEN UPDATE SET tgt.name = src.name\n"), "{query}");
    assert!(query.contains("ON (tgt.id = src.id)"), "{query}");
}

#[test]
fn boolean_flag_rejects_two() {
    init_tracing();

    let fields = [("id", "NUMBER(5)", "PK"), ("active", "NUMBER(1,0)", "No")];
    let err = querify::compile(&request(
        "t",
        QueryType::Insert,
        &fields,
        &[&["id", "active"], &["1", "2"]],
    ))
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Data(ErrorClass::PrecisionOverflow));
    assert_eq!(err.origin, ErrorOrigin::Format);
    assert_eq!(err.row, Some(1));
    assert_eq!(err.column.as_deref(), Some("B"));
    assert!(err.message.contains("active"), "{}", err.message);
}

#[test]
fn impossible_date_is_unsupported() {
    init_tracing();

    let fields = [("id", "NUMBER(5)", "PK"), ("starts_on", "DATE", "Yes")];
    let err = querify::compile(&request(
        "t",
        QueryType::Insert,
        &fields,
        &[&["id", "starts_on"], &["1", "2024-13-40"]],
    ))
    .unwrap_err();

    assert_eq!(err.class(), Some(ErrorClass::UnsupportedDialect));
    assert_eq!(err.column.as_deref(), Some("B"));
}

#[test]
fn impossible_date_is_an_invalid_date_in_core_terms() {
    let fields = [("id", "NUMBER(5)", "PK"), ("starts_on", "DATE", "Yes")];
    let err = Compiler::default()
        .compile(&request(
            "t",
            QueryType::Insert,
            &fields,
            &[&["id", "starts_on"], &["1", "2024-13-40"]],
        ))
        .unwrap_err();

    assert!(matches!(
        err,
        querify::core::error::CompileError::Format {
            source: FormatError::InvalidDate { .. },
            ..
        }
    ));
}

#[test]
fn precision_boundary_end_to_end() {
    let fields = [("id", "NUMBER(5)", "PK"), ("amount", "NUMBER(5,2)", "Yes")];
    let run = |value: &str| {
        querify::compile(&request(
            "t",
            QueryType::Insert,
            &fields,
            &[&["id", "amount"], &["1", value]],
        ))
    };

    assert!(run("123.45").unwrap().query.contains("VALUES (1, 123.45);"));
    assert_eq!(
        run("1234.5").unwrap_err().class(),
        Some(ErrorClass::PrecisionOverflow)
    );
    assert_eq!(
        run("1.234").unwrap_err().class(),
        Some(ErrorClass::PrecisionOverflow)
    );
}

#[test]
fn config_heuristic_outranks_pk_markers() {
    let fields = [
        ("user_id", "NUMBER(10)", "PK"),
        ("parameter_key", "VARCHAR2(50)", "No"),
        ("parameter_value", "VARCHAR2(200)", "Yes"),
    ];

    let keys = resolve(&common::schema(&fields), "user_config");
    assert_eq!(keys.as_slice(), ["parameter_key"]);

    let generated = querify::compile(&request(
        "user_config",
        QueryType::Merge,
        &fields,
        &[
            &["user_id", "parameter_key", "parameter_value"],
            &["7", "theme", "dark"],
        ],
    ))
    .unwrap();

    assert!(generated
        .query
        .contains("ON (tgt.parameter_key = src.parameter_key)"));
    assert!(generated
        .query
        .contains("UPDATE SET tgt.user_id = src.user_id, tgt.parameter_value = src.parameter_value"));
}

#[test]
fn merge_keeps_natural_keys_out_of_update_but_in_insert() {
    let fields = [
        ("user_id", "NUMBER(10)", "PK"),
        ("email", "VARCHAR2(100)", "No"),
        ("created_time", "TIMESTAMP", "No"),
        ("created_by", "VARCHAR2(30)", "No"),
    ];

    let generated = querify::compile(&request(
        "app.users",
        QueryType::Merge,
        &fields,
        &[
            &["user_id", "email", "created_time", "created_by"],
            &["1", "a@example.com", "", ""],
        ],
    ))
    .unwrap();
    let query = &generated.query;

    let set = query
        .lines()
        .find(|line| line.starts_with("WHEN MATCHED THEN UPDATE SET"))
        .unwrap();
    assert!(!set.contains("user_id"));
    assert!(!set.contains("created_time"));
    assert!(!set.contains("created_by"));

    let insert = query
        .lines()
        .find(|line| line.starts_with("WHEN NOT MATCHED THEN INSERT"))
        .unwrap();
    assert!(insert.contains("user_id"));
}

#[test]
fn invalid_requests_produce_no_sql() {
    let err = querify::compile(&request(
        "t",
        QueryType::Insert,
        USERS,
        &[&["id", "title"], &["1", "x"]],
    ))
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Data(ErrorClass::StructuralMismatch));
    assert_eq!(err.origin, ErrorOrigin::Validate);
    assert_eq!(err.row, None);
}

#[test]
fn chunked_output_reuses_the_verification_block() {
    let rows: Vec<Vec<String>> = std::iter::once(vec!["id".to_string(), "name".to_string()])
        .chain((1..=50).map(|i| vec![i.to_string(), format!("n{i}")]))
        .collect();
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();
    let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();

    let options = CompileOptions::default().with_chunk_budget_bytes(1024);
    let generated =
        querify::compile_with(&request("t", QueryType::Insert, USERS, &rows), options).unwrap();

    assert!(generated.report.chunks > 1);
    assert_eq!(generated.report.oversized, 0);

    let output = querify::split(&generated.query, 1024);
    assert_eq!(output.chunks.len(), generated.report.chunks);
    for chunk in &output.chunks {
        assert!(chunk.starts_with("SET DEFINE OFF;"));
        assert!(chunk.trim_end().ends_with(");"));
        assert!(chunk.contains("SELECT * FROM t WHERE id IN (1, 2, 3"));
        assert!(chunk.len() <= 1024);
    }
}
