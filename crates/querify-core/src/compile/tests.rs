use crate::{
    compile::{CompileRequest, Compiler, compile, split, split_statements},
    config::CompileOptions,
    error::{CompileError, ErrorClass},
    generate::QueryType,
    test_support::{grid, schema_rows},
    validate::ValidationError,
};
use proptest::prelude::*;

const USERS: &[(&str, &str, &str)] = &[
    ("id", "NUMBER(5)", "PK"),
    ("name", "VARCHAR2(10)", "No"),
    ("updated_time", "TIMESTAMP", "Yes"),
];

fn request(query_type: QueryType, rows: &[&[&str]]) -> CompileRequest {
    CompileRequest::new("app.users", query_type, schema_rows(USERS), grid(rows))
}

// ---- compile -----------------------------------------------------------

#[test]
fn compile_returns_query_and_metadata() {
    let generated = compile(&request(
        QueryType::Insert,
        &[&["id", "name", "updated_time"], &["1", "a", ""], &["2", "b", ""]],
    ))
    .unwrap();

    assert_eq!(generated.full_table_name, "app.users");
    assert_eq!(generated.primary_keys.as_slice(), ["id"]);
    assert_eq!(generated.table_schema.len(), 3);
    assert_eq!(generated.size_in_bytes, generated.query.len());
    assert!(generated.query.starts_with("SET DEFINE OFF;\n"));

    let report = &generated.report;
    assert_eq!(report.data_rows, 2);
    assert_eq!(report.statements, 2);
    assert_eq!(report.chunks, 1);
    assert_eq!(report.oversized, 0);
}

#[test]
fn validation_errors_are_returned_untouched() {
    let err = compile(&request(
        QueryType::Insert,
        &[&["id", "name", "updated_time"], &["1", "", ""]],
    ))
    .unwrap_err();

    assert!(matches!(
        err,
        CompileError::Validation(ValidationError::NullConstraint { row: 1, .. })
    ));
    assert_eq!(err.class(), ErrorClass::NullConstraintViolation);
    assert_eq!(err.column_letter(), Some("B"));
}

#[test]
fn compiler_validate_matches_compile() {
    let compiler = Compiler::default();
    let data = grid(&[&["id", "name"], &["1", "a"]]);

    let result = compiler.validate(&schema_rows(USERS), &data);

    assert_eq!(
        result.error(),
        Some(&ValidationError::FieldCountMismatch {
            schema: 3,
            header: 2
        })
    );
}

#[test]
fn options_reach_the_formatter() {
    let compiler = Compiler::new(CompileOptions::default().with_strict_dates(false));
    let generated = compiler
        .compile(&request(
            QueryType::Insert,
            &[&["id", "name", "updated_time"], &["1", "a", ""]],
        ))
        .unwrap();

    assert!(!compiler.options().strict_dates);
    assert!(generated.query.contains("INTERVAL '5' MINUTE"));
}

#[test]
fn compile_is_deterministic() {
    let req = request(
        QueryType::Merge,
        &[&["id", "name", "updated_time"], &["1", "o'k", ""], &["2", "b", ""]],
    );

    let first = compile(&req).unwrap();
    let second = compile(&req).unwrap();

    assert_eq!(first, second);
}

// ---- splitter ----------------------------------------------------------

#[test]
fn semicolons_inside_literals_do_not_split() {
    let text = "INSERT INTO t (a) VALUES ('x;y');\nINSERT INTO t (a) VALUES ('it''s; ok');\n\"odd;name\";";

    assert_eq!(
        split_statements(text),
        [
            "INSERT INTO t (a) VALUES ('x;y')",
            "INSERT INTO t (a) VALUES ('it''s; ok')",
            "\"odd;name\"",
        ]
    );
}

#[test]
fn split_repacks_body_and_repeats_verification() {
    let text = "SET DEFINE OFF;\n\n\
                INSERT INTO t (a) VALUES (1);\n\
                INSERT INTO t (a) VALUES (2);\n\
                INSERT INTO t (a) VALUES (3);\n\n\
                SELECT * FROM t WHERE a IN (1, 2, 3);\n";

    let output = split(text, 90);

    assert_eq!(output.statements, 3);
    assert_eq!(output.oversized, 0);
    assert_eq!(output.chunks.len(), 3);
    for chunk in &output.chunks {
        assert!(chunk.starts_with("SET DEFINE OFF;\n\nINSERT"), "{chunk}");
        assert!(chunk.ends_with("\n\nSELECT * FROM t WHERE a IN (1, 2, 3);\n"), "{chunk}");
        assert!(chunk.len() <= 90, "{} bytes", chunk.len());
        assert_eq!(chunk.matches("SET DEFINE OFF").count(), 1);
    }
}

#[test]
fn generous_budget_keeps_one_chunk() {
    let text = "SET DEFINE OFF;\nINSERT INTO t (a) VALUES (1);\nINSERT INTO t (a) VALUES (2);\n";

    let output = split(text, 90 * 1024);

    assert_eq!(
        output.chunks,
        ["SET DEFINE OFF;\n\nINSERT INTO t (a) VALUES (1);\nINSERT INTO t (a) VALUES (2);\n"]
    );
}

#[test]
fn oversized_statements_are_kept_whole() {
    let big = format!("INSERT INTO t (a) VALUES ('{}')", "x".repeat(200));
    let text = format!("INSERT INTO t (a) VALUES (1);\n{big};\nINSERT INTO t (a) VALUES (2);");

    let output = split(&text, 100);

    assert_eq!(output.oversized, 1);
    assert_eq!(output.chunks.len(), 3);
    assert!(output.chunks[1].contains(&big));
    assert!(output.chunks[0].contains("VALUES (1)"));
    assert!(output.chunks[2].contains("VALUES (2)"));
}

#[test]
fn only_selects_produce_no_chunks() {
    let output = split("SET DEFINE OFF;\nSELECT 1 FROM DUAL;", 1000);

    assert!(output.chunks.is_empty());
    assert_eq!(output.statements, 0);
}

proptest! {
    #[test]
    fn chunks_respect_budget_and_keep_every_statement(
        values in prop::collection::vec("[a-z;' ]{0,60}", 1..40),
        budget in 120usize..600,
    ) {
        let statements: Vec<String> = values
            .iter()
            .map(|v| format!("INSERT INTO t (a) VALUES ('{}')", v.replace('\'', "''")))
            .collect();
        let text = format!("SET DEFINE OFF;\n{};\nSELECT COUNT(*) FROM t;\n", statements.join(";\n"));

        let output = split(&text, budget);

        prop_assert_eq!(output.statements, statements.len());
        for chunk in &output.chunks {
            prop_assert!(chunk.starts_with("SET DEFINE OFF;"));
            prop_assert!(chunk.ends_with("SELECT COUNT(*) FROM t;\n"));
        }

        let oversized = output.chunks.iter().filter(|c| c.len() > budget).count();
        prop_assert_eq!(oversized, output.oversized);

        let repacked: Vec<&str> = output
            .chunks
            .iter()
            .flat_map(|chunk| split_statements(chunk))
            .filter(|s| s.starts_with("INSERT"))
            .collect();
        prop_assert_eq!(repacked, statements.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
