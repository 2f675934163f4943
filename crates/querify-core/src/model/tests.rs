use crate::{
    model::{DataGrid, NullablePk, SchemaRow, TableSchema},
    types::TypeKind,
    value::Cell,
};

#[test]
fn nullable_pk_markers_parse_forgivingly() {
    assert_eq!(NullablePk::parse("PK"), NullablePk::Pk);
    assert_eq!(NullablePk::parse(" pk "), NullablePk::Pk);
    assert_eq!(NullablePk::parse("No"), NullablePk::No);
    assert_eq!(NullablePk::parse("NOT NULL"), NullablePk::No);
    assert_eq!(NullablePk::parse("Yes"), NullablePk::Yes);
    assert_eq!(NullablePk::parse(""), NullablePk::Yes);
    assert_eq!(NullablePk::parse("maybe"), NullablePk::Yes);
}

#[test]
fn schema_row_deserializes_from_camel_case_object() {
    let row: SchemaRow = serde_json::from_str(
        r#"{"fieldName":"user_id","dataType":"NUMBER(10)","nullablePk":"pk","order":1}"#,
    )
    .unwrap();

    assert_eq!(row.field_name, "user_id");
    assert_eq!(row.nullable_pk, NullablePk::Pk);
    assert_eq!(row.order, Some(1));
    assert_eq!(row.comment, None);
}

#[test]
fn grid_splits_header_from_data() {
    let grid = DataGrid::from_text_rows([vec![" id ", "name"], vec!["1", "a"], vec!["2", "b"]]);

    assert_eq!(grid.header(), vec!["id".to_string(), "name".to_string()]);
    assert_eq!(grid.data_rows().len(), 2);
    assert_eq!(grid.data_rows()[1][1], Cell::text("b"));
}

#[test]
fn empty_grid_has_no_header_or_rows() {
    let grid = DataGrid::default();

    assert!(grid.is_empty());
    assert!(grid.header().is_empty());
    assert!(grid.data_rows().is_empty());
}

#[test]
fn table_schema_lookup_is_case_insensitive() {
    let schema = TableSchema::from_rows(&[
        SchemaRow::new("User_Id", "NUMBER(10)", NullablePk::Pk),
        SchemaRow::new("name", "VARCHAR2(20)", NullablePk::Yes),
    ]);

    let field = schema.field("USER_ID").unwrap();
    assert_eq!(field.ty.kind, TypeKind::Number);
    assert!(schema.contains(" name "));
    assert!(!schema.contains("missing"));
}
