use std::io::Cursor;

use mytb::{
    storage::{
        column::{Column, ColumnType},
        schema::Schema,
    },
    types::error::StorageError,
};

fn users_schema() -> Schema {
    Schema::default()
        .with_column("id", ColumnType::Int)
        .with_column("name", ColumnType::Text)
        .with_column("score", ColumnType::Float)
}

#[test]
fn test_empty_schema_encoding() {
    let schema = Schema::default();
    let bytes = schema.to_bytes();
    assert_eq!(bytes, vec![0, 0, 0, 0]);

    let decoded = Schema::from_bytes(&bytes).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_schema_encoding_layout() {
    let bytes = users_schema().to_bytes();

    let mut expected = vec![3, 0, 0, 0];
    expected.extend_from_slice(&[2, b'i', b'd', 1]);
    expected.extend_from_slice(&[4, b'n', b'a', b'm', b'e', 2]);
    expected.extend_from_slice(&[5, b's', b'c', b'o', b'r', b'e', 3]);
    assert_eq!(bytes, expected);
    assert_eq!(bytes.len(), users_schema().encoded_size());
}

#[test]
fn test_schema_roundtrip_preserves_order() {
    let schema = users_schema();
    let decoded = Schema::from_bytes(&schema.to_bytes()).unwrap();

    assert_eq!(decoded, schema);
    let names: Vec<_> = decoded.columns.iter().map(|c| c.name_lossy()).collect();
    assert_eq!(names, vec!["id", "name", "score"]);
}

#[test]
fn test_schema_roundtrip_varied_columns() {
    let types = [ColumnType::Int, ColumnType::Text, ColumnType::Float];
    let columns: Vec<Column> = [0usize, 1, 17, 128, 255]
        .iter()
        .enumerate()
        .map(|(i, &len)| Column::new(vec![b'c'; len], types[i % types.len()]))
        .collect();
    let schema = Schema::new(columns);

    let decoded = Schema::from_bytes(&schema.to_bytes()).unwrap();
    assert_eq!(decoded, schema);
}

#[test]
fn test_schema_allows_duplicate_names() {
    let schema = Schema::default()
        .with_column("a", ColumnType::Int)
        .with_column("a", ColumnType::Text);

    let decoded = Schema::from_bytes(&schema.to_bytes()).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get_column(b"a").unwrap().column_type, ColumnType::Int);
}

#[test]
fn test_schema_truncated_count() {
    let result = Schema::from_bytes(&[3, 0]);
    assert!(matches!(
        result,
        Err(StorageError::Truncated { field: "column count" })
    ));
}

#[test]
fn test_schema_fails_on_missing_column() {
    let mut bytes = users_schema().to_bytes();
    // Claim a fourth column that is not there
    bytes[0] = 4;

    let result = Schema::from_bytes(&bytes);
    assert!(matches!(result, Err(StorageError::Truncated { .. })));
}

#[test]
fn test_schema_fails_on_cut_column() {
    let bytes = users_schema().to_bytes();
    let cut = &bytes[..bytes.len() - 1];

    let result = Schema::from_bytes(cut);
    assert!(matches!(
        result,
        Err(StorageError::Truncated { field: "column type" })
    ));
}

#[test]
fn test_schema_huge_count_fails_without_panicking() {
    let result = Schema::from_bytes(&u32::MAX.to_le_bytes());
    assert!(matches!(result, Err(StorageError::Truncated { .. })));
}

#[test]
fn test_schema_write_at_offset() {
    let schema = users_schema();
    let mut cursor = Cursor::new(Vec::new());
    schema.write_at(&mut cursor, 16).unwrap();

    let bytes = cursor.into_inner();
    assert_eq!(bytes.len(), 16 + schema.encoded_size());
    assert!(bytes[..16].iter().all(|&b| b == 0));
    assert_eq!(Schema::from_bytes(&bytes[16..]).unwrap(), schema);
}

#[test]
fn test_schema_display() {
    let rendered = users_schema().to_string();
    assert_eq!(
        rendered,
        "Column Name: id, Type: INT\nColumn Name: name, Type: TEXT\nColumn Name: score, Type: FLOAT\n"
    );
}
