use mytb::{
    storage::column::{Column, ColumnType},
    types::error::StorageError,
};

#[test]
fn test_column_type_tags() {
    assert_eq!(ColumnType::Int.tag(), 1);
    assert_eq!(ColumnType::Text.tag(), 2);
    assert_eq!(ColumnType::Float.tag(), 3);
    assert_eq!(ColumnType::from_tag(1), ColumnType::Int);
    assert_eq!(ColumnType::from_tag(2), ColumnType::Text);
    assert_eq!(ColumnType::from_tag(3), ColumnType::Float);
}

#[test]
fn test_column_encoding_layout() {
    let column = Column::new("id", ColumnType::Int);
    let bytes = column.to_bytes();

    assert_eq!(bytes, vec![2, b'i', b'd', 1]);
    assert_eq!(bytes.len(), column.encoded_size());
}

#[test]
fn test_column_empty_name() {
    let column = Column::new("", ColumnType::Float);
    let bytes = column.to_bytes();
    assert_eq!(bytes, vec![0, 3]);

    let decoded = Column::from_bytes(&bytes).unwrap();
    assert!(decoded.name.is_empty());
    assert_eq!(decoded.column_type, ColumnType::Float);
}

#[test]
fn test_column_decode_roundtrip() {
    let column = Column::new("score", ColumnType::Float);
    let decoded = Column::from_bytes(&column.to_bytes()).unwrap();
    assert_eq!(decoded, column);
    assert_eq!(decoded.name_lossy(), "score");
}

#[test]
fn test_column_max_length_name() {
    let column = Column::new(vec![b'x'; 255], ColumnType::Text);
    let bytes = column.to_bytes();
    assert_eq!(bytes[0], 255);
    assert_eq!(bytes.len(), 257);
    assert_eq!(Column::from_bytes(&bytes).unwrap(), column);
}

#[test]
fn test_column_name_truncated_by_length_prefix() {
    let long_name: Vec<u8> = (0..300).map(|i| b'a' + (i % 26) as u8).collect();
    let column = Column::new(long_name.clone(), ColumnType::Text);

    let bytes = column.to_bytes();
    assert_eq!(bytes[0], 44); // 300 mod 256
    assert_eq!(bytes.len(), 2 + 44);

    let decoded = Column::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.name.len(), 44);
    assert_eq!(decoded.name, long_name[..44].to_vec());
    assert_eq!(decoded.column_type, ColumnType::Text);
}

#[test]
fn test_column_unknown_type_passes_through() {
    let bytes = [1, b'x', 42];
    let decoded = Column::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.column_type, ColumnType::Unknown(42));
    assert!(!decoded.column_type.is_known());
    assert_eq!(decoded.to_bytes(), bytes.to_vec());
}

#[test]
fn test_column_decode_empty_input() {
    let result = Column::from_bytes(&[]);
    assert!(matches!(
        result,
        Err(StorageError::Truncated { field: "column name length" })
    ));
}

#[test]
fn test_column_decode_short_name() {
    // Declares 5 name bytes but only 3 follow
    let result = Column::from_bytes(&[5, b'a', b'b', b'c']);
    assert!(matches!(
        result,
        Err(StorageError::Truncated { field: "column name" })
    ));
}

#[test]
fn test_column_decode_missing_type() {
    let result = Column::from_bytes(&[2, b'i', b'd']);
    assert!(matches!(
        result,
        Err(StorageError::Truncated { field: "column type" })
    ));
}

#[test]
fn test_column_display() {
    let column = Column::new("name", ColumnType::Text);
    assert_eq!(column.to_string(), "Column Name: name, Type: TEXT");
    assert_eq!(ColumnType::Unknown(9).to_string(), "UNKNOWN(9)");
}
