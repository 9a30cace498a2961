pub(crate) use super::*;

fn two_columns() -> DataFrame {
    DataFrame::new(vec![
        ("name".to_string(), Column::text(&["a", "b"])),
        ("score".to_string(), Column::Numeric(vec![1.0, 2.0])),
    ])
    .expect("valid frame")
}

#[test]
fn test_new_and_shape() {
    let df = two_columns();
    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.column("name").expect("exists").dtype(), DType::Text);
    assert_eq!(df.column("score").expect("exists").dtype(), DType::Numeric);
}

#[test]
fn test_new_rejects_empty() {
    assert!(DataFrame::new(vec![]).is_err());
}

#[test]
fn test_new_rejects_ragged_columns() {
    let result = DataFrame::new(vec![
        ("a".to_string(), Column::text(&["x"])),
        ("b".to_string(), Column::text(&["x", "y"])),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_new_rejects_duplicate_names() {
    let result = DataFrame::new(vec![
        ("a".to_string(), Column::text(&["x"])),
        ("a".to_string(), Column::text(&["y"])),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_new_rejects_empty_name() {
    assert!(DataFrame::from_strings("", &["x"]).is_err());
}

#[test]
fn test_column_lookup() {
    let df = two_columns();
    let col = df.column("name").expect("exists");
    assert_eq!(col.as_text(), Some(&["a".to_string(), "b".to_string()][..]));
    assert!(df.column("missing").is_err());
}

#[test]
fn test_single_text_column_ok() {
    let df = DataFrame::from_strings("city", &["Paris", "Lyon"]).expect("valid");
    let values = df.single_text_column().expect("one text column");
    assert_eq!(values, &["Paris".to_string(), "Lyon".to_string()]);
}

#[test]
fn test_single_text_column_rejects_two_columns() {
    let err = two_columns()
        .single_text_column()
        .expect_err("two columns are invalid");
    assert!(matches!(err, EncoderError::InvalidInput { .. }));
    assert!(err.to_string().contains("only one column"));
}

#[test]
fn test_single_text_column_rejects_numeric() {
    let df = DataFrame::new(vec![("x".to_string(), Column::Numeric(vec![1.0]))])
        .expect("valid frame");
    let err = df.single_text_column().expect_err("numeric is invalid");
    assert!(matches!(err, EncoderError::InvalidInput { .. }));
    assert!(err.to_string().contains("numeric"));
}

#[test]
fn test_empty_text_column_is_valid_shape() {
    let empty: [&str; 0] = [];
    let df = DataFrame::from_strings("x", &empty).expect("zero rows allowed");
    assert_eq!(df.shape(), (0, 1));
    assert!(df.single_text_column().expect("text").is_empty());
}
