use movebox_model::{ModelError, Record, RecordKind, Value, expand_id_ranges, parse_assignment};

#[test]
fn kinds_resolve_from_cli_and_table_names() {
    assert_eq!(RecordKind::from_name("box"), Some(RecordKind::MovingBox));
    assert_eq!(RecordKind::from_name("moving_box"), Some(RecordKind::MovingBox));
    assert_eq!(RecordKind::from_name("uri_user"), Some(RecordKind::User));
    assert_eq!(RecordKind::from_name("Scan"), Some(RecordKind::BoxScan));
    assert_eq!(
        "shelf".parse::<RecordKind>(),
        Err(ModelError::UnknownRecordKind("shelf".to_string()))
    );
}

#[test]
fn every_kind_has_distinct_names() {
    let mut tables: Vec<_> = RecordKind::ALL.iter().map(|k| k.table_name()).collect();
    let mut cli: Vec<_> = RecordKind::ALL.iter().map(|k| k.cli_name()).collect();
    tables.sort_unstable();
    tables.dedup();
    cli.sort_unstable();
    cli.dedup();
    assert_eq!(tables.len(), RecordKind::ALL.len());
    assert_eq!(cli.len(), RecordKind::ALL.len());
}

#[test]
fn numeric_text_counts_as_id() {
    assert_eq!(Value::from(7).as_id(), Some(7));
    assert_eq!(Value::from("42").as_id(), Some(42));
    assert_eq!(Value::from("Garage").as_id(), None);
    assert_eq!(Value::from("-3").as_id(), None);
    assert_eq!(Value::from("").as_id(), None);
    assert_eq!(Value::Null.as_id(), None);
}

#[test]
fn record_builder_and_accessors() {
    let rec = Record::new()
        .with("id", 3_i64)
        .with("name", "Kitchen")
        .with("image", None::<i64>);
    assert_eq!(rec.id(), Some(3));
    assert_eq!(rec.text("name"), Some("Kitchen"));
    assert!(rec.get("image").unwrap().is_null());
    assert_eq!(rec.keys().collect::<Vec<_>>(), vec!["id", "image", "name"]);
}

#[test]
fn assignments_parse() {
    assert_eq!(
        parse_assignment("room=Kitchen"),
        Some(("room".to_string(), "Kitchen".to_string()))
    );
    assert_eq!(
        parse_assignment("--info=books=heavy"),
        Some(("info".to_string(), "books=heavy".to_string()))
    );
    assert_eq!(parse_assignment("novalue"), None);
    assert_eq!(parse_assignment("=x"), None);
}

#[test]
fn id_ranges_expand_inclusively() {
    assert_eq!(expand_id_ranges(&["3", "7-9"]).unwrap(), vec![3, 7, 8, 9]);
    assert!(expand_id_ranges(&["9-7"]).is_err());
    assert!(expand_id_ranges(&["abc"]).is_err());
}

#[test]
fn id_ranges_reject_oversized_span() {
    let ids = expand_id_ranges(&["1-5000"]).unwrap();
    assert_eq!(ids.len(), 5000);
    assert_eq!(
        expand_id_ranges(&["1-9999999999"]),
        Err(ModelError::InvalidIdRange("1-9999999999".to_string()))
    );
    assert!(expand_id_ranges(&["1-5001"]).is_err());
}
