mod common;

use common::{ScriptedUi, TestStore};
use movebox_db::StoreError;
use movebox_model::{ModelError, Record, RecordKind, Value};

fn kitchen_box() -> Record {
    Record::new()
        .with("location", "Garage")
        .with("info", "pots and pans")
        .with("room", "Kitchen")
}

// ── Get-or-create ───────────────────────────────────────────────────────────

#[test]
fn get_or_create_is_idempotent() {
    let mut t = TestStore::new();
    let first = t.store.get_or_create(RecordKind::Location, "Garage", &Record::new()).unwrap();
    let second = t.store.get_or_create(RecordKind::Location, "Garage", &Record::new()).unwrap();
    assert_eq!(first, second);
    assert_eq!(t.count(RecordKind::Location), 1);
}

#[test]
fn get_or_create_without_natural_key_fails() {
    let mut t = TestStore::new();
    let err = t
        .store
        .get_or_create(RecordKind::MovingBox, "the blue one", &Record::new())
        .unwrap_err();
    assert!(matches!(err, StoreError::NoNaturalKey { .. }), "{err:?}");
}

#[test]
fn get_or_create_room_takes_color_from_context() {
    let mut t = TestStore::new();
    let blue = Record::new().with("color", "blue");
    let first = t.store.get_or_create(RecordKind::Room, "Kitchen", &blue).unwrap();
    let second = t.store.get_or_create(RecordKind::Room, "Kitchen", &blue).unwrap();
    assert_eq!(first, second);
    assert_eq!(t.count(RecordKind::Room), 1);

    // A found row keeps its stored color
    let red = Record::new().with("color", "red");
    assert_eq!(t.store.get_or_create(RecordKind::Room, "Kitchen", &red).unwrap(), first);
    let row = t.store.read(RecordKind::Room, first).unwrap();
    assert_eq!(row.text("color"), Some("blue"));
}

#[test]
fn reference_by_name_reuses_existing_row() {
    let mut t = TestStore::with_project();
    let garage = t.store.get_or_create(RecordKind::Location, "Garage", &Record::new()).unwrap();
    let batch = t
        .store
        .create(RecordKind::BatchMove, Record::new().with("location", "Garage"))
        .unwrap();
    let row = t.store.read(RecordKind::BatchMove, batch).unwrap();
    assert_eq!(row.get("location"), Some(&Value::Integer(garage)));
    assert_eq!(t.count(RecordKind::Location), 1);
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn unknown_field_is_rejected_without_writing() {
    let mut t = TestStore::new();
    let err = t
        .store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Den").with("colour", "red"),
        )
        .unwrap_err();
    match err {
        StoreError::InvalidField { table, fields } => {
            assert_eq!(table, "room");
            assert_eq!(fields, vec!["colour".to_string()]);
        }
        other => panic!("expected InvalidField, got {other:?}"),
    }
    assert_eq!(t.count(RecordKind::Room), 0);
}

#[test]
fn missing_fields_without_ui() {
    let mut t = TestStore::new();
    let err = t.store.create(RecordKind::Room, Record::new()).unwrap_err();
    match err {
        StoreError::MissingFields { table, fields } => {
            assert_eq!(table, "room");
            assert_eq!(fields, vec!["name".to_string(), "color".to_string()]);
        }
        other => panic!("expected MissingFields, got {other:?}"),
    }
    assert_eq!(t.count(RecordKind::Room), 0);
}

#[test]
fn invalid_color_is_rejected() {
    let mut t = TestStore::new();
    let err = t
        .store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Den").with("color", "not-a-color"),
        )
        .unwrap_err();
    assert!(
        matches!(err, StoreError::Model(ModelError::InvalidColor(_))),
        "{err:?}"
    );
}

#[test]
fn color_is_canonicalized() {
    let mut t = TestStore::new();
    let id = t
        .store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Den").with("color", "Light Grey"),
        )
        .unwrap();
    let row = t.store.read(RecordKind::Room, id).unwrap();
    assert_eq!(row.text("color"), Some("lightgray"));
}

#[test]
fn timestamp_is_normalized_to_utc() {
    let mut t = TestStore::new();
    let id = t
        .store
        .create(
            RecordKind::BatchMove,
            Record::new()
                .with("location", "Garage")
                .with("timestamp", "2024-03-01T09:00:00-08:00"),
        )
        .unwrap();
    let row = t.store.read(RecordKind::BatchMove, id).unwrap();
    assert_eq!(row.text("timestamp"), Some("2024-03-01 17:00:00Z"));
}

#[test]
fn invalid_timestamp_is_rejected() {
    let mut t = TestStore::new();
    let err = t
        .store
        .create(
            RecordKind::BatchMove,
            Record::new()
                .with("location", "Garage")
                .with("timestamp", "last tuesday"),
        )
        .unwrap_err();
    assert!(
        matches!(err, StoreError::Model(ModelError::InvalidTimestamp { .. })),
        "{err:?}"
    );
    assert_eq!(t.count(RecordKind::Location), 0);
}

#[test]
fn dangling_reference_is_rejected() {
    let mut t = TestStore::with_project();
    let mut data = kitchen_box();
    data.insert("location", 99_i64);
    let err = t.store.create(RecordKind::MovingBox, data).unwrap_err();
    match err {
        StoreError::DanglingReference { field, table, id } => {
            assert_eq!(field, "location");
            assert_eq!(table, "location");
            assert_eq!(id, 99);
        }
        other => panic!("expected DanglingReference, got {other:?}"),
    }
}

#[test]
fn duplicate_natural_key_conflicts() {
    let mut t = TestStore::new();
    t.store
        .create(RecordKind::Location, Record::new().with("name", "Garage"))
        .unwrap();
    let err = t
        .store
        .create(RecordKind::Location, Record::new().with("name", "Garage"))
        .unwrap_err();
    match err {
        StoreError::DuplicateKeyConflict { table, column, value } => {
            assert_eq!(table, "location");
            assert_eq!(column, "name");
            assert_eq!(value, "Garage");
        }
        other => panic!("expected DuplicateKeyConflict, got {other:?}"),
    }
}

// ── Transactions ────────────────────────────────────────────────────────────

#[test]
fn failed_create_leaves_no_rows_behind() {
    let mut t = TestStore::with_project();
    // Garage resolves first, then Kitchen cannot be created without a color
    let err = t
        .store
        .create(RecordKind::MovingBox, kitchen_box())
        .unwrap_err();
    match err {
        StoreError::MissingFields { table, fields } => {
            assert_eq!(table, "room");
            assert_eq!(fields, vec!["color".to_string()]);
        }
        other => panic!("expected MissingFields, got {other:?}"),
    }
    assert_eq!(t.count(RecordKind::Location), 0);
    assert_eq!(t.count(RecordKind::Room), 0);
    assert_eq!(t.count(RecordKind::MovingBox), 0);
}

// ── Prompting & generation ──────────────────────────────────────────────────

#[test]
fn ui_prompts_for_missing_fields() {
    let t = TestStore::with_project();
    let ui = ScriptedUi::new(&[("color", "Light Blue")]);
    let log = ui.log.clone();
    let mut store = t.store.with_ui(Box::new(ui));

    let id = store.create(RecordKind::MovingBox, kitchen_box()).unwrap();
    let row = store.read(RecordKind::MovingBox, id).unwrap();
    let room_id = row.get("room").and_then(Value::as_id).unwrap();
    let room = store.read(RecordKind::Room, room_id).unwrap();
    assert_eq!(room.text("name"), Some("Kitchen"));
    assert_eq!(room.text("color"), Some("lightblue"));

    let log = log.borrow();
    assert!(
        log.prompts
            .iter()
            .any(|(table, fields)| table == "room" && fields == &vec!["color".to_string()]),
        "{:?}",
        log.prompts
    );
}

#[test]
fn blank_answers_still_fail_required_fields() {
    let t = TestStore::new();
    let ui = ScriptedUi::new(&[("name", "   ")]);
    let mut store = t.store.with_ui(Box::new(ui));
    let err = store.create(RecordKind::Location, Record::new()).unwrap_err();
    assert!(matches!(err, StoreError::MissingFields { .. }), "{err:?}");
}

#[test]
fn owner_defaults_to_primary_user() {
    let mut t = TestStore::with_project();
    let alice = t.store.get_or_create(RecordKind::User, "alice", &Record::new()).unwrap();
    t.store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Kitchen").with("color", "yellow"),
        )
        .unwrap();
    let id = t.store.create(RecordKind::MovingBox, kitchen_box()).unwrap();
    let row = t.store.read(RecordKind::MovingBox, id).unwrap();
    assert_eq!(row.get("user"), Some(&Value::Integer(alice)));
    assert_eq!(row.text("info"), Some("pots and pans"));
    assert_eq!(row.get("image"), Some(&Value::Null));
}

#[test]
fn box_without_project_reports_missing_project() {
    let mut t = TestStore::new();
    t.store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Kitchen").with("color", "yellow"),
        )
        .unwrap();
    let err = t
        .store
        .create(RecordKind::MovingBox, kitchen_box())
        .unwrap_err();
    assert!(matches!(err, StoreError::ProjectMissing), "{err:?}");
}

// ── Project ─────────────────────────────────────────────────────────────────

#[test]
fn project_is_a_singleton() {
    let mut t = TestStore::with_project();
    let project = t.store.project().unwrap().unwrap();
    assert_eq!(project.text("title"), Some("Big Move"));
    assert_eq!(t.count(RecordKind::User), 1);

    let err = t
        .store
        .init_project(
            Record::new()
                .with("primary_user", "bob")
                .with("title", "Second")
                .with("found_contact", "nobody"),
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKeyConflict { .. }), "{err:?}");
    assert_eq!(t.count(RecordKind::User), 1);
}

// ── Update / delete ─────────────────────────────────────────────────────────

#[test]
fn update_changes_only_named_fields() {
    let mut t = TestStore::with_project();
    t.store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Kitchen").with("color", "yellow"),
        )
        .unwrap();
    let id = t.store.create(RecordKind::MovingBox, kitchen_box()).unwrap();
    let before = t.store.read(RecordKind::MovingBox, id).unwrap();

    t.store
        .update(
            RecordKind::MovingBox,
            Record::new().with("id", id).with("location", "Truck"),
        )
        .unwrap();
    let after = t.store.read(RecordKind::MovingBox, id).unwrap();
    assert_ne!(after.get("location"), before.get("location"));
    assert_eq!(after.get("user"), before.get("user"));
    assert_eq!(after.get("info"), before.get("info"));
    assert_eq!(t.count(RecordKind::Location), 2);
}

#[test]
fn update_missing_row_is_not_found() {
    let mut t = TestStore::new();
    let err = t
        .store
        .update(
            RecordKind::Location,
            Record::new().with("id", 42_i64).with("name", "Attic"),
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 42, .. }), "{err:?}");
}

#[test]
fn update_with_only_id_is_empty() {
    let mut t = TestStore::new();
    let id = t.store.get_or_create(RecordKind::Location, "Garage", &Record::new()).unwrap();
    let err = t
        .store
        .update(RecordKind::Location, Record::new().with("id", id))
        .unwrap_err();
    assert!(matches!(err, StoreError::EmptyRecord { .. }), "{err:?}");
}

#[test]
fn read_missing_row_is_not_found() {
    let t = TestStore::new();
    let err = t.store.read(RecordKind::Item, 7).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 7, .. }), "{err:?}");
}

#[test]
fn delete_does_not_cascade() {
    let mut t = TestStore::with_project();
    let garage = t.store.get_or_create(RecordKind::Location, "Garage", &Record::new()).unwrap();
    t.store
        .create(RecordKind::BatchMove, Record::new().with("location", garage))
        .unwrap();

    let err = t.store.delete(RecordKind::Location, garage).unwrap_err();
    assert!(matches!(err, StoreError::StillReferenced { .. }), "{err:?}");
    assert_eq!(t.count(RecordKind::Location), 1);

    let attic = t.store.get_or_create(RecordKind::Location, "Attic", &Record::new()).unwrap();
    t.store.delete(RecordKind::Location, attic).unwrap();
    let err = t.store.delete(RecordKind::Location, attic).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }), "{err:?}");
}
