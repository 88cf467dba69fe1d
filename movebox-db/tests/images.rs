mod common;

use common::TestStore;
use movebox_db::{hash_file, StoreError};
use movebox_model::{Record, RecordKind, Value};
use sha2::{Digest, Sha256};

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[test]
fn hash_small_file() {
    let t = TestStore::new();
    let path = t.write_file("hello.txt", b"hello");
    assert_eq!(hash_file(&path).unwrap(), HELLO_SHA256);
}

#[test]
fn hash_spans_multiple_chunks() {
    let t = TestStore::new();
    let bytes: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
    let path = t.write_file("big.bin", &bytes);
    let expected = format!("{:x}", Sha256::digest(&bytes));
    assert_eq!(hash_file(&path).unwrap(), expected);
}

#[test]
fn missing_source_is_an_image_read_error() {
    let mut t = TestStore::new();
    let missing = t.dir.path().join("nope.jpg");
    let err = t
        .store
        .get_or_create(RecordKind::Image, missing.to_string_lossy().into_owned(), &Record::new())
        .unwrap_err();
    assert!(matches!(err, StoreError::ImageRead { .. }), "{err:?}");
    assert_eq!(t.count(RecordKind::Image), 0);
}

#[test]
fn same_content_under_different_names_is_one_image() {
    let mut t = TestStore::new();
    let a = t.write_file("front.png", b"hello");
    let b = t.write_file("copy-of-front.jpg", b"hello");

    let first = t
        .store
        .get_or_create(RecordKind::Image, a.to_string_lossy().into_owned(), &Record::new())
        .unwrap();
    let second = t
        .store
        .get_or_create(RecordKind::Image, b.to_string_lossy().into_owned(), &Record::new())
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(t.count(RecordKind::Image), 1);

    let row = t.store.read(RecordKind::Image, first).unwrap();
    assert_eq!(row.text("hash"), Some(HELLO_SHA256));
    assert_eq!(row.text("mimetype"), Some("image/png"));
    assert_eq!(row.get("encoding"), Some(&Value::Null));

    let link = t.store.image_dir().join(format!("{HELLO_SHA256}_front.png"));
    assert_eq!(row.text("image_file"), Some(&*link.to_string_lossy()));
    assert!(link.symlink_metadata().is_ok());
    assert_eq!(std::fs::read(&link).unwrap(), b"hello");

    // The second name never got a link of its own
    let other = t
        .store
        .image_dir()
        .join(format!("{HELLO_SHA256}_copy-of-front.jpg"));
    assert!(other.symlink_metadata().is_err());
}

#[test]
fn item_image_path_becomes_reference() {
    let mut t = TestStore::with_project();
    let photo = t.write_file("mugs.jpeg", b"ceramic");
    t.store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Kitchen").with("color", "yellow"),
        )
        .unwrap();
    let box_id = t
        .store
        .create(
            RecordKind::MovingBox,
            Record::new()
                .with("location", "Garage")
                .with("info", "mugs")
                .with("room", "Kitchen"),
        )
        .unwrap();
    let item = t
        .store
        .create(
            RecordKind::Item,
            Record::new()
                .with("box", box_id)
                .with("description", "six mugs")
                .with("image", photo.to_string_lossy().into_owned()),
        )
        .unwrap();

    let row = t.store.read(RecordKind::Item, item).unwrap();
    let image_id = row.get("image").and_then(Value::as_id).unwrap();
    let image = t.store.read(RecordKind::Image, image_id).unwrap();
    assert_eq!(image.text("mimetype"), Some("image/jpeg"));
}

#[test]
fn direct_image_create_fills_derived_fields() {
    let mut t = TestStore::new();
    let scan = t.write_file("receipt.png.gz", b"not really gzip");
    let id = t
        .store
        .create(
            RecordKind::Image,
            Record::new()
                .with("image_file", scan.to_string_lossy().into_owned())
                .with("description", "moving truck receipt"),
        )
        .unwrap();
    let row = t.store.read(RecordKind::Image, id).unwrap();
    assert_eq!(row.text("mimetype"), Some("image/png"));
    assert_eq!(row.text("encoding"), Some("gzip"));
    assert_eq!(row.text("description"), Some("moving truck receipt"));
    assert!(row.text("timestamp").is_some_and(|ts| ts.ends_with('Z')));
    assert_eq!(row.text("hash").map(str::len), Some(64));
}

fn link_names(t: &TestStore) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(t.store.image_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn direct_create_of_known_content_adds_no_link() {
    let mut t = TestStore::new();
    let a = t.write_file("a.jpg", b"same bytes");
    let b = t.write_file("b.jpg", b"same bytes");
    let hash = hash_file(&a).unwrap();

    let id = t
        .store
        .create(
            RecordKind::Image,
            Record::new().with("image_file", a.to_string_lossy().into_owned()),
        )
        .unwrap();
    let before = link_names(&t);
    assert_eq!(before, vec![format!("{hash}_a.jpg")]);

    let err = t
        .store
        .create(
            RecordKind::Image,
            Record::new().with("image_file", b.to_string_lossy().into_owned()),
        )
        .unwrap_err();
    assert!(
        matches!(&err, StoreError::DuplicateKeyConflict { column, value, .. }
            if column == "hash" && *value == hash),
        "{err:?}"
    );
    assert_eq!(t.count(RecordKind::Image), 1);
    assert_eq!(link_names(&t), before);

    // Re-pointing a row at its own content is not a conflict
    t.store
        .update(
            RecordKind::Image,
            Record::new()
                .with("id", id)
                .with("image_file", a.to_string_lossy().into_owned()),
        )
        .unwrap();
    assert_eq!(link_names(&t), before);
}

#[test]
fn item_image_takes_item_description() {
    let mut t = TestStore::with_project();
    let photo = t.write_file("lamp.png", b"brass lamp");
    t.store
        .create(
            RecordKind::Room,
            Record::new().with("name", "Den").with("color", "tan"),
        )
        .unwrap();
    let box_id = t
        .store
        .create(
            RecordKind::MovingBox,
            Record::new()
                .with("location", "Garage")
                .with("info", "lamps")
                .with("room", "Den"),
        )
        .unwrap();
    let item = t
        .store
        .create(
            RecordKind::Item,
            Record::new()
                .with("box", box_id)
                .with("description", "brass desk lamp")
                .with("image", photo.to_string_lossy().into_owned()),
        )
        .unwrap();

    let row = t.store.read(RecordKind::Item, item).unwrap();
    let image_id = row.get("image").and_then(Value::as_id).unwrap();
    let image = t.store.read(RecordKind::Image, image_id).unwrap();
    assert_eq!(image.text("description"), Some("brass desk lamp"));
}
