use product_catalog::model::{Draft, DraftField};
use product_catalog::session::{ProductSession, SessionError, SessionState};
use product_catalog::store::{FileStore, MemoryStore, ProductStore};

/// Walks the add → edit → delete flow against real files and reopens the store
/// after every step to check what a reload would see.
#[test]
fn test_widget_lifecycle_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path(), "products");
    let mut session = ProductSession::open(store.clone());
    assert!(session.load_warning().is_none());

    // Create
    session.begin_create();
    session.update_draft_field(DraftField::Name, "Widget").unwrap();
    session.update_draft_field(DraftField::Price, "9.99").unwrap();
    session.update_draft_field(DraftField::Stock, "5").unwrap();
    session.update_draft_field(DraftField::Description, "").unwrap();
    let view = session.commit().expect("create failed");

    assert_eq!(view.state, SessionState::Idle);
    assert_eq!(view.products.len(), 1);
    let id = view.products[0].id.clone();
    assert_eq!(view.products[0].name, "Widget");
    assert_eq!(view.products[0].price, 9.99);
    assert_eq!(view.products[0].stock, 5);
    assert_eq!(store.load().products, view.products);

    // Edit stock only
    session.begin_edit(&id).unwrap();
    session.update_draft_field(DraftField::Stock, "3").unwrap();
    let view = session.commit().expect("update failed");

    assert_eq!(view.products.len(), 1);
    assert_eq!(view.products[0].id, id);
    assert_eq!(view.products[0].stock, 3);
    assert_eq!(view.products[0].price, 9.99);
    assert_eq!(view.products[0].name, "Widget");

    let reopened = ProductSession::open(FileStore::new(dir.path(), "products"));
    assert_eq!(reopened.products(), view.products.as_slice());

    // Delete
    let view = session.delete(&id).unwrap();
    assert!(view.products.is_empty());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
}

#[test]
fn test_create_then_fresh_load_sees_exactly_one_new_product() {
    let store = MemoryStore::new();
    let mut session = ProductSession::open(store.clone());
    let draft = Draft::new()
        .with(DraftField::Name, "Desk Lamp")
        .with(DraftField::Price, "24")
        .with(DraftField::Stock, "12")
        .with(DraftField::Description, "Warm white");

    session.create(&draft).unwrap();

    let loaded = store.load().products;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "Desk Lamp");
    assert_eq!(loaded[0].price, 24.0);
    assert_eq!(loaded[0].stock, 12);
    assert_eq!(loaded[0].description, "Warm white");
}

#[test]
fn test_invalid_price_is_rejected() {
    let store = MemoryStore::new();
    let mut session = ProductSession::open(store.clone());
    let draft = Draft::new()
        .with(DraftField::Name, "Widget")
        .with(DraftField::Price, "abc")
        .with(DraftField::Stock, "1");

    let err = session.create(&draft).unwrap_err();

    assert!(matches!(err, SessionError::Validation(_)));
    assert!(session.products().is_empty());
    assert!(store.blob().is_none());
}

#[test]
fn test_corrupt_storage_starts_empty_and_is_replaced() {
    let store = MemoryStore::with_blob("definitely not json");
    let mut session = ProductSession::open(store.clone());

    let warning = session.load_warning().cloned().expect("expected a warning");
    assert_eq!(warning.key, "products");
    assert!(session.products().is_empty());

    session.delete("anything").unwrap();
    assert_eq!(store.blob().as_deref(), Some("[]"));
}

#[test]
fn test_failed_write_is_retried_by_next_command() {
    let store = MemoryStore::new();
    let mut session = ProductSession::open(store.clone());
    store.fail_next_saves(1, "quota exceeded");

    let draft = Draft::new()
        .with(DraftField::Name, "Widget")
        .with(DraftField::Price, "1")
        .with(DraftField::Stock, "1");
    let err = session.create(&draft).unwrap_err();
    assert!(matches!(err, SessionError::PersistenceWriteFailure(_)));
    assert!(store.load().products.is_empty());

    session.delete("unrelated").unwrap();
    assert!(!session.is_dirty());
    assert_eq!(store.load().products, session.products());
}
