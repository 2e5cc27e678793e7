use chrono::NaiveDate;
use quicknote_core::{
    FixedClock, IdGenerator, KeyValueNotePersistence, KeyValueStorage, MemoryStorage, Note, NotePersistence,
    NoteStore, NoteStoreError, SequentialIdGenerator, StorageError, StorageResult,
    ValidationError,
};
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn store_with(storage: MemoryStorage) -> NoteStore<KeyValueNotePersistence<MemoryStorage>> {
    NoteStore::with_providers(
        KeyValueNotePersistence::new(storage),
        Box::new(SequentialIdGenerator::new("id")),
        Box::new(FixedClock(today())),
    )
}

fn empty_store() -> NoteStore<KeyValueNotePersistence<MemoryStorage>> {
    store_with(MemoryStorage::new())
}

#[test]
fn create_appends_note_with_fresh_id_and_today() {
    let mut store = empty_store();

    let first = store.create("Buy milk", "2% fat").unwrap();
    let second = store.create("Call mom", "Sunday").unwrap();

    assert_eq!(store.len(), 2);
    assert_ne!(first.id, second.id);
    assert_eq!(first.date, "October 16, 2026");
    assert_eq!(store.all()[1], second);
}

#[test]
fn create_with_default_providers_generates_unique_ids() {
    let mut store = NoteStore::new(KeyValueNotePersistence::new(MemoryStorage::new()));
    let ids: HashSet<String> = (0..20)
        .map(|idx| store.create(&format!("t{idx}"), "d").unwrap().id)
        .collect();
    assert_eq!(ids.len(), 20);
}

#[test]
fn create_rejects_blank_fields_without_side_effects() {
    let mut store = empty_store();
    store.create("keep", "me").unwrap();
    let before = store.all().to_vec();

    for (title, description) in [("", "x"), ("x", ""), ("  ", "  ")] {
        let err = store.create(title, description).unwrap_err();
        assert!(matches!(err, NoteStoreError::Validation(_)));
    }

    assert_eq!(store.all(), before.as_slice());
}

#[test]
fn create_stores_trimmed_values() {
    let mut store = empty_store();
    let note = store.create("  Title ", "\n Body\t").unwrap();
    assert_eq!(note.title, "Title");
    assert_eq!(note.description, "Body");
}

#[test]
fn update_preserves_id_date_and_position() {
    let mut store = empty_store();
    let a = store.create("a", "1").unwrap();
    let b = store.create("b", "2").unwrap();
    let c = store.create("c", "3").unwrap();

    let updated = store.update(&b.id, "B", "two").unwrap();

    assert_eq!(updated.id, b.id);
    assert_eq!(updated.date, b.date);
    let ids: Vec<&str> = store.all().iter().map(|note| note.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str(), c.id.as_str()]);
    assert_eq!(store.all()[1].title, "B");
    assert_eq!(store.all()[1].description, "two");
    assert_eq!(store.all()[0], a);
    assert_eq!(store.all()[2], c);
}

#[test]
fn update_missing_id_returns_not_found() {
    let mut store = empty_store();
    store.create("a", "1").unwrap();

    let err = store.update("nope", "x", "y").unwrap_err();
    match err {
        NoteStoreError::NotFound(id) => assert_eq!(id, "nope"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.all()[0].title, "a");
}

#[test]
fn update_rejects_blank_fields() {
    let mut store = empty_store();
    let note = store.create("a", "1").unwrap();

    let err = store.update(&note.id, "a", " ").unwrap_err();
    assert!(matches!(
        err,
        NoteStoreError::Validation(ValidationError::EmptyDescription)
    ));
    assert_eq!(store.find_by_id(&note.id), Some(&note));
}

#[test]
fn delete_removes_note_and_ignores_unknown_ids() {
    let mut store = empty_store();
    let a = store.create("a", "1").unwrap();
    let b = store.create("b", "2").unwrap();

    assert!(store.delete(&a.id).unwrap());
    assert_eq!(store.find_by_id(&a.id), None);

    assert!(!store.delete(&a.id).unwrap());
    assert_eq!(store.all(), &[b]);
}

#[test]
fn every_mutation_is_visible_to_a_fresh_load() {
    let mut store = empty_store();
    let note = store.create("Buy milk", "2% fat").unwrap();
    store.update(&note.id, "Buy oat milk", "2% fat").unwrap();

    let reloaded = store_with(reload_storage(&store));
    assert_eq!(reloaded.all(), store.all());
}

#[test]
fn buy_milk_scenario() {
    let mut store = empty_store();
    assert!(store.is_empty());

    let created = store.create("Buy milk", "2% fat").unwrap();
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "2% fat");
    assert_eq!(created.date, "October 16, 2026");
    assert_eq!(store.all(), &[created.clone()]);

    let updated = store.update(&created.id, "Buy oat milk", "2% fat").unwrap();
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date, created.date);
    assert_eq!(store.all(), &[updated]);

    store.delete(&created.id).unwrap();
    assert!(store.is_empty());
    assert!(store_with(reload_storage(&store)).is_empty());
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let fail = Rc::new(Cell::new(false));
    let mut store = NoteStore::with_providers(
        FlakyPersistence {
            inner: KeyValueNotePersistence::new(MemoryStorage::new()),
            fail: Rc::clone(&fail),
        },
        Box::new(SequentialIdGenerator::new("id")),
        Box::new(FixedClock(today())),
    );
    let kept = store.create("kept", "note").unwrap();

    fail.set(true);
    let err = store.create("lost", "note").unwrap_err();
    assert!(matches!(err, NoteStoreError::Storage(_)));
    let err = store.update(&kept.id, "changed", "note").unwrap_err();
    assert!(matches!(err, NoteStoreError::Storage(_)));
    let err = store.delete(&kept.id).unwrap_err();
    assert!(matches!(err, NoteStoreError::Storage(_)));

    assert_eq!(store.all(), &[kept.clone()]);
    assert_eq!(store.persistence().inner.load(), vec![kept]);
}

#[test]
fn clear_drops_notes_and_stored_value() {
    let mut store = empty_store();
    store.create("a", "1").unwrap();
    store.clear().unwrap();
    assert!(store.is_empty());
    assert_eq!(
        store.persistence().storage().get_item("notes").unwrap(),
        None
    );
}

#[test]
fn loads_existing_collection_on_startup() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            "notes",
            r#"[{"title":"old","description":"note","date":"May 01, 2024","id":"legacy-1"}]"#,
        )
        .unwrap();

    let mut store = store_with(storage);
    assert_eq!(store.len(), 1);
    assert_eq!(store.all()[0].id, "legacy-1");

    let added = store.create("new", "note").unwrap();
    assert_eq!(store.all()[1], added);
}

#[test]
fn create_skips_ids_already_present_after_reload() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            "notes",
            r#"[{"title":"old","description":"note","date":"May 01, 2024","id":"id-1"}]"#,
        )
        .unwrap();
    let mut store = store_with(storage);

    let created = store.create("x", "y").unwrap();
    assert_eq!(created.id, "id-2");

    let ids: Vec<&str> = store.all().iter().map(|note| note.id.as_str()).collect();
    assert_eq!(ids, vec!["id-1", "id-2"]);

    assert!(store.delete("id-1").unwrap());
    assert_eq!(store.all(), &[created]);
}

#[test]
fn create_gives_up_when_generator_only_repeats_taken_ids() {
    let mut store = NoteStore::with_providers(
        KeyValueNotePersistence::new(MemoryStorage::new()),
        Box::new(ConstantIds),
        Box::new(FixedClock(today())),
    );
    store.create("first", "note").unwrap();

    let err = store.create("second", "note").unwrap_err();
    match err {
        NoteStoreError::DuplicateId(id) => assert_eq!(id, "same"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.len(), 1);
}

struct ConstantIds;

impl IdGenerator for ConstantIds {
    fn new_id(&self) -> String {
        "same".to_string()
    }
}

fn reload_storage(store: &NoteStore<KeyValueNotePersistence<MemoryStorage>>) -> MemoryStorage {
    store.persistence().storage().clone()
}

struct FlakyPersistence {
    inner: KeyValueNotePersistence<MemoryStorage>,
    fail: Rc<Cell<bool>>,
}

impl NotePersistence for FlakyPersistence {
    fn load(&self) -> Vec<Note> {
        self.inner.load()
    }

    fn save(&mut self, notes: &[Note]) -> StorageResult<()> {
        if self.fail.get() {
            return Err(StorageError::Backend("disk full".to_string()));
        }
        self.inner.save(notes)
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.inner.clear()
    }
}
