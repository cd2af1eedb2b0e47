use parlor_persist::{keys, FileStore, KeyValueStore, MemoryStore, PersistError};

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    assert_eq!(store.get(keys::API_KEY).unwrap(), None);

    store.set(keys::API_KEY, "sk-test").unwrap();
    assert_eq!(store.get(keys::API_KEY).unwrap(), Some("sk-test".to_string()));

    store.set(keys::API_KEY, "sk-other").unwrap();
    assert_eq!(
        store.get(keys::API_KEY).unwrap(),
        Some("sk-other".to_string())
    );
}

#[test]
fn test_file_store_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    store.set(keys::SELECTED_CONVERSATION, "{}").unwrap();
    store.remove(keys::SELECTED_CONVERSATION).unwrap();
    assert_eq!(store.get(keys::SELECTED_CONVERSATION).unwrap(), None);

    // Removing a key that is already gone is not an error.
    store.remove(keys::SELECTED_CONVERSATION).unwrap();
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FileStore::new(dir.path()).unwrap();
        store.set(keys::THEME, "light").unwrap();
    }

    let reopened = FileStore::new(dir.path()).unwrap();
    assert_eq!(reopened.get(keys::THEME).unwrap(), Some("light".to_string()));
}

#[test]
fn test_file_store_rejects_path_escaping_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path()).unwrap();

    for key in ["../evil", "a/b", "", "dot.dot"] {
        match store.set(key, "x") {
            Err(PersistError::InvalidKey(k)) => assert_eq!(k, key),
            other => panic!("expected InvalidKey for {:?}, got {:?}", key, other.is_ok()),
        }
    }
}

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryStore::new();

    assert_eq!(store.get("missing").unwrap(), None);
    store.set(keys::THEME, "dark").unwrap();
    assert_eq!(store.get(keys::THEME).unwrap(), Some("dark".to_string()));
    store.remove(keys::THEME).unwrap();
    assert_eq!(store.get(keys::THEME).unwrap(), None);
}
