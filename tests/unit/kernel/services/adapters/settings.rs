use super::*;
use tempfile::tempdir;

#[test]
fn memory_backend_get_set() {
    let backend = MemoryBackend::with_values([("fontSize", "12")]);
    assert_eq!(backend.get("fontSize").unwrap().as_deref(), Some("12"));
    assert_eq!(backend.get("minimap").unwrap(), None);

    backend.set("minimap", "false").unwrap();
    assert_eq!(backend.get("minimap").unwrap().as_deref(), Some("false"));
}

#[test]
fn json_backend_persists_flat_object() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tabpad").join("settings.json");

    let backend = JsonFileBackend::open(&path).unwrap();
    backend.set("wordWrap", "false").unwrap();
    backend.set("autoSaveDelay", "3").unwrap();

    let raw: BTreeMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw.get("wordWrap").map(String::as_str), Some("false"));
    assert_eq!(raw.get("autoSaveDelay").map(String::as_str), Some("3"));

    let reopened = JsonFileBackend::open(&path).unwrap();
    assert_eq!(reopened.get("wordWrap").unwrap().as_deref(), Some("false"));
}

#[test]
fn json_backend_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "[1, 2").unwrap();

    assert!(matches!(
        JsonFileBackend::open(&path),
        Err(SettingsError::Serde(_))
    ));

    let backend = JsonFileBackend::open_or_reset(&path);
    assert_eq!(backend.get("theme").unwrap(), None);
    backend.set("theme", "dark").unwrap();
    assert_eq!(
        JsonFileBackend::open(&path).unwrap().get("theme").unwrap().as_deref(),
        Some("dark")
    );
}

#[test]
fn json_backend_write_failure_keeps_cache_unchanged() {
    let dir = tempdir().unwrap();
    // the parent "directory" is a regular file, so writes fail
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let backend = JsonFileBackend::open_or_reset(blocker.join("settings.json"));

    assert!(backend.set("theme", "dark").is_err());
    assert_eq!(backend.get("theme").unwrap(), None);
}
