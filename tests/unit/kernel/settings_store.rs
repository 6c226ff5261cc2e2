use super::*;
use crate::kernel::services::adapters::MemoryBackend;

struct UnavailableBackend;

impl KeyValueBackend for UnavailableBackend {
    fn get(&self, _key: &str) -> Result<Option<String>, SettingsError> {
        Err(SettingsError::Unavailable("quota exceeded".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SettingsError> {
        Err(SettingsError::Unavailable("quota exceeded".to_string()))
    }
}

fn store_with(values: &[(&str, &str)]) -> (SettingsStore, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::with_values(values.iter().copied()));
    (SettingsStore::new(backend.clone()), backend)
}

#[test]
fn boolean_round_trip() {
    let (store, backend) = store_with(&[]);
    store.set(SettingKey::WordWrap, &false);
    assert_eq!(backend.get("wordWrap").unwrap().as_deref(), Some("false"));

    let reloaded = SettingsStore::new(backend.clone());
    assert!(!reloaded.get(SettingKey::WordWrap, true));

    store.set(SettingKey::WordWrap, &true);
    let reloaded = SettingsStore::new(backend);
    assert!(reloaded.get(SettingKey::WordWrap, false));
}

#[test]
fn numeric_round_trip_and_fallback() {
    let (store, backend) = store_with(&[("autoSaveDelay", "soon")]);
    assert_eq!(store.get(SettingKey::AutoSaveDelay, 10.0), 10.0);

    store.set(SettingKey::FontSize, &18.5);
    let reloaded = SettingsStore::new(backend);
    assert_eq!(reloaded.get(SettingKey::FontSize, 14.0), 18.5);
}

#[test]
fn unrecognized_boolean_string_uses_default() {
    let (store, _) = store_with(&[("minimap", "yes"), ("lineNumber", "FALSE")]);
    assert!(store.get(SettingKey::Minimap, true));
    assert!(!store.get(SettingKey::Minimap, false));
    assert!(!store.get(SettingKey::LineNumber, true));
}

#[test]
fn load_builds_editor_settings_with_defaults() {
    let (store, _) = store_with(&[
        ("theme", "dark"),
        ("fontSize", "20"),
        ("autoSave", "false"),
        ("autoSaveDelay", ""),
        ("languageMode", "markdown"),
        ("validation", "maybe"),
    ]);
    let settings = store.load();
    assert_eq!(settings.theme, ThemeMode::Dark);
    assert_eq!(settings.font_size, 20.0);
    assert!(!settings.auto_save);
    assert_eq!(settings.auto_save_delay, 10.0);
    assert_eq!(settings.language_mode, LanguageMode::Markdown);
    assert!(settings.validation);
}

#[test]
fn load_replaces_out_of_range_numbers_with_defaults() {
    let (store, _) = store_with(&[("fontSize", "500"), ("autoSaveDelay", "0")]);
    let settings = store.load();
    assert_eq!(settings.font_size, 14.0);
    assert_eq!(settings.auto_save_delay, 10.0);
}

#[test]
fn unavailable_backend_degrades_silently() {
    let store = SettingsStore::new(Arc::new(UnavailableBackend));
    assert_eq!(store.get(SettingKey::FontSize, 14.0), 14.0);

    store.set(SettingKey::FontSize, &22.0);
    assert_eq!(store.get(SettingKey::FontSize, 14.0), 22.0);
    assert_eq!(store.load().font_size, 22.0);
}

#[test]
fn apply_validates_ranges() {
    let (store, backend) = store_with(&[]);
    let mut settings = store.load();

    let err = store
        .apply(&mut settings, SettingChange::FontSize(120.0))
        .unwrap_err();
    assert!(matches!(err, SettingsError::OutOfRange { key: SettingKey::FontSize, .. }));
    assert_eq!(settings.font_size, 14.0);
    assert_eq!(backend.get("fontSize").unwrap(), None);

    assert!(store
        .apply(&mut settings, SettingChange::AutoSaveDelay(0.5))
        .is_err());
    store
        .apply(&mut settings, SettingChange::AutoSaveDelay(999.0))
        .unwrap();
    assert_eq!(settings.auto_save_delay, 999.0);
    assert_eq!(backend.get("autoSaveDelay").unwrap().as_deref(), Some("999"));

    store
        .apply(&mut settings, SettingChange::Theme(ThemeMode::Light))
        .unwrap();
    assert_eq!(backend.get("theme").unwrap().as_deref(), Some("light"));
}

#[test]
fn parse_change_from_raw_values() {
    assert_eq!(
        SettingChange::parse(SettingKey::Minimap, "False").unwrap(),
        SettingChange::Minimap(false)
    );
    assert_eq!(
        SettingChange::parse(SettingKey::FontSize, "16").unwrap(),
        SettingChange::FontSize(16.0)
    );
    assert_eq!(
        SettingChange::parse(SettingKey::LanguageMode, "yaml").unwrap(),
        SettingChange::LanguageMode(LanguageMode::Yaml)
    );
    assert!(matches!(
        SettingChange::parse(SettingKey::WordWrap, "on"),
        Err(SettingsError::InvalidValue { .. })
    ));
    assert!(matches!(
        SettingChange::parse(SettingKey::Text, "body"),
        Err(SettingsError::UnknownKey(_))
    ));
}

#[test]
fn legacy_text_ignores_empty_body() {
    let (store, _) = store_with(&[("text", "")]);
    assert_eq!(store.legacy_text(), None);
    let (store, _) = store_with(&[("text", "old notes")]);
    assert_eq!(store.legacy_text().as_deref(), Some("old notes"));
}
