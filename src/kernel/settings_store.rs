//! Typed access to the flat settings space.
//!
//! Reads never fail: absent or malformed values fall back to the caller's
//! default. Writes go to the backend immediately; when the backend is
//! unavailable the value is kept for the rest of the session and the failure
//! is only logged.

use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::kernel::document::LanguageMode;
use crate::kernel::services::ports::{
    EditorSettings, KeyValueBackend, SettingKey, SettingValue, SettingsError, ThemeMode,
    AUTO_SAVE_DELAY_RANGE, FONT_SIZE_RANGE,
};

/// One user-facing preference change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    Theme(ThemeMode),
    FontSize(f64),
    LineNumber(bool),
    Minimap(bool),
    LineHighlight(bool),
    BracketPairsHighlight(bool),
    Validation(bool),
    WordWrap(bool),
    AutoSave(bool),
    AutoSaveDelay(f64),
    LanguageMode(LanguageMode),
}

impl SettingChange {
    pub fn key(&self) -> SettingKey {
        match self {
            Self::Theme(_) => SettingKey::Theme,
            Self::FontSize(_) => SettingKey::FontSize,
            Self::LineNumber(_) => SettingKey::LineNumber,
            Self::Minimap(_) => SettingKey::Minimap,
            Self::LineHighlight(_) => SettingKey::LineHighlight,
            Self::BracketPairsHighlight(_) => SettingKey::BracketPairsHighlight,
            Self::Validation(_) => SettingKey::Validation,
            Self::WordWrap(_) => SettingKey::WordWrap,
            Self::AutoSave(_) => SettingKey::AutoSave,
            Self::AutoSaveDelay(_) => SettingKey::AutoSaveDelay,
            Self::LanguageMode(_) => SettingKey::LanguageMode,
        }
    }

    /// Parses a raw user value for `key`, e.g. from the command line.
    pub fn parse(key: SettingKey, value: &str) -> Result<Self, SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key,
            value: value.to_string(),
        };
        let flag = || bool::from_stored(value).ok_or_else(invalid);
        let number = || f64::from_stored(value).ok_or_else(invalid);
        Ok(match key {
            SettingKey::Theme => Self::Theme(ThemeMode::parse(value).ok_or_else(invalid)?),
            SettingKey::FontSize => Self::FontSize(number()?),
            SettingKey::LineNumber => Self::LineNumber(flag()?),
            SettingKey::Minimap => Self::Minimap(flag()?),
            SettingKey::LineHighlight => Self::LineHighlight(flag()?),
            SettingKey::BracketPairsHighlight => Self::BracketPairsHighlight(flag()?),
            SettingKey::Validation => Self::Validation(flag()?),
            SettingKey::WordWrap => Self::WordWrap(flag()?),
            SettingKey::AutoSave => Self::AutoSave(flag()?),
            SettingKey::AutoSaveDelay => Self::AutoSaveDelay(number()?),
            SettingKey::LanguageMode => {
                Self::LanguageMode(LanguageMode::parse(value).ok_or_else(invalid)?)
            }
            SettingKey::Text => return Err(SettingsError::UnknownKey(key.to_string())),
        })
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let (value, range) = match *self {
            Self::FontSize(v) => (v, FONT_SIZE_RANGE),
            Self::AutoSaveDelay(v) => (v, AUTO_SAVE_DELAY_RANGE),
            _ => return Ok(()),
        };
        if range.contains(&value) {
            Ok(())
        } else {
            Err(SettingsError::OutOfRange {
                key: self.key(),
                value,
                min: *range.start(),
                max: *range.end(),
            })
        }
    }

    fn apply_to(&self, settings: &mut EditorSettings) {
        match *self {
            Self::Theme(v) => settings.theme = v,
            Self::FontSize(v) => settings.font_size = v,
            Self::LineNumber(v) => settings.line_number = v,
            Self::Minimap(v) => settings.minimap = v,
            Self::LineHighlight(v) => settings.line_highlight = v,
            Self::BracketPairsHighlight(v) => settings.bracket_pairs_highlight = v,
            Self::Validation(v) => settings.validation = v,
            Self::WordWrap(v) => settings.word_wrap = v,
            Self::AutoSave(v) => settings.auto_save = v,
            Self::AutoSaveDelay(v) => settings.auto_save_delay = v,
            Self::LanguageMode(v) => settings.language_mode = v,
        }
    }

    fn stored(&self) -> String {
        match self {
            Self::Theme(v) => v.to_stored(),
            Self::FontSize(v) | Self::AutoSaveDelay(v) => v.to_stored(),
            Self::LineNumber(v)
            | Self::Minimap(v)
            | Self::LineHighlight(v)
            | Self::BracketPairsHighlight(v)
            | Self::Validation(v)
            | Self::WordWrap(v)
            | Self::AutoSave(v) => v.to_stored(),
            Self::LanguageMode(v) => v.to_stored(),
        }
    }
}

pub struct SettingsStore {
    backend: Arc<dyn KeyValueBackend>,
    session: Mutex<FxHashMap<SettingKey, String>>,
}

impl SettingsStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            session: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn get_raw(&self, key: SettingKey) -> Option<String> {
        let session = self
            .session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned();
        if session.is_some() {
            return session;
        }
        match self.backend.get(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "settings backend unavailable on read");
                None
            }
        }
    }

    pub fn get<T: SettingValue>(&self, key: SettingKey, default: T) -> T {
        self.get_raw(key)
            .as_deref()
            .and_then(T::from_stored)
            .unwrap_or(default)
    }

    fn get_in_range(&self, key: SettingKey, range: RangeInclusive<f64>, default: f64) -> f64 {
        let value = self.get(key, default);
        if range.contains(&value) {
            value
        } else {
            default
        }
    }

    pub fn set<T: SettingValue>(&self, key: SettingKey, value: &T) {
        self.set_raw(key, value.to_stored());
    }

    fn set_raw(&self, key: SettingKey, raw: String) {
        if let Err(e) = self.backend.set(key.as_str(), &raw) {
            tracing::warn!(key = %key, error = %e, "settings backend unavailable on write, keeping value for this session");
        }
        self.session
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, raw);
    }

    /// Reads every editor setting, substituting defaults for bad values.
    pub fn load(&self) -> EditorSettings {
        let d = EditorSettings::default();
        EditorSettings {
            theme: self.get(SettingKey::Theme, d.theme),
            font_size: self.get_in_range(SettingKey::FontSize, FONT_SIZE_RANGE, d.font_size),
            line_number: self.get(SettingKey::LineNumber, d.line_number),
            minimap: self.get(SettingKey::Minimap, d.minimap),
            line_highlight: self.get(SettingKey::LineHighlight, d.line_highlight),
            bracket_pairs_highlight: self
                .get(SettingKey::BracketPairsHighlight, d.bracket_pairs_highlight),
            validation: self.get(SettingKey::Validation, d.validation),
            word_wrap: self.get(SettingKey::WordWrap, d.word_wrap),
            auto_save: self.get(SettingKey::AutoSave, d.auto_save),
            auto_save_delay: self.get_in_range(
                SettingKey::AutoSaveDelay,
                AUTO_SAVE_DELAY_RANGE,
                d.auto_save_delay,
            ),
            language_mode: self.get(SettingKey::LanguageMode, d.language_mode),
        }
    }

    /// Validates, persists and applies one change to the in-memory settings.
    /// Out-of-range values are rejected and nothing is written.
    pub fn apply(
        &self,
        settings: &mut EditorSettings,
        change: SettingChange,
    ) -> Result<(), SettingsError> {
        change.validate()?;
        self.set_raw(change.key(), change.stored());
        change.apply_to(settings);
        tracing::debug!(key = %change.key(), "setting changed");
        Ok(())
    }

    /// Body left behind by the single-document editor, if any.
    pub fn legacy_text(&self) -> Option<String> {
        self.get_raw(SettingKey::Text).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/settings_store.rs"]
mod tests;
