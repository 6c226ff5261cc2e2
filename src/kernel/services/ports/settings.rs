use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;
use thiserror::Error;

use crate::kernel::document::LanguageMode;

pub const FONT_SIZE_RANGE: RangeInclusive<f64> = 1.0..=99.0;
pub const AUTO_SAVE_DELAY_RANGE: RangeInclusive<f64> = 1.0..=999.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings storage unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt settings file: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: SettingKey,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: SettingKey, value: String },
    #[error("unknown setting: {0}")]
    UnknownKey(String),
}

/// Fixed keys of the flat settings space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Theme,
    /// Body of the legacy single-document editor.
    Text,
    /// Default language mode offered for new files.
    LanguageMode,
    FontSize,
    LineNumber,
    Minimap,
    LineHighlight,
    BracketPairsHighlight,
    Validation,
    WordWrap,
    AutoSave,
    AutoSaveDelay,
}

impl SettingKey {
    pub const ALL: [SettingKey; 12] = [
        SettingKey::Theme,
        SettingKey::Text,
        SettingKey::LanguageMode,
        SettingKey::FontSize,
        SettingKey::LineNumber,
        SettingKey::Minimap,
        SettingKey::LineHighlight,
        SettingKey::BracketPairsHighlight,
        SettingKey::Validation,
        SettingKey::WordWrap,
        SettingKey::AutoSave,
        SettingKey::AutoSaveDelay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Text => "text",
            Self::LanguageMode => "languageMode",
            Self::FontSize => "fontSize",
            Self::LineNumber => "lineNumber",
            Self::Minimap => "minimap",
            Self::LineHighlight => "lineHighlight",
            Self::BracketPairsHighlight => "bracketPairsHighlight",
            Self::Validation => "validation",
            Self::WordWrap => "wordWrap",
            Self::AutoSave => "autoSave",
            Self::AutoSaveDelay => "autoSaveDelay",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value.trim())
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn resolve(self, system_dark: bool) -> PaletteMode {
        match self {
            Self::Light => PaletteMode::Light,
            Self::Dark => PaletteMode::Dark,
            Self::System if system_dark => PaletteMode::Dark,
            Self::System => PaletteMode::Light,
        }
    }
}

impl PaletteMode {
    /// Theme name understood by the editing widget.
    pub fn widget_theme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "vs-dark",
        }
    }
}

/// Conversion between a typed value and its stored string form.
///
/// `from_stored` returns `None` for anything that must fall back to the
/// caller's default.
pub trait SettingValue: Sized {
    fn from_stored(raw: &str) -> Option<Self>;
    fn to_stored(&self) -> String;
}

impl SettingValue for bool {
    fn from_stored(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn to_stored(&self) -> String {
        (if *self { "true" } else { "false" }).to_string()
    }
}

impl SettingValue for f64 {
    fn from_stored(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    fn to_stored(&self) -> String {
        self.to_string()
    }
}

impl SettingValue for String {
    fn from_stored(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn to_stored(&self) -> String {
        self.clone()
    }
}

impl SettingValue for ThemeMode {
    fn from_stored(raw: &str) -> Option<Self> {
        ThemeMode::parse(raw)
    }

    fn to_stored(&self) -> String {
        self.as_str().to_string()
    }
}

impl SettingValue for LanguageMode {
    fn from_stored(raw: &str) -> Option<Self> {
        LanguageMode::parse(raw)
    }

    fn to_stored(&self) -> String {
        self.key().to_string()
    }
}

/// Flat string key/value storage (browser local storage, a JSON file, ...).
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    pub theme: ThemeMode,
    pub font_size: f64,
    pub line_number: bool,
    pub minimap: bool,
    pub line_highlight: bool,
    pub bracket_pairs_highlight: bool,
    pub validation: bool,
    pub word_wrap: bool,
    pub auto_save: bool,
    /// Seconds.
    pub auto_save_delay: f64,
    pub language_mode: LanguageMode,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::System,
            font_size: 14.0,
            line_number: true,
            minimap: true,
            line_highlight: true,
            bracket_pairs_highlight: true,
            validation: true,
            word_wrap: true,
            auto_save: true,
            auto_save_delay: 10.0,
            language_mode: LanguageMode::Plaintext,
        }
    }
}

impl EditorSettings {
    pub fn auto_save_delay(&self) -> Duration {
        Duration::from_secs_f64(self.auto_save_delay.max(0.0))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
