use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
    #[default]
    Plaintext,
    Markdown,
    Json,
    Yaml,
    Xml,
    Ini,
    Dockerfile,
    Shell,
    Powershell,
    Bat,
}

impl LanguageMode {
    pub const ALL: [LanguageMode; 10] = [
        LanguageMode::Plaintext,
        LanguageMode::Markdown,
        LanguageMode::Json,
        LanguageMode::Yaml,
        LanguageMode::Xml,
        LanguageMode::Ini,
        LanguageMode::Dockerfile,
        LanguageMode::Shell,
        LanguageMode::Powershell,
        LanguageMode::Bat,
    ];

    /// Tag handed to the editing widget and used as the stored value.
    pub fn key(self) -> &'static str {
        match self {
            Self::Plaintext => "plaintext",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::Ini => "ini",
            Self::Dockerfile => "dockerfile",
            Self::Shell => "shell",
            Self::Powershell => "powershell",
            Self::Bat => "bat",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Plaintext => "Plain Text",
            Self::Markdown => "Markdown",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Xml => "XML",
            Self::Ini => "INI",
            Self::Dockerfile => "Dockerfile",
            Self::Shell => "Shellscript",
            Self::Powershell => "PowerShell",
            Self::Bat => "Batch",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|mode| mode.key() == v)
    }

    pub fn supports_folding(self) -> bool {
        !matches!(self, Self::Plaintext)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub order: i64,
    pub title: String,
    pub language_mode: LanguageMode,
    pub text: String,
}

impl Document {
    /// A fresh, empty document with a newly generated id.
    pub fn new(title: impl Into<String>, language_mode: LanguageMode, order: i64) -> Self {
        Self {
            id: DocumentId::new(),
            order,
            title: title.into(),
            language_mode,
            text: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub order: Option<i64>,
    pub title: Option<String>,
    pub language_mode: Option<LanguageMode>,
    pub text: Option<String>,
}

impl DocumentPatch {
    pub fn order(order: i64) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn properties(title: impl Into<String>, language_mode: LanguageMode) -> Self {
        Self {
            title: Some(title.into()),
            language_mode: Some(language_mode),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_none()
            && self.title.is_none()
            && self.language_mode.is_none()
            && self.text.is_none()
    }

    pub fn apply_to(&self, doc: &mut Document) {
        if let Some(order) = self.order {
            doc.order = order;
        }
        if let Some(title) = &self.title {
            doc.title = title.clone();
        }
        if let Some(mode) = self.language_mode {
            doc.language_mode = mode;
        }
        if let Some(text) = &self.text {
            doc.text = text.clone();
        }
    }
}

/// Sorts by `order`, keeping insertion order for equal values.
pub fn sort_by_order(docs: &mut [Document]) {
    docs.sort_by_key(|d| d.order);
}

/// Order value for a document appended after `docs`.
///
/// Equals the document count while orders are contiguous; never collides with
/// an existing order after deletions left gaps.
pub fn next_order(docs: &[Document]) -> i64 {
    let count = docs.len() as i64;
    let after_max = docs
        .iter()
        .map(|d| d.order.saturating_add(1))
        .max()
        .unwrap_or(0);
    count.max(after_max)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/document.rs"]
mod tests;
