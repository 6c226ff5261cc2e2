use crate::kernel::document::LanguageMode;

use super::settings::{EditorSettings, PaletteMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollbarVisibility {
    Auto,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineHighlight {
    All,
    None,
}

/// Visual/behavioral options handed to the editing widget.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorOptions {
    pub font_size: f64,
    pub word_wrap: bool,
    pub line_numbers: bool,
    pub line_decorations_width: u8,
    pub line_numbers_min_chars: u8,
    pub folding: bool,
    pub minimap: bool,
    pub vertical_scrollbar: ScrollbarVisibility,
    pub vertical_scrollbar_size: u8,
    pub line_highlight: LineHighlight,
    pub match_brackets: bool,
    pub bracket_pair_guides: bool,
    pub validation_decorations: bool,
}

impl EditorOptions {
    pub fn from_settings(settings: &EditorSettings, language: LanguageMode) -> Self {
        Self {
            font_size: settings.font_size,
            word_wrap: settings.word_wrap,
            line_numbers: settings.line_number,
            line_decorations_width: if settings.line_number { 10 } else { 5 },
            line_numbers_min_chars: 2,
            folding: language.supports_folding(),
            minimap: settings.minimap,
            // the minimap doubles as the scrollbar
            vertical_scrollbar: if settings.minimap {
                ScrollbarVisibility::Hidden
            } else {
                ScrollbarVisibility::Auto
            },
            vertical_scrollbar_size: if settings.minimap { 0 } else { 10 },
            line_highlight: if settings.line_highlight {
                LineHighlight::All
            } else {
                LineHighlight::None
            },
            match_brackets: settings.bracket_pairs_highlight,
            bracket_pair_guides: settings.bracket_pairs_highlight,
            validation_decorations: settings.validation,
        }
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self::from_settings(&EditorSettings::default(), LanguageMode::default())
    }
}

/// Everything the widget needs to render one document.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub theme: &'static str,
    pub language: LanguageMode,
    pub options: EditorOptions,
}

impl WidgetConfig {
    pub fn new(settings: &EditorSettings, palette: PaletteMode, language: LanguageMode) -> Self {
        Self {
            theme: palette.widget_theme(),
            language,
            options: EditorOptions::from_settings(settings, language),
        }
    }
}
