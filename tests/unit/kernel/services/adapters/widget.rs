use super::*;
use crate::core::Command;
use crate::kernel::document::LanguageMode;
use crate::kernel::services::ports::{EditorSettings, PaletteMode};

#[test]
fn keeps_buffer_and_configuration() {
    let widget = HeadlessWidget::new();
    widget.set_value("hello");
    widget.configure(&WidgetConfig::new(
        &EditorSettings::default(),
        PaletteMode::Dark,
        LanguageMode::Json,
    ));

    assert_eq!(widget.value(), "hello");
    let config = widget.config().unwrap();
    assert_eq!(config.theme, "vs-dark");
    assert_eq!(config.language, LanguageMode::Json);
}

#[test]
fn dispose_is_idempotent() {
    let widget = HeadlessWidget::new();
    let mut registration = widget.add_command(
        CommandBinding {
            command: Command::Save,
            keys: Vec::new(),
        },
        Arc::new(|| {}),
    );
    assert_eq!(widget.command_count(), 1);

    registration.dispose();
    registration.dispose();
    assert_eq!(widget.command_count(), 0);
}
