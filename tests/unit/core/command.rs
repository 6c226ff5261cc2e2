use super::*;

#[test]
fn test_command_name() {
    assert_eq!(Command::Save.name(), "save");
    assert_eq!(Command::EditFile.name(), "editFile");
    assert_eq!(Command::Custom("myCommand".to_string()).name(), "myCommand");
}

#[test]
fn test_command_from_name_round_trips_known_names() {
    for cmd in [
        Command::Save,
        Command::NewFile,
        Command::EditFile,
        Command::RemoveFile,
        Command::Undo,
        Command::Redo,
        Command::Find,
        Command::OpenSettings,
    ] {
        assert_eq!(Command::from_name(cmd.name()), cmd);
    }
}

#[test]
fn test_unknown_name_becomes_custom() {
    assert_eq!(
        Command::from_name("toggleZen"),
        Command::Custom("toggleZen".to_string())
    );
}

#[test]
fn test_widget_scoped_commands() {
    assert!(Command::Save.is_widget_scoped());
    assert!(Command::EditFile.is_widget_scoped());
    assert!(!Command::Undo.is_widget_scoped());
    assert!(Command::Find.is_widget_native());
    assert!(!Command::RemoveFile.is_widget_native());
}
