use super::*;

fn env_of(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |name| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }
}

#[test]
fn override_variable_wins() {
    let env = env_of(&[(DATA_DIR_VAR, "/srv/notes"), ("HOME", "/home/ann")]);
    let dir = DataDir::locate_with(&env).unwrap();
    assert_eq!(dir.root(), Path::new("/srv/notes"));
}

#[test]
fn blank_override_falls_through_to_platform_dir() {
    let env = env_of(&[(DATA_DIR_VAR, "  "), ("HOME", "/home/ann"), ("APPDATA", "C:\\ann")]);
    let dir = DataDir::locate_with(&env).unwrap();
    assert_ne!(dir.root(), Path::new("  "));
    assert!(dir.root().ends_with(APP_NAME));
}

#[cfg(target_os = "linux")]
#[test]
fn linux_prefers_xdg_data_home() {
    let env = env_of(&[("XDG_DATA_HOME", "/xdg"), ("HOME", "/home/ann")]);
    assert_eq!(
        DataDir::locate_with(&env).unwrap().root(),
        Path::new("/xdg/tabpad")
    );

    let env = env_of(&[("HOME", "/home/ann")]);
    assert_eq!(
        DataDir::locate_with(&env).unwrap().root(),
        Path::new("/home/ann/.local/share/tabpad")
    );
}

#[test]
fn nothing_to_go_on_yields_none() {
    assert_eq!(DataDir::locate_with(&env_of(&[])), None);
}

#[test]
fn files_live_under_the_root() {
    let dir = DataDir::at("/data");
    assert_eq!(dir.documents(), Path::new("/data/documents.json"));
    assert_eq!(dir.settings(), Path::new("/data/settings.json"));
    assert_eq!(dir.logs(), Path::new("/data/logs"));
}

#[test]
fn create_logs_builds_missing_parents() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = DataDir::at(tmp.path().join("nested").join("tabpad"));

    let logs = dir.create_logs().unwrap();
    assert!(logs.is_dir());
    dir.create().unwrap();
    assert!(dir.root().is_dir());
}
