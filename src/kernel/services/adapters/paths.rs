//! On-disk locations of the document table, the settings file and the logs.
//!
//! The root is `$TABPAD_DATA_DIR` when set, otherwise the platform data
//! directory joined with `tabpad`:
//! - macOS: `~/Library/Application Support`
//! - Windows: `%APPDATA%`
//! - elsewhere: `$XDG_DATA_HOME`, or `~/.local/share`

use std::io;
use std::path::{Path, PathBuf};

pub const DATA_DIR_VAR: &str = "TABPAD_DATA_DIR";

const APP_NAME: &str = "tabpad";

type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the root from the process environment.
    pub fn locate() -> Option<Self> {
        Self::locate_with(&|name: &str| std::env::var(name).ok())
    }

    fn locate_with(env: EnvLookup<'_>) -> Option<Self> {
        non_empty(env, DATA_DIR_VAR)
            .or_else(|| platform_root(env).map(|base| base.join(APP_NAME)))
            .map(Self::at)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn documents(&self) -> PathBuf {
        self.root.join("documents.json")
    }

    pub fn settings(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn logs(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Creates the root directory if missing.
    pub fn create(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    /// Creates the log directory if missing and returns it.
    pub fn create_logs(&self) -> io::Result<PathBuf> {
        let logs = self.logs();
        std::fs::create_dir_all(&logs)?;
        Ok(logs)
    }
}

fn non_empty(env: EnvLookup<'_>, name: &str) -> Option<PathBuf> {
    env(name)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

fn platform_root(env: EnvLookup<'_>) -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        non_empty(env, "HOME").map(|home| home.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        non_empty(env, "APPDATA")
    } else {
        non_empty(env, "XDG_DATA_HOME")
            .or_else(|| non_empty(env, "HOME").map(|home| home.join(".local").join("share")))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
