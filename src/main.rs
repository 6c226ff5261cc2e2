use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use tabpad::app::{Workbench, WorkbenchDeps, WorkbenchError};
use tabpad::kernel::services::adapters::{
    DataDir, HeadlessWidget, JsonDocumentTable, JsonFileBackend, LogNotifier,
};
use tabpad::kernel::services::ports::{SettingKey, SettingsError, StoreError};
use tabpad::kernel::{DocumentId, LanguageMode, SettingChange};

mod logging;

#[derive(Debug, Parser)]
#[command(name = "tabpad")]
#[command(about = "Tabbed multi-document notes kept in a local store", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List tabs in display order; the active tab is marked with `*`
    List,

    /// Create a document and print its id
    New {
        /// Document title
        title: String,

        /// Language mode (defaults to the `languageMode` setting)
        #[arg(value_parser = parse_language_mode)]
        mode: Option<LanguageMode>,
    },

    /// Print a document body
    Show {
        #[arg(value_parser = parse_document_id)]
        id: DocumentId,
    },

    /// Move the tab at index FROM to index TO
    Move { from: usize, to: usize },

    /// Delete a document
    Rm {
        #[arg(value_parser = parse_document_id)]
        id: DocumentId,
    },

    /// Print editor settings as JSON
    Settings,

    /// Change one setting
    Set {
        #[arg(value_parser = parse_setting_key)]
        key: SettingKey,

        value: String,
    },
}

fn parse_document_id(value: &str) -> Result<DocumentId, String> {
    DocumentId::parse(value).ok_or_else(|| format!("not a document id: {value}"))
}

fn parse_language_mode(value: &str) -> Result<LanguageMode, String> {
    LanguageMode::parse(value).ok_or_else(|| {
        let known: Vec<&str> = LanguageMode::ALL.iter().map(|m| m.key()).collect();
        format!("unknown language mode (expected one of {})", known.join(", "))
    })
}

fn parse_setting_key(value: &str) -> Result<SettingKey, String> {
    SettingKey::parse(value).ok_or_else(|| {
        let known: Vec<&str> = SettingKey::ALL.iter().map(|k| k.as_str()).collect();
        format!("unknown setting (expected one of {})", known.join(", "))
    })
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot determine the data directory")]
    NoDataDir,
    #[error("unknown document id: {0}")]
    UnknownDocument(DocumentId),
    #[error("tab index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Workbench(#[from] WorkbenchError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let data_dir = DataDir::locate();
    let _logging = logging::init(data_dir.as_ref());

    match run(cli.command, data_dir).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("tabpad: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn open_workbench(dir: &DataDir) -> Result<Workbench, CliError> {
    dir.create()?;
    let deps = WorkbenchDeps {
        settings: Arc::new(JsonFileBackend::open_or_reset(dir.settings())),
        documents: Arc::new(JsonDocumentTable::new(dir.documents())),
        widget: Arc::new(HeadlessWidget::new()),
        notifier: Arc::new(LogNotifier),
    };
    Ok(Workbench::open(deps, false).await?)
}

async fn run(command: Commands, data_dir: Option<DataDir>) -> Result<(), CliError> {
    let dir = data_dir.ok_or(CliError::NoDataDir)?;
    match command {
        Commands::List => {
            let wb = open_workbench(&dir).await?;
            let active = wb.active();
            for (index, doc) in wb.tabs().iter().enumerate() {
                let marker = if Some(doc.id) == active { '*' } else { ' ' };
                println!(
                    "{marker}{index}\t{}\t{}\t{}",
                    doc.id,
                    doc.language_mode.key(),
                    doc.title
                );
            }
        }
        Commands::New { title, mode } => {
            let mut wb = open_workbench(&dir).await?;
            let mode = mode.unwrap_or(wb.editor_settings().language_mode);
            let id = wb.new_file(&title, mode).await?;
            println!("{id}");
        }
        Commands::Show { id } => {
            let wb = open_workbench(&dir).await?;
            let doc = wb
                .store()
                .get(id)
                .await?
                .ok_or(CliError::UnknownDocument(id))?;
            print!("{}", doc.text);
        }
        Commands::Move { from, to } => {
            let mut wb = open_workbench(&dir).await?;
            let len = wb.tabs().len();
            if let Some(index) = [from, to].into_iter().find(|&i| i >= len) {
                return Err(CliError::IndexOutOfRange { index, len });
            }
            wb.reorder_tabs(from, to).await?;
        }
        Commands::Rm { id } => {
            let mut wb = open_workbench(&dir).await?;
            if wb.tab_state().get(id).is_none() {
                return Err(CliError::UnknownDocument(id));
            }
            wb.delete_document(id).await?;
        }
        Commands::Settings => {
            let wb = open_workbench(&dir).await?;
            println!("{}", serde_json::to_string_pretty(wb.editor_settings())?);
        }
        Commands::Set { key, value } => {
            let mut wb = open_workbench(&dir).await?;
            wb.apply_setting(SettingChange::parse(key, &value)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/main.rs"]
mod tests;
