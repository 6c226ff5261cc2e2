//! Application shell: wires the document core to one editor widget.

pub mod workbench;

pub use workbench::{UiRequest, Workbench, WorkbenchDeps, WorkbenchError};
