//! tabpad - multi-document editor core
//!
//! Module layout:
//! - core: framework primitives (Command, Key)
//! - kernel: headless document core (documents, tabs, settings, auto-save, editor host)
//! - app: application shell (Workbench)

pub mod app;
pub mod core;
pub mod kernel;
