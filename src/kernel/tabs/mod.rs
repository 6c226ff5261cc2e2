//! Tab list and active-tab derivation from document snapshots.

mod action;
mod reducer;
mod state;

pub use action::TabAction;
pub use state::TabState;

#[cfg(test)]
#[path = "../../../tests/unit/kernel/tabs/mod.rs"]
mod tests;
