//! Full-screen TUI implementation for Quill.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use quill_core::config::Config;
use quill_core::session::SessionStore;
pub use runtime::TuiRuntime;

/// Runs the interactive client until the user quits.
pub fn run(config: Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("Quill requires a terminal.");
    }

    let session = SessionStore::open();
    let mut runtime = TuiRuntime::new(config, session)?;
    runtime.run()
}
