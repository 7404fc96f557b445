//! Usage: Application layer (Tauri-managed state, install lifecycle, startup wiring).

pub(crate) mod app_state;
pub(crate) mod cleanup;
pub(crate) mod installer;
pub(crate) mod logging;
pub(crate) mod notice;
