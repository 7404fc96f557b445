//! Usage: Tauri command handlers, grouped by surface.

mod app;
mod install;
mod launch;

pub(crate) use app::*;
pub(crate) use install::*;
pub(crate) use launch::*;
