//! Usage: Shared Tauri state types used by `commands/*`.

use crate::installer;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct InstallerState(pub(crate) Mutex<installer::Installer>);
