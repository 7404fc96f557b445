//! Usage: Best-effort cleanup hooks for app lifecycle events (exit/restart).

use crate::app_state::InstallerState;
use crate::shared::mutex_ext::MutexExt;
use std::sync::atomic::{AtomicBool, Ordering};
use tauri::Manager;

static CLEANUP_STARTED: AtomicBool = AtomicBool::new(false);

/// Stop a running install simulation so its timers don't outlive the UI.
/// Terminal state was never persisted for an unfinished install, so there is
/// nothing to roll back on disk.
pub(crate) fn cleanup_before_exit(app: &tauri::AppHandle) {
    if CLEANUP_STARTED.swap(true, Ordering::SeqCst) {
        return;
    }

    let state = app.state::<InstallerState>();
    let mut installer = state.0.lock_or_recover();
    if installer.stop_progress() {
        tracing::info!("退出清理：已停止安装进度任务");
    }
}
