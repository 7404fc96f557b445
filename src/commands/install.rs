//! Usage: Install store commands (status, prompt signals, lifecycle transitions).

use crate::app_state::InstallerState;
use crate::domain::install::{DeferredPrompt, InstallStatus};
use crate::shared::mutex_ext::MutexExt;
use crate::shared::time as shared_time;
use crate::{blocking, installer, settings};
use tauri::Emitter;

#[tauri::command]
pub(crate) fn install_status_get(state: tauri::State<'_, InstallerState>) -> InstallStatus {
    state.0.lock_or_recover().status()
}

/// The host signaled an install opportunity (`beforeinstallprompt` analogue).
#[tauri::command]
pub(crate) fn install_prompt_offer(
    app: tauri::AppHandle,
    state: tauri::State<'_, InstallerState>,
    platforms: Option<Vec<String>>,
) -> InstallStatus {
    let status = {
        let mut inner = state.0.lock_or_recover();
        inner.prompt_available(DeferredPrompt {
            platforms: platforms.unwrap_or_else(|| vec!["web".to_string()]),
            offered_at: shared_time::now_rfc3339(),
        });
        inner.status()
    };
    let _ = app.emit(installer::INSTALL_STATE_EVENT, status.clone());
    status
}

/// Consume the prompt and run the simulated install flow.
#[tauri::command]
pub(crate) async fn install_start(app: tauri::AppHandle) -> Result<InstallStatus, String> {
    let cfg = blocking::run("install_start_read_settings", {
        let app = app.clone();
        move || Ok(settings::read(&app).unwrap_or_default())
    })
    .await?;

    Ok(installer::start(&app, cfg.progress_tick_ms))
}

#[tauri::command]
pub(crate) async fn install_cancel(app: tauri::AppHandle) -> Result<InstallStatus, String> {
    blocking::run("install_cancel", move || Ok(installer::cancel(&app))).await
}

#[tauri::command]
pub(crate) async fn install_reset(app: tauri::AppHandle) -> Result<InstallStatus, String> {
    blocking::run("install_reset", move || Ok(installer::cancel(&app))).await
}

/// The host reported the app as installed (`appinstalled` analogue).
#[tauri::command]
pub(crate) async fn install_mark_installed(app: tauri::AppHandle) -> Result<InstallStatus, String> {
    blocking::run("install_mark_installed", move || {
        Ok(installer::mark_installed(&app))
    })
    .await
}

/// Display-mode change from the webview's media query listener. Standalone
/// means the app is effectively installed; the opposite direction carries no
/// information and leaves the store untouched.
#[tauri::command]
pub(crate) async fn install_display_mode_changed(
    app: tauri::AppHandle,
    standalone: bool,
    state: tauri::State<'_, InstallerState>,
) -> Result<InstallStatus, String> {
    if !standalone {
        return Ok(state.0.lock_or_recover().status());
    }
    blocking::run("install_display_mode_changed", move || {
        Ok(installer::mark_installed(&app))
    })
    .await
}
