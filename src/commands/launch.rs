//! Usage: PWA launch commands (strategy chain entry point + status probe).

use crate::app_state::InstallerState;
use crate::domain::launch::{self, LaunchEnv, LaunchResult};
use crate::shared::mutex_ext::MutexExt;
use crate::{blocking, host_env, notice, settings};

/// Run the launch strategy chain against the real host. A failed chain (only
/// possible if even the navigation fallback errors) degrades to a notice; the
/// frontend then returns to the home view.
#[tauri::command]
pub(crate) async fn pwa_launch(app: tauri::AppHandle) -> Result<LaunchResult, String> {
    let result = blocking::run("pwa_launch", {
        let app = app.clone();
        move || {
            let cfg = settings::read(&app).unwrap_or_default();
            let env = host_env::HostEnv::new(app.clone(), cfg.start_url)?;
            Ok(launch::launch_pwa(&env))
        }
    })
    .await?;

    if !result.success {
        tracing::warn!(method = result.method.as_str(), "PWA 启动失败: {}", result.message);
        let _ = notice::emit(
            &app,
            notice::build(
                notice::NoticeLevel::Error,
                None,
                format!("无法打开应用: {}", result.message),
            ),
        );
    }

    Ok(result)
}

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct PwaStatus {
    is_installed: bool,
    is_standalone: bool,
    has_service_worker: bool,
    has_manifest: bool,
}

/// Best-effort probe of the PWA's host footprint; probe errors read as absent.
#[tauri::command]
pub(crate) async fn pwa_status_get(
    app: tauri::AppHandle,
    state: tauri::State<'_, InstallerState>,
) -> Result<PwaStatus, String> {
    let store_installed = state.0.lock_or_recover().status().is_installed;

    blocking::run("pwa_status_get", move || {
        let cfg = settings::read(&app).unwrap_or_default();
        let env = host_env::HostEnv::new(app.clone(), cfg.start_url)?;

        let is_standalone = env.pwa_window_open();
        let has_service_worker = env.has_service_worker().unwrap_or(false);
        let has_manifest = env.has_manifest().unwrap_or(false);

        Ok(PwaStatus {
            is_installed: store_installed || (has_service_worker && has_manifest),
            is_standalone,
            has_service_worker,
            has_manifest,
        })
    })
    .await
}
