mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use app::{app_state, installer, notice};
pub(crate) use infra::{app_paths, host_env, install_store, settings};
pub(crate) use shared::blocking;

use app_state::InstallerState;
use commands::*;
use shared::mutex_ext::MutexExt;
use tauri::Emitter;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .manage(InstallerState::default())
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            crate::app::logging::init(app.handle());

            // Restore the persisted install record before the first view renders,
            // then push the initial snapshot to the frontend.
            let app_handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                let record = match blocking::run("startup_install_store_read", {
                    let app_handle = app_handle.clone();
                    move || install_store::read(&app_handle)
                })
                .await
                {
                    Ok(record) => record,
                    Err(err) => {
                        tracing::warn!("安装记录读取失败，按未安装处理: {}", err);
                        install_store::InstallRecord::default()
                    }
                };

                let status = {
                    let state = app_handle.state::<InstallerState>();
                    let mut inner = state.0.lock_or_recover();
                    inner.restore(&record);
                    inner.status()
                };

                tracing::info!(
                    is_installed = status.is_installed,
                    install_date = %status.install_date.as_deref().unwrap_or("-"),
                    "安装状态已恢复"
                );
                let _ = app_handle.emit(installer::INSTALL_STATE_EVENT, status);
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            settings_get,
            settings_set,
            app_about_get,
            app_data_dir_get,
            app_exit,
            install_status_get,
            install_prompt_offer,
            install_start,
            install_cancel,
            install_reset,
            install_mark_installed,
            install_display_mode_changed,
            pwa_launch,
            pwa_status_get
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::ExitRequested { .. } = &event {
            // A running install simulation only holds timers; cancel them so the
            // store is not left in an installing state on next launch.
            crate::app::cleanup::cleanup_before_exit(app_handle);
        }
    });
}
