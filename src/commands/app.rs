//! Usage: App-level Tauri commands (about info, settings, lifecycle).

use crate::{app_paths, blocking, settings};

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct AppAboutInfo {
    os: String,
    arch: String,
    profile: String,
    app_version: String,
}

#[tauri::command]
pub(crate) fn app_about_get() -> AppAboutInfo {
    AppAboutInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        profile: if cfg!(debug_assertions) {
            "debug".to_string()
        } else {
            "release".to_string()
        },
        app_version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

#[tauri::command]
pub(crate) fn app_data_dir_get(app: tauri::AppHandle) -> Result<String, String> {
    Ok(app_paths::app_data_dir(&app)?.display().to_string())
}

#[tauri::command]
pub(crate) fn app_exit(app: tauri::AppHandle) -> Result<bool, String> {
    std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(200));
        app.exit(0);
    });
    Ok(true)
}

#[tauri::command]
pub(crate) async fn settings_get(app: tauri::AppHandle) -> Result<settings::AppSettings, String> {
    blocking::run("settings_get", move || settings::read(&app)).await
}

#[tauri::command]
pub(crate) async fn settings_set(
    app: tauri::AppHandle,
    settings: settings::AppSettings,
) -> Result<settings::AppSettings, String> {
    blocking::run("settings_set", move || settings::write(&app, &settings)).await
}
