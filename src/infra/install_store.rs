//! Usage: Persisted install record (`pwa_installed` / `pwa_install_date` keys).
//!
//! Only terminal state is stored: a record exists once an install completed
//! and is removed by cancel/reset. The key names are the app's stable storage
//! contract, shared with earlier builds.

use crate::app_paths;
use crate::shared::fs as shared_fs;
use crate::shared::time as shared_time;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "install_state.json";
const INSTALLED_KEY: &str = "pwa_installed";
const INSTALL_DATE_KEY: &str = "pwa_install_date";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InstallRecord {
    pub installed: bool,
    pub install_date: Option<String>,
}

fn store_path(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE_NAME)
}

pub(crate) fn read_from(dir: &Path) -> Result<InstallRecord, String> {
    let Some(bytes) = shared_fs::read_optional_file(&store_path(dir))? else {
        return Ok(InstallRecord::default());
    };

    let raw: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|e| format!("failed to parse {STORE_FILE_NAME}: {e}"))?;

    let installed = raw
        .get(INSTALLED_KEY)
        .and_then(|v| v.as_str())
        .map(|v| v == "true")
        .unwrap_or(false);

    let install_date = raw
        .get(INSTALL_DATE_KEY)
        .and_then(|v| v.as_str())
        .map(str::to_string);

    if let Some(date) = install_date.as_deref() {
        if !shared_time::is_valid_rfc3339(date) {
            tracing::warn!(date = %date, "安装日期不是合法的 RFC 3339 时间戳，已忽略");
            return Ok(InstallRecord {
                installed,
                install_date: None,
            });
        }
    }

    Ok(InstallRecord {
        installed,
        install_date,
    })
}

pub(crate) fn write_to(dir: &Path, record: &InstallRecord) -> Result<(), String> {
    // `pwa_installed` is either the literal "true" or absent.
    let mut raw = serde_json::Map::new();
    if record.installed {
        raw.insert(
            INSTALLED_KEY.to_string(),
            serde_json::Value::String("true".to_string()),
        );
    }
    if let Some(date) = record.install_date.as_deref() {
        raw.insert(
            INSTALL_DATE_KEY.to_string(),
            serde_json::Value::String(date.to_string()),
        );
    }

    let content = serde_json::to_vec_pretty(&serde_json::Value::Object(raw))
        .map_err(|e| format!("failed to serialize {STORE_FILE_NAME}: {e}"))?;
    shared_fs::write_file_atomic(&store_path(dir), &content)
}

pub(crate) fn clear_in(dir: &Path) -> Result<(), String> {
    shared_fs::remove_file_if_exists(&store_path(dir))?;
    Ok(())
}

pub(crate) fn read(app: &tauri::AppHandle) -> Result<InstallRecord, String> {
    read_from(&app_paths::app_data_dir(app)?)
}

pub(crate) fn write(app: &tauri::AppHandle, record: &InstallRecord) -> Result<(), String> {
    write_to(&app_paths::app_data_dir(app)?, record)
}

pub(crate) fn clear(app: &tauri::AppHandle) -> Result<(), String> {
    clear_in(&app_paths::app_data_dir(app)?)
}
