//! Usage: Persisted application settings (schema + read/write helpers).

use crate::app_paths;
use crate::domain::progress;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SCHEMA_VERSION: u32 = 2;
const SCHEMA_VERSION_ADD_PROGRESS_TICK: u32 = 2;

pub const DEFAULT_START_URL: &str = "https://www.pwawiki.com";
const MIN_PROGRESS_TICK_MS: u64 = 16;
const MAX_PROGRESS_TICK_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub schema_version: u32,
    // Origin the simulated PWA lives at; the launch chain probes and opens it.
    pub start_url: String,
    // Simulated install tick interval; +2% per tick.
    pub progress_tick_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            start_url: DEFAULT_START_URL.to_string(),
            progress_tick_ms: progress::DEFAULT_TICK_MS,
        }
    }
}

fn sanitize_start_url(settings: &mut AppSettings) -> bool {
    let trimmed = settings.start_url.trim();
    if trimmed.is_empty() {
        settings.start_url = DEFAULT_START_URL.to_string();
        return true;
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        settings.start_url = DEFAULT_START_URL.to_string();
        return true;
    }
    if trimmed != settings.start_url {
        settings.start_url = trimmed.to_string();
        return true;
    }
    false
}

fn sanitize_progress_tick(settings: &mut AppSettings) -> bool {
    let mut changed = false;

    if settings.progress_tick_ms == 0 {
        settings.progress_tick_ms = progress::DEFAULT_TICK_MS;
        changed = true;
    }
    if settings.progress_tick_ms < MIN_PROGRESS_TICK_MS {
        settings.progress_tick_ms = MIN_PROGRESS_TICK_MS;
        changed = true;
    }
    if settings.progress_tick_ms > MAX_PROGRESS_TICK_MS {
        settings.progress_tick_ms = MAX_PROGRESS_TICK_MS;
        changed = true;
    }

    changed
}

fn migrate_add_progress_tick(settings: &mut AppSettings, schema_version_present: bool) -> bool {
    // v2: Add the progress tick interval (default 100ms).
    if schema_version_present && settings.schema_version >= SCHEMA_VERSION_ADD_PROGRESS_TICK {
        return false;
    }

    let mut changed = false;

    // If schema_version is missing, force a write to persist schema_version so we don't keep "migrating"
    // on every startup.
    if !schema_version_present {
        changed = true;
    }

    if settings.schema_version != SCHEMA_VERSION_ADD_PROGRESS_TICK {
        settings.schema_version = SCHEMA_VERSION_ADD_PROGRESS_TICK;
        changed = true;
    }

    changed
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join("settings.json"))
}

fn parse_settings_json(content: &str) -> Result<(AppSettings, bool), String> {
    let raw: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    let schema_version_present = raw.get("schema_version").is_some();
    let settings: AppSettings =
        serde_json::from_value(raw).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    Ok((settings, schema_version_present))
}

fn repair(settings: &mut AppSettings, schema_version_present: bool) -> bool {
    let mut repaired = false;
    repaired |= migrate_add_progress_tick(settings, schema_version_present);
    repaired |= sanitize_start_url(settings);
    repaired |= sanitize_progress_tick(settings);
    repaired
}

pub fn read(app: &tauri::AppHandle) -> Result<AppSettings, String> {
    let path = settings_path(app)?;

    if !path.exists() {
        let settings = AppSettings::default();
        // Best-effort: create default settings.json on first read to make the config discoverable/editable.
        let _ = write(app, &settings);
        return Ok(settings);
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| format!("failed to read settings: {e}"))?;
    let (mut settings, schema_version_present) = parse_settings_json(&content)?;

    if repair(&mut settings, schema_version_present) {
        // Best-effort: persist repaired values while keeping read semantics.
        let _ = write(app, &settings);
    }

    Ok(settings)
}

pub fn write(app: &tauri::AppHandle, settings: &AppSettings) -> Result<AppSettings, String> {
    let mut settings = settings.clone();
    let trimmed = settings.start_url.trim().to_string();
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err("start_url must be an http(s) URL".to_string());
    }
    settings.start_url = trimmed;
    if settings.progress_tick_ms < MIN_PROGRESS_TICK_MS
        || settings.progress_tick_ms > MAX_PROGRESS_TICK_MS
    {
        return Err(format!(
            "progress_tick_ms must be between {MIN_PROGRESS_TICK_MS} and {MAX_PROGRESS_TICK_MS}"
        ));
    }
    settings.schema_version = SCHEMA_VERSION;

    let path = settings_path(app)?;
    let tmp_path = path.with_file_name("settings.json.tmp");
    let backup_path = path.with_file_name("settings.json.bak");

    let content = serde_json::to_vec_pretty(&settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(&path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, &path) {
        let _ = std::fs::rename(&backup_path, &path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(settings)
}
