//! Usage: Production launch environment — window and HTTP probes against the real host.
//!
//! Runs on the blocking pool (`blocking::run`), hence the blocking HTTP
//! client. Failure paths must not leave a window open; window creation either
//! fully succeeds or reports `false`.

use crate::domain::launch::{LaunchEnv, WindowProfile};
use std::time::Duration;
use tauri::Manager;

pub(crate) const PWA_WINDOW_LABEL: &str = "pwa-app";
const PWA_WINDOW_TITLE: &str = "PWA Wiki";
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const MANIFEST_PROBE_PATHS: [&str; 2] = ["/manifest.json", "/manifest.webmanifest"];
const SERVICE_WORKER_PROBE_PATHS: [&str; 2] = ["/sw.js", "/service-worker.js"];

pub(crate) struct HostEnv {
    app: tauri::AppHandle,
    start_url: String,
    client: reqwest::blocking::Client,
}

impl HostEnv {
    pub fn new(app: tauri::AppHandle, start_url: String) -> Result<Self, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| format!("failed to build probe client: {e}"))?;
        Ok(Self {
            app,
            start_url,
            client,
        })
    }

    /// `scheme://host[:port]` slice of the configured start URL.
    fn origin(&self) -> &str {
        let url = self.start_url.as_str();
        let Some(scheme_end) = url.find("://") else {
            return url;
        };
        match url[scheme_end + 3..].find('/') {
            Some(path_start) => &url[..scheme_end + 3 + path_start],
            None => url,
        }
    }

    fn resolve_against_origin(&self, raw: &str) -> String {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.to_string();
        }
        let origin = self.origin().trim_end_matches('/');
        if raw.starts_with('/') {
            format!("{origin}{raw}")
        } else {
            format!("{origin}/{raw}")
        }
    }

    pub fn has_manifest(&self) -> Result<bool, String> {
        Ok(self.manifest_start_url()?.is_some())
    }

    /// Side-effect-free probe: is our dedicated PWA window currently up?
    pub fn pwa_window_open(&self) -> bool {
        self.app.get_webview_window(PWA_WINDOW_LABEL).is_some()
    }
}

impl LaunchEnv for HostEnv {
    fn focus_running_pwa(&self) -> bool {
        let Some(window) = self.app.get_webview_window(PWA_WINDOW_LABEL) else {
            return false;
        };

        let _ = window.show();
        let _ = window.unminimize();
        let _ = window.set_focus();
        true
    }

    fn manifest_start_url(&self) -> Result<Option<String>, String> {
        for path in MANIFEST_PROBE_PATHS {
            let url = format!("{}{path}", self.origin());
            let response = self
                .client
                .get(&url)
                .send()
                .map_err(|e| format!("manifest fetch failed for {url}: {e}"))?;

            if !response.status().is_success() {
                continue;
            }

            let body = response
                .text()
                .map_err(|e| format!("manifest body read failed for {url}: {e}"))?;
            let manifest: serde_json::Value = serde_json::from_str(&body)
                .map_err(|e| format!("manifest parse failed for {url}: {e}"))?;

            let Some(start_url) = manifest.get("start_url").and_then(|v| v.as_str()) else {
                return Ok(None);
            };
            return Ok(Some(self.resolve_against_origin(start_url)));
        }

        Ok(None)
    }

    fn has_service_worker(&self) -> Result<bool, String> {
        for path in SERVICE_WORKER_PROBE_PATHS {
            let url = format!("{}{path}", self.origin());
            let response = self
                .client
                .get(&url)
                .send()
                .map_err(|e| format!("service worker probe failed for {url}: {e}"))?;
            if response.status().is_success() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn open_app_window(&self, url: &str, profile: WindowProfile) -> Result<bool, String> {
        let external: tauri::Url = url
            .parse()
            .map_err(|e| format!("invalid launch url {url}: {e}"))?;

        let (width, height) = profile.size();
        let (x, y) = profile.position();

        match tauri::WebviewWindowBuilder::new(
            &self.app,
            PWA_WINDOW_LABEL,
            tauri::WebviewUrl::External(external),
        )
        .title(PWA_WINDOW_TITLE)
        .inner_size(width as f64, height as f64)
        .position(x as f64, y as f64)
        .build()
        {
            Ok(window) => {
                let _ = window.set_focus();
                Ok(true)
            }
            Err(err) => {
                // Mirrors `window.open` returning null: the window did not come
                // up and nothing is left behind.
                tracing::debug!("PWA 窗口创建失败: {}", err);
                Ok(false)
            }
        }
    }

    fn navigate(&self, url: &str) -> Result<(), String> {
        tauri_plugin_opener::open_url(url, None::<&str>)
            .map_err(|e| format!("failed to open {url}: {e}"))
    }

    fn start_url(&self) -> &str {
        &self.start_url
    }

    fn window_profile(&self) -> WindowProfile {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            WindowProfile::Mobile
        } else {
            WindowProfile::Desktop
        }
    }
}
