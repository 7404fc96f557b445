//! Usage: Launch an installed PWA via an ordered chain of fallback strategies.
//!
//! Each strategy probes the host through [`LaunchEnv`] and either claims the
//! launch or reports why it passed; the first success wins and later
//! strategies are never invoked. A failing strategy must leave nothing behind
//! (no partially opened window) — that contract sits on the `LaunchEnv`
//! implementation, not on the chain.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LaunchMethod {
    AlreadyInPwa,
    Manifest,
    ServiceWorker,
    WindowOpen,
    Fallback,
}

impl LaunchMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyInPwa => "already_in_pwa",
            Self::Manifest => "manifest",
            Self::ServiceWorker => "service_worker",
            Self::WindowOpen => "window_open",
            Self::Fallback => "fallback",
        }
    }
}

/// Outcome of one launch attempt. Produced fresh per call, never persisted.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct LaunchResult {
    pub success: bool,
    pub method: LaunchMethod,
    pub message: String,
}

impl LaunchResult {
    fn ok(method: LaunchMethod, message: impl Into<String>) -> Self {
        Self {
            success: true,
            method,
            message: message.into(),
        }
    }

    fn failed(method: LaunchMethod, message: impl Into<String>) -> Self {
        Self {
            success: false,
            method,
            message: message.into(),
        }
    }
}

/// Window geometry for the opened PWA window. Mobile keeps a phone-shaped
/// viewport; desktop gets the same shape offset from the corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowProfile {
    Mobile,
    Desktop,
}

impl WindowProfile {
    pub fn size(self) -> (u32, u32) {
        match self {
            Self::Mobile => (390, 844),
            Self::Desktop => (414, 896),
        }
    }

    pub fn position(self) -> (i32, i32) {
        match self {
            Self::Mobile => (0, 0),
            Self::Desktop => (100, 100),
        }
    }
}

/// Host seam for the strategy chain. Implementations must not leave a window
/// open when they return `Ok(false)` or `Err`.
pub(crate) trait LaunchEnv {
    /// Strategy 1 probe: the PWA is already running standalone. A `true`
    /// return means the existing window has been brought to front.
    fn focus_running_pwa(&self) -> bool;

    /// Strategy 2 probe: resolve the manifest's `start_url`, if a manifest is
    /// reachable at all.
    fn manifest_start_url(&self) -> Result<Option<String>, String>;

    /// Strategy 3 probe: a service worker is registered for the app origin.
    fn has_service_worker(&self) -> Result<bool, String>;

    /// Open a dedicated app window. `Ok(false)` mirrors `window.open`
    /// returning null (blocked / failed without an error).
    fn open_app_window(&self, url: &str, profile: WindowProfile) -> Result<bool, String>;

    /// Last-resort plain navigation to the start URL.
    fn navigate(&self, url: &str) -> Result<(), String>;

    fn start_url(&self) -> &str;

    fn window_profile(&self) -> WindowProfile;
}

/// Run the chain in fixed order and return the first success. Strategy 5
/// only reports failure when the navigation call itself errors.
pub(crate) fn launch_pwa(env: &dyn LaunchEnv) -> LaunchResult {
    let strategies: [fn(&dyn LaunchEnv) -> LaunchResult; 4] = [
        try_already_running,
        try_manifest,
        try_service_worker,
        try_window_open,
    ];

    for strategy in strategies {
        let result = strategy(env);
        if result.success {
            tracing::info!(method = result.method.as_str(), "PWA 启动成功: {}", result.message);
            return result;
        }
        tracing::debug!(method = result.method.as_str(), "启动策略未命中: {}", result.message);
    }

    fallback_navigate(env)
}

fn try_already_running(env: &dyn LaunchEnv) -> LaunchResult {
    if env.focus_running_pwa() {
        LaunchResult::ok(LaunchMethod::AlreadyInPwa, "Already running in PWA mode")
    } else {
        LaunchResult::failed(LaunchMethod::AlreadyInPwa, "Not running standalone")
    }
}

fn try_manifest(env: &dyn LaunchEnv) -> LaunchResult {
    let start_url = match env.manifest_start_url() {
        Ok(Some(url)) => url,
        Ok(None) => return LaunchResult::failed(LaunchMethod::Manifest, "No manifest found"),
        Err(err) => {
            return LaunchResult::failed(LaunchMethod::Manifest, format!("Manifest error: {err}"))
        }
    };

    match env.open_app_window(&start_url, env.window_profile()) {
        Ok(true) => LaunchResult::ok(LaunchMethod::Manifest, "Launched via manifest start_url"),
        Ok(false) => LaunchResult::failed(LaunchMethod::Manifest, "Failed to open PWA window"),
        Err(err) => LaunchResult::failed(LaunchMethod::Manifest, format!("Manifest error: {err}")),
    }
}

fn try_service_worker(env: &dyn LaunchEnv) -> LaunchResult {
    match env.has_service_worker() {
        Ok(false) => LaunchResult::failed(
            LaunchMethod::ServiceWorker,
            "No active service worker for app origin",
        ),
        Err(err) => LaunchResult::failed(
            LaunchMethod::ServiceWorker,
            format!("Service worker error: {err}"),
        ),
        Ok(true) => match env.open_app_window(env.start_url(), env.window_profile()) {
            Ok(true) => LaunchResult::ok(
                LaunchMethod::ServiceWorker,
                "Launched via service worker detection",
            ),
            Ok(false) => LaunchResult::failed(
                LaunchMethod::ServiceWorker,
                "Service worker present but window failed to open",
            ),
            Err(err) => LaunchResult::failed(
                LaunchMethod::ServiceWorker,
                format!("Service worker error: {err}"),
            ),
        },
    }
}

fn try_window_open(env: &dyn LaunchEnv) -> LaunchResult {
    match env.open_app_window(env.start_url(), env.window_profile()) {
        Ok(true) => LaunchResult::ok(LaunchMethod::WindowOpen, "Launched via app window"),
        Ok(false) => LaunchResult::failed(LaunchMethod::WindowOpen, "Failed to open window"),
        Err(err) => {
            LaunchResult::failed(LaunchMethod::WindowOpen, format!("Window open error: {err}"))
        }
    }
}

fn fallback_navigate(env: &dyn LaunchEnv) -> LaunchResult {
    match env.navigate(env.start_url()) {
        Ok(()) => LaunchResult::ok(LaunchMethod::Fallback, "Launched via fallback navigation"),
        Err(err) => LaunchResult::failed(LaunchMethod::Fallback, format!("Fallback error: {err}")),
    }
}

#[cfg(test)]
mod tests;
