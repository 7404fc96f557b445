use super::*;
use std::cell::RefCell;

struct FakeEnv {
    running: bool,
    manifest: Result<Option<String>, String>,
    service_worker: Result<bool, String>,
    open_results: RefCell<Vec<Result<bool, String>>>,
    navigate_fails: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeEnv {
    fn new() -> Self {
        Self {
            running: false,
            manifest: Ok(None),
            service_worker: Ok(false),
            open_results: RefCell::new(Vec::new()),
            navigate_fails: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl LaunchEnv for FakeEnv {
    fn focus_running_pwa(&self) -> bool {
        self.calls.borrow_mut().push("focus_running_pwa".to_string());
        self.running
    }

    fn manifest_start_url(&self) -> Result<Option<String>, String> {
        self.calls.borrow_mut().push("manifest_start_url".to_string());
        self.manifest.clone()
    }

    fn has_service_worker(&self) -> Result<bool, String> {
        self.calls.borrow_mut().push("has_service_worker".to_string());
        self.service_worker.clone()
    }

    fn open_app_window(&self, url: &str, _profile: WindowProfile) -> Result<bool, String> {
        self.calls.borrow_mut().push(format!("open:{url}"));
        if self.open_results.borrow().is_empty() {
            return Ok(false);
        }
        self.open_results.borrow_mut().remove(0)
    }

    fn navigate(&self, url: &str) -> Result<(), String> {
        self.calls.borrow_mut().push(format!("navigate:{url}"));
        if self.navigate_fails {
            Err("navigation refused".to_string())
        } else {
            Ok(())
        }
    }

    fn start_url(&self) -> &str {
        "https://www.pwawiki.com"
    }

    fn window_profile(&self) -> WindowProfile {
        WindowProfile::Desktop
    }
}

#[test]
fn first_strategy_success_short_circuits_the_rest() {
    let env = FakeEnv {
        running: true,
        ..FakeEnv::new()
    };

    let result = launch_pwa(&env);
    assert!(result.success);
    assert_eq!(result.method, LaunchMethod::AlreadyInPwa);
    // No probes beyond strategy 1.
    assert_eq!(env.calls(), vec!["focus_running_pwa".to_string()]);
}

#[test]
fn manifest_start_url_wins_over_later_strategies() {
    let env = FakeEnv {
        manifest: Ok(Some("https://www.pwawiki.com/app".to_string())),
        open_results: RefCell::new(vec![Ok(true)]),
        ..FakeEnv::new()
    };

    let result = launch_pwa(&env);
    assert!(result.success);
    assert_eq!(result.method, LaunchMethod::Manifest);
    assert_eq!(
        env.calls(),
        vec![
            "focus_running_pwa".to_string(),
            "manifest_start_url".to_string(),
            "open:https://www.pwawiki.com/app".to_string(),
        ]
    );
}

#[test]
fn service_worker_presence_opens_the_start_url() {
    let env = FakeEnv {
        service_worker: Ok(true),
        // Manifest window fails (no manifest), service worker window opens.
        open_results: RefCell::new(vec![Ok(true)]),
        ..FakeEnv::new()
    };

    let result = launch_pwa(&env);
    assert!(result.success);
    assert_eq!(result.method, LaunchMethod::ServiceWorker);
}

#[test]
fn blocked_windows_fall_through_to_navigation_fallback() {
    let env = FakeEnv {
        manifest: Ok(Some("https://www.pwawiki.com/app".to_string())),
        service_worker: Ok(true),
        // Every window.open analogue is blocked.
        open_results: RefCell::new(vec![Ok(false), Ok(false), Ok(false)]),
        ..FakeEnv::new()
    };

    let result = launch_pwa(&env);
    assert!(result.success);
    assert_eq!(result.method, LaunchMethod::Fallback);
    assert_eq!(
        env.calls().last().map(String::as_str),
        Some("navigate:https://www.pwawiki.com")
    );
}

#[test]
fn probe_errors_degrade_instead_of_aborting_the_chain() {
    let env = FakeEnv {
        manifest: Err("connect timed out".to_string()),
        service_worker: Err("probe failed".to_string()),
        ..FakeEnv::new()
    };

    let result = launch_pwa(&env);
    assert!(result.success);
    assert_eq!(result.method, LaunchMethod::Fallback);
}

#[test]
fn fallback_reports_failure_only_when_navigation_errors() {
    let env = FakeEnv {
        navigate_fails: true,
        ..FakeEnv::new()
    };

    let result = launch_pwa(&env);
    assert!(!result.success);
    assert_eq!(result.method, LaunchMethod::Fallback);
    assert!(result.message.contains("navigation refused"));
}

#[test]
fn method_tags_serialize_snake_case() {
    let json = serde_json::to_string(&LaunchResult {
        success: true,
        method: LaunchMethod::ServiceWorker,
        message: String::new(),
    })
    .expect("serialize");
    assert!(json.contains("\"service_worker\""));
    assert_eq!(LaunchMethod::AlreadyInPwa.as_str(), "already_in_pwa");
}

#[test]
fn window_profiles_expose_fixed_geometry() {
    assert_eq!(WindowProfile::Mobile.size(), (390, 844));
    assert_eq!(WindowProfile::Desktop.size(), (414, 896));
    assert_eq!(WindowProfile::Desktop.position(), (100, 100));
}
