//! Usage: Install state machine — explicit state object with pure, total transitions.
//!
//! Invariant: `is_installed` and `is_installing` are never both true. Every
//! transition below preserves it; `debug_invariant` is asserted after each
//! mutation in tests.

use serde::Serialize;

/// Opaque handle standing in for the host's deferred native install prompt.
/// Consumed at most once via [`InstallState::take_prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeferredPrompt {
    pub platforms: Vec<String>,
    pub offered_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct InstallState {
    installed: bool,
    installing: bool,
    can_install: bool,
    install_date: Option<String>,
    deferred_prompt: Option<DeferredPrompt>,
}

/// Frontend-facing snapshot of the install store.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct InstallStatus {
    pub is_installed: bool,
    pub is_installing: bool,
    pub can_install: bool,
    pub install_date: Option<String>,
    pub prompt_platforms: Vec<String>,
}

impl InstallState {
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    pub fn is_installing(&self) -> bool {
        self.installing
    }

    pub fn install_date(&self) -> Option<&str> {
        self.install_date.as_deref()
    }

    /// Initialize from the persisted record. Only terminal state is persisted,
    /// so a restored store is never mid-install.
    pub fn restore(installed: bool, install_date: Option<String>) -> Self {
        Self {
            installed,
            installing: false,
            can_install: false,
            install_date: if installed { install_date } else { None },
            deferred_prompt: None,
        }
    }

    /// The host signaled an install opportunity. Ignored once installed.
    pub fn prompt_available(&mut self, prompt: DeferredPrompt) {
        if self.installed {
            return;
        }
        self.can_install = true;
        self.deferred_prompt = Some(prompt);
    }

    /// Consume the deferred prompt handle, if any.
    pub fn take_prompt(&mut self) -> Option<DeferredPrompt> {
        self.deferred_prompt.take()
    }

    /// Enter the installing state. No-op when already installed (keeps the
    /// invariant) or already installing (double trigger).
    pub fn start_installation(&mut self) {
        if self.installed {
            return;
        }
        self.installing = true;
    }

    /// Commit a finished install: clears installing, stamps the install date,
    /// and retires the install opportunity.
    pub fn complete_installation(&mut self, now: String) {
        self.installing = false;
        self.installed = true;
        self.can_install = false;
        self.deferred_prompt = None;
        self.install_date = Some(now);
    }

    /// Drop back to the initial not-installed state. Shared by cancel and
    /// reset; the prompt opportunity (if still held) survives.
    pub fn cancel_installation(&mut self) {
        self.installing = false;
        self.installed = false;
        self.install_date = None;
    }

    /// The host reported the app is running standalone: it is installed even
    /// if we never saw our own flow complete.
    pub fn mark_running_standalone(&mut self, now: String) {
        self.installing = false;
        self.installed = true;
        self.can_install = false;
        self.deferred_prompt = None;
        if self.install_date.is_none() {
            self.install_date = Some(now);
        }
    }

    pub fn status(&self) -> InstallStatus {
        InstallStatus {
            is_installed: self.installed,
            is_installing: self.installing,
            can_install: self.can_install,
            install_date: self.install_date.clone(),
            prompt_platforms: self
                .deferred_prompt
                .as_ref()
                .map(|p| p.platforms.clone())
                .unwrap_or_default(),
        }
    }

    #[cfg(test)]
    pub fn debug_invariant(&self) {
        assert!(
            !(self.installed && self.installing),
            "installed and installing must never both hold: {self:?}"
        );
    }
}

#[cfg(test)]
mod tests;
