//! Usage: Install lifecycle manager — drives the simulated progress timers and
//! commits terminal state to the storage adapter.
//!
//! The progress task is owned through an explicit handle (shutdown channel +
//! join handle) held in managed state; cancel and exit cleanup tear it down
//! instead of letting timers fire into a dead flow.

use crate::app_state::InstallerState;
use crate::domain::install::{DeferredPrompt, InstallState, InstallStatus};
use crate::domain::progress;
use crate::shared::mutex_ext::MutexExt;
use crate::shared::time as shared_time;
use crate::{install_store, notice};
use tauri::Emitter;
use tauri::Manager;
use tokio::sync::oneshot;

pub(crate) const INSTALL_STATE_EVENT: &str = "install:state";
pub(crate) const INSTALL_PROGRESS_EVENT: &str = "install:progress";

pub(crate) struct ProgressHandle {
    shutdown: oneshot::Sender<()>,
    task: tauri::async_runtime::JoinHandle<()>,
}

#[derive(Default)]
pub(crate) struct Installer {
    state: InstallState,
    progress: Option<ProgressHandle>,
}

impl Installer {
    pub fn status(&self) -> InstallStatus {
        self.state.status()
    }

    pub fn restore(&mut self, record: &install_store::InstallRecord) {
        self.state = InstallState::restore(record.installed, record.install_date.clone());
    }

    pub fn prompt_available(&mut self, prompt: DeferredPrompt) {
        self.state.prompt_available(prompt);
    }

    /// Detach the progress handle without stopping the task (used by the task
    /// itself on completion).
    fn take_progress(&mut self) -> Option<ProgressHandle> {
        self.progress.take()
    }

    /// Tear down a running progress task. Returns true when one was stopped.
    pub fn stop_progress(&mut self) -> bool {
        let Some(handle) = self.progress.take() else {
            return false;
        };
        let _ = handle.shutdown.send(());
        handle.task.abort();
        true
    }
}

fn emit_state(app: &tauri::AppHandle, status: InstallStatus) {
    let _ = app.emit(INSTALL_STATE_EVENT, status);
}

/// Consume the deferred prompt (if held) and start the simulated install.
/// Total: already-installed and already-installing calls return the current
/// status untouched.
pub(crate) fn start(app: &tauri::AppHandle, tick_ms: u64) -> InstallStatus {
    let state = app.state::<InstallerState>();
    let mut installer = state.0.lock_or_recover();

    if installer.state.is_installed() || installer.progress.is_some() {
        return installer.status();
    }

    let prompt = installer.state.take_prompt();
    installer.state.start_installation();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let plan = progress::ProgressPlan::new(tick_ms);
    let task = tauri::async_runtime::spawn(run_progress(app.clone(), plan, shutdown_rx));
    installer.progress = Some(ProgressHandle {
        shutdown: shutdown_tx,
        task,
    });

    let status = installer.status();
    drop(installer);

    tracing::info!(
        platforms = ?prompt.as_ref().map(|p| p.platforms.clone()).unwrap_or_default(),
        tick_ms,
        "开始模拟安装"
    );
    emit_state(app, status.clone());
    status
}

/// Cancel a running install (clears the timers) and drop back to the initial
/// state. Also used by reset; both remove the persisted record.
pub(crate) fn cancel(app: &tauri::AppHandle) -> InstallStatus {
    let state = app.state::<InstallerState>();
    let mut installer = state.0.lock_or_recover();

    if installer.stop_progress() {
        tracing::info!("安装已取消，进度定时器已清理");
    }
    installer.state.cancel_installation();

    let status = installer.status();
    drop(installer);

    if let Err(err) = install_store::clear(app) {
        tracing::warn!("清除安装记录失败: {}", err);
    }

    emit_state(app, status.clone());
    status
}

/// Commit a completed install: transition, persist, notify. Shared by the
/// progress runner and the host's app-installed signal.
pub(crate) fn complete(app: &tauri::AppHandle) -> InstallStatus {
    let now = shared_time::now_rfc3339();

    let state = app.state::<InstallerState>();
    let mut installer = state.0.lock_or_recover();
    installer.take_progress();
    installer.state.complete_installation(now.clone());
    let status = installer.status();
    drop(installer);

    let record = install_store::InstallRecord {
        installed: true,
        install_date: Some(now),
    };
    if let Err(err) = install_store::write(app, &record) {
        // Persist failure degrades to a notice; in-memory state stays installed.
        tracing::warn!("安装记录写入失败: {}", err);
        let _ = notice::emit(
            app,
            notice::build(
                notice::NoticeLevel::Warning,
                None,
                format!("安装记录保存失败: {err}"),
            ),
        );
    }

    tracing::info!("安装完成");
    emit_state(app, status.clone());
    status
}

/// Mark installed from the host's display-mode / app-installed signal without
/// running the simulated flow.
pub(crate) fn mark_installed(app: &tauri::AppHandle) -> InstallStatus {
    let now = shared_time::now_rfc3339();

    let state = app.state::<InstallerState>();
    let mut installer = state.0.lock_or_recover();
    installer.stop_progress();
    installer.state.mark_running_standalone(now);
    let status = installer.status();
    drop(installer);

    let record = install_store::InstallRecord {
        installed: true,
        install_date: status.install_date.clone(),
    };
    if let Err(err) = install_store::write(app, &record) {
        tracing::warn!("安装记录写入失败: {}", err);
    }

    emit_state(app, status.clone());
    status
}

async fn run_progress(
    app: tauri::AppHandle,
    plan: progress::ProgressPlan,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(plan.tick);
    // The first interval tick fires immediately; consume it so tick 1 lands
    // after one full interval.
    ticker.tick().await;

    let tick_ms = plan.tick.as_millis() as u64;
    let mut ticks: u64 = 0;

    let finished = loop {
        tokio::select! {
            _ = &mut shutdown => break false,
            _ = ticker.tick() => {
                ticks += 1;
                let snapshot = progress::snapshot(ticks, ticks * tick_ms);
                let _ = app.emit(INSTALL_PROGRESS_EVENT, snapshot);
                if progress::is_complete(&snapshot) {
                    break true;
                }
            }
        }
    };

    if !finished {
        return;
    }

    // Hold at 100% for one beat before committing.
    tokio::select! {
        _ = &mut shutdown => return,
        _ = tokio::time::sleep(plan.complete_hold) => {}
    }

    let status = complete(&app);
    tracing::debug!(
        install_date = %status.install_date.as_deref().unwrap_or("-"),
        "安装状态已持久化"
    );
    let _ = notice::emit(
        &app,
        notice::build(
            notice::NoticeLevel::Success,
            None,
            "应用已成功安装".to_string(),
        ),
    );
}
