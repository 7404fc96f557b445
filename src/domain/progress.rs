//! Usage: Simulated install progress schedule (pure; the timer loop lives in `app/installer`).

use std::time::Duration;

/// Step copy shown during the simulated install, advanced on a fixed cadence.
pub(crate) const INSTALL_STEPS: [&str; 5] = [
    "Mempersiapkan instalasi...",
    "Mengunduh komponen aplikasi...",
    "Mengonfigurasi pengaturan...",
    "Menginstal aplikasi...",
    "Menyelesaikan instalasi...",
];

pub(crate) const DEFAULT_TICK_MS: u64 = 100;
pub(crate) const PROGRESS_INCREMENT: u8 = 2;
pub(crate) const STEP_ADVANCE_MS: u64 = 2_000;
pub(crate) const COMPLETE_HOLD_MS: u64 = 1_000;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ProgressPlan {
    pub tick: Duration,
    pub complete_hold: Duration,
}

impl ProgressPlan {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick: Duration::from_millis(tick_ms),
            complete_hold: Duration::from_millis(COMPLETE_HOLD_MS),
        }
    }
}

impl Default for ProgressPlan {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub(crate) struct ProgressSnapshot {
    pub percent: u8,
    pub step_index: usize,
    pub step_label: &'static str,
}

/// Percentage after `ticks` ticks, saturating at 100.
pub(crate) fn percent_for_tick(ticks: u64) -> u8 {
    ticks
        .saturating_mul(PROGRESS_INCREMENT as u64)
        .min(100) as u8
}

/// Step index for the wall-clock position, capped at the final step so the
/// label never runs past the list while the bar finishes.
pub(crate) fn step_for_elapsed(elapsed_ms: u64) -> usize {
    ((elapsed_ms / STEP_ADVANCE_MS) as usize).min(INSTALL_STEPS.len() - 1)
}

pub(crate) fn snapshot(ticks: u64, elapsed_ms: u64) -> ProgressSnapshot {
    let step_index = step_for_elapsed(elapsed_ms);
    ProgressSnapshot {
        percent: percent_for_tick(ticks),
        step_index,
        step_label: INSTALL_STEPS[step_index],
    }
}

pub(crate) fn is_complete(snapshot: &ProgressSnapshot) -> bool {
    snapshot.percent >= 100
}
