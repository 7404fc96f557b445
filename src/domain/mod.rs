//! Usage: Pure product logic (install state machine, launch chain, progress schedule).

pub(crate) mod install;
pub(crate) mod launch;
pub(crate) mod progress;
