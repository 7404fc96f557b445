//! Usage: Adapters touching the host (paths, persisted settings/state, real launch environment).

pub(crate) mod app_paths;
pub(crate) mod host_env;
pub(crate) mod install_store;
pub(crate) mod settings;
