//! Usage: Run blocking (filesystem / network probe) work off the async command path.

pub(crate) async fn run<T, F>(label: &'static str, f: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, String> + Send + 'static,
{
    tauri::async_runtime::spawn_blocking(f)
        .await
        .map_err(|e| format!("{label}: blocking task failed: {e}"))?
}
