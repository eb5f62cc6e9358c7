use crate::usecase::ports::source::TransportError;

/// Runs a blocking source call off the UI loop.
pub async fn run_blocking<F, T>(f: F) -> Result<T, TransportError>
where
    F: FnOnce() -> Result<T, TransportError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| TransportError::Unavailable(format!("fetch task aborted: {err}")))?
}
