#[cfg(feature = "runtime-tokio")]
pub use tokio::task::JoinError;

#[cfg(feature = "runtime-tokio")]
/// Run a blocking closure on the runtime's blocking pool.
pub async fn spawn_blocking<F, T>(f: F) -> Result<T, JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await
}

#[cfg(not(feature = "runtime-tokio"))]
#[derive(Debug)]
pub struct JoinError;

#[cfg(feature = "runtime-async-std")]
/// Run a blocking closure on the runtime's blocking pool.
pub async fn spawn_blocking<F, T>(f: F) -> Result<T, JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(async_std::task::spawn_blocking(f).await)
}

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-async-std")))]
pub async fn spawn_blocking<F, T>(_: F) -> Result<T, JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Err(JoinError)
}

#[cfg(not(feature = "runtime-tokio"))]
impl std::fmt::Display for JoinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        #[cfg(feature = "runtime-async-std")]
        return write!(f, "JoinError");
        #[cfg(not(feature = "runtime-async-std"))]
        write!(f, "Please enable a runtime")
    }
}

#[cfg(not(feature = "runtime-tokio"))]
impl std::error::Error for JoinError {}
