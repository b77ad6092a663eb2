//! Termination signals

use std::future::Future;
use std::io;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

/// Resolves on the first SIGINT or SIGTERM.
///
/// Handlers are installed when this is called, not when the future is first
/// polled, so a signal that arrives during startup is not lost.
pub fn shutdown_signal() -> io::Result<impl Future<Output = ()> + Send + 'static> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("SIGTERM received"),
            _ = sigint.recv() => info!("SIGINT received"),
        }
    })
}
