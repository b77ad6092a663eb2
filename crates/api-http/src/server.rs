//! Report Server
//!
//! HTTP over a Unix domain socket. The socket lives in its own directory so
//! the directory mode (0700) controls who may connect.

use crate::handler::{handle_report, ReportHandler};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::UnixListener;
use tracing::{info, warn};

/// Where the host looks for plugin sockets
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/scope/plugins/iops/iops.sock";

pub const REPORT_PATH: &str = "/report";

const SOCKET_DIR_MODE: u32 = 0o700;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("socket path {0:?} must live in a dedicated directory")]
    NoSocketDir(PathBuf),

    #[error("failed to create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to listen on {path:?}: {source}")]
    Bind { path: PathBuf, source: io::Error },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Server Configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub socket_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
        }
    }
}

/// Report Server
pub struct ReportServer {
    config: ServerConfig,
    handler: Arc<ReportHandler>,
}

impl ReportServer {
    pub fn new(config: ServerConfig, handler: Arc<ReportHandler>) -> Self {
        Self { config, handler }
    }

    pub fn router(&self) -> Router {
        router(self.handler.clone())
    }

    /// Recreate the socket directory and bind the listener
    pub fn bind(&self) -> Result<UnixListener, ServerError> {
        let path = &self.config.socket_path;
        prepare_socket_dir(path)?;

        let listener = UnixListener::bind(path).map_err(|source| ServerError::Bind {
            path: path.clone(),
            source,
        })?;

        info!("Listening on: unix://{}", path.display());
        Ok(listener)
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: UnixListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServerError::Serve)
    }

    /// Bind, serve until `shutdown` resolves, then remove the socket directory
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = match self.bind() {
            Ok(listener) => listener,
            Err(e @ ServerError::Bind { .. }) => {
                cleanup(&self.config.socket_path);
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        let result = self.serve(listener, shutdown).await;
        cleanup(&self.config.socket_path);
        result
    }
}

/// Routes served to the host
pub fn router(handler: Arc<ReportHandler>) -> Router {
    Router::new()
        .route(REPORT_PATH, get(handle_report))
        .with_state(handler)
}

/// Directory owned by the socket; refuses the filesystem root
pub fn socket_dir(socket_path: &Path) -> Result<&Path, ServerError> {
    match socket_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && dir != Path::new("/") => Ok(dir),
        _ => Err(ServerError::NoSocketDir(socket_path.to_path_buf())),
    }
}

/// Remove any previous socket directory and recreate it with mode 0700
pub fn prepare_socket_dir(socket_path: &Path) -> Result<(), ServerError> {
    let dir = socket_dir(socket_path)?;
    remove_dir(dir);

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(SOCKET_DIR_MODE);
    }

    builder.create(dir).map_err(|source| ServerError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Remove the socket directory; errors are logged, not returned
pub fn cleanup(socket_path: &Path) {
    if let Ok(dir) = socket_dir(socket_path) {
        remove_dir(dir);
        info!(dir = %dir.display(), "Socket directory removed");
    }
}

fn remove_dir(dir: &Path) {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(dir = %dir.display(), error = %e, "Failed to remove socket directory"),
    }
}
