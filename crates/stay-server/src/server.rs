use tokio::net::TcpListener;

use stay_store::FileStore;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// Stay catalog API server.
pub struct ApiServer {
    config: ServerConfig,
}

impl ApiServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Construct the shared state: a store over the configured snapshot,
    /// warmed with one reload. A missing snapshot file leaves the table
    /// empty; a corrupt one fails startup.
    pub fn state(&self) -> ServerResult<AppState> {
        let mut store = FileStore::new(&self.config.snapshot_path);
        let loaded = store.reload()?;
        tracing::info!(records = loaded, "store warmed from snapshot");
        Ok(AppState::new(store))
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        Ok(build_router(self.state()?))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("stay API listening on {}", self.config.bind_addr);
        axum::serve(listener, app).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = ApiServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:5000".parse().unwrap()
        );
    }

    #[test]
    fn router_builds_over_missing_snapshot() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ServerConfig {
            snapshot_path: dir.path().join("absent.json"),
            ..ServerConfig::default()
        };
        let server = ApiServer::new(config);
        assert!(server.router().is_ok());
    }

    #[test]
    fn state_fails_on_corrupt_snapshot() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, "{broken").unwrap();
        let config = ServerConfig {
            snapshot_path: path,
            ..ServerConfig::default()
        };
        let server = ApiServer::new(config);
        assert!(server.state().is_err());
    }
}
