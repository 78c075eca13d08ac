use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration: where to listen and which snapshot file backs the
/// store. Fields omitted from a config file keep their defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub snapshot_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".parse().expect("valid default addr"),
            snapshot_path: PathBuf::from("file.json"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.snapshot_path, PathBuf::from("file.json"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c: ServerConfig = toml::from_str(r#"bind_addr = "0.0.0.0:8080""#).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.snapshot_path, PathBuf::from("file.json"));
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stay.toml");
        std::fs::write(
            &path,
            "bind_addr = \"127.0.0.1:9090\"\nsnapshot_path = \"/tmp/snap.json\"\n",
        )
        .unwrap();

        let c = ServerConfig::from_file(&path).unwrap();
        assert_eq!(c.bind_addr, "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
        assert_eq!(c.snapshot_path, PathBuf::from("/tmp/snap.json"));
    }

    #[test]
    fn from_file_rejects_invalid_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stay.toml");
        std::fs::write(&path, "bind_addr = [").unwrap();
        assert!(matches!(
            ServerConfig::from_file(&path),
            Err(ServerError::Config(_))
        ));
    }
}
