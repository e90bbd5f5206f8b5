/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Directory uploaded media is written to
    #[serde(default = "default_media_path")]
    pub media_path: PathBuf,

    /// URL path the media directory is served under
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,

    /// Largest accepted upload request, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `config.toml` lookup. Environment
    /// variables use the `LUMEN_` prefix and `__` between nested keys,
    /// e.g. `LUMEN_SERVER__PORT=8080` or `LUMEN_STORAGE__MEDIA_PATH=/srv/media`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("LUMEN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("Port must be non-zero".to_string()));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set LUMEN_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        let prefix = &self.storage.public_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(ServerError::Config(format!(
                "Public prefix must look like \"/uploads\", got {:?}",
                prefix
            )));
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ServerError::Config(
                "max_upload_bytes must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        media_path: default_media_path(),
        public_prefix: default_public_prefix(),
        max_upload_bytes: default_max_upload_bytes(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/lumen.db".to_string()
}

fn default_media_path() -> PathBuf {
    PathBuf::from("./data/uploads")
}

fn default_public_prefix() -> String {
    "/uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.public_prefix, "/uploads");
    }

    #[test]
    fn rejects_bad_public_prefix() {
        let mut config = ServerConfig::default();
        config.storage.public_prefix = "uploads".to_string();
        assert!(config.validate().is_err());

        config.storage.public_prefix = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumen.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8181\n\n[storage]\nmedia_path = \"/srv/media\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8181);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.media_path, PathBuf::from("/srv/media"));
        assert_eq!(config.storage.database_url, "sqlite://./data/lumen.db");
    }
}
