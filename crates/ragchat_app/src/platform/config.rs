use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ragchat_engine::{ServiceError, ServiceSettings, DEFAULT_SERVER_URL};
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "ragchat.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ClientConfig {
    pub server_url: String,
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: None,
            log_file: PathBuf::from("ragchat.log"),
        }
    }
}

impl ClientConfig {
    pub(crate) fn service_settings(&self) -> Result<ServiceSettings, ServiceError> {
        let mut settings = ServiceSettings::new(&self.server_url)?;
        settings.request_timeout = self.request_timeout_secs.map(Duration::from_secs);
        Ok(settings)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads the optional config file. A missing file is not an error.
pub(crate) fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ClientConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(
            config.service_settings().unwrap(),
            ServiceSettings::default()
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(server_url: "http://qa.internal:9000/api", request_timeout_secs: Some(30))"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.server_url, "http://qa.internal:9000/api");
        assert_eq!(config.log_file, PathBuf::from("ragchat.log"));

        let settings = config.service_settings().unwrap();
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(
            settings.endpoint("ask").unwrap().as_str(),
            "http://qa.internal:9000/api/ask"
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "(server_url: ").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let config = ClientConfig {
            server_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.service_settings().is_err());
    }
}
