//! Optional RON configuration file, `./portfolio_chat.ron` by default.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use log::LevelFilter;
use portfolio_core::ChatOptions;
use portfolio_engine::{BackendEndpoint, BackendError, ChatSettings};
use serde::{Deserialize, Serialize};

use super::args::Args;

pub const CONFIG_FILENAME: &str = "portfolio_chat.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host name the chat pretends to be served from; picks the backend.
    pub host: String,
    /// Explicit backend base URL; wins over `host`.
    pub backend_url: Option<String>,
    pub use_rag: bool,
    pub model: Option<String>,
    pub top_k: Option<u32>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_to_terminal: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = ChatSettings::default();
        Self {
            host: "localhost".to_string(),
            backend_url: None,
            use_rag: true,
            model: None,
            top_k: None,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            log_to_terminal: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Command-line flags win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(url) = &args.backend {
            self.backend_url = Some(url.clone());
        }
        if args.no_rag {
            self.use_rag = false;
        }
        if let Some(model) = &args.model {
            self.model = Some(model.clone());
        }
        if let Some(top_k) = args.top_k {
            self.top_k = Some(top_k);
        }
    }

    pub fn endpoint(&self) -> Result<BackendEndpoint, BackendError> {
        match self.backend_url.as_deref() {
            Some(url) => BackendEndpoint::from_base(url),
            None => Ok(BackendEndpoint::for_host(&self.host)),
        }
    }

    pub fn settings(&self) -> ChatSettings {
        ChatSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn options(&self) -> ChatOptions {
        ChatOptions {
            use_rag: self.use_rag,
            model: self.model.clone(),
            top_k: self.top_k,
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Load the config file; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
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

/// Log where settings came from once the logger is up.
pub fn log_summary(path: &Path, config: &AppConfig) {
    if path.exists() {
        engine_info!("Loaded config from {:?}", path);
    } else {
        engine_info!("No config at {:?}, using defaults", path);
    }
    if let Some(url) = &config.backend_url {
        engine_warn!("backend_url {} overrides host {:?}", url, config.host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_engine::{LOCAL_BACKEND, REMOTE_BACKEND};
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.endpoint().unwrap().base(), LOCAL_BACKEND);
        assert_eq!(config.options(), ChatOptions::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(host: "jorgehewstone.dev", model: Some("llama3"), top_k: Some(4), connect_timeout_secs: 3)"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.endpoint().unwrap().base(), REMOTE_BACKEND);
        assert_eq!(config.settings().connect_timeout, Duration::from_secs(3));
        assert_eq!(
            config.options(),
            ChatOptions {
                use_rag: true,
                model: Some("llama3".to_string()),
                top_k: Some(4),
            }
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(host: ").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn flags_override_file() {
        let mut config = AppConfig {
            model: Some("file-model".to_string()),
            ..AppConfig::default()
        };
        let args = Args {
            host: Some("example.org".to_string()),
            backend: Some("http://10.1.2.3:8080/".to_string()),
            no_rag: true,
            model: Some("flag-model".to_string()),
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.endpoint().unwrap().base(), "http://10.1.2.3:8080");
        assert!(!config.use_rag);
        assert_eq!(config.model.as_deref(), Some("flag-model"));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level(), LevelFilter::Info);
        let config = AppConfig {
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.level(), LevelFilter::Debug);
    }
}
