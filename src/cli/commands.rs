//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::note::{NoteStore, DEFAULT_DATA_FILE};
use crate::observability::{log_event, log_event_with_fields, Event};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Configuration file structure
///
/// Every field is optional; an absent config file means all defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Data file, relative paths resolve against the working directory
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(flatten)]
    pub http: HttpServerConfig,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("addr", config.http.socket_addr().as_str()),
                ("data_file", config.data_file.display().to_string().as_str()),
            ],
        );
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(())
    }

    /// Data file resolved against the current working directory
    pub fn data_path(&self) -> CliResult<PathBuf> {
        if self.data_file.is_absolute() {
            return Ok(self.data_file.clone());
        }
        let cwd = std::env::current_dir()
            .map_err(|e| CliError::io_error(format!("Failed to read working directory: {}", e)))?;
        Ok(cwd.join(&self.data_file))
    }
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(config.as_deref()),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Create the data file as `{}`.
///
/// The server never creates it on its own, so this must run once before
/// the first write.
pub fn init(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let data_path = config.data_path()?;

    if !NoteStore::create_data_file(&data_path)? {
        return Err(CliError::already_initialized(&data_path));
    }

    Ok(())
}

/// Build the store and serve HTTP until ctrl-c
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    config.validate()?;

    let store = NoteStore::new(config.data_path()?);
    let server = HttpServer::new(config.http, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("note/db/notes.json"));
        assert_eq!(config.http.port, 4000);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notedb.json");
        fs::write(&path, r#"{"data_file": "/var/lib/notes.json", "port": 8081}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/notes.json"));
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.data_path().unwrap(), PathBuf::from("/var/lib/notes.json"));
    }

    #[test]
    fn test_load_rejects_zero_port() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notedb.json");
        fs::write(&path, r#"{"port": 0}"#).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.message().contains("port"));
    }

    #[test]
    fn test_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_init_creates_then_refuses() {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("db/notes.json");
        let config_path = dir.path().join("notedb.json");
        fs::write(
            &config_path,
            serde_json::json!({ "data_file": data_file }).to_string(),
        )
        .unwrap();

        init(Some(&config_path)).unwrap();
        assert_eq!(fs::read_to_string(&data_file).unwrap(), "{}");

        let err = init(Some(&config_path)).unwrap_err();
        assert_eq!(err.code(), &crate::cli::CliErrorCode::AlreadyInitialized);
    }
}
