use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use models::IdPolicy;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default)]
    pub id_policy: IdPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file(), id_policy: IdPolicy::default() }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of compact text.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    9090
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data.json")
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (default `config.toml`) when it exists, otherwise
    /// build the config from environment variables; then validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path).with_context(|| format!("invalid config file {path}"))?
        } else {
            Self::from_env()?
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `DATA_FILE`,
    /// `ID_POLICY` and `LOG_FORMAT`, each falling back to its default.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            cfg.server.port = port.parse().map_err(|_| anyhow!("SERVER_PORT is not a port: {port}"))?;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(file) = std::env::var("DATA_FILE") {
            cfg.storage.data_file = PathBuf::from(file);
        }
        if let Ok(policy) = std::env::var("ID_POLICY") {
            cfg.storage.id_policy = policy.parse().map_err(|e| anyhow!("ID_POLICY: {e}"))?;
        }
        cfg.logging.json = std::env::var("LOG_FORMAT").map(|f| f.eq_ignore_ascii_case("json")).unwrap_or(false);
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = parse("").expect("parse");
        cfg.normalize_and_validate().expect("valid");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.data_file, PathBuf::from("data.json"));
        assert_eq!(cfg.storage.id_policy, IdPolicy::SequenceLength);
        assert!(!cfg.logging.json);
    }

    #[test]
    fn full_file_parses() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8000
            worker_threads = 2

            [storage]
            data_file = "var/inventory.json"
            id_policy = "max_plus_one"

            [logging]
            json = true
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.server.bind_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert_eq!(cfg.storage.id_policy, IdPolicy::MaxPlusOne);
        assert_eq!(cfg.storage.data_file, PathBuf::from("var/inventory.json"));
        assert!(cfg.logging.json);
    }

    #[test]
    fn load_from_file_reads_toml_and_reports_missing_file() {
        let path = std::env::temp_dir().join(format!("configs_{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nport = 7000\n").expect("write");
        let cfg = load_from_file(path.to_str().expect("utf-8 path")).expect("load");
        assert_eq!(cfg.server.port, 7000);
        assert_eq!(cfg.storage, StorageConfig::default());
        let _ = std::fs::remove_file(&path);

        assert!(load_from_file(path.to_str().expect("utf-8 path")).is_err());
    }

    #[test]
    fn unknown_policy_and_zero_port_rejected() {
        assert!(parse("[storage]\nid_policy = \"counter\"").is_err());
        let mut cfg = parse("[server]\nport = 0").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());
        let mut cfg = parse("[storage]\ndata_file = \"\"").expect("parse");
        assert!(cfg.normalize_and_validate().is_err());
    }
}
