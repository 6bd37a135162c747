use crate::domain::time_format::TimestampFormat;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "config/fuel_log";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Directory holding uploaded datasets, created on first upload
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadSettings {
    pub max_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisSettings {
    pub timestamp_format: TimestampFormat,
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from(DEFAULT_CONFIG_FILE)
}

/// Defaults, then the optional config file, then `FUEL_LOG__SECTION__KEY`
/// variables, then `PORT`
pub fn load_app_config_from(file: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("storage.root", "uploads")?
        .set_default("upload.max_bytes", 10 * 1024 * 1024)?
        .set_default("analysis.timestamp_format", "iso8601")?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix("FUEL_LOG")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("server.port", std::env::var("PORT").ok())?
        .build()?;

    Ok(settings.try_deserialize()?)
}
