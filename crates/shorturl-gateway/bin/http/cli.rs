use clap::{Parser, ValueEnum};
use shorturl_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

pub const HOST_ENV: &str = "SHORTURL_HOST";
pub const PORT_ENV: &str = "PORT";
pub const STORAGE_BACKEND_ENV: &str = "SHORTURL_STORAGE_BACKEND";
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const MIGRATE_ENV: &str = "SHORTURL_MIGRATE";
pub const LOG_FORMAT_ENV: &str = "SHORTURL_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_TRACES_ENDPOINT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "3333";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shorturl-gateway", about = "URL shortener HTTP gateway")]
pub struct Cli {
    #[arg(long, env = HOST_ENV, default_value = DEFAULT_HOST)]
    pub host: IpAddr,

    #[arg(long, env = PORT_ENV, default_value = DEFAULT_PORT)]
    pub port: u16,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATABASE_URL_ENV, required_if_eq("storage", "mysql"))]
    pub database_url: Option<String>,

    /// Create the `url_mappings` table on startup if it is missing.
    #[arg(long, env = MIGRATE_ENV)]
    pub migrate: bool,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}

/// Loads variables from an env file into the process environment.
///
/// Without a path, `.env` is looked up in the working directory and its
/// ancestors. A missing file is not an error; variables already set in the
/// environment win over the file.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, dotenvy::Error> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(error),
    }
}
