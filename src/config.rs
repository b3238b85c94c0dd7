use std::env;
use std::net::SocketAddr;
use anyhow::{Context, Result};

/// Which storage backend the server runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL for records, Redis for sessions.
    Postgres,
    /// Process-local stores. Nothing survives a restart.
    Memory,
}

/// Output format of the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: Option<String>,
    /// The URL of the Redis server.
    pub redis_url: String,
    /// Where records and sessions are kept.
    pub storage_backend: StorageBackend,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Whether the server runs in production (secure cookies).
    pub production: bool,
    /// Base URL used when building tracking pixel links.
    pub public_base_url: String,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            storage_backend: StorageBackend::Memory,
            session_duration_days: 7,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            production: false,
            public_base_url: "http://localhost:3000".to_string(),
            cors_origins: default_cors_origins(),
            log_format: LogFormat::Pretty,
        }
    }
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
        "http://[::1]:3000".to_string(),
    ]
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => anyhow::bail!("Unknown STORAGE_BACKEND: {}", other),
        };

        let database_url = env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set when STORAGE_BACKEND=postgres");
        }

        let session_duration_days: i64 = env::var("SESSION_DURATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .context("Invalid SESSION_DURATION_DAYS")?;
        if session_duration_days <= 0 {
            anyhow::bail!("SESSION_DURATION_DAYS must be positive");
        }

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => default_cors_origins(),
        };

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            database_url,
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            storage_backend,
            session_duration_days,
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
                .parse()
                .context("Invalid BIND_ADDR")?,
            production: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string())
                == "production",
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            cors_origins,
            log_format,
        })
    }

    /// Session lifetime in seconds.
    pub fn session_ttl_secs(&self) -> u64 {
        (self.session_duration_days * 86400) as u64
    }
}
