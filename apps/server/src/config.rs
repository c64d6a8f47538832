use anyhow::Context;
use std::{net::SocketAddr, path::PathBuf, time::Duration};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub upload_dir: PathBuf,
    pub cors_allow: Vec<String>,
    /// Shared household PIN; `None` leaves mutating routes open.
    pub auth_pin: Option<String>,
    pub pin_header: String,
    pub pin_header_aliases: Vec<String>,
    pub owners: Vec<String>,
    pub default_currency: String,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = var("HOST", "0.0.0.0");
        let port = var("PORT", "4000");
        let listen_addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid HOST/PORT: {}:{}", host, port))?;

        let max_body_bytes: usize = var("MAX_BODY_BYTES", "10485760")
            .parse()
            .context("MAX_BODY_BYTES must be a positive integer")?;
        let timeout_ms: u64 = var("REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("REQUEST_TIMEOUT_MS must be a positive integer")?;

        let auth_pin = lookup("AUTH_PIN").filter(|pin| !pin.trim().is_empty());

        Ok(Self {
            listen_addr,
            db_path: var("DB_PATH", "./data/db.sqlite"),
            upload_dir: PathBuf::from(var("UPLOAD_DIR", "./data/uploads")),
            cors_allow: split_list(&var("CORS_ORIGIN", "*")),
            auth_pin,
            pin_header: var("PIN_HEADER", "x-auth-pin").to_ascii_lowercase(),
            pin_header_aliases: split_list(&var("PIN_HEADER_ALIASES", "x-pin"))
                .into_iter()
                .map(|h| h.to_ascii_lowercase())
                .collect(),
            owners: split_list(&var("OWNERS", "Munhu,Nomuna")),
            default_currency: var("DEFAULT_CURRENCY", "MNT"),
            max_body_bytes,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
