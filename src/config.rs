use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub foods_csv: PathBuf,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Reads settings from the environment. The reference table path may also
    /// be passed as the first command-line argument, which wins over `FOODS_CSV`.
    pub fn from_env() -> anyhow::Result<Self> {
        let foods_csv = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("FOODS_CSV").ok())
            .context("no reference table selected: pass a CSV path or set FOODS_CSV")?;

        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().with_context(|| format!("APP_PORT={v}"))?,
            Err(_) => 8088,
        };

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port,
            foods_csv: PathBuf::from(foods_csv),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            max_upload_bytes: std::env::var("MAX_UPLOAD_MB")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(20)
                * 1024
                * 1024,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
