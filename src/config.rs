use std::env;

use anyhow::{Context, Result, bail};
use strum_macros::{Display, EnumString};

use crate::model::payslip::ConfiguredDeductions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    Mysql,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    /// Required for the mysql backend.
    pub database_url: Option<String>,
    pub api_prefix: String,
    pub log_dir: String,
    pub deductions: ConfiguredDeductions,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_backend = match var("STORE_BACKEND") {
            Some(raw) => raw
                .trim()
                .to_lowercase()
                .parse::<StoreBackend>()
                .with_context(|| format!("STORE_BACKEND `{raw}` must be mysql or memory"))?,
            None => StoreBackend::Mysql,
        };

        let database_url = var("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND is mysql");
        }

        let deductions = var("PAYSLIP_DEDUCTIONS")
            .unwrap_or_default()
            .parse::<ConfiguredDeductions>()
            .context("PAYSLIP_DEDUCTIONS is invalid")?;

        Ok(Self {
            server_addr: var("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            store_backend,
            database_url,
            api_prefix: var("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            log_dir: var("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            deductions,
        })
    }
}
