use crate::utils::constants::{
    ALLOWED_ORIGINS_ENV, BACKEND_TIMEOUT_ENV, BASE_URL_ENV, DEFAULT_BACKEND_TIMEOUT_SECS,
    DEFAULT_BASE_URL, DEFAULT_PORT, PORT_ENV,
};
use crate::utils::get_env::{env_var_to_vec, get_env_var_or, parse_env_var_or};
use crate::utils::urls::normalize_base_url;
use anyhow::Error;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Origin of the processing backend, without a trailing slash.
    pub base_url: String,
    pub port: u16,
    pub backend_timeout: Duration,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    // Initialize config from environment variables
    pub fn from_env() -> Result<Self, Error> {
        let base_url = normalize_base_url(&get_env_var_or(BASE_URL_ENV, DEFAULT_BASE_URL))?;
        let port = parse_env_var_or(PORT_ENV, DEFAULT_PORT)?;
        let timeout_secs = parse_env_var_or(BACKEND_TIMEOUT_ENV, DEFAULT_BACKEND_TIMEOUT_SECS)?;

        Ok(Self {
            base_url,
            port,
            backend_timeout: Duration::from_secs(timeout_secs),
            allowed_origins: env_var_to_vec(ALLOWED_ORIGINS_ENV),
        })
    }
}
