// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod error;
mod log;
mod request;
mod substrate;

pub use args::Args;
pub use error::ConfigError;
pub use log::LogConfig;
pub use request::RequestConfig;
pub use substrate::SubstrateConfig;

use serde::Deserialize;
use std::path::Path;

/// Raw environment variables as read by `envy`.
///
/// Every field maps to `SNA_<FIELD>`. Sections are assembled from it in
/// [`ClientConfig::from_env`].
#[derive(Debug, Deserialize)]
struct EnvVars {
    #[serde(default = "substrate::default_url")]
    substrate_url: String,

    #[serde(default = "request::default_timeout_secs")]
    request_timeout_secs: u64,

    #[serde(default = "request::default_timeout_secs")]
    request_connect_timeout_secs: u64,

    #[serde(default = "log::default_level")]
    log_level: String,

    #[serde(default)]
    log_json: bool,

    #[serde(default)]
    log_strip_ansi: bool,

    #[serde(default)]
    log_write: bool,

    #[serde(default = "log::default_write_path")]
    log_write_path: String,

    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,

    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub substrate: SubstrateConfig,
    pub request: RequestConfig,
    pub log: LogConfig,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars = envy::prefixed("SNA_").from_env::<EnvVars>()?;
        let config = Self::from(vars);
        config.validate()?;
        Ok(config)
    }

    /// Load variables from a `.env` style file, then read the environment.
    ///
    /// A missing file is not an error; variables already present in the
    /// process environment take precedence over the file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            dotenv::from_path(path).map_err(|e| ConfigError::EnvFileError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }
        Self::from_env()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.substrate.validate()?;
        self.request.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl From<EnvVars> for ClientConfig {
    fn from(vars: EnvVars) -> Self {
        Self {
            substrate: SubstrateConfig {
                url: vars.substrate_url,
            },
            request: RequestConfig {
                timeout_secs: vars.request_timeout_secs,
                connect_timeout_secs: vars.request_connect_timeout_secs,
            },
            log: LogConfig {
                level: vars.log_level,
                json: vars.log_json,
                strip_ansi: vars.log_strip_ansi,
                write: vars.log_write,
                write_path: vars.log_write_path,
                write_max_file_size: vars.log_write_max_file_size,
                write_max_files: vars.log_write_max_files,
            },
        }
    }
}
