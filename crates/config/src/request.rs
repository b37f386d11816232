use crate::ConfigError;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Upper bound for a single RPC round trip, in seconds
    ///
    /// Env: SNA_REQUEST_TIMEOUT_SECS
    /// Default: 30
    pub timeout_secs: u64,

    /// Upper bound for establishing the connection and fetching metadata, in seconds
    ///
    /// Env: SNA_REQUEST_CONNECT_TIMEOUT_SECS
    /// Default: 30
    pub connect_timeout_secs: u64,
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

impl RequestConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidateError(
                "Request timeout cannot be 0".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::ValidateError(
                "Connect timeout cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
        }
    }
}
