use crate::ConfigError;
use url::Url;

#[derive(Debug, Clone)]
pub struct SubstrateConfig {
    /// Node RPC endpoint
    ///
    /// Env: SNA_SUBSTRATE_URL
    /// Schemes: ws, wss, http, https. The unencrypted ones are accepted for
    /// local nodes and opened with an insecure transport.
    /// Default: ws://127.0.0.1:9944
    pub url: String,
}

pub(crate) fn default_url() -> String {
    "ws://127.0.0.1:9944".to_string()
}

fn endpoint(raw: &str) -> Result<(Url, bool), ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::ValidateError("SNA_SUBSTRATE_URL is empty".to_string()));
    }

    let parsed = Url::parse(raw)
        .map_err(|e| ConfigError::ValidateError(format!("Invalid URL '{}': {}", raw, e)))?;

    let secure = match parsed.scheme() {
        "wss" | "https" => true,
        "ws" | "http" => false,
        other => {
            return Err(ConfigError::ValidateError(format!(
                "Unsupported scheme '{}' in '{}'; expected ws, wss, http or https",
                other, raw
            )));
        }
    };
    Ok((parsed, secure))
}

impl SubstrateConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        endpoint(&self.url).map(|_| ())
    }

    /// True for `ws://` and `http://` endpoints (and for URLs that do not parse).
    pub fn is_insecure(&self) -> bool {
        !matches!(endpoint(&self.url), Ok((_, true)))
    }
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}
