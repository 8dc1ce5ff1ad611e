use crate::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_URL: &str = "ws://127.0.0.1:8000/mcp";
pub const DEFAULT_METHOD: &str = "tools/list";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    // Absent until BEARER_TOKEN (or the config file) provides it
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub id: i64,
    pub method: String,
    pub params: Value,
}

fn empty_params() -> Value {
    Value::Object(Map::new())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            id: 1,
            method: DEFAULT_METHOD.to_string(),
            params: empty_params(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ProbeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("MCP_PROBE_CONFIG") {
            Some(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };

        if let Some(url) = lookup("MCP_PROBE_URL") {
            if !url.trim().is_empty() {
                config.server.url = url.trim().to_string();
            }
        }

        if let Some(token) = lookup("BEARER_TOKEN") {
            config.auth.token = Some(token);
        }

        if let Some(method) = lookup("MCP_PROBE_METHOD") {
            if !method.trim().is_empty() {
                config.request.method = method.trim().to_string();
            }
        }

        if let Some(id) = lookup("MCP_PROBE_ID").filter(|id| !id.trim().is_empty()) {
            config.request.id = id
                .trim()
                .parse()
                .map_err(|_| ProbeError::config_error("Invalid MCP_PROBE_ID"))?;
        }

        if let Some(params) = lookup("MCP_PROBE_PARAMS").filter(|p| !p.trim().is_empty()) {
            config.request.params = serde_json::from_str(&params).map_err(|e| {
                ProbeError::config_error(format!("Invalid MCP_PROBE_PARAMS: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProbeError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: ProbeConfig = toml::from_str(&content)
            .map_err(|e| ProbeError::config_error(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.server.url).map_err(|e| {
            ProbeError::config_error(format!("Invalid URL {}: {}", self.server.url, e))
        })?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ProbeError::config_error(format!(
                "Unsupported URL scheme: {} (expected ws or wss)",
                url.scheme()
            )));
        }

        match self.auth.token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => {
                return Err(ProbeError::config_error(
                    "BEARER_TOKEN is not set; refusing to send an empty Authorization header",
                ))
            }
        }

        if self.request.method.is_empty() {
            return Err(ProbeError::config_error("Request method must not be empty"));
        }

        if !self.request.params.is_object() {
            return Err(ProbeError::config_error("Request params must be a JSON object"));
        }

        Ok(())
    }

    // Empty only if validate was skipped
    pub fn token(&self) -> &str {
        self.auth.token.as_deref().unwrap_or_default()
    }
}
