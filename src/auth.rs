use crate::error::{ProbeError, Result};
use std::fmt;

pub const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ProbeError::config_error("Bearer token must not be empty"));
        }
        Ok(Self {
            token: token.to_string(),
        })
    }

    pub fn header_name(&self) -> &'static str {
        AUTHORIZATION_HEADER
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Never print the secret, even at debug level
impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"<redacted>")
            .finish()
    }
}
