use thiserror::Error;
use tokio_tungstenite::tungstenite;

pub type Result<T> = std::result::Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("Handshake rejected with HTTP status {status}")]
    HandshakeRejected { status: u16 },

    #[error("Connection closed before a response was received")]
    ConnectionClosed,

    #[error("Unexpected frame: {0}")]
    UnexpectedFrame(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Missing field in response: {field}")]
    MissingField { field: String },

    #[error("Invalid field in response: {field} (expected {expected})")]
    InvalidField { field: String, expected: &'static str },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        ProbeError::Config(msg.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        ProbeError::MissingField {
            field: field.into(),
        }
    }

    pub fn from_handshake(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::Http(response) => ProbeError::HandshakeRejected {
                status: response.status().as_u16(),
            },
            other => ProbeError::WebSocket(other),
        }
    }
}
