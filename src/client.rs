use crate::auth::BearerAuth;
use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::mcp::{McpRequest, Tool};
use crate::report;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::io::Write;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug)]
pub struct ProbeOutcome {
    pub raw: String,
    pub response: Value,
    pub tools: Option<Vec<Tool>>,
}

pub struct ProbeClient {
    config: ProbeConfig,
    auth: BearerAuth,
    auth_header: HeaderValue,
}

impl ProbeClient {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        config.validate()?;
        let auth = BearerAuth::new(config.token())?;
        let auth_header = HeaderValue::from_str(&auth.header_value()).map_err(|_| {
            ProbeError::config_error("Bearer token contains characters not allowed in a header")
        })?;
        Ok(Self {
            config,
            auth,
            auth_header,
        })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn request(&self) -> McpRequest {
        McpRequest::new(
            self.config.request.id,
            self.config.request.method.clone(),
            self.config.request.params.clone(),
        )
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ProbeOutcome> {
        let payload = serde_json::to_string(&self.request())?;
        report::write_request(out, &payload)?;

        let raw = self.exchange(payload).await?;
        let (response, tools) = report::write_response(out, &raw)?;

        Ok(ProbeOutcome {
            raw,
            response,
            tools,
        })
    }

    // Closes the connection on every path once it is established
    pub async fn exchange(&self, payload: String) -> Result<String> {
        let mut stream = self.connect().await?;
        let reply = send_and_receive(&mut stream, payload).await;

        if let Err(e) = stream.close(None).await {
            tracing::debug!("WebSocket close did not complete cleanly: {}", e);
        }
        tracing::info!("Disconnected from {}", self.config.server.url);

        reply
    }

    async fn connect(&self) -> Result<WsStream> {
        let url = &self.config.server.url;
        let mut request = url.as_str().into_client_request()?;
        request.headers_mut().insert(
            HeaderName::from_static(self.auth.header_name()),
            self.auth_header.clone(),
        );

        tracing::info!("Connecting to {}", url);
        let (stream, response) = connect_async(request)
            .await
            .map_err(ProbeError::from_handshake)?;
        tracing::info!("Connected to {} (HTTP {})", url, response.status());

        Ok(stream)
    }
}

async fn send_and_receive(stream: &mut WsStream, payload: String) -> Result<String> {
    tracing::debug!("Sending: {}", payload);
    stream.send(Message::Text(payload.into())).await?;

    let reply = receive_text(stream).await?;
    tracing::debug!("Received: {}", reply);
    Ok(reply)
}

// Control frames are skipped; pongs to server pings are queued by tungstenite
async fn receive_text(stream: &mut WsStream) -> Result<String> {
    while let Some(message) = stream.next().await {
        match message? {
            Message::Text(text) => return Ok(text.to_string()),
            Message::Binary(data) => {
                return Err(ProbeError::UnexpectedFrame(format!(
                    "binary frame of {} bytes",
                    data.len()
                )))
            }
            Message::Close(frame) => {
                tracing::warn!("Server closed the connection: {:?}", frame);
                return Err(ProbeError::ConnectionClosed);
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
        }
    }
    Err(ProbeError::ConnectionClosed)
}
