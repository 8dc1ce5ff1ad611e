pub mod dto;

pub use dto::{McpError, McpRequest, McpResponse, Tool, JSONRPC_VERSION};
