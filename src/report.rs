use crate::error::{ProbeError, Result};
use crate::mcp::{McpError, McpResponse, Tool};
use serde_json::Value;
use std::io::Write;

pub fn write_request<W: Write>(out: &mut W, payload: &str) -> Result<()> {
    writeln!(out, "Sending request: {}", payload)?;
    Ok(())
}

pub fn write_response<W: Write>(out: &mut W, raw: &str) -> Result<(Value, Option<Vec<Tool>>)> {
    // Raw text goes out first so a malformed reply is still visible
    writeln!(out, "Response: {}", raw)?;

    let response: Value = serde_json::from_str(raw)?;
    writeln!(out)?;
    writeln!(out, "Parsed response:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;

    let tools = extract_tools(&response)?;
    if let Some(tools) = &tools {
        write_tools(out, tools)?;
    }

    if let Some(error) = server_error(&response) {
        writeln!(out)?;
        writeln!(out, "✗ Server error {}: {}", error.code, error.message)?;
    }

    Ok((response, tools))
}

pub fn write_tools<W: Write>(out: &mut W, tools: &[Tool]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "✓ Found {} tools:", tools.len())?;
    for tool in tools {
        writeln!(out, "  - {}: {}", tool.name, tool.description)?;
    }
    Ok(())
}

pub fn extract_tools(response: &Value) -> Result<Option<Vec<Tool>>> {
    let tools = match response.get("result").and_then(|r| r.get("tools")) {
        Some(tools) => tools,
        None => return Ok(None),
    };

    let entries = tools.as_array().ok_or_else(|| ProbeError::InvalidField {
        field: "result.tools".to_string(),
        expected: "array",
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<Tool> {
            Ok(Tool {
                name: display_field(entry, index, "name")?,
                description: display_field(entry, index, "description")?,
            })
        })
        .collect::<Result<Vec<Tool>>>()
        .map(Some)
}

// Only an absent key is an error; non-string values print as JSON
fn display_field(entry: &Value, index: usize, key: &str) -> Result<String> {
    match entry.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(ProbeError::missing_field(format!(
            "result.tools[{}].{}",
            index, key
        ))),
    }
}

fn server_error(response: &Value) -> Option<McpError> {
    serde_json::from_value::<McpResponse>(response.clone())
        .ok()
        .and_then(|r| r.error)
}
