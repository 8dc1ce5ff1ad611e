use mcp_probe::report::{extract_tools, write_request, write_response};
use mcp_probe::mcp::Tool;
use mcp_probe::ProbeError;
use serde_json::{json, Value};

#[test]
fn tools_listing_is_printed() {
    let raw = r#"{"result":{"tools":[{"name":"a","description":"b"}]}}"#;
    let (output, result) = render(raw);
    result.unwrap();
    assert!(output.contains(&format!("Response: {}", raw)));
    assert!(output.contains("Parsed response:"));
    assert!(output.contains("Found 1 tools"));
    assert!(output.contains("\n  - a: b\n"));
}

#[test]
fn reply_without_tools_still_prints_both_forms() {
    let raw = r#"{"jsonrpc":"2.0","id":1,"result":{"ok":true}}"#;
    let (output, result) = render(raw);
    let (value, tools) = result.unwrap();
    assert_eq!(value["result"]["ok"], true);
    assert!(tools.is_none());
    assert!(output.contains(&format!("Response: {}", raw)));
    assert!(output.contains("  \"result\": {\n    \"ok\": true\n  }"));
    assert!(!output.contains("Found"));
}

#[test]
fn non_json_reply_is_a_parse_error_after_raw_output() {
    let (output, result) = render("not json at all");
    assert!(matches!(result, Err(ProbeError::Parse(_))));
    assert!(output.contains("Response: not json at all"));
    assert!(!output.contains("Parsed response:"));
}

#[test]
fn tool_without_description_is_missing_field() {
    let (_, result) = render(r#"{"result":{"tools":[{"name":"a"}]}}"#);
    match result {
        Err(ProbeError::MissingField { field }) => {
            assert_eq!(field, "result.tools[0].description")
        }
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn null_description_is_printed_as_json() {
    let (output, result) = render(r#"{"result":{"tools":[{"name":"a","description":null}]}}"#);
    let (_, tools) = result.unwrap();
    assert_eq!(tools.unwrap()[0].description, "null");
    assert!(output.contains("\n  - a: null\n"));
}

#[test]
fn non_string_name_is_printed_as_json() {
    let (output, result) = render(r#"{"result":{"tools":[{"name":42,"description":"answer"}]}}"#);
    result.unwrap();
    assert!(output.contains("  - 42: answer"));
}

#[test]
fn pretty_output_keeps_server_key_order() {
    let raw = r#"{"jsonrpc":"2.0","id":1,"result":{"tools":[{"name":"a","description":"b","inputSchema":{}}]}}"#;
    let (output, result) = render(raw);
    result.unwrap();
    let pretty = output
        .split("Parsed response:\n")
        .nth(1)
        .expect("pretty block");
    let jsonrpc = pretty.find("\"jsonrpc\"").unwrap();
    let id = pretty.find("\"id\"").unwrap();
    assert!(jsonrpc < id);
    let name = pretty.find("\"name\"").unwrap();
    let description = pretty.find("\"description\"").unwrap();
    let schema = pretty.find("\"inputSchema\"").unwrap();
    assert!(name < description && description < schema);
}

#[test]
fn tools_that_are_not_an_array_are_rejected() {
    let err = extract_tools(&json!({"result": {"tools": {"name": "a"}}})).unwrap_err();
    assert!(matches!(err, ProbeError::InvalidField { .. }));
}

#[test]
fn empty_tools_listing() {
    let (output, result) = render(r#"{"result":{"tools":[]}}"#);
    result.unwrap();
    assert!(output.contains("Found 0 tools:"));
}

#[test]
fn server_error_is_reported() {
    let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found: nope"}}"#;
    let (output, result) = render(raw);
    result.unwrap();
    assert!(output.contains("Server error -32601: Method not found: nope"));
}

#[test]
fn request_line() {
    let mut out = Vec::new();
    write_request(&mut out, r#"{"id":1}"#).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Sending request: {\"id\":1}\n");
}

fn render(raw: &str) -> (String, mcp_probe::Result<(Value, Option<Vec<Tool>>)>) {
    let mut out = Vec::new();
    let result = write_response(&mut out, raw);
    (String::from_utf8(out).unwrap(), result)
}
