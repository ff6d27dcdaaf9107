//! Tests for MCP protocol JSON-RPC handling.
//!
//! These tests verify the server correctly handles MCP messages, both
//! directly and through the stdio loop.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crossref_mcp::client::CrossrefClient;
use crossref_mcp::config::Config;
use crossref_mcp::server::protocol::JsonRpcRequest;
use crossref_mcp::server::{McpServer, stdio};

fn create_server(base_url: &str) -> McpServer {
    let client = CrossrefClient::new(Config::for_testing(base_url)).unwrap();
    McpServer::new(client)
}

fn request(value: Value) -> JsonRpcRequest {
    serde_json::from_value(value).unwrap()
}

async fn call(server: &McpServer, value: Value) -> Value {
    let response = server.handle_request(&request(value)).await.expect("response");
    serde_json::to_value(response).unwrap()
}

/// Run the stdio loop over `input`, returning one parsed value per output line.
async fn serve_lines(server: &McpServer, input: &str) -> Vec<Value> {
    let mut output = Vec::new();
    stdio::serve(server, input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_initialize() {
    let server = create_server("http://127.0.0.1:1");
    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {"protocolVersion": "2025-03-26", "capabilities": {}}
        }),
    )
    .await;

    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(response["result"]["serverInfo"]["name"], "crossref-mcp");
    assert!(response["result"]["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_initialize_default_version() {
    let server = create_server("http://127.0.0.1:1");
    let response =
        call(&server, json!({"jsonrpc": "2.0", "id": "a", "method": "initialize"})).await;

    assert_eq!(response["id"], "a");
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_ping() {
    let server = create_server("http://127.0.0.1:1");
    let response = call(&server, json!({"jsonrpc": "2.0", "id": 9, "method": "ping"})).await;
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn test_notification_gets_no_response() {
    let server = create_server("http://127.0.0.1:1");
    let req = request(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}));
    assert!(server.handle_request(&req).await.is_none());
}

#[tokio::test]
async fn test_unknown_method() {
    let server = create_server("http://127.0.0.1:1");
    let response =
        call(&server, json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"})).await;

    assert_eq!(response["error"]["code"], -32601);
    assert!(response.get("result").is_none());
}

// =============================================================================
// tools/list
// =============================================================================

#[tokio::test]
async fn test_tools_list() {
    let server = create_server("http://127.0.0.1:1");
    let response = call(&server, json!({"jsonrpc": "2.0", "id": 3, "method": "tools/list"})).await;

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["searchByTitle", "searchByAuthor", "getWorkByDOI"]);

    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(!tool["description"].as_str().unwrap().is_empty());
    }

    assert_eq!(tools[0]["inputSchema"]["required"], json!(["title"]));
    assert_eq!(tools[0]["inputSchema"]["properties"]["rows"]["default"], 5);
    assert_eq!(tools[2]["inputSchema"]["required"], json!(["doi"]));
}

// =============================================================================
// tools/call
// =============================================================================

#[tokio::test]
async fn test_tools_call_wraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/10.1038/454554f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": null})))
        .mount(&mock_server)
        .await;

    let server = create_server(&mock_server.uri());
    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "getWorkByDOI", "arguments": {"doi": "10.1038/454554f"}}
        }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["content"][0]["type"], "text");

    let text: Value =
        serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(text, result["structuredContent"]);
    assert_eq!(text["status"], "not_found");
    assert_eq!(text["message"], "No work found with DOI: 10.1038/454554f");
}

#[tokio::test]
async fn test_tools_call_upstream_failure_is_not_rpc_error() {
    let server = create_server("http://127.0.0.1:1");
    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 5,
            "method": "tools/call",
            "params": {"name": "searchByAuthor", "arguments": {"author": "Loss"}}
        }),
    )
    .await;

    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["structuredContent"]["status"], "error");
}

#[tokio::test]
async fn test_tools_call_unknown_tool() {
    let server = create_server("http://127.0.0.1:1");
    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 6,
            "method": "tools/call",
            "params": {"name": "searchByYear", "arguments": {}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    assert!(response["error"]["message"].as_str().unwrap().contains("searchByYear"));
}

#[tokio::test]
async fn test_tools_call_missing_name() {
    let server = create_server("http://127.0.0.1:1");
    let response =
        call(&server, json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": {}}))
            .await;

    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn test_tools_call_invalid_arguments() {
    let server = create_server("http://127.0.0.1:1");
    let response = call(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 8,
            "method": "tools/call",
            "params": {"name": "searchByTitle", "arguments": {"title": "x", "rows": "many"}}
        }),
    )
    .await;

    assert_eq!(response["error"]["code"], -32602);
    let message = response["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Tool error: Invalid arguments"));
}

#[tokio::test]
async fn test_handle_message_parse_error() {
    let server = create_server("http://127.0.0.1:1");
    let response = server.handle_message(b"[1, 2").await.expect("response");
    let value = serde_json::to_value(response).unwrap();

    assert_eq!(value["error"]["code"], -32700);
    assert!(value["error"]["message"].as_str().unwrap().starts_with("Parse error"));
    assert!(value["id"].is_null());
}

#[tokio::test]
async fn test_handle_message_notification() {
    let server = create_server("http://127.0.0.1:1");
    let raw = br#"{"jsonrpc": "2.0", "method": "notifications/cancelled"}"#;
    assert!(server.handle_message(raw).await.is_none());
}

// =============================================================================
// stdio loop
// =============================================================================

#[tokio::test]
async fn test_stdio_session() {
    let server = create_server("http://127.0.0.1:1");
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
    );

    let responses = serve_lines(&server, input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_stdio_parse_error() {
    let server = create_server("http://127.0.0.1:1");
    let input = concat!("{not json\n", r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#);
    let responses = serve_lines(&server, input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["id"], 3);
}
