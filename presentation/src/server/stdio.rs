//! Newline-delimited JSON-RPC tool server over stdin/stdout
//!
//! Requests are handled one at a time in arrival order. Logging must never
//! reach stdout, which carries nothing but protocol frames.

use std::sync::Arc;

use civic_application::ports::{tool_executor::ToolExecutorPort, tool_schema::ToolSchemaPort};
use civic_domain::tool::{entities::ToolCall, provider::ServerInfo};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::protocol::{
    CallToolParams, CallToolResult, DEFAULT_PROTOCOL_VERSION, INTERNAL_ERROR, JsonRpcRequest,
    JsonRpcResponse, RpcError,
};

/// Errors that end the serve loop
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error on stdio: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Routes protocol requests to the tool executor
pub struct ToolServer {
    executor: Arc<dyn ToolExecutorPort>,
    schema: Arc<dyn ToolSchemaPort>,
    server_info: ServerInfo,
}

impl ToolServer {
    pub fn new(
        executor: Arc<dyn ToolExecutorPort>,
        schema: Arc<dyn ToolSchemaPort>,
        server_info: ServerInfo,
    ) -> Self {
        Self {
            executor,
            schema,
            server_info,
        }
    }

    /// Read requests until EOF or cancellation, writing one line per response
    pub async fn serve<R, W>(
        &self,
        reader: R,
        mut writer: W,
        cancel: CancellationToken,
    ) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            server = %self.server_info.name,
            tools = self.executor.tool_spec().len(),
            "Serving tools on stdio"
        );
        let mut lines = reader.lines();

        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Shutdown requested");
                    break;
                }
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                debug!("Input closed");
                break;
            };

            if let Some(response) = self.handle_line(&line).await {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle one raw line; `None` when nothing is to be sent back
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Discarding unparseable frame");
                return Some(JsonRpcResponse::failure(Value::Null, RpcError::parse_error(e)));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::failure(id, RpcError::invalid_request(e))),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, id = ?request.id, "Request");

        let Some(id) = request.id else {
            debug!(method = %request.method, "Notification");
            return None;
        };

        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                debug!(code = error.code, message = %error.message, "Request failed");
                JsonRpcResponse::failure(id, error)
            }
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize(params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({
                "tools": self.schema.all_tools_schema(self.executor.tool_spec()),
            })),
            "tools/call" => self.call_tool(params).await,
            other => Err(RpcError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: Option<&Value>) -> Value {
        let protocol_version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        if let Some(client) = params.and_then(|p| p.get("clientInfo")) {
            info!(%client, protocol_version, "Client connected");
        }

        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": self.server_info,
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params = params.ok_or_else(|| RpcError::invalid_params("missing params"))?;
        let params: CallToolParams =
            serde_json::from_value(params).map_err(RpcError::invalid_params)?;

        let call = ToolCall::new(&params.name).with_arguments(params.arguments.unwrap_or_default());
        let result = self.executor.execute(&call).await;

        if let Some(error) = result.error() {
            info!(tool = %params.name, code = %error.code, "Tool returned an error");
        }

        let content = CallToolResult::text(result.text(), !result.is_success());
        serde_json::to_value(content).map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use civic_domain::tool::{
        entities::{ToolDefinition, ToolParameter, ToolSpec},
        value_objects::{ToolError, ToolResult},
    };
    use std::sync::Mutex;

    struct FakeExecutor {
        spec: ToolSpec,
        calls: Mutex<Vec<ToolCall>>,
    }

    impl FakeExecutor {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new()
                    .register(
                        ToolDefinition::new("turn_off", "Turn a lightbulb off").with_parameter(
                            ToolParameter::new("number", "Number of the lightbulb", true)
                                .with_type("number"),
                        ),
                    )
                    .register(ToolDefinition::new("find_funding", "Search funding")),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for FakeExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            self.calls.lock().unwrap().push(call.clone());
            match call.get_i64("number") {
                Some(1) => ToolResult::success(&call.tool_name, "Success"),
                Some(n) => ToolResult::failure(
                    &call.tool_name,
                    ToolError::not_found(format!("Light number {} not found", n)),
                ),
                None => ToolResult::success(&call.tool_name, "# Förderung: Sanierungsbonus"),
            }
        }
    }

    struct NameOnlySchema;

    impl ToolSchemaPort for NameOnlySchema {
        fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
            json!({"name": tool.name})
        }
    }

    fn server() -> (ToolServer, Arc<FakeExecutor>) {
        let executor = Arc::new(FakeExecutor::new());
        let server = ToolServer::new(
            executor.clone(),
            Arc::new(NameOnlySchema),
            ServerInfo::new("Philips HUE", "1.0.0"),
        );
        (server, executor)
    }

    async fn respond(server: &ToolServer, line: &str) -> Value {
        let response = server.handle_line(line).await.expect("a response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let (server, _) = server();

        let response = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#,
        )
        .await;

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(response["result"]["serverInfo"]["name"], "Philips HUE");
        assert_eq!(response["result"]["serverInfo"]["version"], "1.0.0");
        assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let (server, _) = server();

        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none());
        assert!(server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{}}"#)
            .await
            .is_none());
        assert!(server.handle_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_ping_and_list() {
        let (server, _) = server();

        let ping = respond(&server, r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#).await;
        assert_eq!(ping["id"], "p");
        assert_eq!(ping["result"], json!({}));

        let list = respond(&server, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
        assert_eq!(
            list["result"]["tools"],
            json!([{"name": "turn_off"}, {"name": "find_funding"}])
        );
    }

    #[tokio::test]
    async fn test_tools_call() {
        let (server, executor) = server();

        let ok = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"turn_off","arguments":{"number":1}}}"#,
        )
        .await;
        assert_eq!(
            ok["result"],
            json!({"content": [{"type": "text", "text": "Success"}], "isError": false})
        );

        let failed = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"turn_off","arguments":{"number":9}}}"#,
        )
        .await;
        assert_eq!(failed["result"]["isError"], true);
        assert_eq!(failed["result"]["content"][0]["text"], "Light number 9 not found");

        let calls = executor.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tool_name, "turn_off");
    }

    #[tokio::test]
    async fn test_tools_call_without_arguments() {
        let (server, _) = server();

        let response = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"find_funding"}}"#,
        )
        .await;
        assert_eq!(response["result"]["content"][0]["text"], "# Förderung: Sanierungsbonus");
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let (server, _) = server();

        let parse = respond(&server, "{not json").await;
        assert_eq!(parse["error"]["code"], -32700);
        assert_eq!(parse["id"], Value::Null);

        let unknown = respond(&server, r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#).await;
        assert_eq!(unknown["error"]["code"], -32601);
        assert_eq!(unknown["id"], 6);

        let invalid = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/call","params":{"arguments":{}}}"#,
        )
        .await;
        assert_eq!(invalid["error"]["code"], -32602);

        let missing = respond(&server, r#"{"jsonrpc":"2.0","id":8,"method":"tools/call"}"#).await;
        assert_eq!(missing["error"]["code"], -32602);

        let not_a_request = respond(&server, r#"{"jsonrpc":"2.0","id":9}"#).await;
        assert_eq!(not_a_request["error"]["code"], -32600);
        assert_eq!(not_a_request["id"], 9);
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_response() {
        let (server, _) = server();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"turn_off","arguments":{"number":1}}}"#,
            "\n",
        );
        let mut output = Vec::new();

        server
            .serve(input.as_bytes(), &mut output, CancellationToken::new())
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first["id"], 1);
        assert_eq!(second["result"]["content"][0]["text"], "Success");
    }

    #[tokio::test]
    async fn test_serve_stops_on_cancel() {
        let (server, _) = server();
        let (_client, server_side) = tokio::io::duplex(64);
        let (read_half, _write_half) = tokio::io::split(server_side);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut output = Vec::new();
        server
            .serve(tokio::io::BufReader::new(read_half), &mut output, cancel)
            .await
            .unwrap();
        assert!(output.is_empty());
    }
}
