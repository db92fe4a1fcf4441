//! MCP server on stdio, built on `rmcp`.
//!
//! `rmcp` owns the handshake, dispatch and response framing. A line gate sits
//! between stdin and the service: frames the service could not decode are
//! answered here with a JSON-RPC error, so one bad line never ends the
//! session. After stdin closes the gate keeps the service's input open until
//! every forwarded request has been answered.

use std::io::ErrorKind;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Context, Result};
use guardian_core::error::ToolError;
use guardian_core::{Inspector, TOOL_NAME, tools};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ClientJsonRpcMessage, Content, ErrorCode,
    Implementation, JsonObject, JsonRpcMessage, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, ServerInitializeError};
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream};
use tokio::sync::{Notify, mpsc};

const PIPE_CAPACITY: usize = 64 * 1024;

const INSTRUCTIONS: &str = "Read-only release readiness checks for a local repository. \
    Every tool takes repo_path; results are fail-closed.";

#[derive(Debug, Clone)]
pub struct GuardianServer {
    inspector: Inspector,
}

impl GuardianServer {
    pub fn new(inspector: Inspector) -> Self {
        Self { inspector }
    }
}

fn tool_list() -> Vec<Tool> {
    tools::descriptors()
        .into_iter()
        .map(|descriptor| {
            let schema = match descriptor.input_schema {
                Value::Object(map) => map,
                _ => JsonObject::new(),
            };
            Tool::new(descriptor.name, descriptor.description, Arc::new(schema))
        })
        .collect()
}

fn tool_error(err: &ToolError) -> McpError {
    match err {
        ToolError::UnknownTool(_) | ToolError::InvalidArguments(_) => {
            McpError::invalid_params(err.to_string(), None)
        }
        ToolError::Serialize(_) => McpError::internal_error(err.to_string(), None),
    }
}

impl ServerHandler for GuardianServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = TOOL_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let name = request.name.to_string();
        let arguments = request.arguments.map(Value::Object);
        tracing::info!(tool = %name, "tools/call");

        // Checks touch the filesystem and may spawn git.
        let inspector = self.inspector.clone();
        let tool = name.clone();
        let report = tokio::task::spawn_blocking(move || {
            tools::call(&inspector, &tool, arguments.as_ref())
        })
        .await
        .map_err(|err| McpError::internal_error(err.to_string(), None))?
        .map_err(|err| {
            tracing::warn!(tool = %name, error = %err, "tool call rejected");
            tool_error(&err)
        })?;

        let text = serde_json::to_string_pretty(&report)
            .map_err(|err| McpError::internal_error(err.to_string(), None))?;
        let mut result = CallToolResult::success(vec![Content::text(text)]);
        result.structured_content = Some(report);
        Ok(result)
    }
}

/// Serve one MCP session over `input`/`output` until the client goes away.
///
/// EOF on `input` and a closed `output` both end the session cleanly.
pub async fn serve<R, W>(inspector: Inspector, input: R, output: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::info!("serving tools on stdio");

    let (service_in, gate_in) = tokio::io::duplex(PIPE_CAPACITY);
    let (service_out, gate_out) = tokio::io::duplex(PIPE_CAPACITY);
    let (frames_tx, frames_rx) = mpsc::unbounded_channel();
    let in_flight = InFlight::default();

    let (served, gated, relayed, written) = tokio::join!(
        run_service(GuardianServer::new(inspector), service_in, service_out),
        gate_input(input, gate_in, frames_tx.clone(), &in_flight),
        relay_output(gate_out, frames_tx, &in_flight),
        write_frames(output, frames_rx),
    );
    served.and(gated).and(relayed).and(written)
}

async fn run_service(server: GuardianServer, input: DuplexStream, output: DuplexStream) -> Result<()> {
    let service = match server.serve((input, output)).await {
        Ok(service) => service,
        Err(ServerInitializeError::ConnectionClosed(_)) => {
            tracing::info!("client disconnected before initializing");
            return Ok(());
        }
        Err(err) => return Err(err).context("MCP initialization failed"),
    };
    let reason = service.waiting().await.context("MCP service task failed")?;
    tracing::info!(?reason, "MCP session ended");
    Ok(())
}

/// Requests forwarded to the service and not yet answered.
#[derive(Default)]
struct InFlight {
    pending: AtomicUsize,
    closed: AtomicBool,
    idle: Notify,
}

impl InFlight {
    fn begin(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {
        let previous = self
            .pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if previous == Ok(1) {
            self.idle.notify_waiters();
        }
    }

    /// The service stopped writing; nothing else will be answered.
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.idle.notify_waiters();
    }

    async fn drained(&self) {
        loop {
            let idle = self.idle.notified();
            if self.closed.load(Ordering::SeqCst) || self.pending.load(Ordering::SeqCst) == 0 {
                return;
            }
            idle.await;
        }
    }
}

#[derive(Debug, PartialEq)]
enum Inbound {
    Blank,
    Forward { request: bool },
    /// An undecodable notification; JSON-RPC forbids answering it.
    Dropped,
    Reject(Value),
}

fn inspect_frame(raw: &[u8]) -> Inbound {
    let Ok(text) = std::str::from_utf8(raw) else {
        return Inbound::Reject(error_frame(
            Value::Null,
            ErrorCode::PARSE_ERROR,
            "parse error: frame is not valid UTF-8".to_string(),
        ));
    };
    let text = text.trim();
    if text.is_empty() {
        return Inbound::Blank;
    }

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            return Inbound::Reject(error_frame(
                Value::Null,
                ErrorCode::PARSE_ERROR,
                format!("parse error: {err}"),
            ));
        }
    };

    match ClientJsonRpcMessage::deserialize(&value) {
        Ok(message) => Inbound::Forward {
            request: matches!(message, JsonRpcMessage::Request(_)),
        },
        Err(err) => match value.get("id") {
            None if value.get("method").is_some() => Inbound::Dropped,
            id => Inbound::Reject(error_frame(
                id.cloned().unwrap_or(Value::Null),
                ErrorCode::INVALID_REQUEST,
                format!("invalid request: {err}"),
            )),
        },
    }
}

fn error_frame(id: Value, code: ErrorCode, message: String) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": McpError::new(code, message, None),
    })
}

fn is_response(frame: &[u8]) -> bool {
    serde_json::from_slice::<Value>(frame)
        .is_ok_and(|value| value.get("id").is_some() && value.get("method").is_none())
}

async fn gate_input<R: AsyncRead + Unpin>(
    input: R,
    mut service: DuplexStream,
    frames: mpsc::UnboundedSender<Vec<u8>>,
    in_flight: &InFlight,
) -> Result<()> {
    let mut input = BufReader::new(input);
    let mut line = Vec::new();

    loop {
        line.clear();
        if input
            .read_until(b'\n', &mut line)
            .await
            .context("failed to read stdin")?
            == 0
        {
            break;
        }

        match inspect_frame(&line) {
            Inbound::Blank => {}
            Inbound::Dropped => tracing::debug!("dropping undecodable notification"),
            Inbound::Reject(response) => {
                let message = &response["error"]["message"];
                tracing::warn!(error = %message, "rejected frame");
                let mut frame = serde_json::to_vec(&response)?;
                frame.push(b'\n');
                if frames.send(frame).is_err() {
                    break;
                }
            }
            Inbound::Forward { request } => {
                if request {
                    in_flight.begin();
                }
                if !line.ends_with(b"\n") {
                    line.push(b'\n');
                }
                match service.write_all(&line).await {
                    Err(err) if err.kind() == ErrorKind::BrokenPipe => break,
                    other => other.context("failed to forward frame")?,
                }
            }
        }
    }

    in_flight.drained().await;
    tracing::info!("stdin closed; shutting down");
    Ok(())
}

async fn relay_output(
    service: DuplexStream,
    frames: mpsc::UnboundedSender<Vec<u8>>,
    in_flight: &InFlight,
) -> Result<()> {
    let mut service = BufReader::new(service);
    let outcome = loop {
        let mut line = Vec::new();
        match service.read_until(b'\n', &mut line).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(err) => break Err(err).context("failed to read service output"),
        }

        let answers = is_response(&line);
        if !line.ends_with(b"\n") {
            line.push(b'\n');
        }
        if frames.send(line).is_err() {
            break Ok(());
        }
        if answers {
            in_flight.finish();
        }
    };
    in_flight.close();
    outcome
}

async fn write_frames<W: AsyncWrite + Unpin>(
    mut output: W,
    mut frames: mpsc::UnboundedReceiver<Vec<u8>>,
) -> Result<()> {
    while let Some(frame) = frames.recv().await {
        let written = match output.write_all(&frame).await {
            Ok(()) => output.flush().await,
            err => err,
        };
        match written {
            Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                tracing::info!("client closed stdout; shutting down");
                return Ok(());
            }
            other => other.context("failed to write frame")?,
        }
    }
    Ok(())
}
