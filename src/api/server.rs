use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::api::dto::{CodeExecutionRequest, CodeExecutionResponse};
use crate::application::CodeExecutionService;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4600;
pub const HEALTH_MESSAGE: &str = "WhatCode trace server is running";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
struct CommandReq {
    command: String,
    params: Option<serde_json::Value>,
}

pub fn start_server(config: &ServerConfig) -> Result<()> {
    let address = config.address();
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!(%address, "API server listening");

    let service = CodeExecutionService::new();
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                thread::spawn(move || {
                    if let Err(e) = handle_connection(stream, service) {
                        error!(error = %e, "connection error");
                    }
                });
            }
            Err(e) => error!(error = %e, "accept error"),
        }
    }

    Ok(())
}

fn handle_connection(mut stream: TcpStream, service: CodeExecutionService) -> Result<()> {
    let peer = stream.peer_addr().map(|a| a.to_string()).unwrap_or_default();
    debug!(%peer, "client connected");

    let mut reader = BufReader::new(stream.try_clone()?);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            break; // Connection closed
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = process_command(trimmed, &service);
        let response_str = serde_json::to_string(&response)?;
        stream.write_all(response_str.as_bytes())?;
        stream.write_all(b"\n")?;
    }

    debug!(%peer, "client disconnected");
    Ok(())
}

/// Handle one request line and build the reply envelope.
pub fn process_command(json_str: &str, service: &CodeExecutionService) -> serde_json::Value {
    match dispatch(json_str, service) {
        Ok(reply) => reply,
        Err(e) => json!({
            "status": "error",
            "message": e.to_string()
        }),
    }
}

fn dispatch(json_str: &str, service: &CodeExecutionService) -> Result<serde_json::Value> {
    let req: CommandReq = serde_json::from_str(json_str)
        .context("Invalid JSON format")?;

    match req.command.as_str() {
        "PING" => Ok(json!({ "status": "success", "data": "PONG" })),
        "HEALTH" => Ok(json!({ "status": "success", "data": HEALTH_MESSAGE })),
        "EXECUTE" => {
            let request = parse_request(req.params)?;
            envelope(service.execute(&request))
        }
        "VISUALIZE" => {
            let request = parse_request(req.params)?;
            envelope(service.visualize(&request))
        }
        _ => anyhow::bail!("Unknown command: {}", req.command),
    }
}

fn parse_request(params: Option<serde_json::Value>) -> Result<CodeExecutionRequest> {
    let params = params.ok_or_else(|| anyhow::anyhow!("Missing params"))?;
    serde_json::from_value(params).context("Malformed request params")
}

/// `status` mirrors the response's own success flag.
fn envelope(response: CodeExecutionResponse) -> Result<serde_json::Value> {
    let status = if response.success { "success" } else { "error" };
    Ok(json!({
        "status": status,
        "data": serde_json::to_value(response)?
    }))
}
