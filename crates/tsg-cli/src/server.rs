//! Line-delimited JSON protocol spoken by `tsguard-server`.
//!
//! Each stdin line is one request; each gets exactly one response line on
//! stdout, in order. The request `id` is echoed back untouched.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use tsg_generator::{Flags, Formatter, GenerateError, generate_type_guards_from_source, render_formatted};

/// File name used for request input in error messages.
pub const REQUEST_FILE_NAME: &str = "input.ts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    Text(String),
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub id: Option<RequestId>,
    pub input: String,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub format: bool,
    #[serde(default = "default_true")]
    pub include_source: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    JsonParseError,
    InvalidInput,
    SourceFileGenError,
    CodeGenerationError,
    CodeFormatterError,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub ok: bool,
    pub id: Option<RequestId>,
    pub output: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureResponse {
    pub ok: bool,
    pub id: Option<RequestId>,
    pub code: ErrorCode,
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(SuccessResponse),
    Failure(FailureResponse),
}

impl Response {
    fn failure(id: Option<RequestId>, code: ErrorCode, message: impl Into<String>) -> Self {
        Response::Failure(FailureResponse {
            ok: false,
            id,
            code,
            error: ErrorBody {
                message: message.into(),
            },
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

pub struct Server {
    formatter: Box<dyn Formatter>,
    requests_handled: u64,
}

impl Server {
    pub fn new(formatter: Box<dyn Formatter>) -> Self {
        Server {
            formatter,
            requests_handled: 0,
        }
    }

    pub fn requests_handled(&self) -> u64 {
        self.requests_handled
    }

    pub fn handle_line(&mut self, line: &str) -> Response {
        self.requests_handled += 1;

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Response::failure(
                    None,
                    ErrorCode::JsonParseError,
                    format!("invalid JSON: {e}"),
                );
            }
        };

        // Recover the id first so even a malformed request can be correlated.
        let id = value
            .get("id")
            .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());

        match serde_json::from_value::<GenerateRequest>(value) {
            Ok(request) => self.handle_request(request),
            Err(e) => Response::failure(id, ErrorCode::InvalidInput, format!("invalid request: {e}")),
        }
    }

    pub fn handle_request(&mut self, request: GenerateRequest) -> Response {
        let GenerateRequest {
            id,
            input,
            flags,
            format,
            include_source,
        } = request;
        debug!(?id, bytes = input.len(), format, "generate request");

        let output = match generate_type_guards_from_source(REQUEST_FILE_NAME, &input, flags) {
            Ok(output) => output,
            Err(error) => {
                let code = match &error {
                    GenerateError::Parse(_) => ErrorCode::SourceFileGenError,
                    GenerateError::DuplicateDeclaration { .. } => ErrorCode::CodeGenerationError,
                };
                return Response::failure(id, code, error.to_string());
            }
        };
        let output = if include_source {
            output
        } else {
            output.without_source()
        };

        let formatter = format.then_some(self.formatter.as_ref());
        match render_formatted(&output, formatter) {
            Ok(text) => Response::Success(SuccessResponse {
                ok: true,
                id,
                output: text,
                warnings: output.diagnostics,
            }),
            Err(error) => {
                warn!(%error, "formatter failed");
                Response::failure(id, ErrorCode::CodeFormatterError, error.to_string())
            }
        }
    }

    /// Serve until `reader` is exhausted. Blank lines are ignored.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, writer: &mut W) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("failed to read from stdin")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handle_line(&line);
            writeln!(writer, "{}", serde_json::to_string(&response)?)?;
            writer.flush()?;
        }
        debug!(requests = self.requests_handled, "input closed");
        Ok(())
    }
}
