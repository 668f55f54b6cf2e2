use crate::application::dispatch::Dispatcher;
use crate::domain::types::{Envelope, ErrorKind, InvocationRequest, ToolResponse};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize response envelope: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Single-peer adapter: one JSON invocation per line on stdin, one envelope
/// per line on stdout. Each request is answered and flushed before the next
/// line is read, so responses never interleave.
pub async fn run(dispatcher: Arc<Dispatcher>) -> Result<(), StdioError> {
    let stdin = BufReader::new(io::stdin());
    let mut lines = stdin.lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!("received request line");

        let envelope = match serde_json::from_str::<InvocationRequest>(&line) {
            Ok(request) => dispatcher.invoke(&request.name, request.arguments).await,
            Err(parse_error) => {
                error!(%parse_error, "failed to parse request line");
                Envelope::failure(
                    ErrorKind::InvalidArguments,
                    format!("invalid request JSON: {parse_error}"),
                )
            }
        };
        write_response(&mut stdout, ToolResponse::from(envelope)).await?;
    }

    stdout.flush().await?;
    Ok(())
}

async fn write_response(
    stdout: &mut io::Stdout,
    response: ToolResponse,
) -> Result<(), StdioError> {
    let mut payload = serde_json::to_vec(&response)?;
    payload.push(b'\n');
    stdout.write_all(&payload).await?;
    stdout.flush().await?;
    Ok(())
}
