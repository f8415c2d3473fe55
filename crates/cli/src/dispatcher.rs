//! Request dispatcher
//!
//! Translates one CLI invocation into one request/response exchange:
//! resolve the payload from its two possible sources, hand it to the
//! client, write the raw response body to standard output, and select the
//! exit code from the HTTP status. Debug verbosity is an explicit option
//! threaded through the call, not process-global state.

use std::io::Write;

use ovh_core::{ApiClient, Error, Method, Result};

use crate::exit_code::ExitCode;

/// Options for one dispatch
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Emit request/response diagnostics on the error stream
    pub debug: bool,
}

/// Read piped standard input to completion.
///
/// Returns `None` when standard input is a terminal; an interactive session
/// never blocks waiting for a payload that is not coming.
pub fn piped_stdin() -> Result<Option<Vec<u8>>> {
    use std::io::{IsTerminal, Read};

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    stdin.lock().read_to_end(&mut buffer)?;
    Ok(Some(buffer))
}

/// Resolve the request payload from the inline argument and piped input.
///
/// Non-empty piped input wins over the inline argument; an empty source
/// counts as absent. The chosen bytes must parse as a JSON value (object,
/// array, or scalar).
pub fn resolve_payload(
    inline: Option<&str>,
    piped: Option<&[u8]>,
) -> Result<Option<serde_json::Value>> {
    let chosen: Option<&[u8]> = match piped {
        Some(bytes) if !bytes.is_empty() => Some(bytes),
        _ => inline.filter(|s| !s.is_empty()).map(str::as_bytes),
    };

    match chosen {
        None => Ok(None),
        Some(bytes) => serde_json::from_slice(bytes)
            .map(Some)
            .map_err(|e| Error::InvalidPayload(e.to_string())),
    }
}

/// Send one request and write the raw response body to `stdout`.
///
/// Any HTTP status is a completed exchange: the body is written verbatim
/// followed by a newline, and only the exit code reflects the status.
/// `Err` is reserved for transport and signing failures.
pub async fn dispatch<W: Write, E: Write>(
    client: &dyn ApiClient,
    method: Method,
    path: &str,
    payload: Option<serde_json::Value>,
    options: DispatchOptions,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<ExitCode> {
    if options.debug {
        writeln!(stderr, "* request: {method} {path}")?;
        if let Some(value) = &payload {
            writeln!(stderr, "* payload: {value}")?;
        }
    }

    let response = client.call_raw(method, path, payload, true).await?;

    if options.debug {
        writeln!(stderr, "* status: {}", response.status)?;
        for (name, value) in &response.headers {
            writeln!(stderr, "* header: {name}: {value}")?;
        }
    }

    stdout.write_all(&response.body)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;

    Ok(ExitCode::from_status(response.status))
}
