//! Command-line surface of the ovh binary
//!
//! One invocation maps to one API call:
//! `ovh [--debug] [--timeout SECONDS] METHOD PATH [JSON_INPUT]`.

use clap::{Parser, ValueEnum};
use ovh_core::Method;

/// Default request timeout in seconds, matching the vendor clients
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// ovh - Command-line shell for the OVH REST API
///
/// Signs one request against the configured endpoint and prints the raw
/// JSON response body to standard output.
#[derive(Parser, Debug)]
#[command(name = "ovh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit request/response diagnostics on stderr
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// HTTP method
    #[arg(value_enum, ignore_case = true)]
    pub method: MethodArg,

    /// API path without the version prefix (e.g. /me)
    pub path: String,

    /// Inline JSON payload; overridden by non-empty piped standard input
    pub json: Option<String>,
}

/// The four methods the API console exposes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodArg {
    Get,
    Put,
    Post,
    Delete,
}

impl From<MethodArg> for Method {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => Method::Get,
            MethodArg::Put => Method::Put,
            MethodArg::Post => Method::Post,
            MethodArg::Delete => Method::Delete,
        }
    }
}
