//! ovh - Command-line shell for the OVH REST API
//!
//! Takes an HTTP method, an API path, and an optional JSON payload (inline
//! or piped on standard input), signs the request against the configured
//! endpoint, and prints the raw JSON response body to standard output. The
//! exit code is 0 for a 2xx response and 1 for everything else.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ovh_core::{ConfigManager, Credentials, EnvOverrides};
use ovhcli::cli::Cli;
use ovhcli::dispatcher::{self, DispatchOptions};
use ovhcli::exit_code::ExitCode;

#[tokio::main]
async fn main() {
    // Argument errors share the single failure exit code; --help and
    // --version print on stdout and exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    // Diagnostics go to stderr so stdout stays raw response data
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ovh: {e}");
            ExitCode::Failure
        }
    };

    std::process::exit(exit_code.as_i32());
}

async fn run(cli: Cli) -> ovh_core::Result<ExitCode> {
    // Resolve the payload before touching configuration or the network so a
    // malformed payload never results in a request.
    let piped = dispatcher::piped_stdin()?;
    let payload = dispatcher::resolve_payload(cli.json.as_deref(), piped.as_deref())?;

    let config = ConfigManager::new()?.load()?;
    let credentials = Credentials::resolve(&config, &EnvOverrides::from_env())?;
    tracing::debug!(endpoint = %credentials.endpoint_url, "resolved credentials");
    let client = ovh_api::OvhClient::new(&credentials, Duration::from_secs(cli.timeout))?;

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    dispatcher::dispatch(
        &client,
        cli.method.into(),
        &cli.path,
        payload,
        DispatchOptions { debug: cli.debug },
        &mut stdout,
        &mut stderr,
    )
    .await
}
