use std::io::IsTerminal;

use eyre::Result;
use tracing_subscriber::EnvFilter;

use screener_client::client::HttpClient;
use screener_terminal::config;
use screener_terminal::controller::ViewController;
use screener_terminal::terminal::{self, TerminalOptions};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = config::resolve()?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        "configuration loaded"
    );

    let client = HttpClient::new(config.client_config());
    match client.health().await {
        Ok(status) => tracing::info!(status = %status.status, "screening service reachable"),
        Err(e) => tracing::warn!(error = %e, "screening service health check failed"),
    }

    let mut controller = ViewController::new(Box::new(client));
    let stdout = std::io::stdout();
    let options = TerminalOptions {
        clear_screen: stdout.is_terminal(),
    };
    let input = tokio::io::BufReader::new(tokio::io::stdin());

    terminal::run(&mut controller, input, &mut stdout.lock(), options).await
}

/// Logs go to stderr so they never interleave with the rendered screen.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("SCREENER_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
