use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use hibp_range::{DEFAULT_BASE_URL, HIBP_RANGE_URL_ENV};
use hibp_server::{DEFAULT_PORT, ServerBuilder, ServerError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hibp-server")]
#[command(about = "Serve Have I Been Pwned password checks over HTTP")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory of static files served at /
    #[arg(long, default_value = "./dist")]
    static_dir: PathBuf,

    /// Range API root, requests go to <URL>/range/<prefix>
    #[arg(long, env = HIBP_RANGE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    range_url: String,

    /// Range request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Ask the API to pad responses with decoy entries
    #[arg(long)]
    padding: bool,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let args = Args::parse();

    let server = ServerBuilder::new()
        .port(args.port)
        .static_dir(args.static_dir)
        .range_url(args.range_url)
        .timeout(Duration::from_secs(args.timeout))
        .padding(args.padding)
        .build()?;

    server.run().await
}
