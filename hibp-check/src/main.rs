use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use hibp_check::Error;
use hibp_range::{DEFAULT_BASE_URL, HIBP_RANGE_URL_ENV, RangeClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hibp-check")]
#[command(about = "Check whether a password appears in the Have I Been Pwned corpus")]
struct Args {
    /// Password to check
    #[arg(short, long)]
    password: Option<String>,

    /// Pre-computed SHA1 of the password (40 hex characters)
    #[arg(long)]
    hash: Option<String>,

    /// Range API root, requests go to <URL>/range/<prefix>
    #[arg(long, env = HIBP_RANGE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    range_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Ask the API to pad the response with decoy entries
    #[arg(long)]
    padding: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match check(&args).await {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn check(args: &Args) -> Result<String, Error> {
    let client = RangeClient::builder()
        .base_url(args.range_url.as_str())
        .timeout(Duration::from_secs(args.timeout))
        .padding(args.padding)
        .build()
        .map_err(Error::Client)?;

    hibp_check::run(&client, args.password.as_deref(), args.hash.as_deref()).await
}
