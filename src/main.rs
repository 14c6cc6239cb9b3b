// cotag entry point.
// Loads configuration, opens the response cache, and runs the interactive query loop.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use cotag::cache::{CacheStore, default_cache_path};
use cotag::config::{Cli, Credentials, load_dotenv};
use cotag::error::Result;
use cotag::repl::QueryLoop;
use cotag::twitter::{SEARCH_URL, TwitterClient};

/// Log to stderr so prompt output on stdout stays readable.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let credentials = Credentials::from_env()?;
    let client = TwitterClient::new(credentials)?;

    if cli.check_auth {
        let account = client.verify_credentials().await?;
        println!("Authenticated as @{}", account.screen_name);
        return Ok(());
    }

    let cache_path = cli.cache_file.unwrap_or_else(default_cache_path);
    let store = CacheStore::load(&cache_path);
    info!(
        "Using cache {} ({} entries)",
        store.path().display(),
        store.len()
    );

    let mut query_loop = QueryLoop::new(store, client, SEARCH_URL, cli.count);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    query_loop.run(stdin.lock(), &mut stdout).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    load_dotenv();

    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
