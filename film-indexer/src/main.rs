//! Runs the film indexer once and exits.
//!
//! Exit status is 0 after a clean run and 1 on any fatal error.

use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use film_indexer::{Dependencies, EtlConfig, IndexingError};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> Result<(), IndexingError> {
    let config = EtlConfig::from_env()?;
    let mut dependencies = Dependencies::new(&config).await?;

    let summary = dependencies.orchestrator.run().await?;
    info!(
        extracted = summary.extracted,
        indexed = summary.documents_indexed,
        failed = summary.documents_failed,
        "Film indexer finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Film indexer failed");
            ExitCode::FAILURE
        }
    }
}
