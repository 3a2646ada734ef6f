use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing::{error, info};

use index_porter::{Dependencies, PorterError};
use index_porter_repository::BasicAuth;

#[derive(Parser)]
#[command(name = "index-porter")]
#[command(about = "Bulk-transfer documents between a search index and NDJSON files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenSearch URL
    #[arg(long, default_value = "http://localhost:9200", global = true)]
    url: String,

    /// Index name
    #[arg(long, global = true)]
    index: Option<String>,

    /// Username for basic authentication
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password for basic authentication
    #[arg(long, global = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every document of an index to an NDJSON file
    Export {
        /// Output NDJSON file path
        #[arg(long, default_value = "output.jsonl")]
        output: PathBuf,
    },
    /// Import documents from an NDJSON file into an index
    Import {
        /// Input NDJSON file path
        #[arg(long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "Transfer failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), PorterError> {
    let index = cli
        .index
        .ok_or_else(|| PorterError::config("index name is required"))?;
    let auth = basic_auth(cli.username, cli.password)?;

    let deps = Dependencies::new(&cli.url, auth).await?;

    // The sender stays alive inside the signal task, keeping the channel
    // open for the whole run.
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    match cli.command {
        Commands::Export { output } => {
            let total = deps
                .exporter
                .export_to_file(&index, &output, shutdown_rx)
                .await?;
            info!(total = total, "Export complete");
            println!("Exported {} documents to {}", total, output.display());
        }
        Commands::Import { input } => {
            let total = deps
                .importer
                .import_from_file(&index, &input, shutdown_rx)
                .await?;
            info!(total = total, "Import complete");
            println!("Imported {} documents from {}", total, input.display());
        }
    }

    Ok(())
}

/// Pair optional username and password into credentials.
fn basic_auth(
    username: Option<String>,
    password: Option<String>,
) -> Result<Option<BasicAuth>, PorterError> {
    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(BasicAuth { username, password })),
        (None, None) => Ok(None),
        _ => Err(PorterError::config(
            "username and password must be provided together",
        )),
    }
}
