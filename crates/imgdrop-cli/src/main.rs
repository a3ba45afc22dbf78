//! imgdrop — upload images to ImgBB from the terminal.
//!
//! Set IMGBB_API_KEY (or pass --key) and optionally IMGBB_UPLOAD_URL.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use imgdrop_cli::api_client::ImgbbClient;
use imgdrop_cli::notifier::ConsoleNotifier;
use imgdrop_cli::{init_tracing, oneshot, session};
use imgdrop_core::{UploadController, UploaderConfig};

#[derive(Parser)]
#[command(name = "imgdrop", about = "Upload images to ImgBB")]
struct Cli {
    /// Upload endpoint (overrides IMGBB_UPLOAD_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one image and print its URL
    Upload {
        /// Path to the image
        file: PathBuf,
        /// API key (defaults to IMGBB_API_KEY)
        #[arg(long)]
        key: Option<String>,
    },
    /// Start an interactive upload session
    Shell,
}

fn build_config(endpoint: Option<String>) -> anyhow::Result<UploaderConfig> {
    let mut config = UploaderConfig::from_env().context("Invalid uploader configuration")?;
    if let Some(endpoint) = endpoint {
        config = config.with_upload_url(endpoint);
        config.validate()?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = build_config(cli.endpoint)?;
    let client = ImgbbClient::new(&config).context("Failed to create ImgBB client")?;
    let mut controller = UploadController::new(client, ConsoleNotifier);

    match cli.command {
        Commands::Upload { file, key } => {
            let api_key = key.or(config.api_key).unwrap_or_default();
            let result = oneshot::upload_file(&mut controller, &file, api_key).await?;
            let out = serde_json::to_string_pretty(&result).context("Serialize result")?;
            println!("{}", out);
        }
        Commands::Shell => {
            if let Some(key) = config.api_key.clone() {
                controller.handle_api_key_input(key);
            }
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run(&mut controller, stdin, std::io::stdout()).await?;
        }
    }

    Ok(())
}
