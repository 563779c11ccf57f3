mod app;
mod config;
mod error;
mod storage;
#[cfg(test)]
mod testing;
mod upload;
mod utils;
mod wallet;

use anyhow::{Context, Result};
use app::{Background, Message, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use config::Config;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use utils::file_size::FileSizeUtils;

#[derive(Parser)]
#[command(name = "sciquery-background", version, about = "Wallet bridge and chunked PDF uploader")]
struct Cli {
    /// TOML config file; built-in defaults are used when omitted
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer JSON messages from stdin, one per line
    Serve,
    /// Upload a PDF under a DOI
    Upload {
        file: PathBuf,
        #[arg(long)]
        doi: String,
    },
    /// Connect a wallet (phantom, okx)
    Connect { wallet: String },
    /// Disconnect a wallet
    Disconnect { wallet: String },
    /// Show the persisted upload status and wallet state
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            Config::load(path)?
        }
        None => Config::default(),
    };

    let background = Background::from_config(&config).context("Failed to build gateway client")?;

    match cli.command {
        Command::Serve => serve(&background).await,
        Command::Upload { file, doi } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            tracing::info!(file = %file.display(), size = %FileSizeUtils::format_size(bytes.len()), "Encoding document");

            let message = Message::UploadPdf {
                pdf_base64: STANDARD.encode(&bytes),
                doi,
            };
            print_response(background.handle(message).await)
        }
        Command::Connect { wallet } => {
            let message = Message::ConnectWallet {
                wallet_type: wallet,
            };
            print_response(background.handle(message).await)
        }
        Command::Disconnect { wallet } => {
            let message = Message::DisconnectWallet {
                wallet_type: wallet,
            };
            print_response(background.handle(message).await)
        }
        Command::Status => {
            let snapshot = background.snapshot().await?;
            println!("{}", snapshot.upload_text());
            println!("{}", snapshot.wallet_text());
            Ok(())
        }
    }
}

async fn serve(background: &Background) -> Result<()> {
    tracing::info!("Waiting for messages on stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = background.handle_json(&line).await;
        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

fn print_response(response: Response) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}
