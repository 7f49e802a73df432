// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fleet-remote: Document collection server for the fleet device dashboard.
//!
//! Holds the canonical device collection, assigns document ids on create,
//! and answers upsert/list/delete requests from fleet clients over
//! WebSocket. The collection survives restarts through a JSONL snapshot
//! file in the data directory.

mod id;
mod server;
mod state;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use fs2::FileExt;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Lock filename for the single-instance guarantee.
const LOCK_NAME: &str = "fleet-remote.lock";

/// fleet-remote: Device collection server
#[derive(Parser, Debug)]
#[command(name = "fleet-remote")]
#[command(about = "Document collection server for fleet device dashboards")]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0:7601")]
    bind: SocketAddr,

    /// Directory for snapshot storage
    #[arg(short, long, default_value = ".")]
    data: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting fleet-remote server");
    info!("  Bind address: {}", args.bind);
    info!("  Data directory: {}", args.data.display());

    // One server per data directory: two instances sharing a snapshot
    // file would overwrite each other.
    let lock_path = args.data.join(LOCK_NAME);
    let lock_file = OpenOptions::new()
        .create(true)
        .write(true)
        .open(&lock_path)?;
    if lock_file.try_lock_exclusive().is_err() {
        return Err(format!(
            "another fleet-remote already serves {}",
            args.data.display()
        )
        .into());
    }

    // Initialize state
    let state = state::ServerState::new(&args.data)?;
    info!("  Documents loaded: {}", state.len().await);

    // Run server
    server::run(args.bind, state).await?;

    drop(lock_file);
    Ok(())
}
