//! Git File History - per-line blame and per-file history for an editor
//!
//! Runs a local bridge the editor plugin talks to over HTTP. The plugin
//! forwards cursor, focus, edit and save events and receives decorations,
//! diff requests and notices back.
//!
//! # Usage
//! ```bash
//! git-file-history                               # Current directory as the workspace
//! git-file-history -w ~/app -w ~/lib --port 4000 # Multi-root workspace
//! RUST_LOG=git_file_history=debug git-file-history
//! ```

mod annotation;
mod config;
mod error;
mod extension;
mod git;
mod host;
mod models;
mod navigator;
mod routes;
mod tree;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use extension::Extension;
use git::{GitCli, Workspace};

/// Git File History - blame annotations and file history for your editor
#[derive(Parser)]
#[command(name = "git-file-history")]
#[command(about = "Editor bridge for git blame and per-file history", long_about = None)]
struct Cli {
    /// Workspace folder (repeat for multi-root workspaces)
    #[arg(short, long = "workspace", value_name = "DIR")]
    workspaces: Vec<PathBuf>,

    /// Port to run the bridge on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Git executable to invoke
    #[arg(long, default_value = "git")]
    git: PathBuf,

    /// Output ceiling for a single git invocation, in MiB
    #[arg(long, default_value = "10")]
    max_output_mb: usize,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            workspace_folders: cli.workspaces,
            git_binary: cli.git,
            max_output_bytes: cli.max_output_mb * 1024 * 1024,
            port: cli.port,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from(Cli::parse());

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let folders = config.resolved_workspace_folders();
    let workspace = Workspace::open(folders.clone());
    let git = Arc::new(GitCli::new(&config.git_binary, config.max_output_bytes));
    let extension = Arc::new(Mutex::new(Extension::activate(workspace, git)));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(extension))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", config.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    println!();
    println!("  Git File History");
    println!();
    for folder in &folders {
        println!("  Workspace: {}", folder.display());
    }
    println!("  Bridge:    http://{}", addr);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Git history deactivated");
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
