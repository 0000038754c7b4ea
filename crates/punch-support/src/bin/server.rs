//! Support bot server binary
//!
//! Run with: cargo run -p punch-support --bin punch-support-server

use clap::Parser;
use punch_support::{config::SupportConfig, server::SupportServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Punch Support Bot HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// FAQ corpus file (JSON array of records)
    #[arg(long)]
    corpus: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "punch_support=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = SupportConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(corpus) = args.corpus {
        config.corpus.path = corpus;
    }

    tracing::info!("Initializing Punch Support Bot...");
    tracing::info!("  - Chat model: {}", config.openai.chat_model);
    tracing::info!("  - Embedding model: {}", config.openai.embed_model);
    tracing::info!("  - Vector backend: {:?}", config.vector_db.backend);
    tracing::info!("  - Corpus: {}", config.corpus.path.display());

    let server = SupportServer::new(config).await?;

    tracing::info!("Checking upstream services...");
    if !server.check_providers().await.all_healthy() {
        tracing::warn!("Some upstream services are unavailable; startup may fail");
        tracing::warn!("  - Check OPENAI_API_KEY and network access to {}", server.state().config().openai.base_url);
    }

    // A server without a populated index is not worth running
    if let Err(e) = server.bootstrap().await {
        tracing::error!("Failed to initialize embeddings: {}", e);
        return Err(e.into());
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("\nEndpoints:");
    println!("  GET  /welcome             - Greeting messages");
    println!("  POST /chat                - Ask a question");
    println!("  POST /reset/:session_id   - Clear a session");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
