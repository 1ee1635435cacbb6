//! LearnEX Chat Proxy Server
//!
//! Runs the ai-chat proxy as a standalone HTTP server.

use anyhow::Result;
use clap::Parser;
use learnex_chat::{run_server, ProxyConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "learnex-chat-server")]
#[command(about = "LearnEX AI chat proxy server")]
struct Args {
    /// Server port
    #[arg(short, long, default_value = "8080", env = "CHAT_PORT")]
    port: u16,

    /// Server host
    #[arg(long, default_value = "0.0.0.0", env = "CHAT_HOST")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ProxyConfig::from_env();

    info!("Starting LearnEX chat proxy");
    info!("  OpenAI key configured: {}", config.openai.api_key.is_some());
    info!("  Gemini key configured: {}", config.gemini.api_key.is_some());

    run_server(config, &args.host, args.port).await
}
