use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use nf_inference::{AiClient, AiConfig};
use nf_web::{AppState, PipelineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "NewsFast - article summarization service", long_about = None)]
struct Cli {
    /// API key for the completion service
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Primary completion model
    #[arg(long)]
    model: Option<String>,

    /// Fallback model used after the primary's retries are exhausted
    #[arg(long)]
    fallback_model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "NEWSFAST_PORT", default_value_t = 8000)]
        port: u16,
    },
    /// Summarize a single URL and print the JSON response
    Summarize { url: String },
}

fn build_state(cli: &Cli) -> anyhow::Result<AppState> {
    let mut ai_config = AiConfig {
        api_key: cli.api_key.clone(),
        ..AiConfig::default()
    };
    if let Some(model) = &cli.model {
        ai_config.primary_model = model.clone();
    }
    if let Some(model) = &cli.fallback_model {
        ai_config.secondary_model = model.clone();
    }
    if ai_config.api_key.is_none() {
        info!("no API key configured; AI summaries will be degraded");
    }

    let summarizer = Arc::new(AiClient::new(ai_config).context("failed to build AI client")?);
    let http = nf_scraper::build_client().context("failed to build fetch client")?;
    Ok(AppState::new(http, summarizer, PipelineConfig::default()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let state = build_state(&cli)?;

    match &cli.command {
        Commands::Serve { host, port } => {
            let app = nf_web::create_app(state).await;
            let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port))
                .await
                .with_context(|| format!("failed to bind {}:{}", host, port))?;
            info!("📰 NewsFast listening on {}:{}", host, port);
            axum::serve(listener, app).await?;
        }
        Commands::Summarize { url } => {
            info!("summarizing {}", url);
            let response = nf_web::pipeline::run(&state, url).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
