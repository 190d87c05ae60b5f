use std::sync::Arc;

use wingmentor::agent::Agent;
use wingmentor::channels::CliChannel;
use wingmentor::chat::ChatSession;
use wingmentor::config::WingmanConfig;
use wingmentor::wingman::WingmanRelay;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = WingmanConfig::from_env()?;

    eprintln!("✈️  WingMentor Wingman v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   API: {}", config.api_base);
    match config.thinking_budget {
        Some(budget) => eprintln!("   Thinking budget: {}", budget),
        None => eprintln!("   Thinking budget: provider default"),
    }
    if config.api_key.is_none() {
        eprintln!("   Warning: GEMINI_API_KEY not set; Wingman cannot reach the service");
        eprintln!("     export GEMINI_API_KEY=...");
    }
    eprintln!("   Type a question and press Enter. /help for commands, /quit to exit.\n");

    let relay = Arc::new(WingmanRelay::from_config(&config)?);
    let session = Arc::new(ChatSession::new(relay));

    let agent = Agent::new(session, Box::new(CliChannel::new()));
    agent.run().await?;

    Ok(())
}
