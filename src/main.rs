//! commitgen - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commitgen::{Config, GitCli, MessageGenerator, OpenAiClient, RetryPolicy, pipeline};

/// Generate a commit message for the staged changes and commit them.
#[derive(Parser, Debug)]
#[command(name = "commitgen")]
#[command(about = "Generate a commit message for staged changes using an LLM and commit")]
#[command(version)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Step 1: Credentials (the only fatal failure)
    let config = Config::load().context("OpenAI credentials are required")?;
    let client = OpenAiClient::new(&config).context("Failed to set up the OpenAI client")?;
    let generator = MessageGenerator::new(client, config.models.clone(), RetryPolicy::default());

    // Step 2: Run the pipeline in the current directory
    let git = GitCli::new(".");
    let outcome = pipeline::run(&git, &generator).await;

    println!("{outcome}");

    Ok(())
}
