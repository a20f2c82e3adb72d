use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docflow::agents::{user_message, DocumentAgent};
use docflow::config::Config;
use docflow::types::DocumentSubmission;

#[derive(Parser, Debug)]
#[command(
    name = "docflow",
    about = "Extract text from a document and ask the model about it"
)]
struct Args {
    /// Path of the document to analyze
    file: PathBuf,

    /// User id the upload is recorded under
    #[arg(long, default_value_t = 0)]
    user: i64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;
    if config.llm.google_api_key.is_empty() {
        anyhow::bail!("GOOGLE_API_KEY must be set");
    }

    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("invalid file name: {}", args.file.display()))?;

    let bytes = tokio::fs::read(&args.file).await?;
    info!(file = %args.file.display(), size = bytes.len(), "Read document");

    let agent = DocumentAgent::from_config(&config);
    let submission = DocumentSubmission::new(bytes, file_name);

    match agent.handle_submission(args.user, submission).await {
        Ok(analysis) => {
            info!(total_tokens = analysis.usage.total_tokens, "Analysis complete");
            println!("{}", analysis.reply);
        }
        Err(e) => {
            error!(error = %e, "Submission failed");
            println!("{}", user_message(&e));
            std::process::exit(1);
        }
    }

    Ok(())
}
