mod export;
mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trendmood_core::ClassifierKind;

use crate::run::RunArgs;

#[derive(Debug, Parser)]
#[command(name = "trendmood")]
#[command(about = "Sentiment verdict for the most popular videos in a region")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect the most-popular chart, classify every title, and print the verdict
    Run(RunArgs),
    /// Classify a single title and print its label and confidence
    Classify {
        /// Text to classify
        text: String,

        /// Classifier backend (huggingface or lexicon); overrides TRENDMOOD_CLASSIFIER
        #[arg(long)]
        classifier: Option<ClassifierKind>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = trendmood_core::load_app_config()?;
    init_tracing(&config.log_level);

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Run(args) => run::run_analysis(&config, &args).await,
        Commands::Classify { text, classifier } => {
            run::run_classify(&config, &text, classifier).await
        }
    }
}

/// Logs go to stderr so stdout carries only the report.
/// `RUST_LOG` wins over the configured default level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
