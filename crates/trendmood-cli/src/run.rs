//! `run` and `classify` command handlers.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, ValueEnum};
use trendmood_core::config::{validate_page_size, validate_region_code};
use trendmood_core::{AppConfig, ClassifierErrorPolicy, ClassifierKind, VideoRecord};
use trendmood_sentiment::{
    analyze, Analysis, HuggingFaceClassifier, LexiconClassifier, PipelineOptions,
    SentimentClassifier,
};
use trendmood_youtube::{normalize_videos, YoutubeClient};

use crate::export;

/// Arguments for `trendmood run`. Unset flags fall back to the environment config.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Two-letter region code of the most-popular chart (default: TRENDMOOD_REGION_CODE or CA)
    #[arg(long)]
    pub region: Option<String>,

    /// Videos requested per page, 1-50 (default: TRENDMOOD_PAGE_SIZE or 50)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Stop collecting after this many videos (default: TRENDMOOD_MAX_VIDEOS or 200)
    #[arg(long)]
    pub max_videos: Option<usize>,

    /// Classifier backend: huggingface or lexicon
    #[arg(long)]
    pub classifier: Option<ClassifierKind>,

    /// What to do when a title fails to classify: abort or skip
    #[arg(long)]
    pub on_classifier_error: Option<ClassifierErrorPolicy>,

    /// Also write the scored table to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Format of the --output file
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Effective settings for one run after applying CLI overrides to the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunSettings {
    pub region: String,
    pub page_size: u32,
    pub max_videos: usize,
    pub classifier: ClassifierKind,
    pub on_error: ClassifierErrorPolicy,
}

impl RunSettings {
    pub(crate) fn resolve(config: &AppConfig, args: &RunArgs) -> anyhow::Result<Self> {
        let region = match &args.region {
            Some(raw) => validate_region_code(raw).map_err(|e| anyhow::anyhow!("--region: {e}"))?,
            None => config.region_code.clone(),
        };

        let page_size = args.page_size.unwrap_or(config.page_size);
        validate_page_size(page_size).map_err(|e| anyhow::anyhow!("--page-size: {e}"))?;

        let max_videos = args.max_videos.unwrap_or(config.max_videos);
        if max_videos == 0 {
            anyhow::bail!("--max-videos must be at least 1");
        }

        Ok(Self {
            region,
            page_size,
            max_videos,
            classifier: args.classifier.unwrap_or(config.classifier),
            on_error: args.on_classifier_error.unwrap_or(config.on_classifier_error),
        })
    }
}

/// Collect → normalize → classify → aggregate, then print the one-line verdict.
///
/// # Errors
///
/// Fails fast on any collector, normalizer, or (under the `abort` policy)
/// classifier error, with context naming the failed stage.
pub(crate) async fn run_analysis(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let settings = RunSettings::resolve(config, args)?;
    let api_key = config.require_youtube_api_key()?;

    tracing::info!(
        region = %settings.region,
        page_size = settings.page_size,
        max_videos = settings.max_videos,
        classifier = %settings.classifier,
        on_classifier_error = %settings.on_error,
        "starting trending sentiment run"
    );

    let client = YoutubeClient::with_base_url(
        api_key,
        config.request_timeout_secs,
        &config.youtube_base_url,
    )?;
    let items = client
        .fetch_most_popular(&settings.region, settings.page_size, settings.max_videos)
        .await
        .with_context(|| {
            format!(
                "failed to collect most-popular videos for region {}",
                settings.region
            )
        })?;

    let videos = normalize_videos(items).context("most-popular batch failed validation")?;

    let date = Local::now().date_naive();
    let options = PipelineOptions {
        concurrency: config.classifier_concurrency,
        on_error: settings.on_error,
    };

    let analysis = match settings.classifier {
        ClassifierKind::HuggingFace => {
            let classifier = huggingface(config)?;
            analyze_batch(&classifier, &videos, date, options).await?
        }
        ClassifierKind::Lexicon => {
            analyze_batch(&LexiconClassifier::new(), &videos, date, options).await?
        }
    };

    if !analysis.skipped.is_empty() {
        tracing::warn!(
            skipped = analysis.skipped.len(),
            "some titles could not be classified and were left out of the verdict"
        );
    }

    if let Some(path) = &args.output {
        export::write_report(path, args.format, &videos, &analysis)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), format = ?args.format, "wrote scored table");
    }

    println!("{}", analysis.verdict.summary_line());
    Ok(())
}

/// Classify one piece of text and print `LABEL confidence`.
///
/// # Errors
///
/// Returns an error if the classifier cannot be built or rejects the text.
pub(crate) async fn run_classify(
    config: &AppConfig,
    text: &str,
    kind: Option<ClassifierKind>,
) -> anyhow::Result<()> {
    let classification = match kind.unwrap_or(config.classifier) {
        ClassifierKind::HuggingFace => huggingface(config)?.classify(text).await?,
        ClassifierKind::Lexicon => LexiconClassifier::new().classify(text).await?,
    };
    println!("{} {:.4}", classification.label, classification.confidence);
    Ok(())
}

fn huggingface(config: &AppConfig) -> anyhow::Result<HuggingFaceClassifier> {
    HuggingFaceClassifier::new(
        &config.classifier_url,
        config.hf_api_token.as_deref(),
        config.request_timeout_secs,
    )
    .context("failed to build classifier client")
}

async fn analyze_batch<C: SentimentClassifier>(
    classifier: &C,
    videos: &[VideoRecord],
    date: chrono::NaiveDate,
    options: PipelineOptions,
) -> anyhow::Result<Analysis> {
    analyze(classifier, videos, date, options)
        .await
        .with_context(|| format!("sentiment classification failed ({})", classifier.name()))
}
