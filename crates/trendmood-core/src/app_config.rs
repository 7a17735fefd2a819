use crate::ConfigError;

/// Which sentiment classifier backs a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    /// Remote text-classification model behind an HTTP inference endpoint.
    HuggingFace,
    /// Offline word lexicon; no network access.
    Lexicon,
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierKind::HuggingFace => write!(f, "huggingface"),
            ClassifierKind::Lexicon => write!(f, "lexicon"),
        }
    }
}

impl std::str::FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ClassifierKind::HuggingFace),
            "lexicon" => Ok(ClassifierKind::Lexicon),
            other => Err(format!(
                "unknown classifier '{other}' (expected huggingface or lexicon)"
            )),
        }
    }
}

/// What to do when the classifier fails on one title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierErrorPolicy {
    /// Stop the whole run on the first failure.
    #[default]
    Abort,
    /// Log the failure, leave the video out of the aggregate, and continue.
    Skip,
}

impl std::fmt::Display for ClassifierErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierErrorPolicy::Abort => write!(f, "abort"),
            ClassifierErrorPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for ClassifierErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ClassifierErrorPolicy::Abort),
            "skip" => Ok(ClassifierErrorPolicy::Skip),
            other => Err(format!(
                "unknown classifier error policy '{other}' (expected abort or skip)"
            )),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Only the collector needs it, so a missing key is reported when a run
    /// starts rather than at load time.
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: String,
    pub region_code: String,
    pub page_size: u32,
    pub max_videos: usize,
    pub classifier: ClassifierKind,
    pub classifier_url: String,
    pub hf_api_token: Option<String>,
    pub classifier_concurrency: usize,
    pub on_classifier_error: ClassifierErrorPolicy,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl AppConfig {
    /// Returns the video-catalog API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `YOUTUBE_API_KEY` is unset or blank.
    pub fn require_youtube_api_key(&self) -> Result<&str, ConfigError> {
        self.youtube_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("YOUTUBE_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_base_url", &self.youtube_base_url)
            .field("region_code", &self.region_code)
            .field("page_size", &self.page_size)
            .field("max_videos", &self.max_videos)
            .field("classifier", &self.classifier)
            .field("classifier_url", &self.classifier_url)
            .field(
                "hf_api_token",
                &self.hf_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("classifier_concurrency", &self.classifier_concurrency)
            .field("on_classifier_error", &self.on_classifier_error)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
