use crate::app_config::{AppConfig, ClassifierErrorPolicy, ClassifierKind};
use crate::ConfigError;

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Upper bound the videos endpoint accepts for `maxResults`.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if a value does not parse or is out of range.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if a value does not parse or is out of range.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional =
        |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.trim().is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let youtube_base_url = or_default("TRENDMOOD_YOUTUBE_BASE_URL", DEFAULT_YOUTUBE_BASE_URL);

    let region_code = validate_region_code(&or_default("TRENDMOOD_REGION_CODE", "CA"))
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "TRENDMOOD_REGION_CODE".to_string(),
            reason,
        })?;

    let page_size = parse_u32("TRENDMOOD_PAGE_SIZE", "50")?;
    validate_page_size(page_size).map_err(|reason| ConfigError::InvalidEnvVar {
        var: "TRENDMOOD_PAGE_SIZE".to_string(),
        reason,
    })?;

    let max_videos = parse_usize("TRENDMOOD_MAX_VIDEOS", "200")?;
    if max_videos == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDMOOD_MAX_VIDEOS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let classifier = or_default("TRENDMOOD_CLASSIFIER", "huggingface")
        .parse::<ClassifierKind>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "TRENDMOOD_CLASSIFIER".to_string(),
            reason,
        })?;
    let classifier_url = or_default("TRENDMOOD_CLASSIFIER_URL", DEFAULT_CLASSIFIER_URL);
    let hf_api_token = optional("HF_API_TOKEN");

    let classifier_concurrency = parse_usize("TRENDMOOD_CLASSIFIER_CONCURRENCY", "4")?;
    if classifier_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDMOOD_CLASSIFIER_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let on_classifier_error = or_default("TRENDMOOD_ON_CLASSIFIER_ERROR", "abort")
        .parse::<ClassifierErrorPolicy>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "TRENDMOOD_ON_CLASSIFIER_ERROR".to_string(),
            reason,
        })?;

    let request_timeout_secs = parse_u64("TRENDMOOD_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("TRENDMOOD_LOG_LEVEL", "info");

    Ok(AppConfig {
        youtube_api_key,
        youtube_base_url,
        region_code,
        page_size,
        max_videos,
        classifier,
        classifier_url,
        hf_api_token,
        classifier_concurrency,
        on_classifier_error,
        request_timeout_secs,
        log_level,
    })
}

/// Checks a two-letter ISO 3166-1 region code and returns it upper-cased.
///
/// # Errors
///
/// Returns a reason string if the code is not exactly two ASCII letters.
pub fn validate_region_code(raw: &str) -> Result<String, String> {
    let code = raw.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(format!("'{raw}' is not a two-letter region code"))
    }
}

/// Checks that a page size is accepted by the videos endpoint (1..=50).
///
/// # Errors
///
/// Returns a reason string for out-of-range values.
pub fn validate_page_size(page_size: u32) -> Result<(), String> {
    if (1..=MAX_PAGE_SIZE).contains(&page_size) {
        Ok(())
    } else {
        Err(format!(
            "page size {page_size} must be between 1 and {MAX_PAGE_SIZE}"
        ))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
