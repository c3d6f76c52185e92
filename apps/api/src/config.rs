use anyhow::{bail, Context, Result};

/// Smallest and largest number of recipes a single request may ask for.
pub const RECIPE_COUNT_RANGE: std::ops::RangeInclusive<usize> = 1..=5;
/// Accepted range for the ingredient confidence threshold.
pub const CONFIDENCE_THRESHOLD_RANGE: std::ops::RangeInclusive<f32> = 0.05..=1.0;

/// Application configuration loaded from environment variables.
/// Startup fails if `GEMINI_API_KEY` is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub default_recipe_count: usize,
    pub default_confidence_threshold: f32,
    pub llm_timeout_secs: u64,
    pub max_upload_bytes: usize,
    /// When set, every detected ingredient gets this confidence instead of a placeholder draw.
    pub fixed_confidence: Option<f32>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_recipe_count: parse_env("DEFAULT_RECIPE_COUNT", 3)?,
            default_confidence_threshold: parse_env("DEFAULT_CONFIDENCE_THRESHOLD", 0.1)?,
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            fixed_confidence: parse_optional_env("FIXED_CONFIDENCE")?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !RECIPE_COUNT_RANGE.contains(&self.default_recipe_count) {
            bail!(
                "DEFAULT_RECIPE_COUNT must be between {} and {}",
                RECIPE_COUNT_RANGE.start(),
                RECIPE_COUNT_RANGE.end()
            );
        }
        if !CONFIDENCE_THRESHOLD_RANGE.contains(&self.default_confidence_threshold) {
            bail!(
                "DEFAULT_CONFIDENCE_THRESHOLD must be between {} and {}",
                CONFIDENCE_THRESHOLD_RANGE.start(),
                CONFIDENCE_THRESHOLD_RANGE.end()
            );
        }
        if let Some(c) = self.fixed_confidence {
            if !(0.0..=1.0).contains(&c) {
                bail!("FIXED_CONFIDENCE must be between 0.0 and 1.0");
            }
        }
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        _ => Ok(None),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by router and handler tests. Never reads the environment.
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            default_recipe_count: 3,
            default_confidence_threshold: 0.1,
            llm_timeout_secs: 5,
            max_upload_bytes: 1024 * 1024,
            fixed_confidence: None,
        }
    }
}
