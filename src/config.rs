use std::path::PathBuf;
use std::time::Duration;

const API_KEY_PLACEHOLDER: &str = "<YOUR_OPENAI_KEY>";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("OPENAI_KEY is not set; please provide your OpenAI API key")]
    MissingApiKey,

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openai_key: String,
    pub openai_base_url: String,
    pub output_dir: PathBuf,
    pub silence_file: PathBuf,
    pub rate_limit_max_calls: usize,
    pub rate_limit_period_secs: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let openai_key = lookup("OPENAI_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != API_KEY_PLACEHOLDER)
            .ok_or(ConfigError::MissingApiKey)?;

        let openai_base_url = get("OPENAI_BASE_URL", DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let rate_limit_max_calls = parse_positive(&lookup, "RATE_LIMIT_MAX_CALLS", 5)?;
        let rate_limit_period_secs = parse_positive(&lookup, "RATE_LIMIT_PERIOD_SECS", 30)?;
        let request_timeout_secs = parse_positive(&lookup, "REQUEST_TIMEOUT_SECS", 60)?;

        Ok(Self {
            host: get("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 7860)?,
            openai_key,
            openai_base_url,
            output_dir: get("OUTPUT_DIR", "finish").into(),
            silence_file: get("SILENCE_FILE", "assets/1-second-of-silence.mp3").into(),
            rate_limit_max_calls,
            rate_limit_period_secs,
            request_timeout_secs,
        })
    }

    pub fn rate_limit_period(&self) -> Duration {
        Duration::from_secs(self.rate_limit_period_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_positive<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Default,
{
    let value = parse(lookup, key, default)?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: lookup(key).unwrap_or_default(),
        });
    }
    Ok(value)
}
