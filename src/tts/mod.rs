pub mod filename;
pub mod handler;
pub mod limiter;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

pub use handler::{SynthesisHandler, SynthesisOutput};
pub use limiter::RateLimiter;
pub use openai::OpenAiProvider;

pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TtsModel {
    #[default]
    #[serde(rename = "tts-1")]
    Tts1,
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
}

impl TtsModel {
    pub const ALL: [TtsModel; 2] = [TtsModel::Tts1, TtsModel::Tts1Hd];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Mp3,
        OutputFormat::Opus,
        OutputFormat::Aac,
        OutputFormat::Flac,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Opus => "opus",
            OutputFormat::Aac => "aac",
            OutputFormat::Flac => "flac",
        }
    }
}

/// One synthesis call as submitted by the caller.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub model: TtsModel,
    pub voice: Voice,
    pub output_format: OutputFormat,
    pub speed: f32,
    pub custom_file_name: Option<String>,
}

/// Body of the provider's speech endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechParams<'a> {
    pub model: TtsModel,
    pub voice: Voice,
    pub input: &'a str,
    pub response_format: OutputFormat,
    pub speed: f32,
}

/// Remote text-to-speech backend returning encoded audio.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn create_speech(&self, params: &SpeechParams<'_>) -> Result<Vec<u8>, ProviderError>;
}
