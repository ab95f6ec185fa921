pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::tts::{OutputFormat, SynthesisRequest, TtsModel, Voice};

fn default_speed() -> f32 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub model: TtsModel,
    #[serde(default)]
    pub voice: Voice,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_speed")]
    pub speed: f32,
    #[serde(default)]
    pub custom_file_name: String,
}

impl From<SynthesizeRequest> for SynthesisRequest {
    fn from(request: SynthesizeRequest) -> Self {
        Self {
            text: request.text,
            model: request.model,
            voice: request.voice,
            output_format: request.output_format,
            speed: request.speed,
            custom_file_name: Some(request.custom_file_name).filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub file_name: String,
    pub path: String,
    pub url: String,
    pub silence: bool,
}

#[derive(Debug, Serialize)]
pub struct Choices<T> {
    pub choices: Vec<T>,
    pub default: T,
}

#[derive(Debug, Serialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub models: Choices<TtsModel>,
    pub voices: Choices<Voice>,
    pub output_formats: Choices<OutputFormat>,
    pub speed: SpeedRange,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
