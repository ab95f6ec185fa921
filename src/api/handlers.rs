use axum::{extract::State, Json};
use lazy_static::lazy_static;
use std::sync::Arc;
use url::Url;

use super::{
    Choices, HealthResponse, OptionsResponse, SpeedRange, SynthesizeRequest, SynthesizeResponse,
};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::tts::{
    OutputFormat, SynthesisOutput, SynthesisRequest, TtsModel, Voice, MAX_SPEED, MIN_SPEED,
};

lazy_static! {
    static ref FINISH_BASE: Url = Url::parse("http://localhost/finish").unwrap();
}

/// Path under `/finish` with the file name percent-encoded as one segment.
fn finished_url(file_name: &str) -> String {
    let mut url = FINISH_BASE.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(file_name);
    }
    url.path().to_string()
}

pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, AppError> {
    let request: SynthesisRequest = request.into();
    let output = state.synthesizer.synthesize(&request).await?;

    let path = output.path().display().to_string();

    let response = match output {
        SynthesisOutput::Written { file_name, .. } => SynthesizeResponse {
            url: finished_url(&file_name),
            file_name,
            path,
            silence: false,
        },
        SynthesisOutput::Silence(silence) => SynthesizeResponse {
            file_name: silence
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path,
            url: "/silence".to_string(),
            silence: true,
        },
    };

    Ok(Json(response))
}

/// Choices for the form: the web page defaults to the HD model and `nova`.
pub async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        models: Choices {
            choices: TtsModel::ALL.to_vec(),
            default: TtsModel::Tts1Hd,
        },
        voices: Choices {
            choices: Voice::ALL.to_vec(),
            default: Voice::Nova,
        },
        output_formats: Choices {
            choices: OutputFormat::ALL.to_vec(),
            default: OutputFormat::Mp3,
        },
        speed: SpeedRange {
            min: MIN_SPEED,
            max: MAX_SPEED,
            step: 0.1,
            default: 1.0,
        },
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
