use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{
    filename, RateLimiter, SpeechParams, SpeechProvider, SynthesisRequest, MAX_SPEED, MIN_SPEED,
};
use crate::error::AppError;

/// Where a synthesis result lives on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutput {
    /// Freshly generated audio under the output directory.
    Written { file_name: String, path: PathBuf },
    /// Empty input; points at the pre-packaged silence file.
    Silence(PathBuf),
}

impl SynthesisOutput {
    pub fn path(&self) -> &Path {
        match self {
            SynthesisOutput::Written { path, .. } => path,
            SynthesisOutput::Silence(path) => path,
        }
    }
}

pub struct SynthesisHandler {
    limiter: Arc<RateLimiter>,
    provider: Arc<dyn SpeechProvider>,
    output_dir: PathBuf,
    silence_file: PathBuf,
}

impl SynthesisHandler {
    pub fn new(
        limiter: Arc<RateLimiter>,
        provider: Arc<dyn SpeechProvider>,
        output_dir: PathBuf,
        silence_file: PathBuf,
    ) -> Self {
        Self {
            limiter,
            provider,
            output_dir,
            silence_file,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn silence_file(&self) -> &Path {
        &self.silence_file
    }

    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutput, AppError> {
        if !request.speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&request.speed) {
            return Err(AppError::BadRequest(format!(
                "Speed must be between {} and {}",
                MIN_SPEED, MAX_SPEED
            )));
        }

        let file_name = filename::normalize(request.custom_file_name.as_deref(), request.output_format);

        // Admission comes first, so empty requests also use up a slot.
        if !self.limiter.attempt() {
            return Err(AppError::RateLimitExceeded);
        }

        tracing::info!("Received text: {}", request.text);
        if request.text.is_empty() {
            tracing::info!("No text input, returning the default silence file");
            return Ok(SynthesisOutput::Silence(self.silence_file.clone()));
        }

        tracing::info!("Requesting speech synthesis ({:?}, {:?})", request.model, request.voice);
        let params = SpeechParams {
            model: request.model,
            voice: request.voice,
            input: &request.text,
            response_format: request.output_format,
            speed: request.speed,
        };
        let audio = self.provider.create_speech(&params).await.map_err(|e| {
            tracing::error!("Speech synthesis failed: {}", e);
            AppError::SynthesisFailed
        })?;
        tracing::info!("Speech synthesis succeeded ({} bytes)", audio.len());

        let path = self.output_dir.join(&file_name);
        tracing::info!("Writing audio file to: {}", path.display());
        tokio::fs::write(&path, &audio).await?;

        Ok(SynthesisOutput::Written { file_name, path })
    }
}
