//! Text-to-speech module using sherpa-rs.
//!
//! Defines the synthesis capability the web demo delegates to, and the
//! VITS-backed implementation of it.

mod reference;
mod synthesizer;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use reference::ReferenceVoice;
pub use synthesizer::Synthesizer;

/// One synthesis request: what to say, whose voice to condition on, and in which language.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub speaker_wav: PathBuf,
    pub language: String,
}

/// Failures of the synthesis capability.
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("reference voice sample {path} could not be read")]
    ReferenceAudio {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("language '{requested}' is not supported by the loaded model (expects '{supported}')")]
    UnsupportedLanguage { requested: String, supported: String },

    #[error("TTS generation failed: {0}")]
    Generation(String),

    #[error("resampling generated audio failed")]
    Resample(#[source] anyhow::Error),

    #[error("failed to write {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("model file not found: {0}")]
    ModelFiles(PathBuf),
}

/// Any object exposing a "text + reference audio -> audio file" operation.
pub trait SpeechSynthesizer {
    /// Synthesize `request` and write the audio to `file_path`, replacing any existing file.
    fn tts_to_file(&mut self, request: &SynthesisRequest, file_path: &Path) -> Result<(), TtsError>;

    /// Sample rate of the files this synthesizer writes.
    fn sample_rate(&self) -> u32;
}
