//! Reference voice sample loading.

use std::path::Path;

use tracing::debug;

use super::TtsError;
use crate::audio::{self, util};

/// Characteristics extracted from a reference voice recording.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceVoice {
    pub sample_rate: u32,
    pub rms: f32,
    pub duration_secs: f64,
}

impl ReferenceVoice {
    /// Load a reference sample from disk.
    ///
    /// # Errors
    /// Returns `TtsError::ReferenceAudio` if the file is missing or is not a readable WAV.
    pub fn load(path: &Path) -> Result<Self, TtsError> {
        let decoded = audio::read_wav(path).map_err(|source| TtsError::ReferenceAudio { path: path.to_path_buf(), source })?;

        let voice = Self { sample_rate: decoded.sample_rate, rms: util::rms(&decoded.samples), duration_secs: decoded.duration_secs() };
        debug!("Reference voice {}: {:.2}s at {} Hz, rms {:.4}", path.display(), voice.duration_secs, voice.sample_rate, voice.rms);
        Ok(voice)
    }
}
