//! The single delegation the demo is built around: text in, audio file path out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::tts::{SpeechSynthesizer, SynthesisRequest};

/// Synthesis capability shared between request handlers.
pub type SharedSynthesizer = Arc<Mutex<dyn SpeechSynthesizer + Send>>;

/// Forwards text to the synthesis capability and returns the fixed output path.
///
/// Every call writes the same file. The lock serializes synthesis, but a
/// reader fetching the file while the next request writes it may still see a
/// partial clip; the last writer wins.
#[derive(Clone)]
pub struct SpeechAdapter {
    synthesizer: SharedSynthesizer,
    output_path: PathBuf,
    speaker_wav: PathBuf,
    language: String,
}

impl SpeechAdapter {
    pub fn new(synthesizer: SharedSynthesizer, output_path: PathBuf, speaker_wav: PathBuf, language: String) -> Self {
        Self { synthesizer, output_path, speaker_wav, language }
    }

    /// Synthesize `text` into the output file and return its path.
    ///
    /// No validation, retry or fallback: capability errors propagate as-is.
    pub fn generate_speech(&self, text: &str) -> Result<PathBuf> {
        let request = SynthesisRequest { text: text.to_string(), speaker_wav: self.speaker_wav.clone(), language: self.language.clone() };

        debug!("Synthesis request: {} chars, language {}", text.chars().count(), self.language);

        self.synthesizer
            .lock()
            .tts_to_file(&request, &self.output_path)
            .with_context(|| format!("Speech synthesis into {} failed", self.output_path.display()))?;

        info!("🔊 Wrote {}", self.output_path.display());
        Ok(self.output_path.clone())
    }

    /// The fixed path every request writes to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio;
    use crate::tts::{ReferenceVoice, TtsError};

    /// Writes a tone whose length tracks the text, conditioned on the reference level.
    #[derive(Default)]
    pub(crate) struct ToneSynthesizer {
        pub texts: Vec<String>,
    }

    impl SpeechSynthesizer for ToneSynthesizer {
        fn tts_to_file(&mut self, request: &SynthesisRequest, file_path: &Path) -> Result<(), TtsError> {
            let reference = ReferenceVoice::load(&request.speaker_wav)?;
            self.texts.push(request.text.clone());

            let samples = vec![reference.rms; request.text.len() * 100];
            audio::write_wav(file_path, &samples, self.sample_rate()).map_err(|source| TtsError::Output { path: file_path.to_path_buf(), source })
        }

        fn sample_rate(&self) -> u32 {
            16000
        }
    }

    /// Demo working directory with a reference sample and a tone synthesizer.
    pub(crate) fn demo_adapter(dir: &Path) -> (SpeechAdapter, Arc<Mutex<ToneSynthesizer>>) {
        let speaker_wav = dir.join("female_voice_sample.wav");
        audio::write_wav(&speaker_wav, &[0.1; 1600], 16000).unwrap();

        let tone = Arc::new(Mutex::new(ToneSynthesizer::default()));
        let shared: SharedSynthesizer = tone.clone();
        (SpeechAdapter::new(shared, dir.join("output.wav"), speaker_wav, "wo".to_string()), tone)
    }

    #[test]
    fn test_returns_fixed_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let (adapter, _) = demo_adapter(dir.path());

        let path = adapter.generate_speech("Na nga def?").unwrap();
        assert_eq!(path, dir.path().join("output.wav"));
        assert!(path.exists());
    }

    #[test]
    fn test_sequential_calls_overwrite_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let (adapter, _) = demo_adapter(dir.path());

        let first = adapter.generate_speech("Jërëjëf bu baax").unwrap();
        let second = adapter.generate_speech("Waaw").unwrap();

        assert_eq!(first, second);
        assert_eq!(audio::read_wav(&second).unwrap().samples.len(), "Waaw".len() * 100);
        // Reference sample plus one output artifact
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_missing_reference_sample_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (adapter, tone) = demo_adapter(dir.path());
        std::fs::remove_file(dir.path().join("female_voice_sample.wav")).unwrap();

        let err = adapter.generate_speech("Salaam aleekum").unwrap_err();
        assert!(format!("{:#}", err).contains("female_voice_sample.wav"));
        assert!(tone.lock().texts.is_empty());
        assert!(!dir.path().join("output.wav").exists());
    }

    #[test]
    fn test_empty_text_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let (adapter, tone) = demo_adapter(dir.path());

        adapter.generate_speech("").unwrap();
        assert_eq!(tone.lock().texts, vec![String::new()]);
    }
}
