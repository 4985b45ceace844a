//! Text-to-speech synthesizer using VITS models.

use std::path::Path;

use sherpa_rs::OnnxConfig;
use sherpa_rs::tts::{VitsTts, VitsTtsConfig};
use tracing::{debug, info};

use super::{ReferenceVoice, SpeechSynthesizer, SynthesisRequest, TtsError};
use crate::audio::{self, resampler, util};
use crate::config::{AppConfig, Provider, models};

/// MMS VITS models are trained at 16 kHz; assumed until the model reports its rate.
const DEFAULT_SAMPLE_RATE: u32 = 16000;

/// Text-to-speech synthesizer backed by a sherpa-onnx VITS model.
pub struct Synthesizer {
    tts: VitsTts,                    // VITS TTS engine
    language: String,                // Language tag the model was trained for
    speaker_id: i32,                 // Speaker/voice identifier
    speed: f32,                      // Speech speed multiplier
    output_sample_rate: Option<u32>, // Resampling target, if any
    model_sample_rate: Option<u32>,  // Rate reported by the model, once it has generated
}

impl Synthesizer {
    /// Load the configured VITS model.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    /// * `provider` - Compute device selected at startup
    ///
    /// # Errors
    /// Returns `TtsError::ModelFiles` if the model or tokens file is missing.
    pub fn new(config: &AppConfig, provider: Provider) -> Result<Self, TtsError> {
        for path in config.required_model_files() {
            if !path.exists() {
                return Err(TtsError::ModelFiles(path));
            }
        }

        info!("Initializing VITS TTS synthesizer with {} provider", provider);
        info!("TTS model: {} (speaker ID: {})", config.model, config.speaker_id);

        let language = models::get_model(&config.model).map(|m| m.language_tag.to_string()).unwrap_or_else(|| config.language.clone());

        let tts_config = VitsTtsConfig {
            model: config.tts_model_path().to_string_lossy().to_string(),
            tokens: config.tts_tokens_path().to_string_lossy().to_string(),
            lexicon: config.tts_lexicon_path().map(|p| p.to_string_lossy().to_string()).unwrap_or_default(),
            data_dir: config.tts_data_dir().map(|p| p.to_string_lossy().to_string()).unwrap_or_default(),
            length_scale: 1.0 / config.tts_speed, // length_scale is inverse of speed
            noise_scale: 0.667,
            noise_scale_w: 0.8,
            onnx_config: OnnxConfig {
                provider: provider.as_sherpa_provider().to_string(),
                num_threads: config.num_threads.try_into().unwrap_or(2),
                debug: config.verbose,
            },
            ..Default::default()
        };

        let tts = VitsTts::new(tts_config);

        Ok(Self {
            tts,
            language,
            speaker_id: config.speaker_id,
            speed: config.tts_speed,
            output_sample_rate: config.output_sample_rate,
            model_sample_rate: None,
        })
    }

    /// Generate raw samples for `text`. Blank text yields an empty clip.
    fn generate(&mut self, text: &str) -> Result<Vec<f32>, TtsError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!("Synthesizing: \"{}\"", text);

        let audio = self.tts.create(text, self.speaker_id, self.speed).map_err(|e| TtsError::Generation(e.to_string()))?;
        self.model_sample_rate = Some(audio.sample_rate);

        info!("🎵 Generated speech ({} samples at {} Hz)", audio.samples.len(), audio.sample_rate);
        Ok(audio.samples)
    }

    /// Whether `sample_rate()` comes from the model rather than the assumed default.
    pub fn is_sample_rate_known(&self) -> bool {
        self.output_sample_rate.is_some() || self.model_sample_rate.is_some()
    }

    fn model_rate(&self) -> u32 {
        self.model_sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    /// Human-readable sample rate for startup logging.
    pub fn describe_sample_rate(&self) -> String {
        describe_sample_rate(self.sample_rate(), self.is_sample_rate_known())
    }
}

fn describe_sample_rate(rate: u32, known: bool) -> String {
    if known { format!("{} Hz", rate) } else { format!("{} Hz (assumed until the first synthesis)", rate) }
}

impl SpeechSynthesizer for Synthesizer {
    fn tts_to_file(&mut self, request: &SynthesisRequest, file_path: &Path) -> Result<(), TtsError> {
        let reference = check_request(request, &self.language)?;

        let samples = self.generate(&request.text)?;
        let (samples, sample_rate) = condition(samples, self.model_rate(), &reference, self.output_sample_rate)?;

        audio::write_wav(file_path, &samples, sample_rate).map_err(|source| TtsError::Output { path: file_path.to_path_buf(), source })
    }

    fn sample_rate(&self) -> u32 {
        self.output_sample_rate.unwrap_or_else(|| self.model_rate())
    }
}

/// Load the request's reference voice, then check its language against the model's.
///
/// The reference is loaded first, so a missing sample fails even when the tag is also wrong.
pub fn check_request(request: &SynthesisRequest, model_language: &str) -> Result<ReferenceVoice, TtsError> {
    let reference = ReferenceVoice::load(&request.speaker_wav)?;

    if !request.language.eq_ignore_ascii_case(model_language) {
        return Err(TtsError::UnsupportedLanguage { requested: request.language.clone(), supported: model_language.to_string() });
    }

    Ok(reference)
}

/// Condition generated speech on the reference voice and bring it to the output rate.
///
/// VITS models have no zero-shot cloning, so the reference only sets the level
/// of the output clip.
pub fn condition(mut samples: Vec<f32>, model_rate: u32, reference: &ReferenceVoice, output_rate: Option<u32>) -> Result<(Vec<f32>, u32), TtsError> {
    util::match_loudness(&mut samples, reference.rms);

    match output_rate {
        Some(rate) if rate != model_rate => Ok((resampler::resample(&samples, model_rate, rate).map_err(TtsError::Resample)?, rate)),
        _ => Ok((samples, model_rate)),
    }
}
