//! Application configuration and CLI argument parsing.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::models;

/// Hardware acceleration provider for ONNX models.
/// Auto-detected based on platform if not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// CPU inference (default fallback, always available)
    #[default]
    Cpu,
    /// NVIDIA CUDA acceleration (Linux only, requires CUDA toolkit)
    Cuda,
    /// Apple CoreML acceleration (macOS only, uses Neural Engine)
    #[value(name = "coreml")]
    CoreMl,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sherpa_provider())
    }
}

impl Provider {
    /// Convert to sherpa-rs provider string.
    pub fn as_sherpa_provider(&self) -> &'static str {
        match self {
            Provider::Cpu => "cpu",
            Provider::Cuda => "cuda",
            Provider::CoreMl => "coreml",
        }
    }
}

/// Wolof TTS demo configuration.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "wolof-tts")]
#[command(author, version, about = "Wolof text-to-speech web demo", long_about = None)]
pub struct AppConfig {
    /// List all known pretrained models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Show detailed information about a specific model and exit
    #[arg(long)]
    pub model_info: Option<String>,

    /// Directory containing model files
    #[arg(long, short = 'd', env = "MODEL_DIR", default_value_os_t = default_model_dir())]
    pub model_dir: PathBuf,

    /// Pretrained model name (directory under <model-dir>/tts)
    #[arg(long, short = 'm', default_value = "vits-mms-wol")]
    pub model: String,

    /// Language tag sent with every synthesis request
    #[arg(long, short = 'l', default_value = "wo")]
    pub language: String,

    /// Reference voice sample used to condition the generated speech
    #[arg(long, default_value = "female_voice_sample.wav")]
    pub speaker_wav: PathBuf,

    /// Output audio file, overwritten on every request
    #[arg(long, short = 'o', default_value = "output.wav")]
    pub output_path: PathBuf,

    /// Address the web UI binds to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port the web UI listens on
    #[arg(long, short = 'p', env = "PORT", default_value = "7860")]
    pub port: u16,

    /// Hardware acceleration provider (auto-detected if not specified)
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Number of inference threads (0 = auto-detect based on CPU cores)
    #[arg(long, default_value = "0")]
    pub num_threads: usize,

    /// Speech speed multiplier
    #[arg(long, default_value = "1.0")]
    pub tts_speed: f32,

    /// Speaker ID for multi-speaker models
    #[arg(long, default_value = "0")]
    pub speaker_id: i32,

    /// Resample generated audio to this rate (Hz) before writing
    #[arg(long)]
    pub output_sample_rate: Option<u32>,

    /// Download the model archive if it is not present in the model directory
    #[arg(long)]
    pub download: bool,

    /// Override the archive URL used by --download
    #[arg(long)]
    pub model_url: Option<String>,

    /// Show the underlying error message in the UI instead of a generic notice
    #[arg(long)]
    pub show_error: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let mut config = Self::parse();

        if config.list_models {
            models::print_models();
            std::process::exit(0);
        }

        if let Some(ref name) = config.model_info {
            match models::print_model_info(name) {
                Ok(_) => std::process::exit(0),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        // Device selection happens once; the result is fixed for the rest of the run.
        config.provider = Some(config.effective_provider());
        config.normalize_threads();
        config
    }

    /// Auto-detect the inference thread count when it is 0.
    ///
    /// With CUDA the GPU handles parallelism, so a single CPU thread avoids
    /// contention. On CPU, cores/3 leaves headroom for the web server.
    pub fn normalize_threads(&mut self) {
        if self.num_threads != 0 {
            return;
        }

        let cpu_cores = num_cpus::get();
        self.num_threads = if self.effective_provider() == Provider::Cuda { 1 } else { (cpu_cores / 3).max(1) };

        if self.verbose {
            info!("CPU cores: {}, Provider: {}, Threads: {}", cpu_cores, self.effective_provider(), self.num_threads);
        }
    }

    /// Get the effective provider: the explicit one, or the detected one.
    pub fn effective_provider(&self) -> Provider {
        self.provider.unwrap_or_else(detect_provider)
    }

    /// Directory holding the selected model.
    pub fn tts_dir(&self) -> PathBuf {
        self.model_dir.join("tts").join(&self.model)
    }

    /// Get the path to the VITS model.
    pub fn tts_model_path(&self) -> PathBuf {
        self.tts_dir().join("model.onnx")
    }

    /// Get the path to the TTS tokens file.
    pub fn tts_tokens_path(&self) -> PathBuf {
        self.tts_dir().join("tokens.txt")
    }

    /// Get the lexicon path if the model ships one (MMS models are character based and don't).
    pub fn tts_lexicon_path(&self) -> Option<PathBuf> {
        let path = self.tts_dir().join("lexicon.txt");
        path.exists().then_some(path)
    }

    /// Get the espeak-ng data directory if the model ships one.
    pub fn tts_data_dir(&self) -> Option<PathBuf> {
        let path = self.tts_dir().join("espeak-ng-data");
        path.exists().then_some(path)
    }

    /// Model files that must exist before the synthesizer can load.
    pub fn required_model_files(&self) -> [PathBuf; 2] {
        [self.tts_model_path(), self.tts_tokens_path()]
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.model_dir.exists() {
            anyhow::bail!("Model directory does not exist: {}", self.model_dir.display());
        }

        for path in &self.required_model_files() {
            if !path.exists() {
                anyhow::bail!("Required model file not found: {}", path.display());
            }
        }

        if self.tts_speed <= 0.0 {
            anyhow::bail!("TTS speed must be positive");
        }

        if self.language.trim().is_empty() {
            anyhow::bail!("Language tag must not be empty");
        }

        if let Some(rate) = self.output_sample_rate
            && !(8000..=192_000).contains(&rate)
        {
            anyhow::bail!("Output sample rate must be between 8000 and 192000 Hz, got {}", rate);
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Model directory: {}", self.model_dir.display());
        info!("  Model: {}", self.model);
        info!("  Language: {}", self.language);
        info!("  Reference voice: {}", self.speaker_wav.display());
        info!("  Output file: {}", self.output_path.display());
        info!("  Provider: {}", self.effective_provider());
        info!("  Threads: {}", self.num_threads);
        info!("  TTS speed: {}", self.tts_speed);
        info!("  Speaker ID: {}", self.speaker_id);
        if let Some(rate) = self.output_sample_rate {
            info!("  Output sample rate: {} Hz", rate);
        }
        info!("  Listening on: {}:{}", self.host, self.port);
    }
}

/// Get the default model directory (~/.wolof-tts/models).
fn default_model_dir() -> PathBuf {
    if let Some(home_dir) = dirs::home_dir() {
        home_dir.join(".wolof-tts").join("models")
    } else {
        PathBuf::from("models")
    }
}

/// Auto-detect the best hardware acceleration provider.
fn detect_provider() -> Provider {
    #[cfg(target_os = "macos")]
    {
        info!("Detected macOS, using CoreML provider");
        Provider::CoreMl
    }

    #[cfg(target_os = "linux")]
    {
        if has_nvidia_gpu() {
            info!("Detected NVIDIA GPU, using CUDA provider");
            Provider::Cuda
        } else {
            info!("No GPU detected, using CPU provider");
            Provider::Cpu
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        info!("Using CPU provider");
        Provider::Cpu
    }
}

/// Check if an NVIDIA GPU is available (Linux only).
#[cfg(target_os = "linux")]
fn has_nvidia_gpu() -> bool {
    use std::path::Path;

    let nvidia_paths = [
        "/dev/nvidia0",
        "/dev/nvidiactl",
        "/dev/nvidia-uvm",
        // Jetson devices
        "/dev/nvhost-ctrl",
        "/dev/nvhost-ctrl-gpu",
        "/etc/nv_tegra_release",
    ];

    nvidia_paths.iter().any(|path| Path::new(path).exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("wolof-tts").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_match_demo_layout() {
        let config = parse(&["--model-dir", "/tmp/models"]);
        assert_eq!(config.model, "vits-mms-wol");
        assert_eq!(config.language, "wo");
        assert_eq!(config.speaker_wav, PathBuf::from("female_voice_sample.wav"));
        assert_eq!(config.output_path, PathBuf::from("output.wav"));
        assert_eq!(config.port, 7860);
        assert!(!config.show_error);
        assert_eq!(config.tts_model_path(), PathBuf::from("/tmp/models/tts/vits-mms-wol/model.onnx"));
    }

    #[test]
    fn test_explicit_provider_wins() {
        let mut config = parse(&["--provider", "cuda"]);
        assert_eq!(config.effective_provider(), Provider::Cuda);
        config.normalize_threads();
        assert_eq!(config.num_threads, 1);
    }

    #[test]
    fn test_explicit_thread_count_is_kept() {
        let mut config = parse(&["--provider", "cpu", "--num-threads", "5"]);
        config.normalize_threads();
        assert_eq!(config.num_threads, 5);
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::CoreMl.to_string(), "coreml");
        assert_eq!(Provider::Cpu.to_string(), "cpu");
    }

    #[test]
    fn test_validate_missing_model_dir() {
        let config = parse(&["--model-dir", "/nonexistent/wolof-tts/models"]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Model directory does not exist"));
    }

    #[test]
    fn test_validate_missing_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(&["--model-dir", dir.path().to_str().unwrap()]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Required model file not found"));
    }

    #[test]
    fn test_validate_accepts_complete_model() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(&["--model-dir", dir.path().to_str().unwrap()]);
        std::fs::create_dir_all(config.tts_dir()).unwrap();
        for path in config.required_model_files() {
            std::fs::write(path, b"stub").unwrap();
        }
        config.validate().unwrap();

        let mut bad = config.clone();
        bad.output_sample_rate = Some(100);
        assert!(bad.validate().is_err());
    }
}
