//! WAV file reading and writing.

use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use super::util::to_mono;

/// Mono audio decoded from a WAV file.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Read a WAV file into mono f32 samples.
///
/// Integer PCM is scaled to [-1.0, 1.0]; multi-channel audio is downmixed by averaging.
pub fn read_wav(path: &Path) -> Result<DecodedAudio> {
    let mut reader = WavReader::open(path).with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<f32>, _>>().context("Failed to decode float samples")?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<f32>, _>>()
                .context("Failed to decode integer samples")?
        }
    };

    Ok(DecodedAudio { samples: to_mono(&interleaved, spec.channels.max(1) as usize), sample_rate: spec.sample_rate })
}

/// Write mono samples as a 32-bit float WAV file, replacing any existing file.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec { channels: 1, sample_rate, bits_per_sample: 32, sample_format: SampleFormat::Float };

    let mut writer = WavWriter::create(path, spec).with_context(|| format!("Failed to create WAV file {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize().context("Failed to finalize WAV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_float() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let samples: Vec<f32> = (0..1600).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();

        write_wav(&path, &samples, 16000).unwrap();
        let decoded = read_wav(&path).unwrap();

        assert_eq!(decoded.sample_rate, 16000);
        assert_eq!(decoded.samples.len(), 1600);
        assert!((decoded.duration_secs() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_read_stereo_int16_downmixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec { channels: 2, sample_rate: 22050, bits_per_sample: 16, sample_format: SampleFormat::Int };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(16384_i16).unwrap();
            writer.write_sample(0_i16).unwrap();
        }
        writer.finalize().unwrap();

        let decoded = read_wav(&path).unwrap();
        assert_eq!(decoded.sample_rate, 22050);
        assert_eq!(decoded.samples.len(), 100);
        assert!((decoded.samples[0] - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        write_wav(&path, &[0.1; 4000], 16000).unwrap();
        write_wav(&path, &[0.1; 10], 16000).unwrap();

        assert_eq!(read_wav(&path).unwrap().samples.len(), 10);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_wav(Path::new("/nonexistent/clip.wav")).unwrap_err();
        assert!(err.to_string().contains("Failed to open WAV file"));
    }
}
