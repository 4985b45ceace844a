//! Audio resampling using rubato's FFT-based resampler.

use anyhow::{Context, Result};
use audioadapter_buffers::direct::InterleavedSlice;
use rubato::{Fft, FixedSync, Resampler};

/// Chunk size for FFT-based resampling (provides good quality and performance).
const CHUNK_SIZE: usize = 1024;

/// Number of sub-chunks for FFT processing (higher = better quality but more CPU).
const SUB_CHUNKS: usize = 2;

/// Resample a whole mono clip from one sample rate to another.
///
/// Used to bring generated speech to the configured output rate before it is
/// written. Returns a copy of the input when the rates already match.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        1, // mono
        FixedSync::Input,
    )
    .context("Failed to create resampler")?;

    let output_frames_max = resampler.output_frames_max();
    let mut output_buffer = vec![0.0f32; output_frames_max];

    // The resampler delays its output; skip that many leading frames and keep
    // feeding silence until the delayed tail has come out.
    let delay = resampler.output_delay();
    let expected_len = (samples.len() as f64 * to_rate as f64 / from_rate as f64).round() as usize;
    let mut output = Vec::with_capacity(delay + expected_len + output_frames_max);

    let silence = [0.0f32; CHUNK_SIZE];
    let mut chunks = samples.chunks(CHUNK_SIZE);

    while output.len() < delay + expected_len {
        // Pad the last chunk to a full frame, then flush with silence
        let mut input_chunk = chunks.next().unwrap_or(&silence[..]).to_vec();
        input_chunk.resize(CHUNK_SIZE, 0.0);

        let input_adapter = InterleavedSlice::new(&input_chunk, 1, CHUNK_SIZE).context("Failed to create input adapter")?;
        let mut output_adapter = InterleavedSlice::new_mut(&mut output_buffer, 1, output_frames_max).context("Failed to create output adapter")?;

        let (_, frames_written) = resampler
            .process_into_buffer(&input_adapter, &mut output_adapter, None)
            .map_err(|e| anyhow::anyhow!("Resampling error: {}", e))?;
        if frames_written == 0 {
            anyhow::bail!("Resampler produced no output");
        }
        output.extend_from_slice(&output_buffer[..frames_written]);
    }

    output.drain(..delay.min(output.len()));
    output.truncate(expected_len);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_upsampling() {
        // 1 second of 16kHz MMS output brought to 48kHz
        let samples = vec![0.0; 16000];
        let result = resample(&samples, 16000, 48000).unwrap();
        assert_eq!(result.len(), 48000);
    }

    #[test]
    fn test_resample_keeps_start_and_end_of_clip() {
        let samples = vec![0.5; 16000];
        let result = resample(&samples, 16000, 48000).unwrap();

        let mean = |s: &[f32]| s.iter().sum::<f32>() / s.len() as f32;

        // No leading silence from the resampler delay
        let head = mean(&result[100..400]);
        assert!((head - 0.5).abs() < 0.05, "head mean {}", head);
        // The tail of the clip survives trimming
        let tail = mean(&result[result.len() - 400..result.len() - 100]);
        assert!((tail - 0.5).abs() < 0.05, "tail mean {}", tail);
    }

    #[test]
    fn test_resample_downsampling() {
        let samples = vec![0.0; 48000];
        let result = resample(&samples, 48000, 16000).unwrap();
        assert_eq!(result.len(), 16000);
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let samples = vec![0.25, -0.25, 0.5];
        assert_eq!(resample(&samples, 16000, 16000).unwrap(), samples);
        assert!(resample(&[], 16000, 48000).unwrap().is_empty());
    }
}
