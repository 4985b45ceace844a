//! Shared sample-level utilities.

/// Convert interleaved f32 samples to mono.
///
/// Mono input is copied; multi-channel frames are mixed by averaging.
pub fn to_mono(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        data.to_vec()
    } else {
        data.chunks(channels).map(|frame| frame.iter().sum::<f32>() / channels as f32).collect()
    }
}

/// Root-mean-square level of a clip (0.0 for an empty clip).
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Scale a clip so its RMS level matches `target_rms`.
///
/// The gain is capped so the peak never exceeds full scale. Silent clips and
/// non-positive targets are left untouched.
pub fn match_loudness(samples: &mut [f32], target_rms: f32) {
    let current = rms(samples);
    if current <= f32::EPSILON || target_rms <= f32::EPSILON {
        return;
    }

    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let gain = (target_rms / current).min(1.0 / peak);

    for s in samples.iter_mut() {
        *s *= gain;
    }
}
