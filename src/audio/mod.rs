//! Audio helpers for the synthesis pipeline.
//!
//! WAV file I/O via hound, level utilities, and high-quality resampling via rubato.

pub mod resampler;
pub mod util;
pub mod wav;

pub use wav::{DecodedAudio, read_wav, write_wav};
