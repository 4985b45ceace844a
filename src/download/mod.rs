//! Pretrained model fetching.
//!
//! Downloads sherpa-onnx model archives (`.tar.bz2`) and unpacks them into the model directory.

mod fetcher;

pub use fetcher::{ensure_model, unpack_archive};
