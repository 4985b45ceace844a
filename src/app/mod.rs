//! Adapter between the web shell and the synthesis capability.

mod adapter;

pub use adapter::{SharedSynthesizer, SpeechAdapter};

#[cfg(test)]
pub(crate) use adapter::tests as adapter_tests;
