//! Speech-Script Normalizer
//!
//! Turns transcripts into scripts for a TTS voice that reads digits literally.

mod normalizer;

pub use normalizer::to_speech_script;
