//! ATIS Synthetic Data Pipeline
//!
//! Generates training data for ATIS speech-to-text models:
//! - Randomized ATIS transcripts from a fixed template grammar
//! - Digit-by-digit speech scripts for a literal-numeral TTS voice
//! - DECtalk synthesis of indexed transcript/audio pairs
//! - Calibrated Gaussian noise injection
//! - Whisper transcription and Gemini subtitle correction

pub mod cli;
pub mod config;
pub mod correction;
pub mod error;
pub mod noise;
pub mod pipeline;
pub mod process;
pub mod speech;
pub mod synthesis;
pub mod transcript;
pub mod transcription;

// Re-exports for convenience
pub use config::{OutputLayout, PipelineConfig, RetryPolicy};
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineOptions, PipelineSummary};
pub use speech::to_speech_script;
pub use synthesis::{AudioHandle, Synthesizer};
pub use transcript::{generate_transcript, AtisReport};
pub use transcription::{Recognizer, SubtitleHandle};
