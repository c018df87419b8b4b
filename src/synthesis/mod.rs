//! Speech Synthesis
//!
//! The `Synthesizer` capability, its DECtalk implementation, and the batch
//! driver that produces indexed transcript/audio pairs.

mod batch;
mod dectalk;

pub use batch::{BatchReport, BatchSynthesizer};
pub use dectalk::DecTalkSynthesizer;

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Audio file produced by a synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioHandle {
    pub path: PathBuf,
}

impl AudioHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Text-to-speech engine
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Render `text` to a WAV file at `output`.
    async fn synthesize(&self, text: &str, output: &Path) -> Result<AudioHandle>;

    /// Best-effort recovery after a failed synthesis.
    async fn repair(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: Synthesizer + ?Sized> Synthesizer for &T {
    async fn synthesize(&self, text: &str, output: &Path) -> Result<AudioHandle> {
        (**self).synthesize(text, output).await
    }

    async fn repair(&self) -> Result<()> {
        (**self).repair().await
    }
}
