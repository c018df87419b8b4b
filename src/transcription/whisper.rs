use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;

use super::{Recognizer, SubtitleHandle};
use crate::config::RecognizerConfig;
use crate::process::run_checked;

/// OpenAI Whisper command-line transcriber
pub struct WhisperCli {
    config: RecognizerConfig,
}

impl WhisperCli {
    pub fn new(config: RecognizerConfig) -> Self {
        Self { config }
    }

    fn command_args(&self, audio: &Path, srt_dir: &Path) -> Vec<OsString> {
        vec![
            audio.as_os_str().to_owned(),
            "--model".into(),
            self.config.model.clone().into(),
            "--output_format".into(),
            "srt".into(),
            "--output_dir".into(),
            srt_dir.as_os_str().to_owned(),
        ]
    }
}

impl Default for WhisperCli {
    fn default() -> Self {
        Self::new(RecognizerConfig::default())
    }
}

#[async_trait]
impl Recognizer for WhisperCli {
    async fn transcribe(&self, audio: &Path, srt_dir: &Path) -> Result<SubtitleHandle> {
        run_checked(&self.config.program, self.command_args(audio, srt_dir))
            .await
            .with_context(|| format!("Whisper failed on {}", audio.display()))?;

        let handle = SubtitleHandle::for_audio(audio, srt_dir)?;
        if !handle.path.exists() {
            bail!("Whisper produced no subtitle at {}", handle.path.display());
        }
        Ok(handle)
    }
}
