//! Transcription
//!
//! The `Recognizer` capability, the Whisper CLI implementation and SRT
//! handling.

pub mod srt;
mod whisper;

pub use srt::{parse_srt, render_srt, SubtitleCue, Timestamp};
pub use whisper::WhisperCli;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Subtitle file produced by a recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleHandle {
    pub path: PathBuf,
}

impl SubtitleHandle {
    /// `<srt_dir>/<audio stem>.srt`
    pub fn for_audio(audio: &Path, srt_dir: &Path) -> Result<Self> {
        let stem = audio
            .file_stem()
            .ok_or_else(|| anyhow!("{} has no file name", audio.display()))?;
        let mut name = stem.to_owned();
        name.push(".srt");
        Ok(Self { path: srt_dir.join(name) })
    }
}

/// Speech recognizer writing subtitles into a directory
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn transcribe(&self, audio: &Path, srt_dir: &Path) -> Result<SubtitleHandle>;
}

/// Sorted paths of the files in `dir` whose name ends with `suffix`.
pub(crate) fn files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut files = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read an entry of {}", dir.display()))?
        .into_iter()
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .map(|name| name.to_string_lossy().ends_with(suffix))
                    .unwrap_or(false)
        })
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

/// Transcribe every `.wav` in `audio_dir` into `srt_dir`. The first failure
/// aborts the batch.
pub async fn generate_srts<R: Recognizer + ?Sized>(
    recognizer: &R,
    audio_dir: &Path,
    srt_dir: &Path,
) -> Result<Vec<SubtitleHandle>> {
    tokio::fs::create_dir_all(srt_dir)
        .await
        .with_context(|| format!("Failed to create {}", srt_dir.display()))?;

    let audio_files = files_with_suffix(audio_dir, ".wav")?;
    info!("📝 Transcribing {} audio files from {}", audio_files.len(), audio_dir.display());

    let mut subtitles = Vec::with_capacity(audio_files.len());
    for audio in audio_files {
        subtitles.push(recognizer.transcribe(&audio, srt_dir).await?);
    }
    Ok(subtitles)
}
