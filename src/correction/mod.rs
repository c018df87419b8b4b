//! Subtitle Correction
//!
//! Asks an LLM to fix recognizer subtitles against the ground-truth
//! transcript of the same sample.

mod provider;

pub use provider::{GeminiProvider, LLMProvider};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::transcription::files_with_suffix;
use crate::transcription::srt::{parse_srt, render_srt};

const SYSTEM_PROMPT: &str = "You correct automatic speech recognition subtitles of ATIS \
    (Automatic Terminal Information Service) radio broadcasts.";

/// Correction prompt for one subtitle file.
pub fn build_prompt(srt: &str, transcript: &str) -> String {
    format!(
        "The following SRT file was transcribed from a synthesized ATIS broadcast. \
         Correct the subtitle text so that it matches the ground-truth transcript. \
         Keep every cue number and timestamp exactly as given, write numbers as digits \
         the way the transcript does, and reply with the corrected SRT only.\n\n\
         Ground-truth transcript:\n{}\n\nSRT:\n{}",
        transcript.trim(),
        srt.trim()
    )
}

/// Drop a surrounding Markdown code fence, if the model added one.
pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let body = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => return "",
    };
    body.trim_end().trim_end_matches("```").trim()
}

pub struct SrtCorrector<P: ?Sized> {
    model: String,
    provider: Box<P>,
}

impl<P: LLMProvider + ?Sized> SrtCorrector<P> {
    pub fn new(provider: Box<P>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            provider,
        }
    }

    /// Corrected SRT text for one subtitle file.
    pub async fn correct(&self, srt_path: &Path, srt: &str, transcript: &str) -> Result<String> {
        let reply = self
            .provider
            .generate(&self.model, build_prompt(srt, transcript), Some(SYSTEM_PROMPT.to_string()))
            .await
            .with_context(|| format!("Correction request for {} failed", srt_path.display()))?;

        let cues = parse_srt(strip_code_fences(&reply)).map_err(|e| PipelineError::InvalidSubtitle {
            path: srt_path.to_path_buf(),
            reason: format!("{:#}", e),
        })?;

        if let Ok(original) = parse_srt(srt) {
            if original.len() != cues.len() {
                warn!(
                    "{}: correction changed cue count from {} to {}",
                    srt_path.display(),
                    original.len(),
                    cues.len()
                );
            }
        }
        Ok(render_srt(&cues))
    }
}

/// Correct every `.srt` in `srt_dir` using `<stem>.txt` from `transcript_dir`
/// and write the results into `corrected_dir` under the same names.
pub async fn correct_srts<P: LLMProvider + ?Sized>(
    corrector: &SrtCorrector<P>,
    srt_dir: &Path,
    transcript_dir: &Path,
    corrected_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(corrected_dir)
        .await
        .with_context(|| format!("Failed to create {}", corrected_dir.display()))?;

    let srt_files = files_with_suffix(srt_dir, ".srt")?;
    info!("🧠 Correcting {} subtitle files with {}", srt_files.len(), corrector.model);

    let mut written = Vec::new();
    for srt_path in srt_files {
        let (Some(stem), Some(name)) = (srt_path.file_stem(), srt_path.file_name()) else {
            continue;
        };
        let mut transcript_name = stem.to_owned();
        transcript_name.push(".txt");
        let transcript_path = transcript_dir.join(transcript_name);

        if !transcript_path.is_file() {
            warn!("No ground-truth transcript for {}, skipping", srt_path.display());
            continue;
        }

        let srt = fs::read_to_string(&srt_path)
            .await
            .with_context(|| format!("Failed to read {}", srt_path.display()))?;
        let transcript = fs::read_to_string(&transcript_path)
            .await
            .with_context(|| format!("Failed to read {}", transcript_path.display()))?;

        let corrected = corrector.correct(&srt_path, &srt, &transcript).await?;
        let output = corrected_dir.join(name);
        fs::write(&output, corrected)
            .await
            .with_context(|| format!("Failed to write {}", output.display()))?;
        written.push(output);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```srt\n1\nx\n```"), "1\nx");
        assert_eq!(strip_code_fences("```\n1\nx\n```\n"), "1\nx");
        assert_eq!(strip_code_fences("  1\nx  "), "1\nx");
        assert_eq!(strip_code_fences("```"), "");
    }

    #[test]
    fn test_prompt_carries_both_texts() {
        let prompt = build_prompt("1\n00:00:00,000 --> 00:00:01,000\nalfa\n", "Alpha.");
        assert!(prompt.contains("Ground-truth transcript:\nAlpha."));
        assert!(prompt.ends_with("SRT:\n1\n00:00:00,000 --> 00:00:01,000\nalfa"));
    }
}
