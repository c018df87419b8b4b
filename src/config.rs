//! Pipeline Configuration
//!
//! Defaults reproduce the stock DECtalk / Whisper / Gemini setup. A YAML file
//! can override any section; missing keys fall back to the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Subdirectory names under the output root
pub const SYNTHESIZED_AUDIO_DIR: &str = "synthesized_audios";
pub const TRANSCRIPT_DIR: &str = "transcripts";
pub const NOISY_AUDIO_DIR: &str = "noisy_audio";
pub const SRT_DIR: &str = "srt_files";
pub const CORRECTED_SRT_DIR: &str = "srt_corrected";

/// Directory layout derived from the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub audio_dir: PathBuf,
    pub transcript_dir: PathBuf,
    pub noisy_audio_dir: PathBuf,
    pub srt_dir: PathBuf,
    pub corrected_srt_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            audio_dir: root.join(SYNTHESIZED_AUDIO_DIR),
            transcript_dir: root.join(TRANSCRIPT_DIR),
            noisy_audio_dir: root.join(NOISY_AUDIO_DIR),
            srt_dir: root.join(SRT_DIR),
            corrected_srt_dir: root.join(CORRECTED_SRT_DIR),
            root,
        }
    }
}

/// DECtalk engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    /// Installation directory of the engine
    pub install_dir: PathBuf,
    /// `say` binary, relative to `install_dir`
    pub binary: PathBuf,
    /// Script that (re)installs the engine
    pub install_script: PathBuf,
    /// Voice selector passed as `-s`
    pub speaker: u32,
    /// Speaking rate passed as `-r`
    pub rate: u32,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from("./dectalk"),
            binary: PathBuf::from("dist/say"),
            install_script: PathBuf::from("scripts/dec_talk_install.sh"),
            speaker: 2,
            rate: 150,
        }
    }
}

impl TtsConfig {
    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join(&self.binary)
    }
}

/// Whisper CLI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub program: String,
    pub model: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            program: "whisper".to_string(),
            model: "medium.en".to_string(),
        }
    }
}

/// LLM correction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variables searched, in order, for the API key
    pub api_key_vars: Vec<String>,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_vars: vec!["GOOGLE_API_KEY".to_string(), "GEMINI_API_KEY".to_string()],
        }
    }
}

impl CorrectionConfig {
    /// First non-empty key found in the environment
    pub fn api_key_from_env(&self) -> Option<String> {
        self.api_key_vars
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
    }
}

/// Bounded retry for per-sample synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per sample, including the first one
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts: max_attempts.max(1) }
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tts: TtsConfig,
    pub recognizer: RecognizerConfig,
    pub correction: CorrectionConfig,
    pub retry: RetryPolicy,
}

impl PipelineConfig {
    /// Load from a YAML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_yaml(&raw)
                    .with_context(|| format!("Invalid config file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_layout_matches_directory_names() {
        let layout = OutputLayout::new("data");
        assert_eq!(layout.audio_dir, PathBuf::from("data/synthesized_audios"));
        assert_eq!(layout.transcript_dir, PathBuf::from("data/transcripts"));
        assert_eq!(layout.noisy_audio_dir, PathBuf::from("data/noisy_audio"));
        assert_eq!(layout.srt_dir, PathBuf::from("data/srt_files"));
        assert_eq!(layout.corrected_srt_dir, PathBuf::from("data/srt_corrected"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = PipelineConfig::from_yaml("tts:\n  rate: 180\nretry:\n  max_attempts: 3\n").unwrap();
        assert_eq!(cfg.tts.rate, 180);
        assert_eq!(cfg.tts.speaker, 2);
        assert_eq!(cfg.retry.max_attempts, 3);
        assert_eq!(cfg.recognizer.model, "medium.en");
        assert_eq!(cfg.correction.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");
        std::fs::write(&path, "recognizer:\n  model: small.en\n").unwrap();

        let cfg = PipelineConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.recognizer.model, "small.en");
        assert_eq!(cfg.recognizer.program, "whisper");
        assert_eq!(PipelineConfig::load(None).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_retry_policy_never_below_one() {
        assert_eq!(RetryPolicy::new(0).attempts(), 1);
        assert_eq!(RetryPolicy { max_attempts: 0 }.attempts(), 1);
        assert_eq!(TtsConfig::default().binary_path(), PathBuf::from("./dectalk/dist/say"));
    }
}
