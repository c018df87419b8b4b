use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

use super::{AudioHandle, Synthesizer};
use crate::config::{OutputLayout, RetryPolicy};
use crate::error::PipelineError;
use crate::speech::to_speech_script;
use crate::transcript::generate_transcript;

/// Outcome of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub samples: usize,
    pub audio: Vec<AudioHandle>,
    /// One `PipelineError::SynthesisFailed` per sample left without audio
    pub failures: Vec<PipelineError>,
}

impl BatchReport {
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures
            .iter()
            .filter_map(|failure| match failure {
                PipelineError::SynthesisFailed { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generates `samples` transcripts and renders each through a [`Synthesizer`].
pub struct BatchSynthesizer<S> {
    synthesizer: S,
    layout: OutputLayout,
    retry: RetryPolicy,
}

impl<S: Synthesizer> BatchSynthesizer<S> {
    pub fn new(synthesizer: S, layout: OutputLayout) -> Self {
        Self {
            synthesizer,
            layout,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    /// Write `<i>.txt` and `<i>.wav` for every index in `0..samples`.
    ///
    /// A sample whose audio cannot be produced is recorded in the report and
    /// the batch moves on; its transcript is still written.
    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R, samples: usize) -> Result<BatchReport> {
        for dir in [&self.layout.audio_dir, &self.layout.transcript_dir] {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        info!("🎙️  Synthesizing {} samples into {}", samples, self.layout.root.display());
        let mut report = BatchReport {
            samples,
            ..BatchReport::default()
        };

        for index in 0..samples {
            let transcript = generate_transcript(rng).to_string();
            let script = to_speech_script(&transcript);
            let audio_path = self.layout.audio_dir.join(format!("{}.wav", index));

            match self.synthesize_sample(index, &script, &audio_path).await {
                Ok(handle) => report.audio.push(handle),
                Err(failure) => {
                    warn!("{}", failure);
                    report.failures.push(failure);
                }
            }

            let transcript_path = self.layout.transcript_dir.join(format!("{}.txt", index));
            fs::write(&transcript_path, &transcript)
                .await
                .with_context(|| format!("Failed to write {}", transcript_path.display()))?;
        }

        info!(
            "✅ Batch finished: {} audio files, {} failures",
            report.audio.len(),
            report.failures.len()
        );
        Ok(report)
    }

    async fn synthesize_sample(
        &self,
        index: usize,
        script: &str,
        output: &Path,
    ) -> std::result::Result<AudioHandle, PipelineError> {
        let max_attempts = self.retry.attempts();
        let mut attempts = 0;
        let mut reason = String::new();

        while attempts < max_attempts {
            attempts += 1;
            match self.synthesizer.synthesize(script, output).await {
                Ok(handle) => return Ok(handle),
                Err(e) => {
                    error!(
                        "Error synthesizing sample {} (attempt {}/{}): {:#}",
                        index, attempts, max_attempts, e
                    );
                    reason = format!("{:#}", e);
                }
            }

            if let Err(e) = self.synthesizer.repair().await {
                error!("Engine repair failed, giving up on sample {}: {:#}", index, e);
                break;
            }
        }

        Err(PipelineError::SynthesisFailed {
            index,
            attempts,
            reason,
        })
    }
}
