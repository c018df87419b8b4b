//! Pipeline Driver
//!
//! Synthesis, then optional noise, then optional transcription and
//! correction. Every stage runs to completion before the next one starts.

use anyhow::Result;
use rand::Rng;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{OutputLayout, PipelineConfig, RetryPolicy};
use crate::correction::{correct_srts, GeminiProvider, LLMProvider, SrtCorrector};
use crate::noise::{add_noise_to_audio_dir, NoiseReport};
use crate::synthesis::{BatchReport, BatchSynthesizer, DecTalkSynthesizer, Synthesizer};
use crate::transcription::{generate_srts, Recognizer, SubtitleHandle, WhisperCli};

/// Which stages to run and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub output_dir: PathBuf,
    pub samples: usize,
    pub add_noise: bool,
    pub generate_srt: bool,
    /// Only honoured together with `generate_srt`
    pub gemini_correction: bool,
}

impl PipelineOptions {
    pub fn new(output_dir: impl Into<PathBuf>, samples: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            samples,
            add_noise: false,
            generate_srt: false,
            gemini_correction: false,
        }
    }

    pub fn corrects(&self) -> bool {
        self.generate_srt && self.gemini_correction
    }
}

#[derive(Debug)]
pub struct PipelineSummary {
    pub batch: BatchReport,
    pub noise: Option<NoiseReport>,
    pub subtitles: Option<Vec<SubtitleHandle>>,
    pub corrected: Option<Vec<PathBuf>>,
}

pub struct Pipeline<S, R> {
    options: PipelineOptions,
    layout: OutputLayout,
    retry: RetryPolicy,
    synthesizer: S,
    recognizer: R,
    corrector: Option<SrtCorrector<dyn LLMProvider>>,
}

impl Pipeline<DecTalkSynthesizer, WhisperCli> {
    /// DECtalk + Whisper + Gemini, as configured.
    ///
    /// Fails up front when correction is requested and no API key is set.
    pub fn from_config(options: PipelineOptions, config: &PipelineConfig) -> Result<Self> {
        let mut pipeline = Self::new(
            options,
            DecTalkSynthesizer::new(config.tts.clone()),
            WhisperCli::new(config.recognizer.clone()),
        )
        .with_retry_policy(config.retry);

        if pipeline.options.corrects() {
            let provider: Box<dyn LLMProvider> = Box::new(GeminiProvider::from_env(&config.correction)?);
            pipeline = pipeline.with_corrector(SrtCorrector::new(provider, config.correction.model.clone()));
        }
        Ok(pipeline)
    }
}

impl<S: Synthesizer, R: Recognizer> Pipeline<S, R> {
    pub fn new(options: PipelineOptions, synthesizer: S, recognizer: R) -> Self {
        Self {
            layout: OutputLayout::new(&options.output_dir),
            options,
            retry: RetryPolicy::default(),
            synthesizer,
            recognizer,
            corrector: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_corrector(mut self, corrector: SrtCorrector<dyn LLMProvider>) -> Self {
        self.corrector = Some(corrector);
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    pub async fn run<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<PipelineSummary> {
        let layout = &self.layout;

        let batch = BatchSynthesizer::new(&self.synthesizer, layout.clone())
            .with_retry_policy(self.retry)
            .run(rng, self.options.samples)
            .await?;
        if !batch.is_complete() {
            warn!(
                "⚠️  {} of {} samples have no audio: {:?}",
                batch.failures.len(),
                batch.samples,
                batch.failed_indices()
            );
        }

        let noise = if self.options.add_noise {
            Some(add_noise_to_audio_dir(rng, &layout.audio_dir, &layout.noisy_audio_dir)?)
        } else {
            None
        };

        let subtitles = if self.options.generate_srt {
            Some(generate_srts(&self.recognizer, &layout.audio_dir, &layout.srt_dir).await?)
        } else {
            if self.options.gemini_correction {
                warn!("--gemini_correction has no effect without --generate_srt");
            }
            None
        };

        let corrected = match (&subtitles, &self.corrector) {
            (Some(_), Some(corrector)) if self.options.corrects() => Some(
                correct_srts(corrector, &layout.srt_dir, &layout.transcript_dir, &layout.corrected_srt_dir)
                    .await?,
            ),
            _ => None,
        };

        info!("🏁 Pipeline finished in {}", layout.root.display());
        Ok(PipelineSummary {
            batch,
            noise,
            subtitles,
            corrected,
        })
    }
}
