//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::PipelineOptions;

#[derive(Parser, Debug)]
#[command(name = "atis-synth")]
#[command(about = "ATIS Data Pipeline", long_about = None)]
pub struct Cli {
    /// Output directory (e.g. ./data)
    #[arg(long = "output_dir", alias = "output-dir")]
    pub output_dir: PathBuf,

    /// Generate .srt transcripts using Whisper
    #[arg(long = "generate_srt", alias = "generate-srt")]
    pub generate_srt: bool,

    /// Add noise to synthesized audio files
    #[arg(long = "add_noise", alias = "add-noise")]
    pub add_noise: bool,

    /// Number of samples to synthesize
    #[arg(long, default_value_t = 50)]
    pub samples: usize,

    /// Apply Gemini correction to generated SRT files
    #[arg(long = "gemini_correction", alias = "gemini-correction")]
    pub gemini_correction: bool,

    /// Seed for transcript and noise generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML file overriding engine settings
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> PipelineOptions {
        PipelineOptions {
            output_dir: self.output_dir.clone(),
            samples: self.samples,
            add_noise: self.add_noise,
            generate_srt: self.generate_srt,
            gemini_correction: self.gemini_correction,
        }
    }
}
