//! ATIS Synthetic Data Pipeline
//!
//! Synthesizes ATIS transcript/audio pairs and optionally adds noise,
//! transcribes with Whisper and corrects the subtitles with Gemini.

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use atis_synth::cli::Cli;
use atis_synth::{Pipeline, PipelineConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables (API keys)
    dotenv::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("atis_synth=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::load(cli.config.as_deref())?;
    let options = cli.options();

    let mut rng = match cli.seed {
        Some(seed) => {
            info!("🎲 Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let pipeline = Pipeline::from_config(options, &config)?;
    pipeline.synthesizer().ensure_installed().await?;

    let summary = pipeline.run(&mut rng).await?;

    println!("{}", "═".repeat(60));
    println!("📁 Output:      {}", pipeline.layout().root.display());
    println!("🎙️  Audio:       {}/{}", summary.batch.audio.len(), summary.batch.samples);
    if let Some(noise) = &summary.noise {
        println!("🔊 Noisy audio: {} ({} skipped)", noise.written.len(), noise.skipped.len());
    }
    if let Some(subtitles) = &summary.subtitles {
        println!("📝 Subtitles:   {}", subtitles.len());
    }
    if let Some(corrected) = &summary.corrected {
        println!("🧠 Corrected:   {}", corrected.len());
    }
    println!("{}", "═".repeat(60));

    Ok(())
}
