//! Noise Injector
//!
//! Degrades a directory of synthesized WAV files with Gaussian noise at a
//! per-file random level, writing copies under the same names.

mod mixer;

pub use mixer::{add_noise_to_wav, dbfs, mix_gaussian_noise, PcmScale};

use anyhow::{Context, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Mean of the per-file noise level, in dBFS
pub const NOISE_LEVEL_MEAN_DB: f64 = -20.0;
pub const NOISE_LEVEL_STD_DB: f64 = 5.0;

/// One degraded file
#[derive(Debug, Clone, PartialEq)]
pub struct NoisyAudio {
    pub source: PathBuf,
    pub output: PathBuf,
    pub level_db: f64,
}

#[derive(Debug, Default)]
pub struct NoiseReport {
    pub written: Vec<NoisyAudio>,
    /// Entries that were not `.wav` files
    pub skipped: Vec<PathBuf>,
}

/// Add noise to every `.wav` in `source_dir`, writing into `output_dir`.
///
/// Entries are visited in filename order. Levels are drawn from
/// Normal(-20, 5) dB and are not clamped, so a far tail draw amplifies.
pub fn add_noise_to_audio_dir<R: Rng + ?Sized>(
    rng: &mut R,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<NoiseReport> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut entries = std::fs::read_dir(source_dir)
        .with_context(|| format!("Failed to list {}", source_dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let level_distribution = Normal::new(NOISE_LEVEL_MEAN_DB, NOISE_LEVEL_STD_DB)?;
    let mut report = NoiseReport::default();

    info!("🔊 Adding noise to {} entries from {}", entries.len(), source_dir.display());
    for entry in entries {
        let name = entry.file_name();
        let path = entry.path();
        if !name.to_string_lossy().ends_with(".wav") || !path.is_file() {
            warn!("Skipping non-wav file: {}", name.to_string_lossy());
            report.skipped.push(path);
            continue;
        }

        let level_db = level_distribution.sample(rng);
        let output = output_dir.join(&name);
        debug!("{} -> {} at {:.1} dBFS", path.display(), output.display(), level_db);
        add_noise_to_wav(rng, &path, &output, level_db)?;

        report.written.push(NoisyAudio {
            source: path,
            output,
            level_db,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn write_tone(path: &Path) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for i in 0..800 {
            let t = i as f32 / 8000.0;
            writer
                .write_sample(((t * 440.0 * std::f32::consts::TAU).sin() * 8000.0) as i16)
                .unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_skips_non_wav_files() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        let out_dir = dst.path().join("noisy_audio");
        write_tone(&src.path().join("0.wav"));
        std::fs::write(src.path().join("0.txt"), "transcript").unwrap();

        let report =
            add_noise_to_audio_dir(&mut StdRng::seed_from_u64(1), src.path(), &out_dir).unwrap();

        assert_eq!(report.written.len(), 1);
        assert_eq!(report.skipped, vec![src.path().join("0.txt")]);
        let outputs: Vec<_> = std::fs::read_dir(&out_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(outputs, vec!["0.wav".to_string()]);
    }

    #[test]
    fn test_levels_drawn_per_file() {
        let src = tempdir().unwrap();
        let dst = tempdir().unwrap();
        for i in 0..3 {
            write_tone(&src.path().join(format!("{}.wav", i)));
        }

        let report =
            add_noise_to_audio_dir(&mut StdRng::seed_from_u64(2), src.path(), dst.path()).unwrap();
        let names: Vec<_> = report
            .written
            .iter()
            .map(|n| n.output.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["0.wav", "1.wav", "2.wav"]);
        assert!(report.written[0].level_db != report.written[1].level_db);
    }

    #[test]
    fn test_missing_source_dir_is_an_error() {
        let dst = tempdir().unwrap();
        let missing = dst.path().join("missing");
        assert!(add_noise_to_audio_dir(&mut StdRng::seed_from_u64(3), &missing, dst.path()).is_err());
    }
}
