use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use rand::Rng;
use rand_distr::StandardNormal;
use std::path::Path;

/// Amplitude limits of a PCM sample format, in raw sample units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PcmScale {
    /// Reference for 0 dBFS
    pub full_scale: f64,
    pub min: f64,
    pub max: f64,
    /// Integer formats round every produced sample
    pub integer: bool,
}

impl PcmScale {
    pub fn for_spec(spec: &WavSpec) -> Self {
        match spec.sample_format {
            SampleFormat::Int => {
                let full_scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
                Self {
                    full_scale,
                    min: -full_scale,
                    max: full_scale - 1.0,
                    integer: true,
                }
            }
            SampleFormat::Float => Self {
                full_scale: 1.0,
                min: -1.0,
                max: 1.0,
                integer: false,
            },
        }
    }

    fn quantize(&self, value: f64) -> f64 {
        let value = value.clamp(self.min, self.max);
        if self.integer {
            value.round()
        } else {
            value
        }
    }
}

/// Loudness of `samples` relative to full scale. Silence is `-inf`.
pub fn dbfs(samples: &[f64], full_scale: f64) -> f64 {
    if samples.is_empty() {
        return f64::NEG_INFINITY;
    }
    let mean_square = samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64;
    20.0 * (mean_square.sqrt() / full_scale).log10()
}

/// Peak-normalized Gaussian noise scaled to the format's maximum amplitude.
fn gaussian_noise<R: Rng + ?Sized>(rng: &mut R, len: usize, scale: PcmScale) -> Vec<f64> {
    let raw: Vec<f64> = (0..len).map(|_| rng.sample::<f64, _>(StandardNormal)).collect();
    let peak = raw.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if peak == 0.0 {
        return raw;
    }
    raw.iter()
        .map(|v| {
            let scaled = v / peak * scale.max;
            if scale.integer {
                scaled.trunc()
            } else {
                scaled
            }
        })
        .collect()
}

/// Overlay Gaussian noise whose RMS sits at `noise_level_db` dBFS.
///
/// Output has the same length as `samples`; sums saturate at the format
/// limits.
pub fn mix_gaussian_noise<R: Rng + ?Sized>(
    rng: &mut R,
    samples: &[f64],
    scale: PcmScale,
    noise_level_db: f64,
) -> Vec<f64> {
    let noise = gaussian_noise(rng, samples.len(), scale);
    let current_db = dbfs(&noise, scale.full_scale);
    let gain = if current_db.is_finite() {
        10f64.powf((noise_level_db - current_db) / 20.0)
    } else {
        0.0
    };

    samples
        .iter()
        .zip(noise.iter())
        .map(|(s, n)| scale.quantize(s + scale.quantize(n * gain)))
        .collect()
}

fn read_samples(reader: &mut WavReader<std::io::BufReader<std::fs::File>>) -> Result<Vec<f64>> {
    let samples = match reader.spec().sample_format {
        SampleFormat::Int => reader
            .samples::<i32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
    };
    Ok(samples)
}

/// Read `input`, overlay noise at `noise_level_db` dBFS and write `output`
/// with the same WAV format.
pub fn add_noise_to_wav<R: Rng + ?Sized>(
    rng: &mut R,
    input: &Path,
    output: &Path,
    noise_level_db: f64,
) -> Result<()> {
    let mut reader =
        WavReader::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let spec = reader.spec();
    let samples =
        read_samples(&mut reader).with_context(|| format!("Failed to decode {}", input.display()))?;

    let mixed = mix_gaussian_noise(rng, &samples, PcmScale::for_spec(&spec), noise_level_db);

    let mut writer = WavWriter::create(output, spec)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    match spec.sample_format {
        SampleFormat::Int => {
            for value in mixed {
                writer.write_sample(value as i32)?;
            }
        }
        SampleFormat::Float => {
            for value in mixed {
                writer.write_sample(value as f32)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}
