use crate::error::ProviderError;
use crate::provider::SpeakerEmbedder;

/// Floor applied before taking log energy, to avoid -inf on silent bands.
const ENERGY_FLOOR: f64 = 1e-10;

/// Minimum samples each band must cover for the embedding to mean anything.
const MIN_SAMPLES_PER_BAND: usize = 8;

/// Banded log-energy embedder.
///
/// Splits the waveform into [`EnergyEmbedder::dimension`] equal time bands,
/// takes log RMS energy per band, and L2-normalizes the result. Fully
/// deterministic: identical audio yields identical vectors, which makes it
/// suitable for tests and offline tooling where no pretrained model is
/// available. Not a biometric-grade extractor.
pub struct EnergyEmbedder {
    dim: usize,
    sample_rate: u32,
}

impl EnergyEmbedder {
    /// Creates an embedder producing `dim`-length vectors. Panics if `dim`
    /// is 0.
    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "EnergyEmbedder: dim must be positive");
        Self {
            dim,
            sample_rate: 16000,
        }
    }

    pub fn with_sample_rate(mut self, hz: u32) -> Self {
        self.sample_rate = hz;
        self
    }
}

impl SpeakerEmbedder for EnergyEmbedder {
    fn embed(&self, samples: &[f32]) -> Result<Vec<f32>, ProviderError> {
        let min_samples = self.dim * MIN_SAMPLES_PER_BAND;
        if samples.len() < min_samples {
            return Err(ProviderError::AudioTooShort {
                min_samples,
                got_samples: samples.len(),
            });
        }

        let n = samples.len();
        let mut v = Vec::with_capacity(self.dim);
        for band in 0..self.dim {
            // Band boundaries in sample space; the last band absorbs the
            // rounding remainder.
            let start = band * n / self.dim;
            let end = if band + 1 == self.dim {
                n
            } else {
                (band + 1) * n / self.dim
            };

            let mut energy: f64 = 0.0;
            for &x in &samples[start..end] {
                energy += (x as f64) * (x as f64);
            }
            let rms = (energy / (end - start) as f64).sqrt();
            v.push((rms + ENERGY_FLOOR).ln() as f32);
        }

        l2_normalize(&mut v);
        Ok(v)
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Scales the vector to unit L2 norm in place. Zero vectors are left as-is.
pub fn l2_normalize(v: &mut [f32]) {
    let mut norm: f64 = 0.0;
    for &x in v.iter() {
        norm += (x as f64) * (x as f64);
    }
    norm = norm.sqrt();
    if norm > 0.0 {
        let scale = (1.0 / norm) as f32;
        for x in v.iter_mut() {
            *x *= scale;
        }
    }
}
