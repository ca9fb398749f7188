use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::profile::PowerProfile;
use crate::model::{PowerSample, TuneCode};

/// Gaussian readout noise on the power samples.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub sigma: f64,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Wraps a profile with additive Gaussian noise on each readback,
/// saturated at the ADC rails rather than wrapped.
pub struct NoisyProfile<P> {
    inner: P,
    normal: Option<Normal<f64>>,
    rng: ChaCha8Rng,
}

impl<P: PowerProfile> NoisyProfile<P> {
    pub fn new(inner: P, config: &NoiseConfig) -> Self {
        let normal = (config.sigma > 0.0).then(|| Normal::new(0.0, config.sigma).unwrap());
        Self {
            inner,
            normal,
            rng: create_rng(config.seed),
        }
    }
}

impl<P: PowerProfile> PowerProfile for NoisyProfile<P> {
    fn power_at(&mut self, code: TuneCode) -> PowerSample {
        let clean = self.inner.power_at(code);
        match self.normal {
            Some(normal) => {
                let noisy = f64::from(clean.raw()) + normal.sample(&mut self.rng);
                PowerSample::new(noisy.round().clamp(0.0, 255.0) as u8)
            }
            None => clean,
        }
    }
}
