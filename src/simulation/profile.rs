//! Synthetic optical power profiles and a search driver.
//!
//! A profile plays the role of the ring and photodetector: given a tune
//! code it returns the ADC power readback. [`TriangleCombProfile`] is the
//! shape used to validate the search model against the RTL testbench, a
//! flat floor with triangular resonance peaks at chosen codes.

use crate::config::SearchConfig;
use crate::model::{PowerSample, SearchModel, SearchState, TuneCode};

/// Source of power readbacks for a simulated sweep.
///
/// Takes `&mut self` so noisy implementations can advance their RNG.
pub trait PowerProfile {
    fn power_at(&mut self, code: TuneCode) -> PowerSample;
}

/// Flat floor with triangular peaks centered at `centers`.
///
/// Each peak contributes `(half_width - distance) * slope` inside its
/// half width. The sum wraps at the ADC register width, as the testbench
/// stimulus does.
#[derive(Debug, Clone)]
pub struct TriangleCombProfile {
    pub floor: u8,
    pub slope: u8,
    pub half_width: u8,
    pub centers: Vec<u8>,
}

impl TriangleCombProfile {
    /// Twin-peak profile from the RTL regression stimulus: floor 10,
    /// slope 40, half width 3, resonances at codes 5 and 15.
    pub fn reference() -> Self {
        Self {
            floor: 10,
            slope: 40,
            half_width: 3,
            centers: vec![5, 15],
        }
    }
}

impl PowerProfile for TriangleCombProfile {
    fn power_at(&mut self, code: TuneCode) -> PowerSample {
        let t = i32::from(code.raw());
        let mut total = i32::from(self.floor);
        for &center in &self.centers {
            let distance = (t - i32::from(center)).abs();
            if distance < i32::from(self.half_width) {
                total += (i32::from(self.half_width) - distance) * i32::from(self.slope);
            }
        }
        PowerSample::new((total & 0xff) as u8)
    }
}

/// Configure, start, and step the model against a profile until it
/// leaves `Active` or `max_steps` samples have been consumed.
///
/// The step bound matters because some configurations never complete: an
/// end code of 255, or a stride that wraps past the end. Returns the
/// number of samples consumed.
pub fn run_search<P: PowerProfile + ?Sized>(
    model: &mut SearchModel,
    config: SearchConfig,
    profile: &mut P,
    max_steps: usize,
) -> usize {
    model.configure(config);
    model.start();

    let mut steps = 0;
    while model.state() == SearchState::Active && steps < max_steps {
        let sample = profile.power_at(model.tune_code());
        model.step(sample);
        steps += 1;
    }

    log::debug!(
        "search {} after {} samples, {} peaks",
        model.state(),
        steps,
        model.peaks().len()
    );
    steps
}
