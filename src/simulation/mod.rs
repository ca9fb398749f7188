mod noise;
mod profile;

pub use noise::{NoiseConfig, NoisyProfile};
pub use profile::{PowerProfile, TriangleCombProfile, run_search};
