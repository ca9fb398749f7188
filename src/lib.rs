pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod sweep;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::SearchConfig;
pub use error::{Result, TunerError};
pub use model::{PeakRecord, PowerSample, SearchModel, SearchState, TuneCode};
pub use sweep::{ParametricSweep, dac_sweep, wavelength_sweep};
