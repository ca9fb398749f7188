//! Register-accurate models of the ring tuner hardware blocks.

pub mod codes;
pub mod search;

pub use codes::{PowerSample, TuneCode};
pub use search::{PeakRecord, SearchModel, SearchState};
