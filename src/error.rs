use thiserror::Error;

#[derive(Error, Debug)]
pub enum TunerError {
    /// A sweep or search was constructed with parameters that cannot be
    /// evaluated. Hardware-mirroring conditions (range wraparound, stride
    /// truncation, peak-list overflow) are deliberately NOT errors; they
    /// reproduce silent register behavior.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, TunerError>;
