//! Fixed-width register value types.
//!
//! The hardware carries tune codes and power samples in 8-bit registers.
//! Both types wrap on overflow rather than saturating or trapping, matching
//! the register arithmetic exactly.

use std::fmt;

/// DAC tune code applied to the ring heater, 8 bits wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TuneCode(u8);

impl TuneCode {
    /// Register width in bits
    pub const BITS: u32 = 8;
    /// Largest representable code
    pub const MAX: TuneCode = TuneCode(u8::MAX);

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Modular addition at the register width.
    #[must_use]
    pub const fn wrapping_add(self, rhs: u8) -> Self {
        Self(self.0.wrapping_add(rhs))
    }
}

impl From<u8> for TuneCode {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<TuneCode> for u8 {
    fn from(code: TuneCode) -> Self {
        code.0
    }
}

impl fmt::Display for TuneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ADC readback of detected optical power, 8 bits wide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PowerSample(u8);

impl PowerSample {
    /// Register width in bits
    pub const BITS: u32 = 8;
    /// Largest representable sample
    pub const MAX: PowerSample = PowerSample(u8::MAX);

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl From<u8> for PowerSample {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<PowerSample> for u8 {
    fn from(sample: PowerSample) -> Self {
        sample.0
    }
}

impl fmt::Display for PowerSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
