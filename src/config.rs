//! Configuration for the ring tuner search model.
//!
//! ## Range syntax
//!
//! Search ranges are written `START-END:EXP`, where `START` and `END` are
//! tune codes and `EXP` is the power-of-two stride exponent. The exponent
//! part is optional and defaults to `0` (stride 1):
//!
//! ```ignore
//! 0-255:2     // full range, stride 4
//! 140-255     // upper range, stride 1
//! ```

use std::fmt;
use std::str::FromStr;

use crate::model::TuneCode;

/// Sweep range for a peak search.
///
/// Mirrors the hardware configuration registers: `start`/`end` are 8-bit
/// tune codes and the stride is stored as a power-of-two exponent. Nothing
/// is validated here. A range with `start > end` or a stride exponent that
/// truncates the step to zero is written through untouched, exactly like an
/// unguarded register write. See [`SearchConfig::step_size`] for the
/// truncation rule.
///
/// # Example
/// ```
/// use ringtune::config::SearchConfig;
///
/// let config: SearchConfig = "0-255:2".parse().unwrap();
/// assert_eq!(config.step_size(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// First tune code of the sweep
    pub start: TuneCode,
    /// Last tune code of the sweep (inclusive; the sweep finishes on the
    /// step after the code exceeds it)
    pub end: TuneCode,
    /// Stride between visited codes, as a power-of-two exponent
    pub stride_exponent: u8,
}

impl SearchConfig {
    pub fn new(start: TuneCode, end: TuneCode, stride_exponent: u8) -> Self {
        Self {
            start,
            end,
            stride_exponent,
        }
    }

    /// Effective per-step code increment, truncated to the 8-bit code width.
    ///
    /// An exponent of 8 or more computes a step of 256 or larger, which the
    /// hardware register truncates to zero; the tune code then never
    /// advances and a started sweep never reaches `Done`. The truncation is
    /// reproduced here, not guarded.
    pub fn step_size(&self) -> u8 {
        1u32.checked_shl(u32::from(self.stride_exponent))
            .map_or(0, |step| step as u8)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start: TuneCode::new(0),
            end: TuneCode::new(255),
            stride_exponent: 0,
        }
    }
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:{}", self.start, self.end, self.stride_exponent)
    }
}

impl FromStr for SearchConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (range, exponent) = match s.split_once(':') {
            Some((range, exp)) => {
                let exponent: u8 = exp
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid stride exponent: {}", s))?;
                (range, exponent)
            }
            None => (s, 0),
        };

        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| format!("invalid range (expected START-END[:EXP]): {}", s))?;

        let start: u8 = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start code: {}", s))?;
        let end: u8 = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end code: {}", s))?;

        Ok(Self {
            start: TuneCode::new(start),
            end: TuneCode::new(end),
            stride_exponent: exponent,
        })
    }
}
