//! Lazy parametric sweep generation.
//!
//! A sweep divides the closed interval between a start and an end value
//! into equally spaced points and yields one stimulus record per point,
//! computed on demand. Floating point axes interpolate exactly;
//! integer axes reproduce the truncating division used when sweep
//! tables are built in fixed-width arithmetic.

use crate::error::{Result, TunerError};

/// Axis types a sweep can run over.
pub trait SweepValue: Copy {
    /// Value at `index` of a sweep split into `segments` equal divisions.
    /// `index` 0 is the start, `index == segments` is the end.
    fn interpolate(start: Self, end: Self, index: usize, segments: usize) -> Self;
}

impl SweepValue for f64 {
    fn interpolate(start: Self, end: Self, index: usize, segments: usize) -> Self {
        start + (end - start) * (index as f64) / (segments as f64)
    }
}

impl SweepValue for i32 {
    /// Integer interpolation truncates toward zero, so interior points
    /// land at or below the exact position. Widening to 64 bits keeps
    /// the multiply from overflowing on wide spans.
    fn interpolate(start: Self, end: Self, index: usize, segments: usize) -> Self {
        let start = i64::from(start);
        let end = i64::from(end);
        let value = start + (end - start) * (index as i64) / (segments as i64);
        value as i32
    }
}

/// Iterator yielding interpolated stimulus records.
///
/// Records are produced one at a time; nothing is precomputed, so a
/// sweep over a large point count costs only what is consumed.
///
/// # Example
/// ```
/// use ringtune::sweep::ParametricSweep;
///
/// let mut sweep = ParametricSweep::new(0.0, 10.0, 3, |x| x).unwrap();
/// assert_eq!(sweep.next(), Some(0.0));
/// assert_eq!(sweep.next(), Some(5.0));
/// assert_eq!(sweep.next(), Some(10.0));
/// assert_eq!(sweep.next(), None);
/// ```
pub struct ParametricSweep<T, R, F>
where
    T: SweepValue,
    F: Fn(T) -> R,
{
    start: T,
    end: T,
    count: usize,
    index: usize,
    make_record: F,
}

impl<T, R, F> ParametricSweep<T, R, F>
where
    T: SweepValue,
    F: Fn(T) -> R,
{
    /// Create a sweep of `count` points from `start` to `end` inclusive.
    ///
    /// Fewer than two points leave the interval division undefined, so
    /// such counts are rejected.
    pub fn new(start: T, end: T, count: usize, make_record: F) -> Result<Self> {
        if count < 2 {
            return Err(TunerError::InvalidConfiguration(format!(
                "sweep requires at least 2 points, got {}",
                count
            )));
        }
        Ok(Self {
            start,
            end,
            count,
            index: 0,
            make_record,
        })
    }
}

impl<T, R, F> Iterator for ParametricSweep<T, R, F>
where
    T: SweepValue,
    F: Fn(T) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if self.index >= self.count {
            return None;
        }
        let value = T::interpolate(self.start, self.end, self.index, self.count - 1);
        self.index += 1;
        Some((self.make_record)(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<T, R, F> ExactSizeIterator for ParametricSweep<T, R, F>
where
    T: SweepValue,
    F: Fn(T) -> R,
{
}

/// One point of a laser wavelength sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthPoint {
    pub input_power_mw: f64,
    pub wavelength_nm: f64,
    /// Filled in by the measurement stage; the generator leaves it zero.
    pub output_power_mw: f64,
}

/// One point of a DAC tune code sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DacPoint {
    pub input_power_mw: f64,
    pub code: i32,
    /// Filled in by the measurement stage; the generator leaves it zero.
    pub output_power_mw: f64,
}

/// Wavelength stimulus sweep at a fixed laser input power.
pub fn wavelength_sweep(
    start_nm: f64,
    end_nm: f64,
    count: usize,
    input_power_mw: f64,
) -> Result<ParametricSweep<f64, WavelengthPoint, impl Fn(f64) -> WavelengthPoint>> {
    ParametricSweep::new(start_nm, end_nm, count, move |wavelength_nm| {
        WavelengthPoint {
            input_power_mw,
            wavelength_nm,
            output_power_mw: 0.0,
        }
    })
}

/// DAC code stimulus sweep at a fixed laser input power.
pub fn dac_sweep(
    start_code: i32,
    end_code: i32,
    count: usize,
    input_power_mw: f64,
) -> Result<ParametricSweep<i32, DacPoint, impl Fn(i32) -> DacPoint>> {
    ParametricSweep::new(start_code, end_code, count, move |code| DacPoint {
        input_power_mw,
        code,
        output_power_mw: 0.0,
    })
}
