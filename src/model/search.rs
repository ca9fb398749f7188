//! Golden model of the ring tuner peak search engine.
//!
//! [`SearchModel`] reproduces the RTL search block register-for-register:
//! an 8-bit tune code swept from `start` by a power-of-two stride, a
//! three-deep sample window checked for strict local maxima, and a
//! fixed-capacity peak list that drops overflow silently. All arithmetic
//! is modular at the register width. Conditions a software API would
//! normally reject (a zero step from a wide stride, an unreachable end
//! code, an inverted range) are carried through unguarded so that the
//! model and the hardware disagree on nothing.

use crate::config::SearchConfig;
use crate::model::codes::{PowerSample, TuneCode};
use std::fmt;

/// Search engine state register.
///
/// Discriminants match the RTL state encoding. The software model only
/// ever occupies `Idle`, `Active`, and `Done`; the remaining states exist
/// in the hardware decode and are kept for parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SearchState {
    Idle = 0,
    Init = 1,
    Active = 2,
    Done = 3,
    Error = 4,
    Interrupted = 5,
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchState::Idle => "IDLE",
            SearchState::Init => "INIT",
            SearchState::Active => "ACTIVE",
            SearchState::Done => "DONE",
            SearchState::Error => "ERROR",
            SearchState::Interrupted => "INTR",
        };
        write!(f, "{}", name)
    }
}

/// One detected peak: the tune code and the power sample measured there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeakRecord {
    pub code: TuneCode,
    pub power: PowerSample,
}

/// Sliding window over the most recent samples, most recent at index 0.
#[derive(Debug, Clone, Copy)]
struct SampleWindow {
    codes: [TuneCode; SearchModel::WINDOW_LEN],
    powers: [PowerSample; SearchModel::WINDOW_LEN],
}

impl SampleWindow {
    fn cleared() -> Self {
        Self {
            codes: [TuneCode::new(0); SearchModel::WINDOW_LEN],
            powers: [PowerSample::new(0); SearchModel::WINDOW_LEN],
        }
    }

    /// Shift the window one slot toward the old end and insert the new
    /// sample at the front.
    fn push(&mut self, code: TuneCode, power: PowerSample) {
        for i in (1..SearchModel::WINDOW_LEN).rev() {
            self.codes[i] = self.codes[i - 1];
            self.powers[i] = self.powers[i - 1];
        }
        self.codes[0] = code;
        self.powers[0] = power;
    }

    /// Strict local maximum test on the middle slot. Equal neighbors fail
    /// the comparison, so plateaus are never reported.
    fn middle_is_peak(&self) -> bool {
        self.powers[1] > self.powers[0] && self.powers[1] > self.powers[2]
    }

    fn middle(&self) -> (TuneCode, PowerSample) {
        (self.codes[1], self.powers[1])
    }
}

/// Fixed-capacity peak store. Once full, further peaks are dropped
/// without any error indication, as the hardware list does.
#[derive(Debug, Clone, Copy)]
struct PeakList {
    records: [PeakRecord; SearchModel::PEAK_CAPACITY],
    len: usize,
}

impl PeakList {
    fn cleared() -> Self {
        Self {
            records: [PeakRecord::default(); SearchModel::PEAK_CAPACITY],
            len: 0,
        }
    }

    fn push(&mut self, record: PeakRecord) {
        if self.len < SearchModel::PEAK_CAPACITY {
            self.records[self.len] = record;
            self.len += 1;
        }
    }

    fn as_slice(&self) -> &[PeakRecord] {
        &self.records[..self.len]
    }
}

/// Bit-exact software model of the peak search block.
///
/// Drive it the way firmware drives the registers: [`configure`], then
/// [`start`], then one [`step`] per power sample until [`state`] reads
/// [`SearchState::Done`]. Results are read back through [`peaks`].
///
/// [`configure`]: SearchModel::configure
/// [`start`]: SearchModel::start
/// [`step`]: SearchModel::step
/// [`state`]: SearchModel::state
/// [`peaks`]: SearchModel::peaks
///
/// # Example
/// ```
/// use ringtune::config::SearchConfig;
/// use ringtune::model::{PowerSample, SearchModel, SearchState, TuneCode};
///
/// let mut model = SearchModel::new();
/// model.configure(SearchConfig::new(TuneCode::new(0), TuneCode::new(4), 0));
/// model.start();
/// for raw in [10u8, 30, 80, 30, 10] {
///     model.step(PowerSample::new(raw));
/// }
/// assert_eq!(model.state(), SearchState::Done);
/// assert_eq!(model.peaks()[0].code, TuneCode::new(2));
/// ```
#[derive(Debug, Clone)]
pub struct SearchModel {
    state: SearchState,
    config: SearchConfig,
    tune_code: TuneCode,
    tune_step: u8,
    sample_count: u8,
    window: SampleWindow,
    peaks: PeakList,
}

impl SearchModel {
    /// Capacity of the hardware peak list
    pub const PEAK_CAPACITY: usize = 8;
    /// Depth of the local-maximum detection window
    pub const WINDOW_LEN: usize = 3;

    pub fn new() -> Self {
        Self {
            state: SearchState::Idle,
            config: SearchConfig::default(),
            tune_code: TuneCode::new(0),
            tune_step: 1,
            sample_count: 0,
            window: SampleWindow::cleared(),
            peaks: PeakList::cleared(),
        }
    }

    /// Write the configuration registers.
    ///
    /// Takes effect the way register writes do: `start` and the stride are
    /// latched into working registers by [`SearchModel::start`], while the
    /// `end` code is compared live on every step. Reconfiguring `end`
    /// during an active sweep therefore moves the termination boundary
    /// immediately; reconfiguring the stride does not change a sweep
    /// already in flight.
    pub fn configure(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Return all working registers to their power-on values. The
    /// configuration registers are untouched.
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
        self.tune_code = TuneCode::new(0);
        self.tune_step = 1;
        self.sample_count = 0;
        self.window = SampleWindow::cleared();
        self.peaks = PeakList::cleared();
    }

    /// Reset and begin a sweep at the configured start code.
    pub fn start(&mut self) {
        self.reset();
        self.state = SearchState::Active;
        self.tune_code = self.config.start;
        self.tune_step = self.config.step_size();
    }

    /// Consume one power sample measured at the current tune code.
    ///
    /// Outside `Active` this is a no-op. Otherwise the sample enters the
    /// window, the window middle is tested as a strict local maximum
    /// (suppressed until two earlier samples exist), the tune code
    /// advances modulo 256, and the sweep completes when the advanced
    /// code exceeds the configured end.
    ///
    /// Two hardware artifacts follow directly from the register widths
    /// and are reproduced rather than corrected. The sample counter is 8
    /// bits wide, so on sweeps longer than 256 samples it wraps and the
    /// two-sample warmup suppression recurs. The completion compare is
    /// against an 8-bit code, so an end of 255, or a stride that steps
    /// over the end and wraps, never terminates the sweep.
    pub fn step(&mut self, sample: PowerSample) {
        if self.state != SearchState::Active {
            return;
        }

        self.window.push(self.tune_code, sample);

        if self.sample_count >= 2 && self.window.middle_is_peak() {
            let (code, power) = self.window.middle();
            self.peaks.push(PeakRecord { code, power });
        }

        self.sample_count = self.sample_count.wrapping_add(1);
        self.tune_code = self.tune_code.wrapping_add(self.tune_step);
        if self.tune_code > self.config.end {
            self.state = SearchState::Done;
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Tune code the next sample will be attributed to.
    pub fn tune_code(&self) -> TuneCode {
        self.tune_code
    }

    /// Samples consumed so far, modulo 256.
    pub fn sample_count(&self) -> u8 {
        self.sample_count
    }

    /// Peaks recorded so far, in detection order.
    pub fn peaks(&self) -> &[PeakRecord] {
        self.peaks.as_slice()
    }
}

impl Default for SearchModel {
    fn default() -> Self {
        Self::new()
    }
}
