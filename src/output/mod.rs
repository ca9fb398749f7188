mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::config::SearchConfig;
use crate::model::{PeakRecord, SearchModel, SearchState};
use crate::sweep::{DacPoint, WavelengthPoint};

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

/// Snapshot of search results, decoupled from the model so a report can
/// outlive a model that gets reset and reused.
#[derive(Debug, Clone)]
pub struct PeakReport {
    pub state: SearchState,
    pub range: SearchConfig,
    pub sample_count: u8,
    pub peaks: Vec<PeakRecord>,
}

impl PeakReport {
    pub fn from_model(model: &SearchModel) -> Self {
        Self {
            state: model.state(),
            range: model.config(),
            sample_count: model.sample_count(),
            peaks: model.peaks().to_vec(),
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, report: &PeakReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: ReportFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        ReportFormat::Text => Box::new(TextFormatter::new(verbose)),
        ReportFormat::Json => Box::new(JsonFormatter),
        ReportFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Row-oriented CSV rendering for sweep stimulus records.
pub trait TabularRecord {
    fn csv_header() -> &'static str;
    fn csv_row(&self) -> String;
}

impl TabularRecord for WavelengthPoint {
    fn csv_header() -> &'static str {
        "input_power_mw,wavelength_nm,output_power_mw"
    }

    fn csv_row(&self) -> String {
        format!(
            "{:.6},{:.6},{:.6}",
            self.input_power_mw, self.wavelength_nm, self.output_power_mw
        )
    }
}

impl TabularRecord for DacPoint {
    fn csv_header() -> &'static str {
        "input_power_mw,code,output_power_mw"
    }

    fn csv_row(&self) -> String {
        format!(
            "{:.6},{},{:.6}",
            self.input_power_mw, self.code, self.output_power_mw
        )
    }
}
