use super::{Formatter, PeakReport, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &PeakReport) -> String {
        let ts = iso8601_timestamp();
        if report.peaks.is_empty() {
            return format!("{},{},,,", ts, report.state);
        }
        report
            .peaks
            .iter()
            .enumerate()
            .map(|(i, peak)| {
                format!("{},{},{},{},{}", ts, report.state, i, peak.code, peak.power)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,state,peak_index,code,power")
    }
}
