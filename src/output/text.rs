use super::{Formatter, PeakReport};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &PeakReport) -> String {
        let mut lines = Vec::with_capacity(report.peaks.len() + 1);
        if self.verbose {
            lines.push(format!(
                "Search {}: {} peaks [range: {}, samples: {}]",
                report.state,
                report.peaks.len(),
                report.range,
                report.sample_count
            ));
        } else {
            lines.push(format!(
                "Search {}: {} peaks",
                report.state,
                report.peaks.len()
            ));
        }
        for (i, peak) in report.peaks.iter().enumerate() {
            lines.push(format!(
                "Peak [{}]: Code: {} Pwr: {}",
                i, peak.code, peak.power
            ));
        }
        lines.join("\n")
    }
}
