use super::{Formatter, PeakReport, iso8601_timestamp};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &PeakReport) -> String {
        let peaks: Vec<String> = report
            .peaks
            .iter()
            .map(|p| format!(r#"{{"code":{},"power":{}}}"#, p.code, p.power))
            .collect();
        format!(
            r#"{{"ts":"{}","state":"{}","range":"{}","sample_count":{},"peaks":[{}]}}"#,
            iso8601_timestamp(),
            report.state,
            report.range,
            report.sample_count,
            peaks.join(",")
        )
    }
}
