use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use ringtune::config::SearchConfig;
use ringtune::model::{PowerSample, SearchModel, SearchState};
use ringtune::output::{PeakReport, ReportFormat, create_formatter};

#[derive(Parser, Debug)]
#[command(name = "ringtune")]
#[command(about = "Replay captured power samples through the peak search golden model")]
struct Args {
    /// Power sample file to replay (one 8-bit readback per line, '#' comments)
    file: PathBuf,

    /// Search range (e.g., "0-255:2", "140-255")
    #[arg(short, long, default_value = "0-255:0")]
    range: SearchConfig,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_samples(content: &str) -> Result<Vec<PowerSample>> {
    let mut samples = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let data = line.split('#').next().unwrap_or("").trim();
        if data.is_empty() {
            continue;
        }
        let raw: u8 = data
            .parse()
            .with_context(|| format!("line {}: invalid power sample '{}'", lineno + 1, data))?;
        samples.push(PowerSample::new(raw));
    }
    Ok(samples)
}

fn load_samples(path: &Path) -> Result<Vec<PowerSample>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample file: {}", path.display()))?;
    parse_samples(&content).with_context(|| format!("In {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let samples = load_samples(&args.file)?;
    log::info!(
        "{}: {} samples, range {}",
        args.file.display(),
        samples.len(),
        args.range
    );

    let mut model = SearchModel::new();
    model.configure(args.range);
    model.start();

    let mut consumed = 0;
    for &sample in &samples {
        if model.state() != SearchState::Active {
            break;
        }
        model.step(sample);
        consumed += 1;
    }

    match model.state() {
        SearchState::Active => log::warn!(
            "samples exhausted after {} readbacks, sweep still at code {}",
            consumed,
            model.tune_code()
        ),
        state => log::debug!(
            "sweep {} after {} of {} samples",
            state,
            consumed,
            samples.len()
        ),
    }

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&PeakReport::from_model(&model)));

    Ok(())
}
