use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use ringtune::config::SearchConfig;
use ringtune::model::{SearchModel, TuneCode};
use ringtune::output::{PeakReport, ReportFormat, create_formatter};
use ringtune::simulation::{NoiseConfig, NoisyProfile, TriangleCombProfile, run_search};

#[derive(Parser, Debug)]
#[command(name = "synthetic_search")]
#[command(about = "Run the peak search golden model against a synthetic resonance profile")]
struct Args {
    /// TOML scenario file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search range (e.g., "0-20:0"; overrides the scenario)
    #[arg(short, long)]
    range: Option<SearchConfig>,

    /// Readout noise sigma in ADC counts (overrides the scenario)
    #[arg(long)]
    sigma: Option<f64>,

    /// RNG seed for reproducibility (overrides the scenario)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sample bound for sweeps that cannot complete
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Write the report as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize, Default)]
struct Scenario {
    profile: Option<ProfileSection>,
    noise: Option<NoiseConfig>,
    search: Option<SearchSection>,
}

#[derive(Debug, Deserialize)]
struct ProfileSection {
    floor: u8,
    slope: u8,
    half_width: u8,
    centers: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct SearchSection {
    start: u8,
    end: u8,
    stride_exponent: u8,
}

#[derive(Debug, serde::Serialize)]
struct JsonReport {
    state: String,
    range: String,
    samples: usize,
    peaks: Vec<JsonPeak>,
}

#[derive(Debug, serde::Serialize)]
struct JsonPeak {
    code: u8,
    power: u8,
}

fn load_scenario(path: &PathBuf) -> Result<Scenario> {
    let content = fs::read_to_string(path).context("Failed to read scenario file")?;
    toml::from_str(&content).context("Failed to parse scenario file")
}

fn build_search_config(scenario: &Scenario, args: &Args) -> SearchConfig {
    if let Some(range) = args.range {
        return range;
    }
    match scenario.search {
        Some(ref search) => SearchConfig::new(
            TuneCode::new(search.start),
            TuneCode::new(search.end),
            search.stride_exponent,
        ),
        None => SearchConfig::new(TuneCode::new(0), TuneCode::new(20), 0),
    }
}

fn build_profile(scenario: &Scenario) -> TriangleCombProfile {
    match scenario.profile {
        Some(ref profile) => TriangleCombProfile {
            floor: profile.floor,
            slope: profile.slope,
            half_width: profile.half_width,
            centers: profile.centers.clone(),
        },
        None => TriangleCombProfile::reference(),
    }
}

fn build_noise_config(scenario: &Scenario, args: &Args) -> NoiseConfig {
    let mut noise = scenario.noise.clone().unwrap_or_default();
    if let Some(seed) = args.seed {
        noise = noise.with_seed(seed);
    }
    if let Some(sigma) = args.sigma {
        noise = noise.with_sigma(sigma);
    }
    noise
}

fn write_json_report(path: &Path, report: &PeakReport, samples: usize) -> Result<()> {
    let doc = JsonReport {
        state: report.state.to_string(),
        range: report.range.to_string(),
        samples,
        peaks: report
            .peaks
            .iter()
            .map(|p| JsonPeak {
                code: p.code.raw(),
                power: p.power.raw(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&doc).context("Failed to serialize report")?;
    fs::write(path, json).context("Failed to write report")?;
    eprintln!("Report written to: {}", path.display());
    Ok(())
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

    let scenario = if let Some(ref config_path) = args.config {
        load_scenario(config_path)?
    } else {
        Scenario::default()
    };

    let search_config = build_search_config(&scenario, &args);
    let noise_config = build_noise_config(&scenario, &args);
    let mut profile = NoisyProfile::new(build_profile(&scenario), &noise_config);

    let mut model = SearchModel::new();
    let samples = run_search(&mut model, search_config, &mut profile, args.max_steps);

    let report = PeakReport::from_model(&model);
    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&report));

    if let Some(ref path) = args.report {
        write_json_report(path, &report, samples)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with_range(range: Option<&str>) -> Args {
        Args {
            config: None,
            range: range.map(|r| r.parse().unwrap()),
            sigma: None,
            seed: None,
            max_steps: 10_000,
            format: ReportFormat::Text,
            report: None,
            verbose: 0,
        }
    }

    #[test]
    fn test_scenario_parses_all_sections() {
        let scenario: Scenario = toml::from_str(
            r#"
            [profile]
            floor = 10
            slope = 40
            half_width = 3
            centers = [5, 15]

            [noise]
            seed = 42
            sigma = 2.0

            [search]
            start = 0
            end = 20
            stride_exponent = 0
            "#,
        )
        .unwrap();

        let profile = build_profile(&scenario);
        assert_eq!(profile.centers, vec![5, 15]);

        let noise = scenario.noise.as_ref().unwrap();
        assert_eq!(noise.seed, Some(42));
        assert_eq!(noise.sigma, 2.0);

        let config = build_search_config(&scenario, &args_with_range(None));
        assert_eq!(config.end, TuneCode::new(20));
    }

    #[test]
    fn test_cli_range_overrides_scenario() {
        let scenario: Scenario = toml::from_str(
            r#"
            [search]
            start = 0
            end = 20
            stride_exponent = 0
            "#,
        )
        .unwrap();

        let config = build_search_config(&scenario, &args_with_range(Some("140-255:1")));
        assert_eq!(config.start, TuneCode::new(140));
        assert_eq!(config.end, TuneCode::new(255));
        assert_eq!(config.stride_exponent, 1);
    }

    #[test]
    fn test_cli_noise_overrides_scenario() {
        let scenario: Scenario = toml::from_str("[noise]\nsigma = 2.0\n").unwrap();

        let mut args = args_with_range(None);
        args.sigma = Some(0.5);
        args.seed = Some(7);

        let noise = build_noise_config(&scenario, &args);
        assert_eq!(noise.sigma, 0.5);
        assert_eq!(noise.seed, Some(7));
    }

    #[test]
    fn test_empty_scenario_uses_reference_defaults() {
        let scenario = Scenario::default();
        let profile = build_profile(&scenario);
        assert_eq!(profile.centers, vec![5, 15]);

        let config = build_search_config(&scenario, &args_with_range(None));
        assert_eq!(config.start, TuneCode::new(0));
        assert_eq!(config.end, TuneCode::new(20));
    }
}
