use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use ringtune::output::TabularRecord;
use ringtune::{dac_sweep, wavelength_sweep};

#[derive(Parser, Debug)]
#[command(name = "generate_sweep")]
#[command(about = "Generate sweep stimulus tables as CSV")]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Output CSV file (stdout when absent)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Laser wavelength sweep across the resonance band
    Wavelength {
        #[arg(long, default_value_t = 1295.0)]
        start_nm: f64,

        #[arg(long, default_value_t = 1305.0)]
        end_nm: f64,

        /// Number of points
        #[arg(short, long, default_value_t = 100)]
        count: usize,

        /// Laser input power in mW
        #[arg(short, long, default_value_t = 1.0)]
        power: f64,
    },
    /// Heater DAC code sweep
    Dac {
        #[arg(long, default_value_t = 0)]
        start_code: i32,

        #[arg(long, default_value_t = 255)]
        end_code: i32,

        /// Number of points
        #[arg(short, long, default_value_t = 256)]
        count: usize,

        /// Laser input power in mW
        #[arg(short, long, default_value_t = 1.0)]
        power: f64,
    },
}

fn render<R: TabularRecord>(sweep: impl Iterator<Item = R>) -> String {
    let mut lines = vec![R::csv_header().to_string()];
    lines.extend(sweep.map(|record| record.csv_row()));
    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (csv, points) = match args.mode {
        Mode::Wavelength {
            start_nm,
            end_nm,
            count,
            power,
        } => (render(wavelength_sweep(start_nm, end_nm, count, power)?), count),
        Mode::Dac {
            start_code,
            end_code,
            count,
            power,
        } => (render(dac_sweep(start_code, end_code, count, power)?), count),
    };

    match args.output {
        Some(path) => {
            fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} points to {}", points, path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}
