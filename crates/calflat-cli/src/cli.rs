//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// calflat - Flatten iCalendar feeds into CSV
#[derive(Debug, Parser)]
#[command(name = "calflat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the .ics file to convert
    pub input: PathBuf,

    /// Path to the output CSV file (defaults to the input path with a .csv
    /// extension)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short, env = "CALFLAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    // --- Conversion options ---
    /// Reference timezone for local date and time columns (IANA name)
    #[arg(long, env = "CALFLAT_TZ")]
    pub timezone: Option<String>,

    /// How many days before now the expansion window reaches
    #[arg(long)]
    pub past_days: Option<i64>,

    /// How many days after now the expansion window reaches
    #[arg(long)]
    pub future_days: Option<i64>,
}

impl Cli {
    /// Returns the output path, derived from the input when not given.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.input.with_extension("csv"),
        }
    }
}
