//! calflat CLI entry point.

use std::process::ExitCode;

use calflat_core::{init_tracing, ConferenceFinder, ExpansionWindow, TracingConfig};
use calflat_ical::{convert_calendar, ConvertOptions};
use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;

use calflat_cli::cli::Cli;
use calflat_cli::config::AppConfig;
use calflat_cli::error::{CliError, CliResult};
use calflat_cli::writer;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path).map_err(CliError::Config)?
    } else {
        AppConfig::load().map_err(CliError::Config)?
    };

    // CLI flags override the config file.
    let timezone = cli.timezone.as_deref().unwrap_or(&config.timezone);
    let reference: Tz = timezone
        .parse()
        .map_err(|_| CliError::InvalidTimezone(timezone.to_string()))?;

    let past_days = cli.past_days.unwrap_or(config.window.past_days);
    let future_days = cli.future_days.unwrap_or(config.window.future_days);
    if past_days < 0 || future_days < 0 {
        return Err(CliError::InvalidWindow(
            "past_days and future_days must not be negative".to_string(),
        ));
    }

    let finder = ConferenceFinder::from_patterns(&config.links.patterns)
        .map_err(|e| CliError::Config(format!("bad link pattern: {}", e)))?;

    let options = ConvertOptions {
        reference,
        window: ExpansionWindow::around(Utc::now(), past_days, future_days),
        finder,
    };

    let ics = std::fs::read_to_string(&cli.input)?;
    let records = convert_calendar(&ics, &options)?;

    // The output file is only touched once conversion has succeeded.
    let output = cli.output_path();
    let count = writer::write_csv_file(&output, &records)?;
    println!("Wrote {} records to {}", count, output.display());

    Ok(())
}
