use std::process::ExitCode;

use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::block::{BlockFilter, Filtered};
use crate::cli::Config;
use crate::filter::Highlighter;
use crate::log::{CommandSource, LogSource, read_lines};
use crate::report::{self, CombinedFile};
use crate::style::{self, Styler, Tone};

const DATE_ARG_FORMAT: &str = "%Y-%m-%d";

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    InvalidDate,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Completed => ExitCode::SUCCESS,
            Outcome::InvalidDate => ExitCode::FAILURE,
        }
    }
}

/// Application runtime: one fetch, filter and append cycle.
pub async fn run(config: Config) -> Result<ExitCode> {
    let source = CommandSource::event_log(&config.channel, config.count);
    execute(config, &source).await.map(ExitCode::from)
}

async fn execute(config: Config, source: &dyn LogSource) -> Result<Outcome> {
    let styler = style::detect(config.no_color);
    let combined = CombinedFile::new(&config.output);

    let started = Local::now();
    println!("Script run at: {}", report::timestamp(started));
    if let Err(e) = combined.stamp_run(started).await {
        report_failure(styler.as_ref(), "Could not write run stamp", &e);
    }

    report::print_banner(styler.as_ref(), combined.path());

    let date = match parse_date_arg(config.date.as_deref()) {
        Ok(date) => date,
        Err(e) => {
            tracing::error!(date = ?config.date, error = %e, "invalid date argument");
            println!("{}", styler.paint("Invalid date format! Expected YYYY-MM-DD.", Tone::Alert));
            return Ok(Outcome::InvalidDate);
        }
    };

    if config.skip_fetch {
        tracing::info!(path = %config.raw_log.display(), "skipping fetch");
    } else {
        report::print_fetching();
        if let Err(e) = source.fetch(&config.raw_log).await {
            tracing::warn!(error = %e, "log source failed; continuing with whatever was captured");
        }
        println!("Logs saved to - {}", config.raw_log.display());
    }

    let filtered = match read_lines(&config.raw_log).await {
        Ok(Some(lines)) => BlockFilter::new(&config.keywords)
            .with_date(date)
            .with_mode(config.emit)
            .apply(&lines),
        Ok(None) => {
            println!("{}", styler.paint("Log file not found! Please fetch the logs first.", Tone::Alert));
            Filtered::default()
        }
        Err(e) => {
            report_failure(styler.as_ref(), "Could not read log file", &e);
            Filtered::default()
        }
    };

    report::print_summary(&filtered);
    let highlighter = Highlighter::new(&config.keywords)?;
    report::print_entries(&filtered, &highlighter, styler.as_ref());

    match combined.append_record(&filtered, &config.keywords, Local::now()).await {
        Ok(()) => println!("Filtered logs appended to: {}", combined.path().display()),
        Err(e) => report_failure(styler.as_ref(), "Could not append results", &e),
    }
    Ok(Outcome::Completed)
}

fn parse_date_arg(arg: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    arg.map(|d| NaiveDate::parse_from_str(d.trim(), DATE_ARG_FORMAT)).transpose()
}

fn report_failure(styler: &dyn Styler, what: &str, err: &anyhow::Error) {
    tracing::error!(error = ?err, "{what}");
    println!("{}", styler.paint(&format!("{what}: {err:#}"), Tone::Alert));
}
