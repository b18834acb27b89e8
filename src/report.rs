use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::block::Filtered;
use crate::filter::{Highlighter, Keywords};
use crate::style::{Styler, Tone};

const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HEADER_WIDTH: usize = 80;
const FOOTER_WIDTH: usize = 100;
const BANNER_WIDTH: usize = 60;

pub fn timestamp(at: DateTime<Local>) -> String {
    at.format(STAMP_FORMAT).to_string()
}

/// Append-only record of every run.
pub struct CombinedFile {
    path: PathBuf,
}

impl CombinedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First write of every run, before any argument validation.
    pub async fn stamp_run(&self, at: DateTime<Local>) -> Result<()> {
        self.append(&format!("\n\n[Script run at:] {}\n", timestamp(at))).await
    }

    pub async fn append_record(&self, filtered: &Filtered, keywords: &Keywords, at: DateTime<Local>) -> Result<()> {
        self.append(&render_record(filtered, keywords, at)).await
    }

    async fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("opening {}", self.path.display()))?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Header, retained lines and closing marker for one run, unstyled.
pub fn render_record(filtered: &Filtered, keywords: &Keywords, at: DateTime<Local>) -> String {
    let rule = "=".repeat(HEADER_WIDTH);
    let close = "=".repeat(FOOTER_WIDTH);
    let run_at = format!(" Run at: {} ", timestamp(at));
    let kw_line = format!(" Keywords: {keywords} ");

    let mut out = String::new();
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("{run_at:^HEADER_WIDTH$}\n"));
    out.push_str(&format!("{kw_line:^HEADER_WIDTH$}\n"));
    out.push_str(&rule);
    out.push_str("\n\n[ ......NEW LOG ENTRIES...... ]\n\n");
    for line in &filtered.lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&close);
    out.push_str("\n[ End of log entries. All records processed. ]\n");
    out.push_str(&close);
    out.push_str("\n\n\n");
    out
}

pub fn print_banner(styler: &dyn Styler, output: &Path) {
    let heading = format!("{:^BANNER_WIDTH$}", "System Log Analyzer & Filter Tool");
    println!("\n{}\n", styler.paint(&heading, Tone::Heading));
    let help = format!(
        "Usage:\n\
         - If no keywords are provided, the built-in default keywords are used.\n\
         - Provide --keywords to override (comma-separated list).\n\
         - Provide --date to filter logs only from that day (format YYYY-MM-DD).\n\
         - Results are appended to {} with timestamps and separators.\n",
        output.display()
    );
    println!("{}", styler.paint(&help, Tone::Info));
}

pub fn print_fetching() {
    println!("\n{}", "-".repeat(30));
    println!("......Fetching system logs......");
    println!("\n{}", "-".repeat(30));
}

pub fn print_summary(filtered: &Filtered) {
    let rule = "=".repeat(40);
    println!("\n{rule}");
    println!("Total logs scanned: {}", filtered.scanned);
    println!("Total matches found: {}", filtered.entries);
    println!("{rule}\n");
}

pub fn print_entries(filtered: &Filtered, highlighter: &Highlighter, styler: &dyn Styler) {
    if filtered.is_empty() {
        println!(
            "{}",
            styler.paint("No matching logs found. Try using more general terms.", Tone::Notice)
        );
        return;
    }
    for line in &filtered.lines {
        println!("{}", highlighter.highlight(line, styler));
    }
}
