//! Log ingestion layer: fetches raw records from an external source into the raw-log file
//! and reads them back as lines.
//!
//! The runtime depends on the `LogSource` abstraction rather than a concrete command, so
//! other backends (or a canned source in tests) can stand in for the event log.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::fs::File;
use tokio::process::Command;

/// Generic trait for log sources.
///
/// Implementors overwrite `dest` with the fetched text.
#[async_trait::async_trait]
pub trait LogSource {
    async fn fetch(&self, dest: &Path) -> Result<()>;
}

/// External command whose standard output becomes the raw-log file.
#[derive(Debug, Clone)]
pub struct CommandSource {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSource {
    /// `wevtutil qe <channel> /c:<count> /f:text`: the newest `count` records as plain text.
    pub fn event_log(channel: &str, count: u32) -> Self {
        Self {
            program: "wevtutil".into(),
            args: vec!["qe".into(), channel.into(), format!("/c:{count}"), "/f:text".into()],
        }
    }
}

#[async_trait::async_trait]
impl LogSource for CommandSource {
    async fn fetch(&self, dest: &Path) -> Result<()> {
        // Truncate first so a failed command still leaves no stale records behind.
        let file = File::create(dest)
            .await
            .with_context(|| format!("creating {}", dest.display()))?
            .into_std()
            .await;

        tracing::info!(program = %self.program, args = ?self.args, "fetching records");
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .status()
            .await
            .with_context(|| format!("running {}", self.program))?;

        if !status.success() {
            bail!("{} exited with {status}", self.program);
        }
        Ok(())
    }
}

/// Read the raw-log file as lines. `Ok(None)` when the file does not exist.
pub async fn read_lines(path: &Path) -> Result<Option<Vec<String>>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let text = String::from_utf8_lossy(&bytes);
    Ok(Some(
        text.lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect(),
    ))
}
