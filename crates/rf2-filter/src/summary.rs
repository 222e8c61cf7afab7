//! The audit report written alongside the filtered tree.

use std::fs;
use std::path::{Path, PathBuf};

use rf2_types::well_known::SUMMARY_FILE_NAME;
use tracing::{info, warn};

use crate::types::{FilterResult, ValidatedConfig};

const CRLF: &str = "\r\n";

/// Accumulates every decision made during a run.
///
/// Each entry is also emitted as a tracing event. The report is written once,
/// at the end of the run, as `FilterInfo.txt`.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    preamble: String,
    entries: Vec<String>,
}

impl Summary {
    /// Creates a summary with a free-form preamble.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
            entries: Vec::new(),
        }
    }

    /// Creates a summary whose preamble records the run parameters.
    pub fn for_config(config: &ValidatedConfig) -> Self {
        let module = config
            .module
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string());
        let namespace = config
            .namespace
            .as_ref()
            .map(|ns| ns.to_string())
            .unwrap_or_else(|| "none".to_string());

        Self::new(format!(
            "This content was filtered by an RF2 filter tool.  The parameters were module: {} namespace: {} software version: {}",
            module, namespace, config.converter_version
        ))
    }

    /// Records an informational event.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.entries.push(message);
    }

    /// Records a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.entries.push(message);
    }

    /// Logged events, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The report text: preamble, a blank line, then one CRLF-terminated line per event.
    pub fn render(&self) -> String {
        let mut text = String::with_capacity(
            self.preamble.len() + self.entries.iter().map(|e| e.len() + 2).sum::<usize>() + 4,
        );
        text.push_str(&self.preamble);
        text.push_str(CRLF);
        text.push_str(CRLF);
        for entry in &self.entries {
            text.push_str(entry);
            text.push_str(CRLF);
        }
        text
    }

    /// Writes `FilterInfo.txt` into `dir`, replacing any existing report.
    pub fn write_to(&self, dir: &Path) -> FilterResult<PathBuf> {
        let path = dir.join(SUMMARY_FILE_NAME);
        fs::write(&path, self.render())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut summary = Summary::new("params");
        summary.log("Filtering file a.txt");
        summary.warn("mismatch");

        assert_eq!(
            summary.render(),
            "params\r\n\r\nFiltering file a.txt\r\nmismatch\r\n"
        );
        assert_eq!(summary.entries().len(), 2);
    }

    #[test]
    fn test_write_to_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SUMMARY_FILE_NAME), "stale report").unwrap();

        let mut summary = Summary::new("fresh");
        summary.log("Copied file readme.md");
        let path = summary.write_to(dir.path()).unwrap();

        assert_eq!(path, dir.path().join("FilterInfo.txt"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "fresh\r\n\r\nCopied file readme.md\r\n"
        );
    }
}
