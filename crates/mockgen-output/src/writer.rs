//! Output directory abstraction and timestamped file writer.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp format for output file names: sub-second resolution,
/// UTC, filesystem-safe.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6fZ";

/// A directory that generated JSON files are written into.
///
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Serialize `payload` into `{prefix}_{timestamp}{tag}.json`.
    ///
    /// Returns the path of the written file.
    pub fn write_payload<T: Serialize>(
        &self,
        prefix: &str,
        tag: Option<&str>,
        payload: &T,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;

        let timestamp = Utc::now().format(TIMESTAMP_FORMAT);
        let tag = tag.unwrap_or("");
        let outfile = self.dir.join(format!("{prefix}_{timestamp}{tag}.json"));

        let mut contents = serde_json::to_string_pretty(payload)
            .context("failed to serialize output payload")?;
        contents.push('\n');
        fs::write(&outfile, contents)
            .with_context(|| format!("failed to write '{}'", outfile.display()))?;
        Ok(outfile)
    }
}
