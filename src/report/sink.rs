use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::core::utils::PathResolver;

use super::{ReportError, Result};

/// Where a finished report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// The primary destination failed; the report was handed to the alternate surface.
    Alternate(PathBuf),
}

impl ExportOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ExportOutcome::Saved(path) | ExportOutcome::Alternate(path) => path,
        }
    }
}

/// Destination for finished report bytes.
pub trait ReportSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;

    /// Fallback used when `save` fails.
    fn open_alternate(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Writes into the report directory, falling back to a scratch directory.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
    scratch: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_scratch(dir, PathResolver::scratch_dir())
    }

    pub fn with_scratch(dir: impl Into<PathBuf>, scratch: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            scratch: scratch.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReportSink for FileReportSink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        write_into(&self.dir, file_name, bytes)
    }

    fn open_alternate(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        write_into(&self.scratch, file_name, bytes)
    }
}

fn write_into(dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Hands `bytes` to the sink: `save` first, then `open_alternate`.
pub fn export<K: ReportSink + ?Sized>(
    sink: &mut K,
    file_name: &str,
    bytes: &[u8],
) -> Result<ExportOutcome> {
    let primary = match sink.save(file_name, bytes) {
        Ok(path) => return Ok(ExportOutcome::Saved(path)),
        Err(err) => err,
    };
    tracing::warn!(file = file_name, error = %primary, "saving report failed, using alternate");
    match sink.open_alternate(file_name, bytes) {
        Ok(path) => Ok(ExportOutcome::Alternate(path)),
        Err(fallback) => Err(ReportError::Export {
            primary: primary.to_string(),
            fallback: fallback.to_string(),
        }),
    }
}
