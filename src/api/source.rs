use std::fs;
use std::path::PathBuf;

use crate::error::{DashError, DashResult};

/// Read-only collaborator supplying raw CSV text for one load attempt.
///
/// Contract: returns the full document text or a transport error; no
/// pagination or streaming.
pub trait DataSource {
    /// Human-readable identity for logs and error messages.
    fn describe(&self) -> String;

    fn fetch_text(&self) -> DashResult<String>;
}

/// Data source backed by a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_text(&self) -> DashResult<String> {
        fs::read_to_string(&self.path).map_err(|err| DashError::Source {
            source_desc: self.describe(),
            reason: err.to_string(),
        })
    }
}

/// Data source backed by a blocking HTTP GET.
#[cfg(feature = "http-source")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSource {
    url: String,
}

#[cfg(feature = "http-source")]
impl HttpSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "http-source")]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch_text(&self) -> DashResult<String> {
        let into_source_err = |err: reqwest::Error| DashError::Source {
            source_desc: self.url.clone(),
            reason: err.to_string(),
        };

        reqwest::blocking::get(&self.url)
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(into_source_err)?
            .text()
            .map_err(into_source_err)
    }
}
