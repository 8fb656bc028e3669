use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Txt,
    Json,
}

impl LogFormat {
    pub fn default_path(self) -> &'static str {
        match self {
            LogFormat::Txt => "success_proxies.txt",
            LogFormat::Json => "success_proxies.json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(LogFormat::Txt),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::InvalidLogFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Txt => write!(f, "txt"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Durable evidence that one attempt's response body contained the target URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessRecord {
    pub proxy: String,
    pub url: String,
    pub timestamp: String,
}

impl SuccessRecord {
    pub fn new(proxy: &str, url: &str) -> Self {
        Self {
            proxy: proxy.to_string(),
            url: url.to_string(),
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// Append-only success log. One recorder owns its file for the whole run;
/// records are persisted immediately, never batched.
#[derive(Debug)]
pub struct Recorder {
    format: LogFormat,
    path: PathBuf,
}

impl Recorder {
    pub fn new(format: LogFormat) -> Self {
        Self::with_path(format, format.default_path())
    }

    pub fn with_path(format: LogFormat, path: impl AsRef<Path>) -> Self {
        Self {
            format,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &SuccessRecord) -> Result<()> {
        match self.format {
            LogFormat::Txt => self.append_txt(record),
            LogFormat::Json => self.append_json(record),
        }
    }

    fn append_txt(&self, record: &SuccessRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(
            file,
            "[{}] {} -> {}",
            record.timestamp, record.proxy, record.url
        )?;
        Ok(())
    }

    // Read-modify-rewrite of the whole array. A missing or unparseable file is
    // treated as empty, and the rewrite goes through a sibling temp file plus
    // rename so a crash mid-write cannot corrupt prior records. Still a
    // single-writer design.
    fn append_json(&self, record: &SuccessRecord) -> Result<()> {
        let mut records: Vec<SuccessRecord> = match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        records.push(record.clone());

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
