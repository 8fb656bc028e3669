use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::recorder::LogFormat;

/// Everything a run needs, resolved once at startup and immutable after.
///
/// Building one of these is the CLI layer's job; the engine itself never
/// prompts or reads flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Raw proxy strings in original file order.
    pub proxies: Vec<String>,
    /// Absolute target URLs in original file order.
    pub urls: Vec<String>,
    /// Full passes over the proxy list.
    pub loops: u32,
    /// Pause between proxies, in seconds.
    pub wait_secs: f64,
    pub log_format: LogFormat,
}

/// Reads a list file into trimmed, non-empty lines, preserving order.
pub fn load_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::ListFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
