//! Where journals come from when they are not named on the command line.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Overrides the location of the resource file.
pub const LEDGER_INIT: &str = "LEDGER_INIT";

const RESOURCE_FILE: &str = ".ledgerrc";

/// File extensions picked up by a directory scan.
pub const JOURNAL_EXTENSIONS: &[&str] = &["ledger", "journal", "dat", "ldg"];

/// The journals to read: every `--file`, then the journals found in every `--directory`, or the
/// resource file defaults if that yields nothing.
pub fn journal_files(files: &[PathBuf], directories: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = files.to_vec();
    for dir in directories {
        let found = scan_directory(dir)
            .with_context(|| format!("could not read directory {}", dir.display()))?;
        paths.extend(found);
    }
    if paths.is_empty() {
        paths = default_files()?;
    }
    Ok(paths)
}

/// Journal files directly inside `dir`, sorted by file name.
pub fn scan_directory(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_journal_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), found = paths.len(), "scanned directory");
    Ok(paths)
}

fn has_journal_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| JOURNAL_EXTENSIONS.contains(&ext))
}

/// `$LEDGER_INIT` if set, otherwise `~/.ledgerrc`.
pub fn resource_file() -> Option<PathBuf> {
    match std::env::var_os(LEDGER_INIT) {
        Some(path) => Some(PathBuf::from(path)),
        None => home_dir().map(|home| home.join(RESOURCE_FILE)),
    }
}

/// Journal files named by the resource file.  A missing resource file names none.
pub fn default_files() -> Result<Vec<PathBuf>> {
    let path = match resource_file() {
        Some(path) => path,
        None => return Ok(Vec::new()),
    };
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no resource file");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("could not read {}", path.display()));
        }
    };
    let files = parse_resource(&text, home_dir().as_deref());
    debug!(path = %path.display(), files = files.len(), "read resource file");
    Ok(files)
}

/// Collects the `--file PATH`, `--file=PATH` and `-f PATH` options of a resource file.
pub fn parse_resource(text: &str, home: Option<&Path>) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(&[';', '#', '%', '|', '*'][..]))
        .filter_map(file_option)
        .map(|path| expand_home(path, home))
        .collect()
}

fn file_option(line: &str) -> Option<&str> {
    let value = if let Some(rest) = line.strip_prefix("--file") {
        rest.strip_prefix('=')
            .or_else(|| rest.starts_with(char::is_whitespace).then_some(rest))?
    } else {
        line.strip_prefix("-f")
            .filter(|rest| rest.starts_with(char::is_whitespace))?
    };
    Some(value.trim()).filter(|value| !value.is_empty())
}

/// Resolves a leading `~/` against `home`.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
