use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use partnership_core::{Journal, Unannotated};
use thiserror::Error;
use tracing::info;

use super::adjoin;
use super::classify::Tag;
use super::error::ParseError;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// The contents of one or more journal files, in argument order.
#[derive(Clone, Debug, Default)]
pub struct JournalSources {
    files: Vec<(PathBuf, String)>,
}

/// The concatenated journals of all sources, and the unannotated transactions of each source that
/// had any.
#[derive(Clone, Debug, Default)]
pub struct Adjoined<'a> {
    pub journal: Journal<'a>,
    pub unannotated: Vec<Unannotated<'a>>,
}

impl Adjoined<'_> {
    /// Whether every transaction of every source carried an annotation.
    pub fn is_complete(&self) -> bool {
        self.unannotated.is_empty()
    }
}

impl JournalSources {
    /// Reads every file, stopping at the first that cannot be read.
    pub fn read<P: AsRef<Path>>(paths: &[P]) -> Result<Self, SourceError> {
        let files = paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                fs::read_to_string(path)
                    .map(|text| (path.to_path_buf(), text))
                    .map_err(|source| SourceError::Io {
                        path: path.to_path_buf(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(JournalSources { files })
    }

    pub fn from_text<P: Into<PathBuf>, S: Into<String>>(path: P, text: S) -> Self {
        JournalSources {
            files: vec![(path.into(), text.into())],
        }
    }

    pub fn push<P: Into<PathBuf>, S: Into<String>>(&mut self, path: P, text: S) {
        self.files.push((path.into(), text.into()));
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|(path, _)| path.as_path())
    }

    /// Adjoins partner shares to every source in turn.  A malformed or ambiguous transaction
    /// aborts the whole run; missing annotations are collected across all sources.
    pub fn adjoin(&self, tag: Tag) -> Result<Adjoined<'_>, SourceError> {
        let mut adjoined = Adjoined::default();
        for (path, text) in &self.files {
            let (journal, lines) = adjoin(text, tag).map_err(|source| SourceError::Parse {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), unannotated = lines.len(), "adjoined journal");
            adjoined.journal.extend(journal);
            if !lines.is_empty() {
                adjoined.unannotated.push(
                    Unannotated::builder()
                        .source(Cow::Owned(path.display().to_string()))
                        .lines(lines)
                        .build(),
                );
            }
        }
        Ok(adjoined)
    }
}
