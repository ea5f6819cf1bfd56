//! # Event Source
//!
//! A file-backed event store. Each input file holds one JSON-encoded [`StoreRecord`]
//! per line; blank lines are ignored. Files are read in the order given, one at a time,
//! and each is closed as soon as it is exhausted.

use events::StoreRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

pub mod error;

pub use error::SourceError;

/// The file currently being read.
struct OpenFile {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line: usize,
}

/// Sequential reader over the events of a set of files.
pub struct EventStore {
    pending: std::vec::IntoIter<PathBuf>,
    current: Option<OpenFile>,
}

impl EventStore {
    /// Prepares to read `paths` in order. Fails immediately if any file does not exist.
    pub fn open(paths: &[PathBuf]) -> Result<Self, SourceError> {
        for path in paths {
            std::fs::metadata(path).map_err(|source| SourceError::Io {
                path: path.clone(),
                source,
            })?;
        }
        Ok(Self {
            pending: paths.to_vec().into_iter(),
            current: None,
        })
    }

    /// Counts the records in `paths` without parsing them.
    pub fn count_events(paths: &[PathBuf]) -> Result<u64, SourceError> {
        let mut total = 0;
        for path in paths {
            let reader = BufReader::new(open_file(path)?);
            for line in reader.lines() {
                let line = line.map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })?;
                if !line.trim().is_empty() {
                    total += 1;
                }
            }
        }
        Ok(total)
    }

    fn advance_file(&mut self) -> Result<bool, SourceError> {
        match self.pending.next() {
            Some(path) => {
                let file = open_file(&path)?;
                tracing::debug!(path = %path.display(), "Opened event file");
                self.current = Some(OpenFile {
                    path,
                    lines: BufReader::new(file).lines(),
                    line: 0,
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn open_file(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Iterator for EventStore {
    type Item = Result<StoreRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(open) = self.current.as_mut() else {
                match self.advance_file() {
                    Ok(true) => continue,
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                }
            };

            match open.lines.next() {
                Some(Ok(text)) => {
                    open.line += 1;
                    if text.trim().is_empty() {
                        continue;
                    }
                    let record = serde_json::from_str::<StoreRecord>(&text).map_err(|source| {
                        SourceError::Parse {
                            path: open.path.clone(),
                            line: open.line,
                            source,
                        }
                    });
                    return Some(record);
                }
                Some(Err(source)) => {
                    let path = open.path.clone();
                    self.current = None;
                    return Some(Err(SourceError::Io { path, source }));
                }
                None => {
                    tracing::debug!(path = %open.path.display(), lines = open.line, "Finished event file");
                    self.current = None;
                }
            }
        }
    }
}
