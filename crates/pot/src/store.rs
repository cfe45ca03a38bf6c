//! Directory of per-class text files.
//!
//! Each class lives in a file named by its hex label (`0x41`, `0xb0a1`), so a
//! consumer can load a handful of classes without touching the rest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::dataset::{Dataset, StrokeSet};
use crate::error::StoreError;
use crate::sample::label_hex;
use crate::text::{decode_class, encode_class, parse_label_hex};

/// What to do when the target directory already holds files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Leave a populated directory untouched.
    #[default]
    SkipIfPopulated,
    /// Write every class, replacing files of the same name.
    Overwrite,
}

/// Outcome of [`ClassStore::write`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub classes_written: usize,
    pub skipped_populated: bool,
}

/// A directory of class files.
#[derive(Debug, Clone)]
pub struct ClassStore {
    dir: PathBuf,
}

impl ClassStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `label_code`.
    pub fn class_path(&self, label_code: u16) -> PathBuf {
        self.dir.join(label_hex(label_code))
    }

    /// Writes one file per class, creating the directory if needed.
    #[instrument(skip_all, fields(dir = %self.dir.display(), classes = dataset.len()))]
    pub fn write(&self, dataset: &Dataset, mode: WriteMode) -> Result<WriteReport, StoreError> {
        if !self.dir.exists() {
            info!("creating class file directory");
            fs::create_dir_all(&self.dir).map_err(|source| self.io_err(&self.dir, source))?;
        } else if mode == WriteMode::SkipIfPopulated && self.is_populated()? {
            info!("class file directory already populated, leaving it as is");
            return Ok(WriteReport {
                classes_written: 0,
                skipped_populated: true,
            });
        }

        for (code, samples) in dataset.classes() {
            let path = self.class_path(code);
            fs::write(&path, encode_class(code, samples)).map_err(|source| self.io_err(&path, source))?;
            debug!(label = %label_hex(code), samples = samples.len(), "wrote class file");
        }
        info!("finished writing class files");
        Ok(WriteReport {
            classes_written: dataset.len(),
            skipped_populated: false,
        })
    }

    /// Labels of every class file, sorted.
    ///
    /// Hidden files are ignored; any other file whose name is not a label is an error.
    pub fn list(&self) -> Result<Vec<u16>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| self.io_err(&self.dir, source))?;
        let mut labels = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| self.io_err(&self.dir, source))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') {
                continue;
            }
            let code = parse_label_hex(&name).ok_or_else(|| StoreError::InvalidFileName(entry.path()))?;
            labels.push(code);
        }
        labels.sort_unstable();
        Ok(labels)
    }

    /// Loads the samples of one class.
    pub fn load(&self, label_code: u16) -> Result<Vec<StrokeSet>, StoreError> {
        let path = self.class_path(label_code);
        let text = fs::read_to_string(&path).map_err(|source| self.io_err(&path, source))?;
        let (found, samples) = decode_class(&text).map_err(|source| StoreError::Text {
            path: path.clone(),
            source,
        })?;
        if found != label_code {
            return Err(StoreError::LabelMismatch {
                path,
                expected: label_code,
                found,
            });
        }
        Ok(samples)
    }

    /// Loads the given classes in parallel, in the order given.
    #[instrument(skip_all, fields(dir = %self.dir.display(), classes = labels.len()))]
    pub fn load_selected(&self, labels: &[u16]) -> Result<Dataset, StoreError> {
        let loaded = labels
            .par_iter()
            .map(|&code| self.load(code).map(|samples| (code, samples)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut dataset = Dataset::new();
        for (code, samples) in loaded {
            dataset.insert_class(code, samples);
        }
        info!(samples = dataset.sample_count(), "loaded class files");
        Ok(dataset)
    }

    /// Loads every class in the directory, ordered by label.
    pub fn load_all(&self) -> Result<Dataset, StoreError> {
        self.load_selected(&self.list()?)
    }

    fn is_populated(&self) -> Result<bool, StoreError> {
        let mut entries = fs::read_dir(&self.dir).map_err(|source| self.io_err(&self.dir, source))?;
        Ok(entries.next().is_some())
    }

    fn io_err(&self, path: &Path, source: io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
