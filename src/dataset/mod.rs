//! CSV-backed reference dataset of origin family names.
//!
//! The file holds a single `family_name` column. Mutations only touch the
//! in-memory copy until [`ReferenceDataset::save`] is called, and a failed
//! merge leaves the in-memory copy untouched.

pub mod schema;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::DatasetError;
use crate::models::ReferenceSet;
use schema::{NAME_COLUMN, resolve_name_column};

/// Parse family names from CSV data with a header row.
///
/// Empty input yields no names. Short rows yield empty names rather than errors.
pub fn read_names<R: Read>(reader: R) -> Result<Vec<String>, DatasetError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let idx = resolve_name_column(&headers)?.index();
    let mut names = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        names.push(rec.get(idx).unwrap_or_default().to_string());
    }
    Ok(names)
}

#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    path: PathBuf,
    names: ReferenceSet,
}

impl ReferenceDataset {
    /// Load the dataset at `path`; a missing file is an empty dataset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();
        let names = if path.exists() {
            let file = File::open(&path)?;
            read_names(BufReader::new(file))?
        } else {
            log::info!("dataset {} not found; starting empty", path.display());
            Vec::new()
        };
        log::debug!("loaded {} names from {}", names.len(), path.display());
        Ok(Self {
            path,
            names: ReferenceSet::new(names),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn names(&self) -> &ReferenceSet {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Append one name. Duplicates are kept; blank names are rejected.
    pub fn add_name(&mut self, name: &str) -> Result<(), DatasetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DatasetError::InvalidName(name.to_string()));
        }
        self.names.push(name);
        Ok(())
    }

    /// Append every name from an uploaded CSV. Returns how many were added.
    pub fn merge_from_reader<R: Read>(&mut self, reader: R) -> Result<usize, DatasetError> {
        let incoming = read_names(reader)?;
        let added = incoming.len();
        self.names.extend(incoming);
        Ok(added)
    }

    pub fn merge_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize, DatasetError> {
        let file = File::open(path.as_ref())?;
        self.merge_from_reader(BufReader::new(file))
    }

    /// Remove every name. Returns how many were removed.
    pub fn clear(&mut self, confirmed: bool) -> Result<usize, DatasetError> {
        if !confirmed {
            return Err(DatasetError::ConfirmationRequired);
        }
        let removed = self.names.len();
        self.names.clear();
        Ok(removed)
    }

    /// Write the dataset back to its path atomically (temp file then rename).
    pub fn save(&self) -> Result<(), DatasetError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        {
            let file = File::create(&tmp)?;
            let mut w = WriterBuilder::new().from_writer(BufWriter::new(file));
            w.write_record([NAME_COLUMN])?;
            for name in self.names.names() {
                w.write_record([name.as_str()])?;
            }
            w.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        log::info!("saved {} names to {}", self.len(), self.path.display());
        Ok(())
    }
}
