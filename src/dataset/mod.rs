//! In-memory administrative-division dataset.
//!
//! This module handles:
//! - Record types (province, communes, admin codes)
//! - Loading the pre-built JSON file at startup
//! - Read-only lookups used by the HTTP handlers

pub mod loader;
pub mod types;

use std::fmt::Display;
use std::path::Path;

use serde_json::Value;

use crate::error::DatasetError;

pub use loader::{load_records, parse_records};
pub use types::{AdminCode, Province, Record};

/// Immutable dataset shared by all request handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    records: Vec<Record>,
}

impl ReferenceData {
    /// Wrap already-parsed records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Load the dataset file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        load_records(path).map(Self::new)
    }

    /// Province entries in dataset order.
    pub fn provinces(&self) -> impl ExactSizeIterator<Item = &Province> + '_ {
        self.records.iter().map(|r| &r.tinh)
    }

    /// Communes of the first province whose code has the same string form
    /// as `code`. Empty when nothing matches.
    pub fn communes(&self, code: impl Display) -> &[Value] {
        let key = code.to_string();
        self.records
            .iter()
            .find(|r| r.tinh.mahc().matches(&key))
            .map(|r| r.xa.as_slice())
            .unwrap_or(&[])
    }

    /// Every record, unchanged.
    pub fn full(&self) -> &[Record] {
        &self.records
    }

    /// Number of province records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total commune entries across all provinces.
    pub fn commune_count(&self) -> usize {
        self.records.iter().map(|r| r.xa.len()).sum()
    }
}
