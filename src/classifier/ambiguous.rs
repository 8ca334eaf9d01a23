//! Names known to be used across categories.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::{csv_reader, header_index, normalize_name};
use crate::{NamecastError, Result};

/// Column holding the name in the CSV source.
const NAME_COLUMN: &str = "name";

/// A static set of ambiguous names.
///
/// Lookups normalize the queried name the same way the classifier input is
/// normalized, so membership checks are case- and whitespace-insensitive.
#[derive(Debug, Clone, Default)]
pub struct AmbiguousNames {
    names: HashSet<String>,
}

impl AmbiguousNames {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator of names. Blank entries are skipped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .filter_map(|n| normalize_name(n.as_ref()).ok())
                .collect(),
        }
    }

    /// Parse CSV text with a header row containing a `name` column.
    ///
    /// Fields may be quoted. Other columns are ignored, and rows too short
    /// to have a name are skipped.
    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = csv_reader(content, true);
        let column = header_index(reader.headers()?, NAME_COLUMN)?;

        let mut names = HashSet::new();
        for record in reader.records() {
            let record = record?;
            if let Some(name) = record.get(column).and_then(|n| normalize_name(n).ok()) {
                names.insert(name);
            }
        }
        Ok(Self { names })
    }

    /// Load from a CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            NamecastError::Configuration(format!(
                "Failed to read ambiguous names file {path:?}: {e}"
            ))
        })?;
        let names = Self::from_csv(&content)?;
        debug!(path = ?path, count = names.len(), "loaded ambiguous names");
        Ok(names)
    }

    /// Load from a CSV file, degrading to an empty set on any failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "ambiguous names unavailable, continuing without them");
                Self::new()
            }
        }
    }

    /// Whether `name` is in the set.
    pub fn contains(&self, name: &str) -> bool {
        normalize_name(name).is_ok_and(|n| self.names.contains(&n))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
