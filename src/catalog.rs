//! Loading of the static reference catalogs.
//!
//! Catalogs are JSON arrays read once at startup. Rows that do not parse
//! are logged and skipped. A missing or unparseable file must not take the
//! analyzer down, so callers normally use [`load_or_empty`], which logs the
//! failure and yields no entries.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;

/// Read a JSON array of catalog entries, skipping rows that do not parse.
pub fn load_entries<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let rows: Vec<Value> = serde_json::from_reader(reader)?;

    let entries = rows
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(path = %path.display(), row, error = %e, "skipping malformed catalog row");
                None
            }
        })
        .collect();
    Ok(entries)
}

/// Like [`load_entries`], but degrades to an empty catalog on failure.
pub fn load_or_empty<T: DeserializeOwned, P: AsRef<Path>>(kind: &str, path: P) -> Vec<T> {
    let path = path.as_ref();
    match load_entries(path) {
        Ok(entries) => {
            info!(catalog = kind, path = %path.display(), entries = entries.len(), "catalog loaded");
            entries
        }
        Err(e) => {
            warn!(catalog = kind, path = %path.display(), error = %e, "catalog unavailable, continuing with no entries");
            Vec::new()
        }
    }
}
