//! JSON label files.
//!
//! Accepts the tag index format the blog build emits (`{"rust": 12, ...}`)
//! and an explicit list form (`[{"label": "rust", "weight": 12}, ...]`).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::LabelSet;
use crate::error::{CloudError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum LabelFile {
    Counts(BTreeMap<String, f32>),
    Entries(Vec<LabelEntry>),
}

#[derive(Deserialize)]
struct LabelEntry {
    label: String,
    weight: f32,
}

/// Parse a label file from a JSON string.
pub fn parse_label_json(json: &str) -> Result<LabelSet> {
    match serde_json::from_str::<LabelFile>(json)? {
        LabelFile::Counts(map) => LabelSet::new(map),
        LabelFile::Entries(list) => LabelSet::new(list.into_iter().map(|e| (e.label, e.weight))),
    }
}

/// Read and parse a label file from disk.
pub fn load_label_file(path: impl AsRef<Path>) -> Result<LabelSet> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CloudError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_label_json(&json)?;
    log::debug!("loaded {} labels from {}", set.len(), path.display());
    Ok(set)
}
