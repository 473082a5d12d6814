//! Corpus Document Model
//!
//! A corpus file starts with a fixed metadata header:
//!
//! ```text
//! Title:    The Time Machine
//! Author:   H. G. Wells
//! Date:     1895 [EBook #35]
//! Language: English
//!
//! <body text...>
//! ```
//!
//! The first four lines carry `Key: value` metadata, the body starts at line
//! six. The document id is taken from the filename: the digits before an
//! optional `-suffix` (`28889-0.txt` and `28889.txt` are the same document).

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Lines of the fixed-size metadata header preceding the body.
const HEADER_LINES: usize = 5;

/// Metadata record persisted per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    pub name: String,
    pub author: String,
    pub date: String,
}

/// One discovered corpus document, parsed but not yet assigned to a shard.
#[derive(Debug, Clone)]
pub struct Document {
    pub doc_id: String,
    pub metadata: DocMetadata,
    /// Body lines (everything after the metadata header).
    pub body: Vec<String>,
    /// Raw content with empty lines removed, stored alongside the metadata.
    pub content: String,
}

impl Document {
    /// Parse a raw corpus file into a document.
    pub fn parse(doc_id: &str, raw: &str) -> Result<Document> {
        let lines: Vec<&str> = raw.lines().collect();
        if lines.len() < HEADER_LINES {
            anyhow::bail!("document {} is missing its metadata header", doc_id);
        }

        let mut fields = Vec::with_capacity(4);
        for line in &lines[..4] {
            let value = line
                .split_once(':')
                .map(|(_, v)| v.trim())
                .with_context(|| format!("malformed header line in document {}", doc_id))?;
            fields.push(value.to_string());
        }

        let mut date = fields[2].clone();
        if let Some(i) = date.rfind('[') {
            date.truncate(i);
            date.truncate(date.trim_end().len());
        }

        let metadata = DocMetadata {
            name: fields[0].clone(),
            author: fields[1].clone(),
            date,
        };

        let body = lines[HEADER_LINES..]
            .iter()
            .map(|l| l.to_string())
            .collect();
        let content = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Document {
            doc_id: doc_id.to_string(),
            metadata,
            body,
            content,
        })
    }
}

static DOC_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)").unwrap());

/// Derive a document id from a corpus path: the digits of the file stem
/// before an optional `-suffix`.
pub fn doc_id_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    DOC_ID
        .captures(stem)
        .map(|caps| caps.get(1).map(|m| m.as_str().to_string()))?
}

/// Discover and parse every corpus file under `dir`.
///
/// Paths are sorted before parsing so discovery order (and therefore
/// round-robin shard placement) is reproducible between runs.
pub fn load_corpus(dir: &Path) -> Result<Vec<Document>> {
    let mut paths = Vec::new();
    for entry in WalkBuilder::new(dir).standard_filters(false).build() {
        let entry = entry?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(doc_id) = doc_id_from_path(&path) else {
            tracing::warn!("skipping {}: no document id in filename", path.display());
            continue;
        };
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match Document::parse(&doc_id, &raw) {
            Ok(doc) => documents.push(doc),
            Err(err) => tracing::warn!("skipping {}: {}", path.display(), err),
        }
    }
    Ok(documents)
}
