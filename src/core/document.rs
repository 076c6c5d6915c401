//! Variables document codec.
//!
//! ```yaml
//! ---
//! variables:
//! - name: DATABASE_URL
//!   value: postgres://localhost/db
//!   visibility: plain
//!   type: text
//! - name: API_KEY
//!   value: encrypted:YWdlLWVuY3J5cHRpb24u...
//!   visibility: secret
//!   type: text
//! ```
//!
//! `visibility` defaults to `plain` and `type` to `text`. Variables with an
//! empty value are dropped on load.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::constants::DOCUMENT_SEPARATOR;
use super::variable::{Variable, VariableType, Variables, Visibility};
use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    // Required, but may be null
    #[serde(deserialize_with = "nullable")]
    variables: Option<Vec<Entry>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    name: String,
    value: String,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default, rename = "type")]
    kind: VariableType,
}

fn nullable<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<Entry>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

/// Parse a variables document.
///
/// # Errors
///
/// Returns `Error::MalformedDocument` if the text does not have the
/// expected shape.
pub fn load_variables(text: &str) -> Result<Variables> {
    parse(text, "<text>")
}

/// Read and parse a variables document from disk.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read, or
/// `Error::MalformedDocument` if it does not have the expected shape.
pub fn load_variables_from(path: &Path) -> Result<Variables> {
    let text = std::fs::read_to_string(path)?;
    parse(&text, &path.display().to_string())
}

fn parse(text: &str, source_name: &str) -> Result<Variables> {
    let document: Document =
        serde_yaml::from_str(text).map_err(|e| Error::MalformedDocument {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;

    let variables: Variables = document
        .variables
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| {
            if entry.value.is_empty() {
                warn!("variable {:?} has an empty value, skipping variable", entry.name);
                return None;
            }
            Some(Variable::new(
                entry.name,
                entry.value,
                entry.visibility,
                entry.kind,
            ))
        })
        .collect();

    debug!(source = source_name, count = variables.len(), "loaded variables");
    Ok(variables)
}

/// Serialize variables to a document. Prefixes are not serialized.
///
/// # Errors
///
/// Returns `Error::Yaml` if serialization fails.
pub fn dump_variables(variables: &Variables) -> Result<String> {
    let document = Document {
        variables: Some(
            variables
                .iter()
                .map(|v| Entry {
                    name: v.name().to_string(),
                    value: v.value().to_string(),
                    visibility: v.visibility(),
                    kind: v.kind(),
                })
                .collect(),
        ),
    };

    let mut content = format!("{}\n", DOCUMENT_SEPARATOR);
    content.push_str(&serde_yaml::to_string(&document)?);
    Ok(content)
}

/// Serialize variables and replace `path` atomically.
///
/// The document is written next to `path` and renamed over it, so a failure
/// leaves the previous file intact.
///
/// # Errors
///
/// Returns an IO error if the file cannot be written or renamed.
pub fn dump_variables_to(variables: &Variables, path: &Path) -> Result<()> {
    let content = dump_variables(variables)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!(path = %path.display(), count = variables.len(), "wrote variables");
    Ok(())
}
