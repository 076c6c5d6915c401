//! Export formats.
//!
//! Renders decrypted variables for other tools. Only `text` variables are
//! exported; `file` variables are skipped with a warning since their value
//! only makes sense as a temporary file during `exec`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use tracing::warn;

use super::backend::ConfigMap;
use super::constants::DOCUMENT_SEPARATOR;
use super::variable::{Variable, VariableType, Variables};
use crate::error::{Error, Result};

const DEFAULT_MANIFEST_NAME: &str = "variables";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// `export NAME="value"` lines.
    Bash,
    /// dotenv `NAME=value` lines.
    EnvFile,
    /// ConfigMap and Secret manifests.
    Kubectl,
}

impl ExportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::EnvFile => "env_file",
            Self::Kubectl => "kubectl",
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bash" => Ok(Self::Bash),
            "env_file" => Ok(Self::EnvFile),
            "kubectl" => Ok(Self::Kubectl),
            other => Err(Error::UnsupportedExportTarget(other.to_string())),
        }
    }
}

/// Render `variables` for `target`.
///
/// `config` is only read by `kubectl` (`name`, `configmap_name`, `secret_name`).
///
/// # Errors
///
/// Returns `Error::Yaml` if a manifest cannot be serialized.
pub fn export_variables(
    variables: &Variables,
    target: ExportTarget,
    config: &ConfigMap,
) -> Result<String> {
    let exportable: Vec<&Variable> = variables
        .iter()
        .filter(|v| {
            if v.kind() != VariableType::Text {
                warn!(
                    "variable {:?} has type {} which is not supported for {} export, skipping variable",
                    v.name(),
                    v.kind(),
                    target
                );
                return false;
            }
            true
        })
        .collect();

    match target {
        ExportTarget::Bash => Ok(to_bash(&exportable)),
        ExportTarget::EnvFile => Ok(to_env_file(&exportable)),
        ExportTarget::Kubectl => to_kubectl(&exportable, config),
    }
}

fn to_bash(variables: &[&Variable]) -> String {
    variables
        .iter()
        .map(|v| {
            format!(
                "export {}=\"{}\"",
                v.effective_name(),
                escape_double_quoted_shell(v.value())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape for a double-quoted shell word.
fn escape_double_quoted_shell(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn to_env_file(variables: &[&Variable]) -> String {
    let mut output = String::new();
    for v in variables {
        let name = v.effective_name();
        if needs_quotes(v.value()) {
            output.push_str(&format!("{}=\"{}\"\n", name, escape_env_value(v.value())));
        } else {
            output.push_str(&format!("{}={}\n", name, v.value()));
        }
    }
    output
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains('#')
        || value.contains('=')
        || value.contains('"')
        || value.contains('\'')
        || value.contains('\\')
}

fn escape_env_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    name: String,
}

fn manifest_name(config: &ConfigMap, specific_key: &str) -> String {
    let lookup = |key: &str| config.get(key).filter(|name| !name.is_empty());
    lookup(specific_key)
        .or_else(|| lookup("name"))
        .cloned()
        .unwrap_or_else(|| DEFAULT_MANIFEST_NAME.to_string())
}

fn to_kubectl(variables: &[&Variable], config: &ConfigMap) -> Result<String> {
    let (secrets, plains): (Vec<&Variable>, Vec<&Variable>) =
        variables.iter().copied().partition(|v| v.is_secret());

    let config_map = Manifest {
        api_version: "v1",
        kind: "ConfigMap",
        metadata: Metadata {
            name: manifest_name(config, "configmap_name"),
        },
        data: plains
            .iter()
            .map(|v| (v.effective_name(), v.value().to_string()))
            .collect(),
    };

    let secret = Manifest {
        api_version: "v1",
        kind: "Secret",
        metadata: Metadata {
            name: manifest_name(config, "secret_name"),
        },
        data: secrets
            .iter()
            .map(|v| (v.effective_name(), STANDARD.encode(v.value())))
            .collect(),
    };

    let mut output = String::new();
    for manifest in [config_map, secret] {
        output.push_str(DOCUMENT_SEPARATOR);
        output.push('\n');
        output.push_str(&serde_yaml::to_string(&manifest)?);
    }
    Ok(output)
}
