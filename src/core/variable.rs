//! Variable and Variables types.
//!
//! A [`Variable`] is an immutable value: every change goes through one of the
//! `with_*` constructors, which return a new instance. [`Variables`] keeps
//! insertion order through every transformation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{ENCRYPTED_MARKER, PREFIX_SEPARATOR};
use crate::error::Error;

/// Whether a variable is subject to encryption at rest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Plain,
    Secret,
}

/// How a variable's value is handed to a command.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// The value itself.
    #[default]
    Text,
    /// Path to a temporary file holding the value.
    File,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Secret => "secret",
        }
    }
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "secret" => Ok(Self::Secret),
            other => Err(Error::MalformedDocument {
                source_name: "visibility".to_string(),
                reason: format!("unknown visibility {:?}", other),
            }),
        }
    }
}

impl FromStr for VariableType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "file" => Ok(Self::File),
            other => Err(Error::MalformedDocument {
                source_name: "type".to_string(),
                reason: format!("unknown type {:?}", other),
            }),
        }
    }
}

/// A named, typed, visibility-tagged configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    value: String,
    visibility: Visibility,
    kind: VariableType,
    prefix: Option<String>,
}

impl Variable {
    /// Create a variable without prefix.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        visibility: Visibility,
        kind: VariableType,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            visibility,
            kind,
            prefix: None,
        }
    }

    /// Plain text variable.
    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, Visibility::Plain, VariableType::Text)
    }

    /// Secret text variable.
    pub fn secret(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, Visibility::Secret, VariableType::Text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn kind(&self) -> VariableType {
        self.kind
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn is_secret(&self) -> bool {
        self.visibility == Visibility::Secret
    }

    /// Whether this is a secret still carrying the encrypted marker.
    ///
    /// Plain values are never inspected.
    pub fn is_encrypted(&self) -> bool {
        self.is_secret() && self.value.starts_with(ENCRYPTED_MARKER)
    }

    /// Name used in a child process environment: `PREFIX_NAME` or `NAME`.
    pub fn effective_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}{}", prefix, PREFIX_SEPARATOR, self.name),
            None => self.name.clone(),
        }
    }

    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }

    pub fn with_visibility(&self, visibility: Visibility) -> Self {
        Self {
            visibility,
            ..self.clone()
        }
    }

    pub fn with_type(&self, kind: VariableType) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..self.clone()
        }
    }

    pub fn without_prefix(&self) -> Self {
        Self {
            prefix: None,
            ..self.clone()
        }
    }
}

/// Ordered collection of variables.
///
/// Names are expected to be unique but the container does not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables(Vec<Variable>);

impl Variables {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First variable with the given name.
    pub fn by_name(&self, name: &str) -> Option<&Variable> {
        self.0.iter().find(|v| v.name == name)
    }

    pub fn with_prefix(&self, prefix: &str) -> Self {
        self.iter().map(|v| v.with_prefix(prefix)).collect()
    }

    pub fn without_prefix(&self) -> Self {
        self.iter().map(Variable::without_prefix).collect()
    }

    /// Concatenate two stores, keeping the order of both.
    pub fn merge(mut self, other: Variables) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Map effective names to values. Later entries win on collision.
    pub fn to_dict(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|v| (v.effective_name(), v.value.clone()))
            .collect()
    }
}

impl From<Vec<Variable>> for Variables {
    fn from(variables: Vec<Variable>) -> Self {
        Self(variables)
    }
}

impl FromIterator<Variable> for Variables {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Variable> for Variables {
    fn extend<I: IntoIterator<Item = Variable>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Variables {
    type Item = Variable;
    type IntoIter = std::vec::IntoIter<Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
