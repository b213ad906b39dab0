use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::NamespaceInfo;

/// Free-form metadata attached to catalog entities
pub type MetadataMap = BTreeMap<String, serde_json::Value>;

/// A (namespace, local) pair.
///
/// The namespace part may hold either a namespace prefix or a namespace URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QualifiedName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self { namespace: Some(namespace.into()), local: local.into() }
    }

    /// A name without namespace part
    pub fn local(local: impl Into<String>) -> Self {
        Self { namespace: None, local: local.into() }
    }

    /// Split a `prefix:local` string; a string without colon yields a local name
    pub fn parse(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => {
                Self::new(prefix, local)
            }
            _ => Self::local(name),
        }
    }

    /// Whether the namespace part names the given namespace, by prefix or by URI
    pub fn in_namespace(&self, namespace: &NamespaceInfo) -> bool {
        match &self.namespace {
            Some(ns) => *ns == namespace.prefix || *ns == namespace.uri,
            None => false,
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}:{}", ns, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// A keyword attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub value: String,
    pub language: Option<String>,
    pub vocabulary: Option<String>,
}

impl Keyword {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), language: None, vocabulary: None }
    }
}
