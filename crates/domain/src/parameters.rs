//! Parameter defaults derived from a document's declared schema.

use std::collections::BTreeMap;

use serde::Serialize;

/// A parameter declared by an automation document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentParameter {
    pub name: String,
    pub default_value: Option<String>,
}

impl DocumentParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, default_value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            default_value: default_value.map(str::to_string),
        }
    }
}

/// Parameter values sent along with a command, keyed by parameter name.
///
/// Only declared parameters with a non-empty default end up here, so a
/// discovered document can run without any caller-provided values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ParameterDefaults(BTreeMap<String, String>);

impl ParameterDefaults {
    /// Keep every declared parameter that carries a non-empty default.
    #[must_use]
    pub fn from_declared(parameters: &[DocumentParameter]) -> Self {
        let map = parameters
            .iter()
            .filter(|p| !p.name.is_empty())
            .filter_map(|p| match p.default_value.as_deref() {
                Some(value) if !value.is_empty() => Some((p.name.clone(), value.to_string())),
                _ => None,
            })
            .collect();
        Self(map)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterDefaults {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
