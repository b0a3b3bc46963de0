//! Document-level key/value properties.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::Content;
use crate::error::{Result, TableError};

/// String-keyed values attached to a table as a whole (title, author, ...).
///
/// The table carries them for writers and never interprets them.
/// Deserialization applies the same checks as [`set`](Self::set).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Content>", into = "BTreeMap<String, Content>")]
pub struct Properties(BTreeMap<String, Content>);

impl TryFrom<BTreeMap<String, Content>> for Properties {
    type Error = TableError;

    fn try_from(entries: BTreeMap<String, Content>) -> Result<Self> {
        let mut props = Self::new();
        for (key, value) in entries {
            props.set(key, value)?;
        }
        Ok(props)
    }
}

impl From<Properties> for BTreeMap<String, Content> {
    fn from(props: Properties) -> Self {
        props.0
    }
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Content>) -> Result<&mut Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(TableError::InvalidArgument("property key may not be empty"));
        }
        let value = value.into();
        if value.is_null() {
            return Err(TableError::InvalidArgument("property value may not be null"));
        }
        self.0.insert(key, value);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Content> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Content> {
        self.0.remove(key)
    }

    /// Entries ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Content)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_remove() {
        let mut props = Properties::new();
        props.set("title", "Q3").unwrap().set("pages", 3).unwrap();
        assert_eq!(props.get("title"), Some(&json!("Q3")));
        assert!(props.contains("pages"));
        assert_eq!(props.len(), 2);
        assert_eq!(props.remove("pages"), Some(json!(3)));
        assert!(!props.contains("pages"));
    }

    #[test]
    fn test_rejects_empty_key_and_null() {
        let mut props = Properties::new();
        assert!(props.set("", "x").is_err());
        assert!(props.set("k", Content::Null).is_err());
        assert!(props.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_empty_key_and_null() {
        assert!(serde_json::from_value::<Properties>(json!({"": "x"})).is_err());
        assert!(serde_json::from_value::<Properties>(json!({"k": null})).is_err());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut props = Properties::new();
        props.set("title", "Q3").unwrap();
        assert_eq!(serde_json::to_value(&props).unwrap(), json!({"title": "Q3"}));
    }

    #[test]
    fn test_deserializes_from_plain_map() {
        let props: Properties = serde_json::from_value(json!({"b": 1, "a": "x"})).unwrap();
        let keys: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
