//! Typed keyword bag threaded from the parser to the engine client

use std::collections::BTreeMap;

use serde_json::Value;

/// Closed set of value shapes an option can take
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ArgValue {
    /// Option declared but not supplied and without a default
    #[default]
    Unset,
    Flag(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
    /// Compound structure built by the adapter (host config, filters, ...)
    Nested(Value),
}

impl ArgValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, ArgValue::Unset)
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ArgValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ArgValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// JSON form used when the value is forwarded over the wire
    pub fn to_json(&self) -> Value {
        match self {
            ArgValue::Unset => Value::Null,
            ArgValue::Flag(value) => Value::Bool(*value),
            ArgValue::Number(value) => Value::from(*value),
            ArgValue::Text(value) => Value::String(value.clone()),
            ArgValue::List(values) => Value::from(values.clone()),
            ArgValue::Nested(value) => value.clone(),
        }
    }
}

/// Options keyed by destination, in a stable order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Kwargs(BTreeMap<String, ArgValue>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ArgValue) {
        self.0.insert(key.into(), value);
    }

    /// Builder form of `insert`
    pub fn with(mut self, key: impl Into<String>, value: ArgValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ArgValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Boolean value; unset or missing reads as `false`
    pub fn flag(&self, key: &str) -> bool {
        self.flag_or(key, false)
    }

    /// Boolean value with an explicit fallback for unset keys
    pub fn flag_or(&self, key: &str, fallback: bool) -> bool {
        self.get(key).and_then(ArgValue::as_flag).unwrap_or(fallback)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ArgValue::as_text)
    }

    pub fn number(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(ArgValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    /// Sequence value; a single text value reads as a one-item list
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(ArgValue::List(values)) => values.clone(),
            Some(ArgValue::Text(value)) => vec![value.clone()],
            _ => Vec::new(),
        }
    }

    pub fn nested(&self, key: &str) -> Option<&Value> {
        match self.get(key) {
            Some(ArgValue::Nested(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether the key holds something other than `Unset`
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_unset())
    }

    /// Keep only the keys accepted by `allowed`
    pub fn retain_keys<F>(&mut self, mut allowed: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.0.retain(|key, _| allowed(key));
    }
}

impl FromIterator<(String, ArgValue)> for Kwargs {
    fn from_iter<T: IntoIterator<Item = (String, ArgValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Kwargs {
    type Item = (String, ArgValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_reads_unset_as_fallback() {
        let kwargs = Kwargs::new()
            .with("all", ArgValue::Flag(true))
            .with("trunc", ArgValue::Unset);

        assert!(kwargs.flag("all"));
        assert!(!kwargs.flag("trunc"));
        assert!(kwargs.flag_or("trunc", true));
        assert!(!kwargs.flag("missing"));
    }

    #[test]
    fn test_list_accepts_single_text() {
        let kwargs = Kwargs::new()
            .with("one", ArgValue::Text("a".to_string()))
            .with("many", ArgValue::List(vec!["a".into(), "b".into()]));

        assert_eq!(kwargs.list("one"), vec!["a"]);
        assert_eq!(kwargs.list("many"), vec!["a", "b"]);
        assert!(kwargs.list("none").is_empty());
    }

    #[test]
    fn test_is_set_and_retain() {
        let mut kwargs = Kwargs::new()
            .with("name", ArgValue::Text("web".into()))
            .with("hostname", ArgValue::Unset)
            .with("remove", ArgValue::Flag(true));

        assert!(kwargs.is_set("name"));
        assert!(!kwargs.is_set("hostname"));

        kwargs.retain_keys(|key| key != "remove");
        assert_eq!(kwargs.keys().collect::<Vec<_>>(), vec!["hostname", "name"]);
    }

    #[test]
    fn test_to_json() {
        assert_eq!(ArgValue::Unset.to_json(), Value::Null);
        assert_eq!(ArgValue::Number(3).to_json(), serde_json::json!(3));
        assert_eq!(
            ArgValue::List(vec!["x".into()]).to_json(),
            serde_json::json!(["x"])
        );
    }
}
