//! Flat field-path → message map returned by the server on validation
//! failure, e.g. `{"errors": {"sections.0.items.1.title": ["..."]}}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a response body. Accepts the map at the top level or under
    /// `errors`; messages may be strings or lists of strings (first kept).
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let map = match value.get("errors") {
            Some(Value::Object(map)) => map,
            _ => match value {
                Value::Object(map) if !map.contains_key("message") => map,
                _ => return Self::default(),
            },
        };

        let mut errors = BTreeMap::new();
        for (path, raw) in map {
            let message = match raw {
                Value::String(s) => Some(s.clone()),
                Value::Array(list) => list.iter().find_map(|m| m.as_str().map(str::to_string)),
                _ => None,
            };
            if let Some(message) = message {
                errors.insert(path.clone(), message);
            }
        }
        Self(errors)
    }

    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.insert(path.into(), message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First message, with a count of the rest
    pub fn summary(&self) -> String {
        match self.0.values().next() {
            None => String::new(),
            Some(first) if self.0.len() == 1 => first.clone(),
            Some(first) => format!("{} (+{} lainnya)", first, self.0.len() - 1),
        }
    }
}

/// One segment of a dot-notation field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

pub fn split_path(path: &str) -> Vec<PathSegment> {
    path.split('.')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<usize>() {
            Ok(i) => PathSegment::Index(i),
            Err(_) => PathSegment::Key(s.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_nested_errors() {
        let errors = FieldErrors::from_body(
            r#"{"message":"The given data was invalid.","errors":{"items.0.quantity":["Jumlah wajib diisi","x"],"year":"Tahun wajib"}}"#,
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("items.0.quantity"), Some("Jumlah wajib diisi"));
        assert_eq!(errors.get("year"), Some("Tahun wajib"));
    }

    #[test]
    fn test_from_body_flat_and_garbage() {
        let errors = FieldErrors::from_body(r#"{"plant_code":"Plant wajib"}"#);
        assert_eq!(errors.get("plant_code"), Some("Plant wajib"));
        assert!(FieldErrors::from_body("<html>").is_empty());
        assert!(FieldErrors::from_body(r#"{"message":"oops"}"#).is_empty());
    }

    #[test]
    fn test_summary() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.summary(), "");
        errors.insert("a", "A salah");
        assert_eq!(errors.summary(), "A salah");
        errors.insert("b", "B salah");
        assert_eq!(errors.summary(), "A salah (+1 lainnya)");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(
            split_path("sections.0.items.12.title"),
            vec![
                PathSegment::Key("sections".into()),
                PathSegment::Index(0),
                PathSegment::Key("items".into()),
                PathSegment::Index(12),
                PathSegment::Key("title".into()),
            ]
        );
    }
}
