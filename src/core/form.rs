//! Untyped form submissions
//!
//! A submission is an opaque set of named string fields. Nothing in it is
//! trusted until it has gone through [`validation`](crate::core::validation).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Named string fields posted by a client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSubmission {
    fields: HashMap<String, String>,
}

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Raw value of a field; `None` when the field was not submitted at all
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormSubmission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_none() {
        let form = FormSubmission::new().with("amount", "10");
        assert_eq!(form.get("amount"), Some("10"));
        assert_eq!(form.get("customerId"), None);
    }

    #[test]
    fn test_empty_value_is_present() {
        let form = FormSubmission::new().with("customerId", "");
        assert!(form.contains("customerId"));
        assert_eq!(form.get("customerId"), Some(""));
    }

    #[test]
    fn test_deserializes_from_flat_map() {
        let form: FormSubmission =
            serde_json::from_str(r#"{"status":"paid","amount":"3"}"#).unwrap();
        assert_eq!(form.len(), 2);
        assert_eq!(form.get("status"), Some("paid"));
    }

    #[test]
    fn test_from_iterator() {
        let form: FormSubmission = [("email", "a@b.co"), ("password", "123456")]
            .into_iter()
            .collect();
        assert_eq!(form.get("email"), Some("a@b.co"));
    }
}
