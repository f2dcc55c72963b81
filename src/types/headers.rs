//! Ordered multi-valued HTTP header collection.

use std::fmt;

/// Header names whose values never appear in logs or `Debug` output.
const SENSITIVE_HEADERS: [&str; 2] = ["authorization", "proxy-authorization"];

/// An ordered mapping of header name to a list of values.
///
/// Names keep the case they were first supplied with, but lookups and
/// merges are case-insensitive, so `content-type` and `Content-Type` share
/// one entry. Adding a value to an existing name appends to that entry's
/// list instead of replacing it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    entries: Vec<(String, Vec<String>)>,
}

impl HttpHeaders {
    /// Creates an empty header collection.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Appends a value under `name`, creating the entry if needed.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Replaces every value stored under `name`.
    ///
    /// An existing entry keeps its position and original spelling.
    pub fn put(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => self.entries[idx].1 = values,
            None => self.entries.push((name, values)),
        }
    }

    /// Builder-style variant of [`HttpHeaders::add`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(name, value);
        self
    }

    /// Returns all values stored under `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|idx| self.entries[idx].1.as_slice())
    }

    /// Returns the first value stored under `name`.
    pub fn get_first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns true if an entry exists for `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes the entry for `name`, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no headers are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over header names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterates over every individual `(name, value)` pair.
    pub fn iter_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Returns true if `name` carries credentials.
    pub fn is_sensitive(name: &str) -> bool {
        SENSITIVE_HEADERS
            .iter()
            .any(|sensitive| sensitive.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for HttpHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, values) in &self.entries {
            if Self::is_sensitive(name) {
                map.entry(name, &"[REDACTED]");
            } else {
                map.entry(name, values);
            }
        }
        map.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for HttpHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = HttpHeaders::new();
        for (name, value) in iter {
            headers.add(name, value);
        }
        headers
    }
}

impl From<&reqwest::header::HeaderMap> for HttpHeaders {
    fn from(map: &reqwest::header::HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_appends_case_insensitively() {
        let mut headers = HttpHeaders::new();
        headers.add("Content-Type", "text/plain");
        headers.add("content-type", "application/json");

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("CONTENT-TYPE"),
            Some(&["text/plain".to_string(), "application/json".to_string()][..])
        );
        assert_eq!(headers.keys().collect::<Vec<_>>(), vec!["Content-Type"]);
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut headers = HttpHeaders::new()
            .with("Accept", "text/html")
            .with("X-Trace", "1");
        headers.put("accept", vec!["application/json".to_string()]);

        assert_eq!(headers.keys().collect::<Vec<_>>(), vec!["Accept", "X-Trace"]);
        assert_eq!(headers.get_first("Accept"), Some("application/json"));
    }

    #[test]
    fn test_iter_values_flattens_in_order() {
        let headers: HttpHeaders = vec![("A", "1"), ("B", "2"), ("a", "3")].into_iter().collect();

        let pairs: Vec<_> = headers.iter_values().collect();
        assert_eq!(pairs, vec![("A", "1"), ("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_remove() {
        let mut headers = HttpHeaders::new().with("X-One", "1");
        assert_eq!(headers.remove("x-one"), Some(vec!["1".to_string()]));
        assert!(headers.is_empty());
        assert_eq!(headers.remove("x-one"), None);
    }

    #[test]
    fn test_debug_redacts_authorization() {
        let headers = HttpHeaders::new()
            .with("Authorization", "Basic c2VjcmV0")
            .with("Accept", "application/json");

        let debug_str = format!("{:?}", headers);
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("c2VjcmV0"));
        assert!(debug_str.contains("application/json"));
    }

    #[test]
    fn test_from_header_map() {
        let mut map = reqwest::header::HeaderMap::new();
        map.append("x-multi", "a".parse().unwrap());
        map.append("x-multi", "b".parse().unwrap());

        let headers = HttpHeaders::from(&map);
        assert_eq!(
            headers.get("X-Multi"),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }
}
