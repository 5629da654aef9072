// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! List filters

/// Ordered set of query constraints narrowing a list operation.
///
/// Entries keep their insertion order. Setting a key that is already present
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    entries: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Filter::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a raw query string (`a=1&b=2`), percent-decoding each part.
    ///
    /// Pairs without `=` become empty values; undecodable input is kept
    /// verbatim.
    pub fn from_query(query: &str) -> Self {
        let mut filter = Filter::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            filter.set(decode(k), decode(v));
        }
        filter
    }
}

fn decode(s: &str) -> String {
    let s = s.replace('+', " ");
    urlencoding::decode(&s)
        .map(|d| d.into_owned())
        .unwrap_or(s)
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filter = Filter::new();
        for (k, v) in iter {
            filter.set(k, v);
        }
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_in_place() {
        let mut f = Filter::new();
        f.set("memory", "1024");
        f.set("state", "running");
        f.set("memory", "2048");
        let entries: Vec<_> = f.iter().collect();
        assert_eq!(entries, vec![("memory", "2048"), ("state", "running")]);
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn from_query_decodes() {
        let f = Filter::from_query("name=my%20vm&tags.role=db&flag");
        assert_eq!(f.get("name"), Some("my vm"));
        assert_eq!(f.get("tags.role"), Some("db"));
        assert_eq!(f.get("flag"), Some(""));
        assert!(Filter::from_query("").is_empty());
    }
}
