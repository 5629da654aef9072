// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Declarative list filtering
//!
//! Each listable resource has a table mapping filter keys to comparators.
//! A filter matches an item only when every recognised key matches
//! (AND semantics). Keys missing from the table are ignored, which mirrors
//! how CloudAPI treats unknown query parameters.

use cloudapi_api::{Filter, Image, Machine, Package};
use std::str::FromStr;

type FieldMatch<T> = fn(&T, &str) -> bool;
type PrefixMatch<T> = fn(&T, &str, &str) -> bool;

pub struct FilterTable<T: 'static> {
    fields: &'static [(&'static str, FieldMatch<T>)],
    /// Keys of the form `<prefix><name>`; the comparator receives `<name>`
    prefixed: &'static [(&'static str, PrefixMatch<T>)],
}

impl<T> FilterTable<T> {
    pub fn matches(&self, item: &T, filter: &Filter) -> bool {
        filter
            .iter()
            .all(|(key, value)| self.entry_matches(item, key, value))
    }

    fn entry_matches(&self, item: &T, key: &str, value: &str) -> bool {
        if let Some((_, cmp)) = self.fields.iter().find(|(name, _)| *name == key) {
            return cmp(item, value);
        }
        for (prefix, cmp) in self.prefixed {
            if let Some(rest) = key.strip_prefix(prefix) {
                return cmp(item, rest, value);
            }
        }
        true
    }

    /// Clone every item the filter keeps, preserving order
    pub fn apply<'a>(&self, items: impl IntoIterator<Item = &'a T>, filter: Option<&Filter>) -> Vec<T>
    where
        T: Clone + 'a,
    {
        items
            .into_iter()
            .filter(|item| filter.is_none_or(|f| self.matches(item, f)))
            .cloned()
            .collect()
    }
}

fn parsed_eq<N: FromStr + PartialEq>(actual: N, value: &str) -> bool {
    value.parse::<N>().is_ok_and(|v| v == actual)
}

fn opt_eq(actual: Option<&String>, value: &str) -> bool {
    actual.is_some_and(|a| a == value)
}

pub static PACKAGE_FILTERS: FilterTable<Package> = FilterTable {
    fields: &[
        ("name", |p, v| p.name == v),
        ("memory", |p, v| parsed_eq(p.memory, v)),
        ("disk", |p, v| parsed_eq(p.disk, v)),
        ("swap", |p, v| parsed_eq(p.swap, v)),
        ("version", |p, v| opt_eq(p.version.as_ref(), v)),
        ("vcpus", |p, v| parsed_eq(p.vcpus, v)),
        ("group", |p, v| opt_eq(p.group.as_ref(), v)),
    ],
    prefixed: &[],
};

pub static IMAGE_FILTERS: FilterTable<Image> = FilterTable {
    fields: &[
        ("name", |i, v| i.name == v),
        ("os", |i, v| i.os == v),
        ("version", |i, v| i.version == v),
        ("public", |i, v| parsed_eq(i.public, v)),
        ("state", |i, v| opt_eq(i.state.as_ref(), v)),
        ("owner", |i, v| opt_eq(i.owner.as_ref(), v)),
        ("type", |i, v| i.image_type == v),
    ],
    prefixed: &[],
};

pub static MACHINE_FILTERS: FilterTable<Machine> = FilterTable {
    fields: &[
        ("name", |m, v| m.name == v),
        ("type", |m, v| m.machine_type == v),
        ("state", |m, v| m.state.to_string() == v),
        ("image", |m, v| m.image == v),
        ("memory", |m, v| parsed_eq(m.memory, v)),
    ],
    prefixed: &[("tags.", |m, tag, v| opt_eq(m.tags.get(tag), v))],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn no_filter_keeps_everything() {
        let packages = seed::packages();
        assert_eq!(PACKAGE_FILTERS.apply(&packages, None).len(), packages.len());
        assert_eq!(
            PACKAGE_FILTERS.apply(&packages, Some(&Filter::new())).len(),
            packages.len()
        );
    }

    #[test]
    fn package_memory_filter_selects_small() {
        let packages = seed::packages();
        let filter = Filter::new().with("memory", "1024");
        let found = PACKAGE_FILTERS.apply(&packages, Some(&filter));
        assert_eq!(found.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(), vec!["Small"]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let images = seed::images();
        let filter = Filter::new().with("os", "linux").with("version", "2.3.1");
        let found = IMAGE_FILTERS.apply(&images, Some(&filter));
        assert_eq!(found.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(), vec!["ubuntu12.04"]);

        let filter = Filter::new().with("os", "smartos").with("version", "2.3.1");
        assert!(IMAGE_FILTERS.apply(&images, Some(&filter)).is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let images = seed::images();
        let filter = Filter::new().with("type", "smartmachine").with("flavour", "x");
        let found = IMAGE_FILTERS.apply(&images, Some(&filter));
        assert_eq!(found.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(), vec!["SmartOS Std", "standard32"]);
    }

    #[test]
    fn unparsable_numbers_match_nothing() {
        let packages = seed::packages();
        let filter = Filter::new().with("vcpus", "lots");
        assert!(PACKAGE_FILTERS.apply(&packages, Some(&filter)).is_empty());
    }

    #[test]
    fn image_public_flag() {
        let images = seed::images();
        let filter = Filter::new().with("public", "false");
        assert!(IMAGE_FILTERS.apply(&images, Some(&filter)).is_empty());
        let filter = Filter::new().with("public", "true");
        assert_eq!(IMAGE_FILTERS.apply(&images, Some(&filter)).len(), images.len());
    }
}
