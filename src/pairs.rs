// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Pairs`] of placeholder names and their values.

use std::{collections::HashMap, fmt};

use linked_hash_map::LinkedHashMap;

use crate::{error::Result, replacer::Replacer};

/// Sigil marking a placeholder in a [`Step`] text.
///
/// [`Step`]: gherkin::Step
pub const SIGIL: char = '$';

/// Renders the placeholder token for the given `name`.
///
/// ```rust
/// assert_eq!(cucumber_expandvars::placeholder("NAME"), "$NAME");
/// ```
#[must_use]
pub fn placeholder(name: &str) -> String {
    format!("{SIGIL}{name}")
}

/// Mapping of placeholder names (without [`SIGIL`]) to their values.
///
/// Insertion order is kept for iteration only, it doesn't affect how the
/// values are substituted.
///
/// # Example
///
/// ```rust
/// use cucumber_expandvars::Pairs;
///
/// let pairs = Pairs::from([("HUSBAND", "John")]).with("WIFE", "Jane");
///
/// assert_eq!(pairs.get("WIFE"), Some("Jane"));
/// assert_eq!(pairs.len(), 2);
/// ```
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Pairs(LinkedHashMap<String, String>);

impl Pairs {
    /// Creates empty [`Pairs`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `name`/`value` pair, replacing the previous value of `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        _ = self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the value of the given placeholder `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether there are no pairs at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over placeholder names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Builds a [`Replacer`] substituting `$name` with its value for every
    /// pair.
    ///
    /// Longer names are tried first, so `$NAMES` is never shadowed by
    /// `$NAME`. An empty name stands for a lone `$`.
    ///
    /// # Errors
    ///
    /// If the resulting pattern can't be compiled.
    pub fn to_replacer(&self) -> Result<Replacer> {
        let mut tokens = self
            .iter()
            .map(|(name, value)| (placeholder(name), value.to_owned()))
            .collect::<Vec<_>>();
        // Stable sort keeps insertion order between names of equal length.
        tokens.sort_by(|(l, _), (r, _)| r.len().cmp(&l.len()));
        Replacer::new(tokens)
    }
}

impl fmt::Debug for Pairs {
    // Values may hold secrets, so only names are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Pairs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Pairs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<S> From<HashMap<String, String, S>> for Pairs {
    fn from(map: HashMap<String, String, S>) -> Self {
        map.into_iter().collect()
    }
}

impl<'p> IntoIterator for &'p Pairs {
    type Item = (&'p String, &'p String);
    type IntoIter = linked_hash_map::Iter<'p, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
