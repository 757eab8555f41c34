// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Literal multi-pair string replacement.

use std::{collections::HashMap, fmt};

use itertools::Itertools as _;
use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// Replaces a list of literal strings with replacements in a single pass.
///
/// Replacements happen in the order the matches appear in the text, without
/// overlapping. When several patterns match at the same position, the one
/// given first wins. Replaced text is never scanned again.
///
/// # Example
///
/// ```rust
/// use cucumber_expandvars::Replacer;
///
/// let replacer = Replacer::new([("$TO", "Berlin"), ("Berlin", "Paris")])?;
///
/// assert_eq!(replacer.replace("from Berlin to $TO"), "from Paris to Berlin");
/// # Ok::<_, cucumber_expandvars::Error>(())
/// ```
#[derive(Clone)]
pub struct Replacer {
    /// Alternation of all the escaped patterns, [`None`] if there are none.
    matcher: Option<Regex>,

    /// Replacement of every distinct pattern.
    replacements: HashMap<String, String>,
}

impl Replacer {
    /// Creates a new [`Replacer`] out of `(old, new)` pairs.
    ///
    /// # Errors
    ///
    /// - If any `old` pattern is empty.
    /// - If the combined matcher exceeds [`regex`] size limits.
    pub fn new<I, O, N>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (O, N)>,
        O: Into<String>,
        N: Into<String>,
    {
        let mut order = Vec::new();
        let mut replacements = HashMap::new();
        for (old, new) in pairs {
            let old = old.into();
            if old.is_empty() {
                return Err(Error::EmptyPlaceholder);
            }
            if !replacements.contains_key(&old) {
                order.push(regex::escape(&old));
                _ = replacements.insert(old, new.into());
            }
        }

        let matcher = if order.is_empty() {
            None
        } else {
            Some(Regex::new(&order.iter().join("|"))?)
        };

        Ok(Self { matcher, replacements })
    }

    /// Returns the number of distinct patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Indicates whether this [`Replacer`] has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Performs all the replacements over the given `text`.
    #[must_use]
    pub fn replace(&self, text: &str) -> String {
        let Some(matcher) = &self.matcher else {
            return text.to_owned();
        };

        matcher
            .replace_all(text, |caps: &Captures<'_>| {
                let found = &caps[0];
                self.replacements
                    .get(found)
                    .map_or_else(|| found.to_owned(), Clone::clone)
            })
            .into_owned()
    }
}

impl fmt::Debug for Replacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Replacer")
            .field("patterns", &self.matcher.as_ref().map(Regex::as_str))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let replacer = Replacer::new([("$A", "x")]).unwrap();

        assert_eq!(replacer.replace("$A-$A-$A"), "x-x-x");
    }

    #[test]
    fn does_not_rescan_replaced_text() {
        let replacer = Replacer::new([("$A", "$B"), ("$B", "b")]).unwrap();

        assert_eq!(replacer.replace("$A $B"), "$B b");
    }

    #[test]
    fn first_pattern_wins_at_same_position() {
        let replacer = Replacer::new([("$NAME", "short"), ("$NAMES", "long")])
            .unwrap();

        assert_eq!(replacer.replace("$NAMES"), "shortS");
    }

    #[test]
    fn duplicate_pattern_keeps_first_replacement() {
        let replacer = Replacer::new([("$A", "1"), ("$A", "2")]).unwrap();

        assert_eq!(replacer.len(), 1);
        assert_eq!(replacer.replace("$A"), "1");
    }

    #[test]
    fn escapes_regex_metacharacters() {
        let replacer = Replacer::new([("a.b", "ok"), ("(x)", "y")]).unwrap();

        assert_eq!(replacer.replace("a.b axb (x)"), "ok axb y");
    }

    #[test]
    fn empty_replacer_returns_input() {
        let replacer = Replacer::new(Vec::<(String, String)>::new()).unwrap();

        assert!(replacer.is_empty());
        assert_eq!(replacer.replace("$A"), "$A");
    }

    #[test]
    fn rejects_empty_pattern() {
        let err = Replacer::new([("", "x")]).unwrap_err();

        assert!(err.is_empty_placeholder());
    }
}
