// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expansion of environment variables.

use std::{env, fmt, rc::Rc};

use lazy_regex::regex;
use regex::Captures;

/// Function looking up a variable value by its name.
pub type Lookup = Rc<dyn Fn(&str) -> Option<String>>;

/// Expander replacing `$NAME` and `${NAME}` placeholders with values of the
/// corresponding variables.
///
/// Placeholders of unset variables are left as is. The text is scanned once,
/// so substituted values are never expanded further.
///
/// # Example
///
/// ```rust
/// use cucumber_expandvars::EnvExpander;
///
/// let env = EnvExpander::with_lookup(|name| {
///     (name == "GREETINGS").then(|| "Hi Dave".to_owned())
/// });
///
/// assert_eq!(env.expand("$GREETINGS, ${NAME}"), "Hi Dave, ${NAME}");
/// ```
#[derive(Clone)]
pub struct EnvExpander {
    lookup: Lookup,
}

impl EnvExpander {
    /// Creates a new [`EnvExpander`] reading the process environment.
    ///
    /// Variables holding non-UTF-8 values are treated as unset.
    #[must_use]
    pub fn new() -> Self {
        Self::with_lookup(|name| env::var(name).ok())
    }

    /// Creates a new [`EnvExpander`] resolving variables with the provided
    /// `lookup` function instead of the process environment.
    #[must_use]
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self { lookup: Rc::new(lookup) }
    }

    /// Expands variables in the given `text`.
    #[must_use]
    pub fn expand(&self, text: &str) -> String {
        regex!(r"\$(?:\{([A-Za-z0-9_]+)\}|([A-Za-z0-9_]+))")
            .replace_all(text, |caps: &Captures<'_>| {
                let name = caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map_or("", |m| m.as_str());
                (self.lookup)(name).unwrap_or_else(|| caps[0].to_owned())
            })
            .into_owned()
    }
}

impl Default for EnvExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvExpander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvExpander").finish_non_exhaustive()
    }
}
