// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Single substitution pass over a text.

use std::{fmt, rc::Rc};

use crate::{env::EnvExpander, replacer::Replacer};

/// Text-to-text function representing one substitution pass.
///
/// Cheap to clone: clones share the same underlying function, so any state
/// it closes over is shared as well.
///
/// # Example
///
/// ```rust
/// use cucumber_expandvars::Transformer;
///
/// let from = Transformer::new(|s| s.replace("$FROM", "Paris"));
/// let to = Transformer::new(|s| s.replace("$TO", "Berlin"));
///
/// assert_eq!(from.then(to).apply("$FROM -> $TO"), "Paris -> Berlin");
/// ```
#[derive(Clone)]
pub struct Transformer(Rc<dyn Fn(&str) -> String>);

impl Transformer {
    /// Wraps the given function into a [`Transformer`].
    #[must_use]
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        Self(Rc::new(func))
    }

    /// Creates a [`Transformer`] returning its input as is.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(str::to_owned)
    }

    /// Applies this [`Transformer`] to the given `text`.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }

    /// Composes this [`Transformer`] with the `next` one, so the `next` one
    /// consumes the output of this one.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self::new(move |text| next.apply(&self.apply(text)))
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer").finish_non_exhaustive()
    }
}

impl From<Replacer> for Transformer {
    fn from(replacer: Replacer) -> Self {
        Self::new(move |text| replacer.replace(text))
    }
}

impl From<EnvExpander> for Transformer {
    fn from(env: EnvExpander) -> Self {
        Self::new(move |text| env.expand(text))
    }
}
