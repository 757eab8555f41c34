// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Builder`] of a [`StepExpander`].

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{config::Config, error::Result, pairs::Pairs, source::Source};

use super::{Producer, Slot, StepExpander};

/// Entry of a [`Builder`], kept in registration order.
enum Entry {
    /// Normalized once on [`Builder::build()`].
    Static(Source),

    /// Re-invoked before every [`Scenario`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    Dynamic(Producer),
}

/// Builder of a [`StepExpander`].
///
/// Static [`Source`]s and per-[`Scenario`] producers are applied in the order
/// they were added, regardless of their kind.
///
/// # Example
///
/// ```rust
/// use std::time::{SystemTime, UNIX_EPOCH};
///
/// use cucumber_expandvars::{EnvExpander, Pairs, StepExpander};
///
/// let expander = StepExpander::builder()
///     .source(Pairs::from([("NAME", "John")]))
///     .before_scenario(|| {
///         let nanos = SystemTime::now()
///             .duration_since(UNIX_EPOCH)
///             .map_or(0, |d| d.as_nanos());
///         Pairs::from([("TIMESTAMP", nanos.to_string())])
///     })
///     .source(EnvExpander::new())
///     .build()?;
///
/// expander.start_scenario()?;
/// assert!(!expander.expand("$NAME-$TIMESTAMP").contains('$'));
/// # Ok::<_, cucumber_expandvars::Error>(())
/// ```
///
/// [`Scenario`]: gherkin::Scenario
#[derive(Default)]
pub struct Builder {
    entries: Vec<Entry>,
    config: Config,
}

impl Builder {
    /// Creates an empty [`Builder`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a static [`Source`].
    #[must_use]
    pub fn source(mut self, source: impl Into<Source>) -> Self {
        self.entries.push(Entry::Static(source.into()));
        self
    }

    /// Appends all the given static [`Source`]s.
    #[must_use]
    pub fn sources<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        self.entries
            .extend(sources.into_iter().map(|s| Entry::Static(s.into())));
        self
    }

    /// Appends a producer of [`Pairs`] invoked before every [`Scenario`].
    ///
    /// Until the first [`Scenario`] starts, the producer substitutes nothing.
    /// Its [`Pairs`] are discarded once the [`Scenario`] finishes.
    ///
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    pub fn before_scenario<F>(mut self, producer: F) -> Self
    where
        F: FnMut() -> Pairs + 'static,
    {
        self.entries
            .push(Entry::Dynamic(Rc::new(RefCell::new(producer))));
        self
    }

    /// Sets the [`Config`] of the [`StepExpander`].
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Normalizes all the static [`Source`]s and builds a [`StepExpander`].
    ///
    /// # Errors
    ///
    /// If any of the static [`Source`]s fails to normalize.
    pub fn build(self) -> Result<StepExpander> {
        let slots = self
            .entries
            .into_iter()
            .map(|entry| match entry {
                Entry::Static(source) => source.normalize().map(Slot::Static),
                Entry::Dynamic(producer) => Ok(Slot::Dynamic {
                    producer,
                    current: None,
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(slots = slots.len(), "step expander built");

        Ok(StepExpander::from_slots(slots, self.config))
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .entries
            .iter()
            .map(|e| match e {
                Entry::Static(s) => s.kind(),
                Entry::Dynamic(_) => "before scenario",
            })
            .collect::<Vec<_>>();
        f.debug_struct("Builder")
            .field("entries", &entries)
            .field("config", &self.config)
            .finish()
    }
}
