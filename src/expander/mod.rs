// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`StepExpander`] substituting placeholders in [`Step`]s.
//!
//! [`Step`]: gherkin::Step

mod builder;

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    config::Config,
    error::Result,
    hook::{self, Phase, ScenarioContext, ScenarioHook, Transition},
    pairs::Pairs,
    source::Source,
    transformer::Transformer,
};

#[doc(inline)]
pub use self::builder::Builder;

/// Producer of per-[`Scenario`] [`Pairs`].
///
/// [`Scenario`]: gherkin::Scenario
pub(crate) type Producer = Rc<RefCell<dyn FnMut() -> Pairs>>;

/// Position in the ordered list of substitution passes.
enum Slot {
    /// Pass fixed at construction.
    Static(Transformer),

    /// Pass refreshed before every [`Scenario`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    Dynamic {
        /// Function producing the [`Pairs`] of the upcoming [`Scenario`].
        ///
        /// [`Scenario`]: gherkin::Scenario
        producer: Producer,

        /// Pass of the current [`Scenario`], if any is running.
        ///
        /// [`Scenario`]: gherkin::Scenario
        current: Option<Transformer>,
    },
}

impl Slot {
    /// Returns the [`Transformer`] to apply right now, if any.
    const fn active(&self) -> Option<&Transformer> {
        match self {
            Self::Static(t) => Some(t),
            Self::Dynamic { current, .. } => current.as_ref(),
        }
    }
}

/// Mutable part of a [`StepExpander`].
struct State {
    slots: Vec<Slot>,
    phase: Phase,
}

/// Expander of placeholders in [`Step`]s, applying an ordered list of
/// substitution passes.
///
/// Each pass consumes the output of the previous one, so a later pass may
/// rewrite what an earlier one substituted. Placeholders matched by no pass
/// are left as is.
///
/// Clones share the same state, which is how the expander stays attached to
/// a host runner after [`StepExpander::register_context()`]. The type is
/// intentionally not [`Send`]: a single instance serves one sequentially
/// executed [`Scenario`] at a time.
///
/// # Example
///
/// ```rust
/// use cucumber_expandvars::{Pairs, Replacer, Source, StepExpander};
///
/// let expander = StepExpander::new([
///     Source::from(Replacer::new([("$TO", "Berlin")])?),
///     Source::from(Pairs::from([("HUSBAND", "John")])),
///     Source::transformer(|s| s.replace("$FROM", "Paris")),
/// ])?;
///
/// assert_eq!(
///     expander.expand("$HUSBAND goes from $FROM to $TO"),
///     "John goes from Paris to Berlin",
/// );
/// # Ok::<_, cucumber_expandvars::Error>(())
/// ```
///
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
#[derive(Clone)]
pub struct StepExpander {
    state: Rc<RefCell<State>>,
    config: Config,
}

impl StepExpander {
    /// Creates a new [`StepExpander`] out of static [`Source`]s, normalizing
    /// each of them right away.
    ///
    /// Use [`StepExpander::builder()`] to register per-[`Scenario`] values or
    /// a custom [`Config`].
    ///
    /// # Errors
    ///
    /// If any of the [`Source`]s fails to normalize.
    ///
    /// [`Scenario`]: gherkin::Scenario
    pub fn new<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Source>,
    {
        Builder::new().sources(sources).build()
    }

    /// Creates a new [`Builder`] of a [`StepExpander`].
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Assembles a [`StepExpander`] out of already normalized [`Slot`]s.
    fn from_slots(slots: Vec<Slot>, config: Config) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                slots,
                phase: Phase::Idle,
            })),
            config,
        }
    }

    /// Returns the [`Config`] of this [`StepExpander`].
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Returns the current lifecycle [`Phase`].
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    /// Snapshots the passes to apply, so no borrow is held while they run.
    fn chain(&self) -> Vec<Transformer> {
        self.state
            .borrow()
            .slots
            .iter()
            .filter_map(Slot::active)
            .cloned()
            .collect()
    }

    /// Applies every pass to the given `text`, left to right.
    #[must_use]
    pub fn expand(&self, text: &str) -> String {
        apply(&self.chain(), text)
    }

    /// Expands the text of the given [`Step`] in place, along with its doc
    /// string and data table cells, unless disabled by the [`Config`].
    ///
    /// [`Step`]: gherkin::Step
    pub fn expand_step(&self, step: &mut gherkin::Step) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            keyword = %step.keyword,
            line = step.position.line,
            "expanding step"
        );

        let chain = self.chain();
        step.value = apply(&chain, &step.value);

        if self.config.docstrings {
            if let Some(doc) = step.docstring.as_mut() {
                *doc = apply(&chain, doc);
            }
        }
        if self.config.tables {
            if let Some(table) = step.table.as_mut() {
                for cell in table.rows.iter_mut().flatten() {
                    *cell = apply(&chain, cell);
                }
            }
        }
    }

    /// Begins a new [`Scenario`]: invokes every per-[`Scenario`] producer and
    /// replaces the values of the previous [`Scenario`] with the fresh ones.
    ///
    /// Producers may use this [`StepExpander`] themselves, as no borrow of its
    /// state is held while they run.
    ///
    /// # Errors
    ///
    /// If any produced [`Pairs`] can't be compiled into a [`Replacer`]. All
    /// per-[`Scenario`] values are cleared in such case.
    ///
    /// [`Replacer`]: crate::Replacer
    /// [`Scenario`]: gherkin::Scenario
    pub fn start_scenario(&self) -> Result<()> {
        self.transition(Transition::ScenarioStarted);

        let producers = self
            .state
            .borrow()
            .slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Dynamic { producer, .. } => Some(Rc::clone(producer)),
                Slot::Static(_) => None,
            })
            .collect::<Vec<_>>();
        let refreshed = producers
            .iter()
            .map(|producer| {
                let pairs = (&mut *producer.borrow_mut())();
                pairs.to_replacer().map(Transformer::from)
            })
            .collect::<Result<Vec<_>>>();

        let mut state = self.state.borrow_mut();
        let dynamic = state.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Dynamic { current, .. } => Some(current),
            Slot::Static(_) => None,
        });
        match refreshed {
            Ok(fresh) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(count = fresh.len(), "scenario values produced");

                for (current, t) in dynamic.zip(fresh) {
                    *current = Some(t);
                }
                Ok(())
            }
            Err(e) => {
                for current in dynamic {
                    *current = None;
                }
                Err(e)
            }
        }
    }

    /// Ends the current [`Scenario`], discarding its per-[`Scenario`] values.
    ///
    /// [`Scenario`]: gherkin::Scenario
    pub fn finish_scenario(&self) {
        self.transition(Transition::ScenarioFinished);

        for slot in &mut self.state.borrow_mut().slots {
            if let Slot::Dynamic { current, .. } = slot {
                *current = None;
            }
        }
    }

    /// Attaches this [`StepExpander`] to the given host [`ScenarioContext`]:
    /// per-[`Scenario`] values are refreshed before every [`Scenario`], and
    /// every [`Step`] is expanded before it's matched.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    pub fn register_context<C>(&self, ctx: &mut C)
    where
        C: ScenarioContext + ?Sized,
    {
        hook::register(self, ctx);
    }

    /// Moves the lifecycle [`Phase`] forward.
    fn transition(&self, transition: Transition) {
        let mut state = self.state.borrow_mut();
        if !state.phase.accepts(transition) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                phase = %state.phase,
                %transition,
                "unexpected scenario lifecycle transition"
            );
        }
        state.phase = state.phase.next(transition);
    }
}

impl ScenarioHook for StepExpander {
    /// # Panics
    ///
    /// If the per-[`Scenario`] values fail to normalize, failing the
    /// [`Scenario`] in the host runner.
    ///
    /// [`Scenario`]: gherkin::Scenario
    fn on_scenario_start(&self, scenario: &gherkin::Scenario) {
        if let Err(e) = self.start_scenario() {
            panic!(
                "Failed to produce placeholder values of scenario `{}`: {e}",
                scenario.name,
            );
        }
    }

    fn on_step_enter(&self, step: &mut gherkin::Step) {
        self.transition(Transition::StepEntered);
        self.expand_step(step);
    }

    fn on_scenario_end(&self, _: &gherkin::Scenario) {
        self.finish_scenario();
    }
}

impl fmt::Debug for StepExpander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        let dynamic = state
            .slots
            .iter()
            .filter(|s| matches!(s, Slot::Dynamic { .. }))
            .count();
        f.debug_struct("StepExpander")
            .field("slots", &state.slots.len())
            .field("dynamic", &dynamic)
            .field("phase", &state.phase)
            .field("config", &self.config)
            .finish()
    }
}

/// Runs the `text` through every [`Transformer`] of the `chain`.
fn apply(chain: &[Transformer], text: &str) -> String {
    chain.iter().fold(text.to_owned(), |acc, t| t.apply(&acc))
}

/// Expands the given [`Step`] in place with the provided [`Source`]s,
/// without any [`Scenario`] lifecycle.
///
/// # Errors
///
/// If any of the [`Source`]s fails to normalize. The [`Step`] is left
/// untouched in such case.
///
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
pub fn expand_step<I>(step: &mut gherkin::Step, sources: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<Source>,
{
    StepExpander::new(sources)?.expand_step(step);
    Ok(())
}
