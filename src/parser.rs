// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`cucumber::Parser`] adapter expanding placeholders of parsed
//! [`Feature`]s.
//!
//! [`Feature`]: gherkin::Feature

use futures::stream::{LocalBoxStream, StreamExt as _};

use crate::{expander::StepExpander, hook::ScenarioHook as _};

/// [`cucumber::Parser`] wrapping another one and expanding every parsed
/// [`Step`] with a [`StepExpander`].
///
/// Every [`Scenario`] gets its own lifecycle cycle, so per-[`Scenario`]
/// values are produced once for each of them. [`Background`] [`Step`]s are
/// copied in front of every [`Scenario`] they apply to and expanded within
/// its cycle, so they see the same values as the [`Scenario`] itself. The
/// emitted [`Feature`]s carry no [`Background`]s.
///
/// # Example
///
/// ```rust,ignore
/// use cucumber::{parser, World as _};
/// use cucumber_expandvars::{EnvExpander, StepExpander};
///
/// # #[derive(Debug, Default, cucumber::World)]
/// # struct World;
/// #
/// # let _ = async {
/// let expander = StepExpander::new([EnvExpander::new()])?;
///
/// World::cucumber()
///     .with_parser(expander.into_parser(parser::Basic::new()))
///     .run("tests/features")
///     .await;
/// # Ok::<_, cucumber_expandvars::Error>(())
/// # };
/// ```
///
/// # Panics
///
/// While parsing, if per-[`Scenario`] values fail to normalize.
///
/// [`Background`]: gherkin::Background
/// [`Feature`]: gherkin::Feature
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
#[derive(Debug)]
pub struct Expanded<P> {
    /// Parser producing [`Feature`]s to expand.
    ///
    /// [`Feature`]: gherkin::Feature
    inner: P,

    /// [`StepExpander`] applied to every [`Step`].
    ///
    /// [`Step`]: gherkin::Step
    expander: StepExpander,
}

impl<P> Expanded<P> {
    /// Wraps the given `inner` [`cucumber::Parser`].
    #[must_use]
    pub const fn new(inner: P, expander: StepExpander) -> Self {
        Self { inner, expander }
    }
}

impl<I, P> cucumber::Parser<I> for Expanded<P>
where
    P: cucumber::Parser<I>,
{
    type Cli = P::Cli;
    type Output =
        LocalBoxStream<'static, cucumber::parser::Result<gherkin::Feature>>;

    fn parse(self, input: I, cli: Self::Cli) -> Self::Output {
        let expander = self.expander;
        self.inner
            .parse(input, cli)
            .map(move |res| res.map(|f| expand_feature(&expander, f)))
            .boxed_local()
    }
}

impl StepExpander {
    /// Wraps the given [`cucumber::Parser`] into an [`Expanded`] one, using
    /// this [`StepExpander`].
    #[must_use]
    pub fn into_parser<P>(self, inner: P) -> Expanded<P> {
        Expanded::new(inner, self)
    }
}

/// Expands all the [`Step`]s of the given [`Feature`], inlining its
/// [`Background`]s into the [`Scenario`]s.
///
/// [`Background`]: gherkin::Background
/// [`Feature`]: gherkin::Feature
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
fn expand_feature(
    expander: &StepExpander,
    mut feature: gherkin::Feature,
) -> gherkin::Feature {
    #[cfg(feature = "tracing")]
    tracing::debug!(feature = %feature.name, "expanding feature");

    let background = background_steps(feature.background.take(), &[]);
    for sc in &mut feature.scenarios {
        run_cycle(expander, &background, sc);
    }
    for rule in &mut feature.rules {
        let background =
            background_steps(rule.background.take(), &background);
        for sc in &mut rule.scenarios {
            run_cycle(expander, &background, sc);
        }
    }
    feature
}

/// Appends the [`Step`]s of the given [`Background`] to the `outer` ones.
///
/// [`Background`]: gherkin::Background
/// [`Step`]: gherkin::Step
fn background_steps(
    background: Option<gherkin::Background>,
    outer: &[gherkin::Step],
) -> Vec<gherkin::Step> {
    outer
        .iter()
        .cloned()
        .chain(background.into_iter().flat_map(|bg| bg.steps))
        .collect()
}

/// Runs a single lifecycle cycle over the `background` [`Step`]s followed by
/// the ones of the given [`Scenario`], storing all of them in the
/// [`Scenario`].
///
/// [`Scenario`]: gherkin::Scenario
/// [`Step`]: gherkin::Step
fn run_cycle(
    expander: &StepExpander,
    background: &[gherkin::Step],
    scenario: &mut gherkin::Scenario,
) {
    if let Err(e) = expander.start_scenario() {
        panic!(
            "Failed to produce placeholder values of scenario `{}`: {e}",
            scenario.name,
        );
    }
    if !background.is_empty() {
        let own = std::mem::take(&mut scenario.steps);
        scenario.steps = background.iter().cloned().chain(own).collect();
    }
    for step in &mut scenario.steps {
        expander.on_step_enter(step);
    }
    expander.finish_scenario();
}
