// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bridge between a host [Cucumber] runner lifecycle and a [`StepExpander`].
//!
//! The host side is abstracted by a [`ScenarioContext`] accepting callbacks,
//! while the expander side is a [`ScenarioHook`] reacting to them.
//!
//! [Cucumber]: https://cucumber.io
//! [`StepExpander`]: crate::StepExpander

mod hooks;
mod phase;

#[doc(inline)]
pub use self::{
    hooks::Hooks,
    phase::{Phase, Transition},
};

/// Callback invoked before every [`Scenario`].
///
/// [`Scenario`]: gherkin::Scenario
pub type BeforeScenarioFn = Box<dyn FnMut(&gherkin::Scenario)>;

/// Callback invoked before every [`Step`], allowed to rewrite it.
///
/// [`Step`]: gherkin::Step
pub type BeforeStepFn = Box<dyn FnMut(&mut gherkin::Step)>;

/// Registration points of a host runner.
///
/// Implemented by an adapter of the runner executing [`Scenario`]s, so a
/// [`ScenarioHook`] can be attached to it via [`register()`].
///
/// [`Scenario`]: gherkin::Scenario
pub trait ScenarioContext {
    /// Registers a callback to be invoked before every [`Scenario`], prior to
    /// any of its [`Step`]s.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    fn before_scenario(&mut self, hook: BeforeScenarioFn);

    /// Registers a callback to be invoked before every [`Step`] is matched.
    ///
    /// [`Step`]: gherkin::Step
    fn before_step(&mut self, hook: BeforeStepFn);
}

/// Reaction to a [`Scenario`] lifecycle.
///
/// [`Scenario`]: gherkin::Scenario
pub trait ScenarioHook {
    /// Called when a new [`Scenario`] begins.
    ///
    /// [`Scenario`]: gherkin::Scenario
    fn on_scenario_start(&self, scenario: &gherkin::Scenario);

    /// Called before the given [`Step`] reaches the matcher.
    ///
    /// [`Step`]: gherkin::Step
    fn on_step_enter(&self, step: &mut gherkin::Step);

    /// Called when a [`Scenario`] ends, if the host reports it.
    ///
    /// [`Scenario`]: gherkin::Scenario
    fn on_scenario_end(&self, scenario: &gherkin::Scenario) {
        _ = scenario;
    }
}

/// Attaches a clone of the given [`ScenarioHook`] to both registration points
/// of the [`ScenarioContext`].
pub fn register<H, C>(hook: &H, ctx: &mut C)
where
    H: ScenarioHook + Clone + 'static,
    C: ScenarioContext + ?Sized,
{
    let on_start = hook.clone();
    ctx.before_scenario(Box::new(move |sc: &gherkin::Scenario| {
        on_start.on_scenario_start(sc);
    }));

    let on_step = hook.clone();
    ctx.before_step(Box::new(move |step: &mut gherkin::Step| {
        on_step.on_step_enter(step);
    }));
}
