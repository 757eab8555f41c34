// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory [`ScenarioContext`].

use std::fmt;

use super::{BeforeScenarioFn, BeforeStepFn, ScenarioContext};

/// [`ScenarioContext`] storing registered callbacks, for hosts driving the
/// lifecycle by hand.
///
/// # Example
///
/// ```rust
/// use cucumber_expandvars::{hook::Hooks, Pairs, StepExpander};
/// # use gherkin::{LineCol, Scenario, Span, Step, StepType};
/// #
/// # let step = Step {
/// #     keyword: "Given".into(),
/// #     ty: StepType::Given,
/// #     value: "$NAME is here".into(),
/// #     docstring: None,
/// #     table: None,
/// #     span: Span { start: 0, end: 0 },
/// #     position: LineCol { line: 1, col: 1 },
/// # };
/// # let mut scenario = Scenario {
/// #     keyword: "Scenario".into(),
/// #     name: "example".into(),
/// #     description: None,
/// #     steps: vec![step],
/// #     examples: vec![],
/// #     tags: vec![],
/// #     span: Span { start: 0, end: 0 },
/// #     position: LineCol { line: 1, col: 1 },
/// # };
///
/// let expander = StepExpander::new([Pairs::from([("NAME", "John")])])?;
/// let mut hooks = Hooks::new();
/// expander.register_context(&mut hooks);
///
/// hooks.run_scenario(&mut scenario);
/// assert_eq!(scenario.steps[0].value, "John is here");
/// # Ok::<_, cucumber_expandvars::Error>(())
/// ```
#[derive(Default)]
pub struct Hooks {
    /// Callbacks run before every [`Scenario`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    before_scenario: Vec<BeforeScenarioFn>,

    /// Callbacks run before every [`Step`].
    ///
    /// [`Step`]: gherkin::Step
    before_step: Vec<BeforeStepFn>,
}

impl Hooks {
    /// Creates empty [`Hooks`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs all "before scenario" callbacks in registration order.
    pub fn run_before_scenario(&mut self, scenario: &gherkin::Scenario) {
        for hook in &mut self.before_scenario {
            hook(scenario);
        }
    }

    /// Runs all "before step" callbacks in registration order, each one
    /// seeing the [`Step`] as rewritten by the previous.
    ///
    /// [`Step`]: gherkin::Step
    pub fn run_before_step(&mut self, step: &mut gherkin::Step) {
        for hook in &mut self.before_step {
            hook(step);
        }
    }

    /// Drives a whole [`Scenario`]: the "before scenario" callbacks first,
    /// then the "before step" ones for each of its [`Step`]s in place.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    pub fn run_scenario(&mut self, scenario: &mut gherkin::Scenario) {
        self.run_before_scenario(scenario);
        for step in &mut scenario.steps {
            self.run_before_step(step);
        }
    }
}

impl ScenarioContext for Hooks {
    fn before_scenario(&mut self, hook: BeforeScenarioFn) {
        self.before_scenario.push(hook);
    }

    fn before_step(&mut self, hook: BeforeStepFn) {
        self.before_step.push(hook);
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_scenario", &self.before_scenario.len())
            .field("before_step", &self.before_step.len())
            .finish()
    }
}
