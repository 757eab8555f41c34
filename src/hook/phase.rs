// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lifecycle [`Phase`]s of a [`StepExpander`].
//!
//! [`StepExpander`]: crate::StepExpander

use derive_more::Display;

/// Position of a [`StepExpander`] in the [`Scenario`] lifecycle driven by a
/// host runner.
///
/// ```text
/// Idle -> ScenarioStarting -> StepPending -> StepPending... -> ScenarioEnded
///                ^                                                  |
///                +--------------------------------------------------+
/// ```
///
/// [`Phase::ScenarioEnded`] is the idle state between [`Scenario`]s: it
/// accepts and rejects exactly the same [`Transition`]s as [`Phase::Idle`],
/// which only marks that no [`Scenario`] has run yet.
///
/// [`Scenario`]: gherkin::Scenario
/// [`StepExpander`]: crate::StepExpander
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum Phase {
    /// No [`Scenario`] has started yet.
    ///
    /// [`Scenario`]: gherkin::Scenario
    #[default]
    Idle,

    /// Dynamic values of a new [`Scenario`] have just been produced.
    ///
    /// [`Scenario`]: gherkin::Scenario
    ScenarioStarting,

    /// At least one [`Step`] of the current [`Scenario`] has been expanded.
    ///
    /// [`Scenario`]: gherkin::Scenario
    /// [`Step`]: gherkin::Step
    StepPending,

    /// The last [`Scenario`] has finished and its dynamic values were
    /// discarded, so the next one may start.
    ///
    /// [`Scenario`]: gherkin::Scenario
    ScenarioEnded,
}

/// Lifecycle event moving a [`Phase`] forward.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Transition {
    /// Host begins a [`Scenario`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    ScenarioStarted,

    /// Host is about to match a [`Step`].
    ///
    /// [`Step`]: gherkin::Step
    StepEntered,

    /// Host has finished a [`Scenario`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    ScenarioFinished,
}

impl Phase {
    /// Indicates whether the given [`Transition`] is expected in this
    /// [`Phase`].
    ///
    /// Hosts without an "after scenario" hook never report
    /// [`Transition::ScenarioFinished`], so a new [`Scenario`] may start in
    /// any [`Phase`].
    ///
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    pub const fn accepts(self, transition: Transition) -> bool {
        match transition {
            Transition::ScenarioStarted => true,
            Transition::StepEntered | Transition::ScenarioFinished => {
                matches!(self, Self::ScenarioStarting | Self::StepPending)
            }
        }
    }

    /// Returns the [`Phase`] reached by the given [`Transition`].
    ///
    /// Unexpected [`Transition`]s are not rejected, see [`Phase::accepts()`]
    /// to detect them.
    #[must_use]
    pub const fn next(self, transition: Transition) -> Self {
        match transition {
            Transition::ScenarioStarted => Self::ScenarioStarting,
            Transition::StepEntered => match self {
                Self::ScenarioStarting | Self::StepPending => Self::StepPending,
                Self::Idle | Self::ScenarioEnded => self,
            },
            Transition::ScenarioFinished => Self::ScenarioEnded,
        }
    }

    /// Indicates whether a [`Scenario`] is currently running.
    ///
    /// [`Scenario`]: gherkin::Scenario
    #[must_use]
    pub const fn in_scenario(self) -> bool {
        matches!(self, Self::ScenarioStarting | Self::StepPending)
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, Transition};

    #[test]
    fn regular_lifecycle() {
        let mut phase = Phase::default();
        for (transition, expected) in [
            (Transition::ScenarioStarted, Phase::ScenarioStarting),
            (Transition::StepEntered, Phase::StepPending),
            (Transition::StepEntered, Phase::StepPending),
            (Transition::ScenarioFinished, Phase::ScenarioEnded),
            (Transition::ScenarioStarted, Phase::ScenarioStarting),
        ] {
            assert!(phase.accepts(transition), "{phase} -> {transition}");
            phase = phase.next(transition);
            assert_eq!(phase, expected);
        }
    }

    #[test]
    fn scenario_may_start_without_finishing_previous() {
        assert!(Phase::StepPending.accepts(Transition::ScenarioStarted));
        assert_eq!(
            Phase::StepPending.next(Transition::ScenarioStarted),
            Phase::ScenarioStarting,
        );
    }

    #[test]
    fn step_outside_scenario_is_unexpected() {
        for phase in [Phase::Idle, Phase::ScenarioEnded] {
            assert!(!phase.accepts(Transition::StepEntered));
            assert_eq!(phase.next(Transition::StepEntered), phase);
            assert!(!phase.in_scenario());
        }
    }

    #[test]
    fn ended_phase_behaves_as_idle() {
        for transition in [
            Transition::ScenarioStarted,
            Transition::StepEntered,
            Transition::ScenarioFinished,
        ] {
            assert_eq!(
                Phase::ScenarioEnded.accepts(transition),
                Phase::Idle.accepts(transition),
                "{transition}",
            );
        }
        assert_eq!(
            Phase::ScenarioEnded.next(Transition::ScenarioStarted),
            Phase::Idle.next(Transition::ScenarioStarted),
        );
    }

    #[test]
    fn finishing_without_start_is_unexpected() {
        assert!(!Phase::Idle.accepts(Transition::ScenarioFinished));
    }
}
