// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expansion of `$NAME` placeholders in [Cucumber] [`Step`]s.
//!
//! A [`StepExpander`] holds an ordered list of substitution passes derived
//! from [`Source`]s: static [`Pairs`], producers of them, arbitrary
//! [`Transformer`]s, raw [`Replacer`]s and the process environment via
//! [`EnvExpander`]. Values refreshed on every [`Scenario`] are registered
//! with [`Builder::before_scenario()`] and the expander is attached to a host
//! runner through the [`hook::ScenarioContext`] abstraction.
//!
//! ```rust
//! use cucumber_expandvars::{EnvExpander, Pairs, StepExpander};
//!
//! let expander = StepExpander::builder()
//!     .source(Pairs::from([("HUSBAND", "John")]))
//!     .before_scenario(|| Pairs::from([("WIFE", "Jane")]))
//!     .source(EnvExpander::with_lookup(|name| {
//!         (name == "GREETINGS").then(|| "Hi Dave".to_owned())
//!     }))
//!     .build()?;
//!
//! expander.start_scenario()?;
//! assert_eq!(
//!     expander.expand("$GREETINGS, $HUSBAND & $WIFE"),
//!     "Hi Dave, John & Jane",
//! );
//! # Ok::<_, cucumber_expandvars::Error>(())
//! ```
//!
//! [Cucumber]: https://cucumber.io
//! [`Scenario`]: gherkin::Scenario
//! [`Step`]: gherkin::Step

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    trivial_casts,
    trivial_numeric_casts
)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

pub mod config;
pub mod env;
pub mod error;
pub mod expander;
pub mod hook;
pub mod pairs;
#[cfg(feature = "cucumber")]
pub mod parser;
pub mod replacer;
pub mod source;
pub mod transformer;

pub use gherkin;

#[cfg(feature = "cucumber")]
#[doc(inline)]
pub use self::parser::Expanded;
#[doc(inline)]
pub use self::{
    config::Config,
    env::EnvExpander,
    error::{Error, Result},
    expander::{expand_step, Builder, StepExpander},
    hook::{Hooks, ScenarioContext, ScenarioHook},
    pairs::{placeholder, Pairs, SIGIL},
    replacer::Replacer,
    source::Source,
    transformer::Transformer,
};
