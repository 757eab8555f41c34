// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration of a [`StepExpander`].
//!
//! [`StepExpander`]: crate::StepExpander

use smart_default::SmartDefault;

/// Parts of a [`Step`] to expand besides its text.
///
/// Implements [`clap::Args`], so it may be flattened into CLI options of a
/// test runner:
///
/// ```rust
/// # use clap::Parser as _;
/// #[derive(clap::Parser)]
/// struct Cli {
///     #[command(flatten)]
///     expand: cucumber_expandvars::Config,
/// }
///
/// let cli = Cli::parse_from(["test", "--expand-skip-tables"]);
/// assert!(cli.expand.docstrings);
/// assert!(!cli.expand.tables);
/// ```
///
/// [`Step`]: gherkin::Step
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Config {
    /// Don't expand placeholders inside step doc strings.
    #[arg(
        id = "expand_docstrings",
        long = "expand-skip-docstrings",
        action = clap::ArgAction::SetFalse,
        global = true
    )]
    #[default(true)]
    pub docstrings: bool,

    /// Don't expand placeholders inside step data tables.
    #[arg(
        id = "expand_tables",
        long = "expand-skip-tables",
        action = clap::ArgAction::SetFalse,
        global = true
    )]
    #[default(true)]
    pub tables: bool,
}

impl Config {
    /// Creates a [`Config`] expanding [`Step::value`]s only.
    ///
    /// [`Step::value`]: gherkin::Step::value
    #[must_use]
    pub const fn text_only() -> Self {
        Self { docstrings: false, tables: false }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct Cli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn default_expands_everything() {
        let config = Config::default();

        assert!(config.docstrings);
        assert!(config.tables);
    }

    #[test]
    fn cli_defaults_match_default() {
        let cli = Cli::parse_from(["test"]);

        assert_eq!(cli.config, Config::default());
    }

    #[test]
    fn cli_flags_disable_parts() {
        let cli = Cli::parse_from([
            "test",
            "--expand-skip-docstrings",
            "--expand-skip-tables",
        ]);

        assert_eq!(cli.config, Config::text_only());
    }
}
