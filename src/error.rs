// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of building a [`StepExpander`].
//!
//! Every error here is raised while [`Source`]s are being normalized, so a
//! misconfigured expander fails before any [`Scenario`] runs. Expanding text
//! itself never fails.
//!
//! [`Scenario`]: gherkin::Scenario
//! [`Source`]: crate::Source
//! [`StepExpander`]: crate::StepExpander

use derive_more::{Display, Error};

/// Result of normalizing [`Source`]s.
///
/// [`Source`]: crate::Source
pub type Result<T> = std::result::Result<T, Error>;

/// Error of normalizing a [`Source`] into a [`Transformer`].
///
/// [`Source`]: crate::Source
/// [`Transformer`]: crate::Transformer
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Value doesn't match any of the recognized [`Source`] shapes.
    ///
    /// [`Source`]: crate::Source
    #[display(fmt = "Unsupported source kind: {}", kind)]
    UnsupportedSourceKind {
        /// Name of the rejected type, if known.
        #[error(not(source))]
        kind: String,
    },

    /// Empty [`Replacer`] pattern would match at every position.
    ///
    /// [`Replacer`]: crate::Replacer
    #[display(fmt = "Placeholder must not be empty")]
    EmptyPlaceholder,

    /// Matcher for the placeholders couldn't be compiled.
    #[display(fmt = "Failed to build placeholder matcher: {}", _0)]
    Pattern(regex::Error),
}

impl Error {
    /// Creates a new [`Error::UnsupportedSourceKind`].
    #[must_use]
    pub fn unsupported_source_kind(kind: impl Into<String>) -> Self {
        Self::UnsupportedSourceKind { kind: kind.into() }
    }

    /// Indicates whether this is an [`Error::UnsupportedSourceKind`].
    #[must_use]
    pub const fn is_unsupported_source_kind(&self) -> bool {
        matches!(self, Self::UnsupportedSourceKind { .. })
    }

    /// Indicates whether this is an [`Error::EmptyPlaceholder`].
    #[must_use]
    pub const fn is_empty_placeholder(&self) -> bool {
        matches!(self, Self::EmptyPlaceholder)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_source_kind_names_the_type() {
        let err = Error::unsupported_source_kind("i32");

        assert!(err.is_unsupported_source_kind());
        assert!(!err.is_empty_placeholder());
        assert_eq!(err.to_string(), "Unsupported source kind: i32");
    }

    #[test]
    fn empty_placeholder_display() {
        let err = Error::EmptyPlaceholder;

        assert!(err.is_empty_placeholder());
        assert_eq!(err.to_string(), "Placeholder must not be empty");
    }

    #[test]
    fn regex_error_converts_into_pattern() {
        let regex_err = regex::Error::Syntax("broken".into());
        let err: Error = regex_err.into();

        assert!(matches!(err, Error::Pattern(_)));
        assert!(err.to_string().contains("broken"));
    }
}
