// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Source`]s of placeholder values and their normalization into
//! [`Transformer`]s.

use std::{any::Any, collections::HashMap, fmt};

use crate::{
    env::EnvExpander,
    error::{Error, Result},
    pairs::Pairs,
    replacer::Replacer,
    transformer::Transformer,
};

/// Caller-supplied value a [`Transformer`] can be derived from.
///
/// Every shape is normalized exactly once, via [`Source::normalize()`], when
/// it's registered in a [`StepExpander`]. Producers are invoked at that
/// moment too, so their output stays static afterwards. For values refreshed
/// on every [`Scenario`] use [`Builder::before_scenario()`] instead.
///
/// [`Builder::before_scenario()`]: crate::expander::Builder::before_scenario
/// [`Scenario`]: gherkin::Scenario
/// [`StepExpander`]: crate::StepExpander
pub enum Source {
    /// Static [`Pairs`] substituted in a single pass.
    Pairs(Pairs),

    /// Function producing [`Pairs`].
    PairsProducer(Box<dyn FnOnce() -> Pairs>),

    /// Function producing a [`Transformer`], allowing it to be constructed
    /// lazily over some shared state.
    TransformerProducer(Box<dyn FnOnce() -> Transformer>),

    /// Ready to use [`Transformer`].
    Transformer(Transformer),

    /// Raw literal [`Replacer`].
    Replacer(Replacer),
}

impl Source {
    /// Creates a [`Source::Pairs`] out of anything convertible into
    /// [`Pairs`].
    #[must_use]
    pub fn pairs(pairs: impl Into<Pairs>) -> Self {
        Self::Pairs(pairs.into())
    }

    /// Creates a [`Source::Transformer`] out of the given function.
    #[must_use]
    pub fn transformer<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + 'static,
    {
        Self::Transformer(Transformer::new(func))
    }

    /// Creates a [`Source::PairsProducer`] out of the given function.
    #[must_use]
    pub fn pairs_with<F>(producer: F) -> Self
    where
        F: FnOnce() -> Pairs + 'static,
    {
        Self::PairsProducer(Box::new(producer))
    }

    /// Creates a [`Source::TransformerProducer`] out of the given function.
    #[must_use]
    pub fn transformer_with<F>(producer: F) -> Self
    where
        F: FnOnce() -> Transformer + 'static,
    {
        Self::TransformerProducer(Box::new(producer))
    }

    /// Recognizes a type-erased value as one of the supported [`Source`]
    /// shapes.
    ///
    /// Accepted types are [`Source`], [`Pairs`], [`HashMap`]`<String,
    /// String>`, [`Replacer`], [`Transformer`], [`EnvExpander`] and the
    /// function pointers `fn() -> Pairs`, `fn() -> Transformer` and
    /// `fn(&str) -> String`.
    ///
    /// # Errors
    ///
    /// With [`Error::UnsupportedSourceKind`] if the value is of any other
    /// type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cucumber_expandvars::{Pairs, Source};
    ///
    /// fn wife() -> Pairs {
    ///     Pairs::from([("WIFE", "Jane")])
    /// }
    ///
    /// let wife: fn() -> Pairs = wife;
    /// let source = Source::from_any(wife)?;
    /// assert_eq!(source.normalize()?.apply("$WIFE"), "Jane");
    ///
    /// assert!(Source::from_any(42_i32).is_err());
    /// # Ok::<_, cucumber_expandvars::Error>(())
    /// ```
    pub fn from_any<T: Any>(value: T) -> Result<Self> {
        macro_rules! try_downcast {
            ($value:ident: $ty:ty => $into:expr) => {
                let $value = match $value.downcast::<$ty>() {
                    Ok(v) => return Ok($into(*v)),
                    Err(v) => v,
                };
            };
        }

        let value: Box<dyn Any> = Box::new(value);
        try_downcast!(value: Self => |s| s);
        try_downcast!(value: Pairs => Self::Pairs);
        try_downcast!(value: HashMap<String, String> => |m: HashMap<_, _>| {
            Self::Pairs(m.into())
        });
        try_downcast!(value: Replacer => Self::Replacer);
        try_downcast!(value: Transformer => Self::Transformer);
        try_downcast!(value: EnvExpander => |e: EnvExpander| {
            Self::Transformer(e.into())
        });
        try_downcast!(value: fn() -> Pairs => Self::pairs_with);
        try_downcast!(value: fn() -> Transformer => Self::transformer_with);
        try_downcast!(value: fn(&str) -> String => Self::transformer);

        drop(value);
        Err(Error::unsupported_source_kind(std::any::type_name::<T>()))
    }

    /// Returns a short name of this [`Source`] shape.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Pairs(_) => "pairs",
            Self::PairsProducer(_) => "pairs producer",
            Self::TransformerProducer(_) => "transformer producer",
            Self::Transformer(_) => "transformer",
            Self::Replacer(_) => "replacer",
        }
    }

    /// Normalizes this [`Source`] into a [`Transformer`], invoking its
    /// producer (if any) right away.
    ///
    /// # Errors
    ///
    /// If the resulting [`Pairs`] can't be compiled into a [`Replacer`].
    pub fn normalize(self) -> Result<Transformer> {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = self.kind(), "normalizing source");

        match self {
            Self::Pairs(pairs) => pairs.to_replacer().map(Into::into),
            Self::PairsProducer(produce) => {
                produce().to_replacer().map(Into::into)
            }
            Self::TransformerProducer(produce) => Ok(produce()),
            Self::Transformer(t) => Ok(t),
            Self::Replacer(r) => Ok(r.into()),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pairs(pairs) => f.debug_tuple("Pairs").field(pairs).finish(),
            Self::Replacer(r) => f.debug_tuple("Replacer").field(r).finish(),
            Self::PairsProducer(_)
            | Self::TransformerProducer(_)
            | Self::Transformer(_) => write!(f, "Source({})", self.kind()),
        }
    }
}

impl From<Pairs> for Source {
    fn from(pairs: Pairs) -> Self {
        Self::Pairs(pairs)
    }
}

impl<S> From<HashMap<String, String, S>> for Source {
    fn from(map: HashMap<String, String, S>) -> Self {
        Self::Pairs(map.into())
    }
}

impl From<Replacer> for Source {
    fn from(replacer: Replacer) -> Self {
        Self::Replacer(replacer)
    }
}

impl From<Transformer> for Source {
    fn from(transformer: Transformer) -> Self {
        Self::Transformer(transformer)
    }
}

impl From<EnvExpander> for Source {
    fn from(env: EnvExpander) -> Self {
        Self::Transformer(env.into())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn pairs_replace_every_key() {
        let t = Source::from(Pairs::from([("A", "1"), ("B", "2")]))
            .normalize()
            .unwrap();

        assert_eq!(t.apply("$A $B $A $C"), "1 2 1 $C");
    }

    #[test]
    fn pairs_replacement_is_not_recursive() {
        let t = Source::from(Pairs::from([("A", "$B"), ("B", "b")]))
            .normalize()
            .unwrap();

        assert_eq!(t.apply("$A"), "$B");
    }

    #[test]
    fn pairs_producer_runs_once_on_normalize() {
        let calls = Rc::new(Cell::new(0));
        let source = Source::pairs_with({
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                Pairs::from([("WIFE", "Jane")])
            }
        });
        assert_eq!(calls.get(), 0);

        let t = source.normalize().unwrap();
        assert_eq!(calls.get(), 1);

        assert_eq!(t.apply("$WIFE"), "Jane");
        assert_eq!(t.apply("$WIFE"), "Jane");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn transformer_producer_may_share_state() {
        let counter = Rc::new(Cell::new(0));
        let source = Source::transformer_with({
            let counter = Rc::clone(&counter);
            move || {
                Transformer::new(move |s| {
                    counter.set(counter.get() + 1);
                    s.replace("$N", &counter.get().to_string())
                })
            }
        });
        let t = source.normalize().unwrap();

        assert_eq!(t.apply("$N"), "1");
        assert_eq!(t.apply("$N"), "2");
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn empty_key_substitutes_lone_sigil() {
        let t = Source::pairs([("", "USD ")]).normalize().unwrap();

        assert_eq!(t.apply("costs $5"), "costs USD 5");
    }

    #[test]
    fn pairs_constructor_accepts_any_pairs_shape() {
        let from_array = Source::pairs([("TO", "Berlin")]);
        let from_map = Source::pairs(HashMap::from([(
            "TO".to_owned(),
            "Berlin".to_owned(),
        )]));

        for source in [from_array, from_map] {
            assert_eq!(source.kind(), "pairs");
            assert_eq!(source.normalize().unwrap().apply("to $TO"), "to Berlin");
        }
    }

    #[test]
    fn from_any_accepts_every_supported_shape() {
        fn pairs() -> Pairs {
            Pairs::from([("A", "pairs fn")])
        }
        fn transformer() -> Transformer {
            Transformer::new(|s| s.replace("$A", "transformer fn"))
        }
        fn plain(s: &str) -> String {
            s.replace("$A", "plain fn")
        }

        let pairs: fn() -> Pairs = pairs;
        let transformer: fn() -> Transformer = transformer;
        let plain: fn(&str) -> String = plain;

        let cases: Vec<(Source, &str)> = vec![
            (Source::from_any(Pairs::from([("A", "pairs")])).unwrap(), "pairs"),
            (
                Source::from_any(HashMap::from([(
                    "A".to_owned(),
                    "map".to_owned(),
                )]))
                .unwrap(),
                "map",
            ),
            (
                Source::from_any(Replacer::new([("$A", "replacer")]).unwrap())
                    .unwrap(),
                "replacer",
            ),
            (
                Source::from_any(Transformer::new(|s| s.replace("$A", "t")))
                    .unwrap(),
                "t",
            ),
            (
                Source::from_any(EnvExpander::with_lookup(|_| {
                    Some("env".to_owned())
                }))
                .unwrap(),
                "env",
            ),
            (Source::from_any(pairs).unwrap(), "pairs fn"),
            (Source::from_any(transformer).unwrap(), "transformer fn"),
            (Source::from_any(plain).unwrap(), "plain fn"),
            (
                Source::from_any(Source::from(Pairs::from([("A", "src")])))
                    .unwrap(),
                "src",
            ),
        ];

        for (source, expected) in cases {
            let kind = source.kind();
            let t = source.normalize().unwrap();
            assert_eq!(t.apply("$A"), expected, "source kind: {kind}");
        }
    }

    #[test]
    fn from_any_rejects_unknown_shape() {
        let err = Source::from_any(vec![1_u8, 2, 3]).unwrap_err();

        assert!(err.is_unsupported_source_kind());
        assert!(err.to_string().contains("Vec<u8>"));
    }

    #[test]
    fn from_any_rejects_closures() {
        let err = Source::from_any(|s: &str| s.to_owned()).unwrap_err();

        assert!(err.is_unsupported_source_kind());
    }
}
