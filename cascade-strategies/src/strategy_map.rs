// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Registry of named strategies.

use cascade_core::{Result, StreamItem};
use core::fmt;
use core::future::Future;
use core::hash::Hash;
use futures::stream::{self, Stream, StreamExt};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

/// The stream produced by one strategy invocation.
pub type StrategyStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;

/// A registered strategy: takes the shared arguments, returns a lazy attempt.
pub type StrategyFn<A, T> = Arc<dyn Fn(&A) -> StrategyStream<T> + Send + Sync + 'static>;

/// Immutable mapping from strategy name to strategy function.
///
/// Built once with the consuming `with_*` methods and then handed to
/// [`CascadeStrategies`](crate::CascadeStrategies), which freezes it.
///
/// Every strategy of one map receives the same argument type `A` and produces
/// the same value type `T`. Strategies with differently shaped results share
/// a map by returning variants of one enum.
///
/// # Examples
///
/// ```
/// use cascade_core::{CascadeError, StreamItem};
/// use cascade_strategies::StrategyMap;
/// use futures::stream;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Source {
///     Cache,
///     Remote,
/// }
///
/// let strategies = StrategyMap::<Source, u64, String>::new()
///     .with_strategy(Source::Cache, |_id: &u64| {
///         stream::iter(vec![StreamItem::Error(CascadeError::stream_error("miss"))])
///     })
///     .with_future_strategy(Source::Remote, |id: &u64| {
///         let id = *id;
///         async move { Ok(format!("user-{id}")) }
///     });
///
/// assert_eq!(strategies.len(), 2);
/// assert!(strategies.contains(&Source::Remote));
/// ```
pub struct StrategyMap<K, A, T> {
    strategies: HashMap<K, StrategyFn<A, T>>,
}

impl<K, A, T> StrategyMap<K, A, T>
where
    K: Eq + Hash,
{
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers a strategy producing a stream.
    ///
    /// The strategy's first value is its result and its first error is its failure.
    /// Registering a name twice replaces the earlier strategy.
    #[must_use]
    pub fn with_strategy<F, S>(mut self, name: K, strategy: F) -> Self
    where
        F: Fn(&A) -> S + Send + Sync + 'static,
        S: Stream<Item = StreamItem<T>> + Send + 'static,
        A: 'static,
        T: 'static,
    {
        let strategy: StrategyFn<A, T> =
            Arc::new(move |args: &A| -> StrategyStream<T> { Box::pin(strategy(args)) });
        self.strategies.insert(name, strategy);
        self
    }

    /// Registers a strategy producing a single future result.
    ///
    /// The future is created when the strategy is attempted and polled as part of
    /// the cascade, so dropping the cascade cancels it.
    #[must_use]
    pub fn with_future_strategy<F, Fut>(self, name: K, strategy: F) -> Self
    where
        F: Fn(&A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        A: 'static,
        T: 'static,
    {
        self.with_strategy(name, move |args: &A| {
            stream::once(strategy(args)).map(StreamItem::from)
        })
    }

    /// Looks up a strategy by name.
    pub fn get(&self, name: &K) -> Option<&StrategyFn<A, T>> {
        self.strategies.get(name)
    }

    pub fn contains(&self, name: &K) -> bool {
        self.strategies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &K> {
        self.strategies.keys()
    }
}

impl<K, A, T> Default for StrategyMap<K, A, T>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, A, T> fmt::Debug for StrategyMap<K, A, T>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.strategies.keys()).finish()
    }
}
