// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential fallback across named strategies.

use crate::strategy_map::{StrategyMap, StrategyStream};
use cascade_core::{CascadeError, Result, StreamItem};
use core::fmt::Debug;
use core::hash::Hash;
use futures::stream::{FusedStream, Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Runs named strategies in cascade.
///
/// Holds a frozen [`StrategyMap`]. Each call to
/// [`use_strategies`](Self::use_strategies) describes one cascade over an ordered
/// list of names; nothing runs until that cascade is consumed.
///
/// Cloning is cheap: clones share the same map.
///
/// # Examples
///
/// ```
/// use cascade_core::{CascadeError, StreamItem};
/// use cascade_strategies::{CascadeStrategies, StrategyMap};
/// use futures::stream;
///
/// # #[tokio::main]
/// # async fn main() {
/// let strategies = CascadeStrategies::new(
///     StrategyMap::<&'static str, (u32, String), u32>::new()
///         .with_strategy("cache", |_args: &(u32, String)| {
///             stream::iter(vec![StreamItem::Error(CascadeError::stream_error("miss"))])
///         })
///         .with_strategy("compute", |(number, _label): &(u32, String)| {
///             stream::iter(vec![StreamItem::Value(number * 2)])
///         }),
/// );
///
/// let cascade = strategies.use_strategies(["cache", "compute"], (21, "answer".to_string()));
///
/// assert_eq!(cascade.run().await.unwrap(), 42);
/// # }
/// ```
pub struct CascadeStrategies<K, A, T> {
    strategies: Arc<StrategyMap<K, A, T>>,
}

impl<K, A, T> CascadeStrategies<K, A, T>
where
    K: Eq + Hash + Debug,
{
    /// Freezes `strategies`. An empty map is accepted.
    pub fn new(strategies: StrategyMap<K, A, T>) -> Self {
        Self {
            strategies: Arc::new(strategies),
        }
    }

    /// Describes a cascade over `names`, forwarding `args` to every attempted strategy.
    ///
    /// The returned [`Cascade`] is cold: each [`stream`](Cascade::stream) or
    /// [`run`](Cascade::run) starts again from the first name. Within one run,
    /// strategies are attempted strictly left to right and the first value wins.
    /// Failures of individual strategies are discarded. When the list is empty or
    /// every listed strategy failed, the run yields
    /// [`CascadeError::AllStrategiesFailed`]. A name missing from the map makes the
    /// run yield [`CascadeError::UnknownStrategy`] before any strategy is attempted.
    pub fn use_strategies<I>(&self, names: I, args: A) -> Cascade<K, A, T>
    where
        I: IntoIterator<Item = K>,
    {
        Cascade {
            strategies: Arc::clone(&self.strategies),
            names: names.into_iter().collect(),
            args: Arc::new(args),
        }
    }

    pub fn contains(&self, name: &K) -> bool {
        self.strategies.contains(name)
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &K> {
        self.strategies.names()
    }
}

impl<K, A, T> Clone for CascadeStrategies<K, A, T> {
    fn clone(&self) -> Self {
        Self {
            strategies: Arc::clone(&self.strategies),
        }
    }
}

/// A cold cascade: an ordered list of strategy names bound to their arguments.
///
/// Every subscription (a call to [`stream`](Self::stream) or [`run`](Self::run))
/// replays the whole cascade independently; no result is shared between them.
pub struct Cascade<K, A, T> {
    strategies: Arc<StrategyMap<K, A, T>>,
    names: Arc<[K]>,
    args: Arc<A>,
}

impl<K, A, T> Cascade<K, A, T>
where
    K: Eq + Hash + Debug,
{
    /// The strategy names this cascade walks through, in priority order.
    pub fn names(&self) -> &[K] {
        &self.names
    }

    /// Subscribes to the cascade.
    ///
    /// The stream yields exactly one item, the winning value or the terminal
    /// error, and then ends.
    pub fn stream(&self) -> CascadeStream<K, A, T> {
        CascadeStream {
            strategies: Arc::clone(&self.strategies),
            names: Arc::clone(&self.names),
            args: Arc::clone(&self.args),
            index: 0,
            attempt: None,
            state: CascadeState::Idle,
        }
    }

    /// Subscribes to the cascade and waits for its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::AllStrategiesFailed`] if no strategy produced a value,
    /// or [`CascadeError::UnknownStrategy`] if a name is missing from the map.
    pub async fn run(&self) -> Result<T> {
        match self.stream().next().await {
            Some(item) => item.into(),
            None => Err(CascadeError::AllStrategiesFailed),
        }
    }
}

impl<K, A, T> Clone for Cascade<K, A, T> {
    fn clone(&self) -> Self {
        Self {
            strategies: Arc::clone(&self.strategies),
            names: Arc::clone(&self.names),
            args: Arc::clone(&self.args),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CascadeState {
    Idle,
    Running,
    Done,
}

/// One subscription to a [`Cascade`].
///
/// Dropping it cancels the in-flight strategy and prevents any further attempt.
pub struct CascadeStream<K, A, T> {
    strategies: Arc<StrategyMap<K, A, T>>,
    names: Arc<[K]>,
    args: Arc<A>,
    index: usize,
    attempt: Option<StrategyStream<T>>,
    state: CascadeState,
}

impl<K, A, T> CascadeStream<K, A, T>
where
    K: Eq + Hash + Debug,
{
    fn find_unknown(&self) -> Option<&K> {
        self.names
            .iter()
            .find(|name| !self.strategies.contains(name))
    }

    fn start_attempt(&mut self) -> Result<()> {
        let Some(name) = self.names.get(self.index) else {
            debug!(
                "cascade exhausted after {} strategies",
                self.names.len()
            );
            return Err(CascadeError::AllStrategiesFailed);
        };
        let Some(strategy) = self.strategies.get(name) else {
            return Err(CascadeError::unknown_strategy(name));
        };

        debug!(
            "cascade attempting strategy {:?} ({}/{})",
            name,
            self.index + 1,
            self.names.len()
        );
        self.attempt = Some(strategy(&*self.args));
        Ok(())
    }

    /// Drops the failed attempt together with its failure and moves to the next name.
    ///
    /// `failure` is `None` when the strategy completed without a value.
    fn fall_back(&mut self, failure: Option<CascadeError>) {
        let name = &self.names[self.index];
        match failure {
            Some(error) => debug!("strategy {:?} failed, falling back: {}", name, error),
            None => debug!("strategy {:?} completed empty, falling back", name),
        }
        self.attempt = None;
        self.index += 1;
    }

    fn finish(&mut self, item: StreamItem<T>) -> Poll<Option<StreamItem<T>>> {
        self.attempt = None;
        self.state = CascadeState::Done;
        Poll::Ready(Some(item))
    }
}

impl<K, A, T> Stream for CascadeStream<K, A, T>
where
    K: Eq + Hash + Debug,
{
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            match this.state {
                CascadeState::Done => return Poll::Ready(None),
                CascadeState::Idle => {
                    if let Some(name) = this.find_unknown() {
                        warn!("cascade references unknown strategy {:?}", name);
                        let error = CascadeError::unknown_strategy(name);
                        return this.finish(StreamItem::Error(error));
                    }
                    this.state = CascadeState::Running;
                }
                CascadeState::Running => {
                    if this.attempt.is_none() {
                        if let Err(error) = this.start_attempt() {
                            return this.finish(StreamItem::Error(error));
                        }
                    }
                    let Some(attempt) = this.attempt.as_mut() else {
                        continue;
                    };

                    match attempt.as_mut().poll_next(cx) {
                        Poll::Ready(Some(StreamItem::Value(value))) => {
                            return this.finish(StreamItem::Value(value));
                        }
                        Poll::Ready(Some(StreamItem::Error(error))) => this.fall_back(Some(error)),
                        Poll::Ready(None) => this.fall_back(None),
                        Poll::Pending => return Poll::Pending,
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            CascadeState::Done => (0, Some(0)),
            _ => (1, Some(1)),
        }
    }
}

impl<K, A, T> FusedStream for CascadeStream<K, A, T>
where
    K: Eq + Hash + Debug,
{
    fn is_terminated(&self) -> bool {
        self.state == CascadeState::Done
    }
}
