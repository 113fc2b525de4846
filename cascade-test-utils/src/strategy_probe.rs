// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scripted strategies that record their invocations.

use cascade_core::{CascadeError, StreamItem};
use futures::stream;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::Arc;

/// The stream a scripted strategy replays on every invocation.
pub type ScriptedStream<T> = stream::Iter<std::vec::IntoIter<StreamItem<T>>>;

/// Records every strategy invocation, in order, across clones.
///
/// The builder methods return closures ready for `StrategyMap::with_strategy`;
/// each call of such a closure records its name before producing the script.
pub struct StrategyProbe<K> {
    calls: Arc<Mutex<Vec<K>>>,
}

impl<K> StrategyProbe<K>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, name: K) {
        self.calls.lock().push(name);
    }

    /// Every recorded invocation, oldest first.
    pub fn calls(&self) -> Vec<K> {
        self.calls.lock().clone()
    }

    pub fn count(&self, name: &K) -> usize {
        self.calls.lock().iter().filter(|call| *call == name).count()
    }

    pub fn total(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    /// A strategy replaying `items` on every invocation.
    pub fn scripted<A, T>(
        &self,
        name: K,
        items: Vec<StreamItem<T>>,
    ) -> impl Fn(&A) -> ScriptedStream<T> + Send + Sync + 'static
    where
        A: 'static,
        T: Clone + Send + Sync + 'static,
    {
        let probe = self.clone();
        move |_args: &A| {
            probe.record(name.clone());
            stream::iter(items.clone())
        }
    }

    /// A strategy succeeding with `value`.
    pub fn succeed<A, T>(
        &self,
        name: K,
        value: T,
    ) -> impl Fn(&A) -> ScriptedStream<T> + Send + Sync + 'static
    where
        A: 'static,
        T: Clone + Send + Sync + 'static,
    {
        self.scripted(name, vec![StreamItem::Value(value)])
    }

    /// A strategy failing with a stream error naming itself.
    pub fn fail<A, T>(&self, name: K) -> impl Fn(&A) -> ScriptedStream<T> + Send + Sync + 'static
    where
        A: 'static,
        T: Clone + Send + Sync + 'static,
    {
        let error = CascadeError::stream_error(format!("{name:?} failed"));
        self.scripted(name, vec![StreamItem::Error(error)])
    }

    /// A strategy completing without emitting anything.
    pub fn complete_empty<A, T>(
        &self,
        name: K,
    ) -> impl Fn(&A) -> ScriptedStream<T> + Send + Sync + 'static
    where
        A: 'static,
        T: Clone + Send + Sync + 'static,
    {
        self.scripted(name, Vec::new())
    }

    /// A strategy that never settles.
    pub fn never<A, T>(
        &self,
        name: K,
    ) -> impl Fn(&A) -> stream::Pending<StreamItem<T>> + Send + Sync + 'static
    where
        A: 'static,
        T: Send + 'static,
    {
        let probe = self.clone();
        move |_args: &A| {
            probe.record(name.clone());
            stream::pending()
        }
    }
}

impl<K> Default for StrategyProbe<K>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for StrategyProbe<K> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
        }
    }
}
