// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Accumulating JSON patches into an aggregate.
//!
//! A [`ManipulationStrategy`] names how a patch folds into the current aggregate:
//!
//! | Strategy    | Wire name      | Seed   | Step                                    |
//! |-------------|----------------|--------|-----------------------------------------|
//! | `AddObject` | `"add-object"` | `{}`   | shallow merge, patch keys win           |
//! | `AddArray`  | `"add-array"`  | `[]`   | append the patch elements               |
//! | `Clear`     | `"clear"`      | `null` | empty value of the same shape as patch  |
//!
//! [`manipulate_stream`](ManipulateStreamExt::manipulate_stream) runs that fold over
//! a stream of patches. [`apply_manipulation`] instead applies each incoming strategy
//! once to the latest value of a state stream.

use cascade_core::{CascadeError, Result, StreamItem};
use core::fmt;
use core::future::ready;
use core::pin::Pin;
use core::str::FromStr;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream, StreamExt};
use pin_project::pin_project;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManipulationStrategy {
    AddObject,
    AddArray,
    Clear,
}

impl ManipulationStrategy {
    pub const ALL: [Self; 3] = [Self::AddObject, Self::AddArray, Self::Clear];

    /// Wire name of the strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddObject => "add-object",
            Self::AddArray => "add-array",
            Self::Clear => "clear",
        }
    }

    /// Aggregate the fold starts from.
    pub fn seed(self) -> Value {
        match self {
            Self::AddObject => Value::Object(Map::new()),
            Self::AddArray => Value::Array(Vec::new()),
            Self::Clear => Value::Null,
        }
    }

    /// Folds `patch` into `state`, leaving `state` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeError::TypeMismatch`] when the shapes of `state` and `patch`
    /// do not fit the strategy.
    pub fn apply(self, state: &Value, patch: Value) -> Result<Value> {
        match (self, state, patch) {
            (Self::AddObject, Value::Object(state), Value::Object(patch)) => {
                let mut merged = state.clone();
                merged.extend(patch);
                Ok(Value::Object(merged))
            }
            (Self::AddArray, Value::Array(state), Value::Array(patch)) => {
                let mut joined = state.clone();
                joined.extend(patch);
                Ok(Value::Array(joined))
            }
            (Self::Clear, _, Value::Object(_)) => Ok(Value::Object(Map::new())),
            (Self::Clear, _, Value::Array(_)) => Ok(Value::Array(Vec::new())),
            (Self::Clear, _, patch) => Err(CascadeError::type_mismatch(format!(
                "clear expects an object or array, got {}",
                kind(&patch)
            ))),
            (strategy, state, patch) => Err(CascadeError::type_mismatch(format!(
                "{strategy} cannot combine {} state with {} patch",
                kind(state),
                kind(&patch)
            ))),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for ManipulationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManipulationStrategy {
    type Err = CascadeError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == name)
            .ok_or_else(|| CascadeError::unknown_strategy(name))
    }
}

/// Extension trait providing the
/// [`manipulate_stream`](ManipulateStreamExt::manipulate_stream) operator.
pub trait ManipulateStreamExt: Stream<Item = StreamItem<Value>> + Sized {
    /// Folds every patch into the aggregate and emits the aggregate after each step.
    ///
    /// A patch of the wrong shape yields a [`CascadeError::TypeMismatch`] item and
    /// leaves the aggregate as it was. Upstream errors are forwarded unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_core::StreamItem;
    /// use cascade_stream::{ManipulateStreamExt, ManipulationStrategy};
    /// use futures::{stream, StreamExt};
    /// use serde_json::json;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let patches = stream::iter(vec![
    ///     StreamItem::Value(json!({"a": 1})),
    ///     StreamItem::Value(json!({"b": 2})),
    /// ]);
    ///
    /// let aggregates: Vec<_> = patches
    ///     .manipulate_stream(ManipulationStrategy::AddObject)
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(aggregates.last(), Some(&StreamItem::Value(json!({"a": 1, "b": 2}))));
    /// # }
    /// ```
    fn manipulate_stream(
        self,
        strategy: ManipulationStrategy,
    ) -> impl Stream<Item = StreamItem<Value>> {
        self.scan(strategy.seed(), move |aggregate, item| {
            let output = match item {
                StreamItem::Value(patch) => match strategy.apply(aggregate, patch) {
                    Ok(next) => {
                        *aggregate = next.clone();
                        StreamItem::Value(next)
                    }
                    Err(error) => StreamItem::Error(error),
                },
                StreamItem::Error(error) => StreamItem::Error(error),
            };
            ready(Some(output))
        })
    }
}

impl<S> ManipulateStreamExt for S where S: Stream<Item = StreamItem<Value>> {}

/// Stream returned by [`apply_manipulation`].
#[pin_project]
pub struct ApplyManipulation<M, S> {
    #[pin]
    manipulations: M,
    #[pin]
    state: S,
    latest: Option<Value>,
    state_done: bool,
    done: bool,
}

/// Applies each strategy from `manipulations` once to the latest `state` value.
///
/// Every strategy starts from its own seed, so `AddObject` and `AddArray` emit a
/// copy of the current state and `Clear` emits its empty counterpart. Strategies
/// that arrive before the state produced anything are dropped. The output ends
/// with `manipulations`; errors from either side are forwarded.
pub fn apply_manipulation<M, S>(manipulations: M, state: S) -> ApplyManipulation<M, S>
where
    M: Stream<Item = StreamItem<ManipulationStrategy>>,
    S: Stream<Item = StreamItem<Value>>,
{
    ApplyManipulation {
        manipulations,
        state,
        latest: None,
        state_done: false,
        done: false,
    }
}

impl<M, S> Stream for ApplyManipulation<M, S>
where
    M: Stream<Item = StreamItem<ManipulationStrategy>>,
    S: Stream<Item = StreamItem<Value>>,
{
    type Item = StreamItem<Value>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        // Catch up with the state first so a strategy sees the freshest value.
        while !*this.state_done {
            match this.state.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => *this.latest = Some(value),
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    return Poll::Ready(Some(StreamItem::Error(error)))
                }
                Poll::Ready(None) => *this.state_done = true,
                Poll::Pending => break,
            }
        }

        loop {
            match this.manipulations.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(strategy))) => {
                    if let Some(latest) = this.latest.as_ref() {
                        let output = strategy.apply(&strategy.seed(), latest.clone());
                        return Poll::Ready(Some(output.into()));
                    }
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    return Poll::Ready(Some(StreamItem::Error(error)))
                }
                Poll::Ready(None) => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<M, S> FusedStream for ApplyManipulation<M, S>
where
    M: Stream<Item = StreamItem<ManipulationStrategy>>,
    S: Stream<Item = StreamItem<Value>>,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}
