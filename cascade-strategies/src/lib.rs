// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential fallback across named asynchronous strategies.
//!
//! A *strategy* is a named operation that, given a shared argument set, either
//! produces a value or fails. [`CascadeStrategies`] holds a fixed
//! [`StrategyMap`] and runs an ordered list of strategy names in *cascade*: the
//! first strategy is attempted, and only if it fails is the next one attempted,
//! until one succeeds or the list is exhausted.
//!
//! # Semantics
//!
//! - **Lazy**: [`use_strategies`](CascadeStrategies::use_strategies) only describes
//!   the cascade. Strategies run when the returned [`Cascade`] is subscribed to
//!   through [`Cascade::stream`] or [`Cascade::run`].
//! - **Independent subscriptions**: every subscription restarts from the first
//!   name. Nothing is memoized.
//! - **Strict priority**: strategies are attempted one at a time, left to right.
//!   Strategy `n + 1` never starts before strategy `n` failed.
//! - **Single outcome**: a subscription yields exactly one item, the first value
//!   of the winning strategy, or [`CascadeError::AllStrategiesFailed`].
//! - **Suppressed failures**: per-strategy failures are dropped; callers cannot
//!   tell a failed strategy from one that was never reached.
//! - **Unknown names**: a name absent from the map fails the subscription with
//!   [`CascadeError::UnknownStrategy`] before any strategy runs.
//! - **Cancellation**: dropping the subscription drops the in-flight attempt and
//!   no further strategy starts.
//!
//! A strategy that completes without emitting anything counts as failed.
//!
//! # Example
//!
//! ```
//! use cascade_core::{CascadeError, StreamItem};
//! use cascade_strategies::{CascadeStrategies, StrategyMap};
//! use futures::StreamExt;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Lookup {
//!     Memory,
//!     Disk,
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let strategies = CascadeStrategies::new(
//!     StrategyMap::<Lookup, String, usize>::new()
//!         .with_future_strategy(Lookup::Memory, |_key: &String| async {
//!             Err(CascadeError::stream_error("not cached"))
//!         })
//!         .with_future_strategy(Lookup::Disk, |key: &String| {
//!             let len = key.len();
//!             async move { Ok(len) }
//!         }),
//! );
//!
//! let cascade = strategies.use_strategies([Lookup::Memory, Lookup::Disk], "config".to_string());
//!
//! let mut stream = cascade.stream();
//! assert_eq!(stream.next().await, Some(StreamItem::Value(6)));
//! assert_eq!(stream.next().await, None);
//!
//! let empty = strategies.use_strategies([], "config".to_string());
//! assert!(matches!(empty.run().await, Err(CascadeError::AllStrategiesFailed)));
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod cascade;
pub mod strategy_map;

pub use cascade::{Cascade, CascadeStrategies, CascadeStream};
pub use cascade_core::{CascadeError, StreamItem};
pub use strategy_map::{StrategyFn, StrategyMap, StrategyStream};
