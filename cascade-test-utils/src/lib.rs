// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the cascade-rx workspace.
//!
//! Not meant for production code.
//!
//! - [`test_channel`] / [`test_channel_with_errors`]: imperative sources for
//!   operator tests
//! - [`StrategyProbe`]: builds scripted strategies and records which ones ran
//! - [`helpers`]: assertions with timeouts
//! - [`test_data`]: fixtures
//!
//! ```rust
//! use cascade_test_utils::StrategyProbe;
//!
//! let probe = StrategyProbe::<&'static str>::new();
//! let strategy = probe.succeed::<(), _>("cache", 5);
//!
//! let _attempt = strategy(&());
//! assert_eq!(probe.calls(), vec!["cache"]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error_injection;
pub mod helpers;
pub mod strategy_probe;
pub mod test_data;

use cascade_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use error_injection::ErrorInjectingStream;
pub use helpers::{assert_no_element_emitted, unwrap_stream, unwrap_value};
pub use strategy_probe::{ScriptedStream, StrategyProbe};

/// Creates a test channel that wraps sent values in `StreamItem::Value`.
///
/// ```rust
/// use cascade_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
/// tx.send(3).unwrap();
/// let item = stream.next().await.unwrap().unwrap();
/// assert_eq!(item, 3);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` so tests can inject errors.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
