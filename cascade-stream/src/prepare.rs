// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Subscription-time side effects.
//!
//! [`prepare`](PrepareExt::prepare) runs a callback exactly once, synchronously, on
//! the first poll of the stream and before the source itself is polled. A stream
//! that is never polled never runs its callback, and every freshly built stream
//! runs its own.
//!
//! ```
//! use cascade_core::StreamItem;
//! use cascade_stream::PrepareExt;
//! use futures::{stream, StreamExt};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let prepared = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&prepared);
//!
//! let mut stream = stream::iter(vec![StreamItem::Value("test")])
//!     .prepare(move || flag.store(true, Ordering::SeqCst));
//! assert!(!prepared.load(Ordering::SeqCst));
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value("test")));
//! assert!(prepared.load(Ordering::SeqCst));
//! # }
//! ```

use cascade_core::StreamItem;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;

/// Stream returned by [`PrepareExt::prepare`].
#[pin_project]
pub struct Prepare<S, F> {
    #[pin]
    stream: S,
    callback: Option<F>,
}

impl<S, F> Stream for Prepare<S, F>
where
    S: Stream,
    F: FnOnce(),
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if let Some(callback) = this.callback.take() {
            callback();
        }
        this.stream.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

impl<S, F> FusedStream for Prepare<S, F>
where
    S: FusedStream,
    F: FnOnce(),
{
    fn is_terminated(&self) -> bool {
        self.callback.is_none() && self.stream.is_terminated()
    }
}

/// Extension trait providing the [`prepare`](PrepareExt::prepare) operator.
pub trait PrepareExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Invokes `callback` upon subscription, i.e. on the first poll.
    fn prepare<F>(self, callback: F) -> Prepare<Self, F>
    where
        F: FnOnce(),
    {
        Prepare {
            stream: self,
            callback: Some(callback),
        }
    }
}

impl<S, T> PrepareExt<T> for S where S: Stream<Item = StreamItem<T>> {}
