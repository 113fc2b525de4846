// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Termination hook.
//!
//! [`finalize`](FinalizeExt::finalize) runs a callback exactly once when a started
//! stream terminates, whichever way that happens:
//!
//! - the source completes;
//! - the source emits an error, which is forwarded before the stream ends;
//! - the stream is dropped after its first poll.
//!
//! A stream dropped before it was ever polled was never subscribed to, so the
//! callback does not run.

use cascade_core::StreamItem;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::{pin_project, pinned_drop};

/// Stream returned by [`FinalizeExt::finalize`].
#[pin_project(PinnedDrop)]
pub struct Finalize<S, F>
where
    F: FnOnce(),
{
    #[pin]
    stream: S,
    callback: Option<F>,
    started: bool,
}

impl<S, F> Finalize<S, F>
where
    F: FnOnce(),
{
    fn run(callback: &mut Option<F>) {
        if let Some(callback) = callback.take() {
            callback();
        }
    }
}

#[pinned_drop]
impl<S, F> PinnedDrop for Finalize<S, F>
where
    F: FnOnce(),
{
    fn drop(self: Pin<&mut Self>) {
        let this = self.project();
        if *this.started {
            Self::run(this.callback);
        }
    }
}

impl<S, T, F> Stream for Finalize<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnOnce(),
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        // Callback already consumed: the sequence is over.
        if this.callback.is_none() {
            return Poll::Ready(None);
        }
        *this.started = true;

        match this.stream.poll_next(cx) {
            Poll::Ready(Some(StreamItem::Error(error))) => {
                Self::run(this.callback);
                Poll::Ready(Some(StreamItem::Error(error)))
            }
            Poll::Ready(Some(item)) => Poll::Ready(Some(item)),
            Poll::Ready(None) => {
                Self::run(this.callback);
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<S, T, F> FusedStream for Finalize<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnOnce(),
{
    fn is_terminated(&self) -> bool {
        self.started && self.callback.is_none()
    }
}

/// Extension trait providing the [`finalize`](FinalizeExt::finalize) operator.
pub trait FinalizeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Invokes `callback` once the stream completes, errors, or is dropped after
    /// being polled.
    fn finalize<F>(self, callback: F) -> Finalize<Self, F>
    where
        F: FnOnce(),
    {
        Finalize {
            stream: self,
            callback: Some(callback),
            started: false,
        }
    }
}

impl<S, T> FinalizeExt<T> for S where S: Stream<Item = StreamItem<T>> {}
