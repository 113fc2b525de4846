// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::finalize::FinalizeExt;
use crate::prepare::PrepareExt;
use cascade_core::{StreamItem, Subject};
use futures::channel::mpsc::UnboundedSender;
use futures::Stream;

/// A sink for loading flags.
///
/// Implementations must not block: the flag is pushed from inside `poll_next`.
pub trait LoadingIndicator: Clone {
    fn set_loading(&self, loading: bool);
}

impl LoadingIndicator for Subject<bool> {
    fn set_loading(&self, loading: bool) {
        if let Err(error) = self.next(loading) {
            warn!("loading indicator dropped update {}: {}", loading, error);
        }
    }
}

impl LoadingIndicator for UnboundedSender<bool> {
    fn set_loading(&self, loading: bool) {
        if let Err(error) = self.unbounded_send(loading) {
            warn!("loading indicator dropped update {}: {}", loading, error);
        }
    }
}

/// Extension trait providing the [`is_loading`](IsLoadingExt::is_loading) operator.
pub trait IsLoadingExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Pushes `true` into `indicator` on subscription and `false` on termination.
    ///
    /// Termination covers completion, a forwarded error, and dropping the stream
    /// after it started. Items pass through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_core::{StreamItem, Subject};
    /// use cascade_stream::IsLoadingExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let loading = Subject::new();
    /// let mut flags = loading.subscribe().unwrap();
    ///
    /// let values: Vec<_> = stream::iter(vec![StreamItem::Value(1)])
    ///     .is_loading(loading.clone())
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(values, vec![StreamItem::Value(1)]);
    /// assert_eq!(flags.next().await, Some(StreamItem::Value(true)));
    /// assert_eq!(flags.next().await, Some(StreamItem::Value(false)));
    /// # }
    /// ```
    fn is_loading<I>(self, indicator: I) -> impl Stream<Item = StreamItem<T>>
    where
        I: LoadingIndicator,
    {
        let on_finish = indicator.clone();
        self.prepare(move || indicator.set_loading(true))
            .finalize(move || on_finish.set_loading(false))
    }
}

impl<S, T> IsLoadingExt<T> for S where S: Stream<Item = StreamItem<T>> {}
