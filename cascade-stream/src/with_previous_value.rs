// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pairs each value with the one emitted before it.

use cascade_core::StreamItem;
use futures::{future::ready, Stream, StreamExt};

/// A value together with its predecessor in the stream.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WithPrevious<T> {
    /// The previous value, `None` for the first element
    pub previous: Option<T>,
    /// The value just emitted
    pub current: T,
}

impl<T> WithPrevious<T> {
    pub fn new(previous: Option<T>, current: T) -> Self {
        Self { previous, current }
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Returns `(previous, current)` once a previous value exists.
    pub fn as_pair(&self) -> Option<(&T, &T)> {
        self.previous.as_ref().map(|prev| (prev, &self.current))
    }
}

/// Extension trait providing the
/// [`with_previous_value`](WithPreviousValueExt::with_previous_value) operator.
pub trait WithPreviousValueExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits every value as a [`WithPrevious`].
    ///
    /// The first value has `previous: None`. Errors are forwarded and do not
    /// replace the remembered value.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_core::StreamItem;
    /// use cascade_stream::{WithPrevious, WithPreviousValueExt};
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let pairs: Vec<_> = stream::iter(vec![StreamItem::Value(1), StreamItem::Value(2)])
    ///     .with_previous_value()
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(
    ///     pairs,
    ///     vec![
    ///         StreamItem::Value(WithPrevious::new(None, 1)),
    ///         StreamItem::Value(WithPrevious::new(Some(1), 2)),
    ///     ]
    /// );
    /// # }
    /// ```
    fn with_previous_value(self) -> impl Stream<Item = StreamItem<WithPrevious<T>>>
    where
        T: Clone,
    {
        self.scan(None, |state: &mut Option<T>, item: StreamItem<T>| {
            ready(Some(match item {
                StreamItem::Value(current) => {
                    let previous = state.replace(current.clone());
                    StreamItem::Value(WithPrevious::new(previous, current))
                }
                StreamItem::Error(error) => StreamItem::Error(error),
            }))
        })
    }
}

impl<S, T> WithPreviousValueExt<T> for S where S: Stream<Item = StreamItem<T>> {}
