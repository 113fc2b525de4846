// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cascade_core::StreamItem;
use core::future::ready;
use futures::stream::{self, Stream, StreamExt};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Whether a value counts as loaded.
///
/// Zero, `false`, `NaN`, empty strings, empty collections, `None` and JSON `null`
/// are not filled. Everything else is.
pub trait IsFilled {
    fn is_filled(&self) -> bool;
}

macro_rules! impl_is_filled_for_integers {
    ($($ty:ty),*) => {
        $(
            impl IsFilled for $ty {
                fn is_filled(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_is_filled_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl IsFilled for f32 {
    fn is_filled(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl IsFilled for f64 {
    fn is_filled(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl IsFilled for bool {
    fn is_filled(&self) -> bool {
        *self
    }
}

impl IsFilled for str {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl IsFilled for String {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> IsFilled for [T] {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> IsFilled for Vec<T> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, H> IsFilled for HashMap<K, V, H> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> IsFilled for BTreeMap<K, V> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, H> IsFilled for HashSet<T, H> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> IsFilled for BTreeSet<T> {
    fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: IsFilled> IsFilled for Option<T> {
    fn is_filled(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_filled())
    }
}

impl<T: IsFilled + ?Sized> IsFilled for &T {
    fn is_filled(&self) -> bool {
        (**self).is_filled()
    }
}

impl<T: IsFilled + ?Sized> IsFilled for Box<T> {
    fn is_filled(&self) -> bool {
        (**self).is_filled()
    }
}

impl IsFilled for Value {
    fn is_filled(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n.is_filled()),
            Value::String(text) => text.is_filled(),
            Value::Array(items) => items.is_filled(),
            Value::Object(fields) => !fields.is_empty(),
        }
    }
}

/// Extension trait providing the [`before_load`](BeforeLoadExt::before_load) operator.
pub trait BeforeLoadExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `true` immediately, then `false` once the source settles.
    ///
    /// The source settles on its first filled value, on its first error, or on
    /// completion. After `false` the output ends. Unfilled values keep the flag
    /// at `true`. Source errors are swallowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_core::StreamItem;
    /// use cascade_stream::BeforeLoadExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let flags: Vec<_> = stream::iter(vec![StreamItem::Value(0), StreamItem::Value(7)])
    ///     .before_load()
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(flags, vec![StreamItem::Value(true), StreamItem::Value(false)]);
    /// # }
    /// ```
    fn before_load(self) -> impl Stream<Item = StreamItem<bool>>
    where
        T: IsFilled,
    {
        self.before_load_with(T::is_filled)
    }

    /// Like [`before_load`](BeforeLoadExt::before_load) with a custom notion of
    /// "filled".
    fn before_load_with<P>(self, mut predicate: P) -> impl Stream<Item = StreamItem<bool>>
    where
        P: FnMut(&T) -> bool,
    {
        let settled = self
            .filter_map(move |item| {
                ready(match item {
                    StreamItem::Value(value) if !predicate(&value) => None,
                    _ => Some(()),
                })
            })
            .chain(stream::once(ready(())))
            .take(1)
            .map(|()| StreamItem::Value(false));

        stream::once(ready(StreamItem::Value(true))).chain(settled)
    }
}

impl<S, T> BeforeLoadExt<T> for S where S: Stream<Item = StreamItem<T>> {}
