// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Cascade
//!
//! Ordered fallback across named asynchronous strategies, plus the small set of
//! stream operators that usually sit around it in a UI or service layer.
//!
//! ## Overview
//!
//! - [`CascadeStrategies`] runs a list of named strategies one at a time and emits
//!   the first success, or [`CascadeError::AllStrategiesFailed`].
//! - [`IsLoadingExt`], [`BeforeLoadExt`], [`PrepareExt`] and [`FinalizeExt`] track
//!   the lifecycle of a stream.
//! - [`ManipulateStreamExt`] and [`apply_manipulation`] accumulate JSON patches.
//! - [`WithPreviousValueExt`] pairs each value with its predecessor.
//!
//! ## Quick Start
//!
//! ```rust
//! use cascade::prelude::*;
//! use futures::{future, stream};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), CascadeError> {
//! let strategies = CascadeStrategies::new(
//!     StrategyMap::<&str, u32, String>::new()
//!         .with_strategy("cache", |_: &u32| {
//!             stream::iter(vec![StreamItem::Error(CascadeError::stream_error("cold cache"))])
//!         })
//!         .with_future_strategy("origin", |id: &u32| {
//!             future::ready(Ok(format!("user-{id}")))
//!         }),
//! );
//!
//! let user = strategies.use_strategies(["cache", "origin"], 7).run().await?;
//! assert_eq!(user, "user-7");
//! # Ok(())
//! # }
//! ```

pub use cascade_core::{CascadeError, Result, StreamItem, Subject, SubjectError};
pub use cascade_strategies::{Cascade, CascadeStrategies, CascadeStream, StrategyMap};
pub use cascade_stream::{
    apply_manipulation, BeforeLoadExt, FinalizeExt, IsFilled, IsLoadingExt, LoadingIndicator,
    ManipulateStreamExt, ManipulationStrategy, PrepareExt, WithPrevious, WithPreviousValueExt,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use cascade_core::{CascadeError, StreamItem, Subject};
    pub use cascade_strategies::{CascadeStrategies, StrategyMap};
    pub use cascade_stream::prelude::*;
}
