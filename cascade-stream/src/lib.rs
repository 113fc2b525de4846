// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reactive helper operators for `StreamItem` streams.
//!
//! Every operator is an extension trait blanket-implemented for any
//! `Stream<Item = StreamItem<T>>`:
//!
//! - [`PrepareExt`] and [`FinalizeExt`]: lifecycle hooks on subscription and termination
//! - [`IsLoadingExt`]: drives a [`LoadingIndicator`] with `true`/`false` around a stream
//! - [`BeforeLoadExt`]: `true` until the first [`IsFilled`] value shows up
//! - [`ManipulateStreamExt`] and [`apply_manipulation`]: JSON patch accumulation
//! - [`WithPreviousValueExt`]: pairs each value with its predecessor
//!
//! `use cascade_stream::prelude::*;` brings all of them into scope.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod before_load;
pub mod finalize;
pub mod is_loading;
pub mod manipulate_stream;
pub mod prelude;
pub mod prepare;
pub mod with_previous_value;

pub use self::before_load::{BeforeLoadExt, IsFilled};
pub use self::finalize::{Finalize, FinalizeExt};
pub use self::is_loading::{IsLoadingExt, LoadingIndicator};
pub use self::manipulate_stream::{
    apply_manipulation, ApplyManipulation, ManipulateStreamExt, ManipulationStrategy,
};
pub use self::prepare::{Prepare, PrepareExt};
pub use self::with_previous_value::{WithPrevious, WithPreviousValueExt};
