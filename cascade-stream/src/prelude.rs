// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting every operator trait and the types they emit.
//!
//! ```
//! use cascade_stream::prelude::*;
//! use futures::stream;
//!
//! let _paired = stream::iter(vec![StreamItem::Value(1)])
//!     .prepare(|| {})
//!     .with_previous_value();
//! ```

pub use crate::before_load::{BeforeLoadExt, IsFilled};
pub use crate::finalize::FinalizeExt;
pub use crate::is_loading::{IsLoadingExt, LoadingIndicator};
pub use crate::manipulate_stream::{apply_manipulation, ManipulateStreamExt, ManipulationStrategy};
pub use crate::prepare::PrepareExt;
pub use crate::with_previous_value::{WithPrevious, WithPreviousValueExt};
pub use cascade_core::{CascadeError, StreamItem, Subject};
