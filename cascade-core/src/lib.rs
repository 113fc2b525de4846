// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every cascade-rx crate.
//!
//! - [`StreamItem`]: the value-or-error item carried by every stream in the workspace
//! - [`CascadeError`]: the root error type
//! - [`Subject`]: a hot broadcast source, mostly used as a loading indicator sink

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error;
pub mod stream_item;
pub mod subject;
pub mod subject_error;

pub use self::error::{CascadeError, IntoCascadeError, Result, ResultExt};
pub use self::stream_item::StreamItem;
pub use self::subject::Subject;
pub use self::subject_error::SubjectError;
