// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::CascadeError;

/// Lifecycle errors raised by [`Subject`](crate::Subject) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject has been closed and cannot accept new items or subscribers.
    #[error("Subject is closed")]
    Closed,
}

impl From<SubjectError> for CascadeError {
    fn from(error: SubjectError) -> Self {
        CascadeError::stream_error(error.to_string())
    }
}
