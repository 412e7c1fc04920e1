// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Failure reported by a [`WidgetStore`](crate::WidgetStore).
///
/// The in-memory store only ever reports [`StoreError::ZOverflow`]. Table-backed
/// stores also surface whatever their persistence primitives reject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Placing or shifting a widget would move a z past `i32::MAX`.
    #[error("z-index overflow: no room above z = {z}")]
    ZOverflow {
        /// Highest z currently held.
        z: i32,
    },

    /// A persistence primitive rejected a write.
    #[error("constraint failed: {detail}")]
    Constraint {
        /// What was violated.
        detail: String,
    },
}
