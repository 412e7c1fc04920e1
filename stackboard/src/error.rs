// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use stackboard_store::{StoreError, WidgetId};
use thiserror::Error;

/// Failure of a [`WidgetManager`](crate::WidgetManager) operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The description is missing a required field or carries an invalid value.
    ///
    /// Raised before the store is touched.
    #[error("invalid widget: `{field}` {reason}")]
    Validation {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// No live widget has this identity.
    #[error("widget not found: {id}")]
    NotFound {
        /// The identity that was looked up.
        id: WidgetId,
    },

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Conventional HTTP status for this error, for transport adapters.
    pub fn status_hint(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Store(_) => 500,
        }
    }

    pub(crate) fn missing(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "is required",
        }
    }

    pub(crate) fn not_positive(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "must be greater than zero",
        }
    }
}

/// Result alias for manager operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
