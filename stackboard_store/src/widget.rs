// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget records: the stored value, the store input, and the identity handle.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, unique identity of a stored widget.
///
/// Generated by the store at first persistence and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WidgetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WidgetId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A widget as held by a store.
///
/// Values returned from a store are copies; changing one has no effect on
/// the stored record. The only way to change a stored record is to hand a
/// complete [`WidgetDraft`] back to the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    /// Store-assigned identity.
    pub id: WidgetId,
    /// Centre x coordinate.
    pub x: i32,
    /// Centre y coordinate.
    pub y: i32,
    /// Width, strictly positive.
    pub width: i32,
    /// Height, strictly positive.
    pub height: i32,
    /// Stacking order. Unique within a store; higher is drawn on top.
    pub z: i32,
    /// Set at first persistence.
    pub created: DateTime<Utc>,
    /// Set on every persistence.
    pub last_modified: DateTime<Utc>,
}

impl Widget {
    /// A complete replacement draft for this widget, keeping its identity and z.
    pub fn to_draft(&self) -> WidgetDraft {
        WidgetDraft {
            id: Some(self.id.clone()),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            z: Some(self.z),
        }
    }

    pub(crate) fn from_draft(
        draft: WidgetDraft,
        id: WidgetId,
        z: i32,
        created: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            x: draft.x,
            y: draft.y,
            width: draft.width,
            height: draft.height,
            z,
            created,
            last_modified: now,
        }
    }
}

/// Input to [`WidgetStore::create_or_replace`](crate::WidgetStore::create_or_replace).
///
/// - `id == None` creates a new widget.
/// - `id == Some(..)` replaces the stored widget with that identity as a whole.
/// - `z == None` places the widget on top of everything else.
/// - `z == Some(..)` places it at exactly that z, shifting collisions upwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetDraft {
    /// Identity of the record to replace, if any.
    pub id: Option<WidgetId>,
    /// Centre x coordinate.
    pub x: i32,
    /// Centre y coordinate.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
    /// Requested stacking order.
    pub z: Option<i32>,
}

impl WidgetDraft {
    /// A new, unplaced widget centred at `(x, y)`.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: None,
            x,
            y,
            width,
            height,
            z: None,
        }
    }

    /// Request an explicit z.
    #[must_use]
    pub fn with_z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }

    /// Target an existing identity.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<WidgetId>) -> Self {
        self.id = Some(id.into());
        self
    }
}
