// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied widget descriptions.

use serde::{Deserialize, Serialize};
use stackboard_store::WidgetDraft;

use crate::error::{Error, Result};

/// Widget fields as supplied by a caller. Every field is optional.
///
/// For creation, `x`, `y`, `width` and `height` are required and `z` is
/// optional. For updates, only the fields that are present are applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescription {
    /// Centre x coordinate.
    pub x: Option<i32>,
    /// Centre y coordinate.
    pub y: Option<i32>,
    /// Stacking order.
    pub z: Option<i32>,
    /// Width, must be positive.
    pub width: Option<i32>,
    /// Height, must be positive.
    pub height: Option<i32>,
}

impl WidgetDescription {
    /// A complete description without a z.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: None,
            width: Some(width),
            height: Some(height),
        }
    }

    /// Set the z.
    #[must_use]
    pub fn with_z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }

    /// Build a draft for a new widget, checking that every required field is present.
    pub(crate) fn to_draft(self) -> Result<WidgetDraft> {
        let x = self.x.ok_or_else(|| Error::missing("x"))?;
        let y = self.y.ok_or_else(|| Error::missing("y"))?;
        let width = positive("width", self.width.ok_or_else(|| Error::missing("width"))?)?;
        let height = positive("height", self.height.ok_or_else(|| Error::missing("height"))?)?;
        Ok(WidgetDraft {
            z: self.z,
            ..WidgetDraft::new(x, y, width, height)
        })
    }

    /// Apply the present fields onto `draft`.
    ///
    /// Nothing is written unless every present field is valid.
    pub(crate) fn overlay(&self, draft: &mut WidgetDraft) -> Result<()> {
        let width = self.width.map(|w| positive("width", w)).transpose()?;
        let height = self.height.map(|h| positive("height", h)).transpose()?;
        if let Some(x) = self.x {
            draft.x = x;
        }
        if let Some(y) = self.y {
            draft.y = y;
        }
        if let Some(z) = self.z {
            draft.z = Some(z);
        }
        if let Some(width) = width {
            draft.width = width;
        }
        if let Some(height) = height {
            draft.height = height;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: i32) -> Result<i32> {
    if value > 0 {
        Ok(value)
    } else {
        Err(Error::not_positive(field))
    }
}
