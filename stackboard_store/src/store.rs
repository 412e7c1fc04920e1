// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store trait shared by every widget storage implementation.

use crate::error::StoreError;
use crate::widget::{Widget, WidgetDraft, WidgetId};

/// Storage capability behind the widget manager.
///
/// Implementations own every record they hold and only hand out copies.
/// Each method is atomic with respect to every other method: no caller ever
/// observes two live widgets sharing a z, or a widget missing from the
/// ordering while it is present by identity.
pub trait WidgetStore: Send + Sync {
    /// Insert a new widget or replace an existing one as a whole.
    ///
    /// - Without a z, the widget goes on top: one above the current maximum,
    ///   or `0` when the store is empty.
    /// - With a z, every other widget at that z or above is moved up by one,
    ///   highest first, and the widget takes the requested z.
    /// - Without an id, a fresh identity is generated and `created` is set.
    /// - With an id, the previous record under that id is dropped (ordering
    ///   entry included) and its `created` carried over.
    ///
    /// `last_modified` is set on every call.
    fn create_or_replace(&self, draft: WidgetDraft) -> Result<Widget, StoreError>;

    /// Look a widget up by identity.
    fn find_by_id(&self, id: &WidgetId) -> Result<Option<Widget>, StoreError>;

    /// Remove a widget and its ordering entry. Unknown ids are ignored.
    fn delete_by_id(&self, id: &WidgetId) -> Result<(), StoreError>;

    /// One page of widgets in ascending z.
    ///
    /// Pages are 1-based. A page past the end is empty, not an error.
    fn find_all_ordered(&self, page: usize, per_page: usize) -> Result<Vec<Widget>, StoreError>;

    /// Every widget. The order is implementation-defined but stable for one snapshot.
    fn find_all(&self) -> Result<Vec<Widget>, StoreError>;

    /// Number of live widgets.
    fn len(&self) -> Result<usize, StoreError>;

    /// Whether the store holds no widgets.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
