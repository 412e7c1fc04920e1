// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store implementation over relational-style persistence primitives.

use core::fmt::{self, Debug};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::{debug, error, trace};

use crate::error::StoreError;
use crate::paging;
use crate::store::WidgetStore;
use crate::widget::{Widget, WidgetDraft, WidgetId};

/// Minimal persistence primitives needed to run the widget store algorithms.
///
/// These map one-to-one onto simple queries against a `widget` table with a
/// unique index on `z`.
pub trait Table: Send + Sync {
    /// Insert or overwrite the row with `row.id`.
    fn save(&mut self, row: Widget) -> Result<(), StoreError>;

    /// Delete the row with `id`, if any.
    fn delete(&mut self, id: &WidgetId) -> Result<(), StoreError>;

    /// The row with `id`.
    fn find(&self, id: &WidgetId) -> Result<Option<Widget>, StoreError>;

    /// Rows in ascending z, skipping `offset` and returning at most `limit`.
    fn page_by_z(&self, offset: usize, limit: usize) -> Result<Vec<Widget>, StoreError>;

    /// Every row with z at or above `z`, highest z first.
    fn at_or_above_desc(&self, z: i32) -> Result<Vec<Widget>, StoreError>;

    /// The row with the highest z.
    fn top(&self) -> Result<Option<Widget>, StoreError>;

    /// Every row in ascending z.
    fn all(&self) -> Result<Vec<Widget>, StoreError>;

    /// Number of rows.
    fn count(&self) -> Result<usize, StoreError>;
}

/// Widget store that delegates persistence to a [`Table`].
///
/// Reads share the lock; every mutation holds the write guard from the first
/// query to the last write. When a [`Table`] call fails partway through, the
/// rows already written are restored before the error is returned.
pub struct TableStore<T: Table> {
    table: RwLock<T>,
}

impl<T: Table + Default> Default for TableStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Table> TableStore<T> {
    /// Wrap a table.
    pub fn new(table: T) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// Unwrap the table.
    pub fn into_inner(self) -> T {
        self.table.into_inner()
    }
}

impl<T: Table + Debug> Debug for TableStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TableStore");
        if let Some(table) = self.table.try_read() {
            s.field("table", &*table);
        }
        s.finish_non_exhaustive()
    }
}

/// Pick the z for a draft, given the table without the record being replaced.
fn resolve_z<T: Table + ?Sized>(table: &T, requested: Option<i32>) -> Result<i32, StoreError> {
    let top = table.top()?.map(|w| w.z);
    match (requested, top) {
        (None, None) => Ok(0),
        (None, Some(max)) => max.checked_add(1).ok_or(StoreError::ZOverflow { z: max }),
        (Some(_), Some(i32::MAX)) => Err(StoreError::ZOverflow { z: i32::MAX }),
        (Some(target), _) => Ok(target),
    }
}

/// Rows overwritten or removed by one `create_or_replace`, as they were before.
#[derive(Default)]
struct Undo {
    removed: Option<Widget>,
    /// Shifted rows in the order they moved, highest z first.
    shifted: SmallVec<[Widget; 8]>,
}

impl Undo {
    fn is_empty(&self) -> bool {
        self.removed.is_none() && self.shifted.is_empty()
    }

    /// Put every recorded row back.
    ///
    /// Shifted rows go back lowest first: each one's old slot was vacated by
    /// itself and is free once the rows below it are back. The removed row
    /// goes last, when its slot is free again.
    fn rollback<T: Table + ?Sized>(self, table: &mut T) {
        let rows = self.shifted.into_iter().rev().chain(self.removed);
        for row in rows {
            let (id, z) = (row.id.clone(), row.z);
            if let Err(err) = table.save(row) {
                error!(%id, z, %err, "failed to restore widget row");
            }
        }
    }
}

/// Apply a draft, recording in `undo` every row it touches.
fn write_draft<T: Table + ?Sized>(
    table: &mut T,
    mut draft: WidgetDraft,
    now: DateTime<Utc>,
    undo: &mut Undo,
) -> Result<Widget, StoreError> {
    let previous = match &draft.id {
        Some(id) => table.find(id)?,
        None => None,
    };
    if let Some(prev) = &previous {
        table.delete(&prev.id)?;
        undo.removed = Some(prev.clone());
    }

    let z = resolve_z(&*table, draft.z)?;
    if draft.z.is_some() {
        for row in table.at_or_above_desc(z)? {
            let mut moved = row.clone();
            moved.z += 1;
            moved.last_modified = now;
            table.save(moved)?;
            undo.shifted.push(row);
        }
        if !undo.shifted.is_empty() {
            debug!(z, shifted = undo.shifted.len(), "shifted rows up to make room");
        }
    }

    let id = draft.id.take();
    let replaced = previous.is_some();
    let (id, created) = match (id, previous) {
        (Some(id), Some(prev)) => (id, prev.created),
        (Some(id), None) => (id, now),
        (None, _) => (WidgetId::generate(), now),
    };
    let widget = Widget::from_draft(draft, id, z, created, now);
    table.save(widget.clone())?;
    debug!(id = %widget.id, z, replaced, "saved widget row");
    Ok(widget)
}

impl<T: Table> WidgetStore for TableStore<T> {
    fn create_or_replace(&self, draft: WidgetDraft) -> Result<Widget, StoreError> {
        let mut table = self.table.write();
        let now = Utc::now();
        let mut undo = Undo::default();
        write_draft(&mut *table, draft, now, &mut undo).inspect_err(|err| {
            if !undo.is_empty() {
                debug!(%err, "rolling back partial write");
                undo.rollback(&mut *table);
            }
        })
    }

    fn find_by_id(&self, id: &WidgetId) -> Result<Option<Widget>, StoreError> {
        trace!(%id, "find widget row");
        self.table.read().find(id)
    }

    fn delete_by_id(&self, id: &WidgetId) -> Result<(), StoreError> {
        let mut table = self.table.write();
        if let Some(row) = table.find(id)? {
            table.delete(id)?;
            debug!(%id, z = row.z, "deleted widget row");
        }
        Ok(())
    }

    fn find_all_ordered(&self, page: usize, per_page: usize) -> Result<Vec<Widget>, StoreError> {
        self.table
            .read()
            .page_by_z(paging::offset(page, per_page), per_page)
    }

    fn find_all(&self) -> Result<Vec<Widget>, StoreError> {
        self.table.read().all()
    }

    fn len(&self) -> Result<usize, StoreError> {
        self.table.read().count()
    }
}
