// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory store: an identity map plus a sorted z index behind one lock.

use core::fmt;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::StoreError;
use crate::paging;
use crate::store::WidgetStore;
use crate::widget::{Widget, WidgetDraft, WidgetId};

#[derive(Default)]
struct Inner {
    widgets: HashMap<WidgetId, Widget>,
    // z -> identity; kept in lockstep with `widgets`.
    by_z: BTreeMap<i32, WidgetId>,
}

impl Inner {
    /// Highest z held by anyone other than the widget currently at `exclude`.
    fn max_z_excluding(&self, exclude: Option<i32>) -> Option<i32> {
        self.by_z.keys().rev().copied().find(|&z| Some(z) != exclude)
    }

    fn remove(&mut self, id: &WidgetId) -> Option<Widget> {
        let widget = self.widgets.remove(id)?;
        self.by_z.remove(&widget.z);
        Some(widget)
    }

    /// Move every widget at `from` or above up by one, highest first.
    ///
    /// The caller has already checked that the highest z is below `i32::MAX`.
    fn shift_up_from(&mut self, from: i32, now: DateTime<Utc>) -> usize {
        let moving: SmallVec<[(i32, WidgetId); 8]> = self
            .by_z
            .range(from..)
            .rev()
            .map(|(&z, id)| (z, id.clone()))
            .collect();
        for (z, id) in &moving {
            let up = z + 1;
            debug_assert!(!self.by_z.contains_key(&up), "z {up} is still occupied");
            self.by_z.remove(z);
            self.by_z.insert(up, id.clone());
            if let Some(widget) = self.widgets.get_mut(id) {
                widget.z = up;
                widget.last_modified = now;
            }
        }
        moving.len()
    }

    fn insert(&mut self, widget: Widget) {
        self.by_z.insert(widget.z, widget.id.clone());
        self.widgets.insert(widget.id.clone(), widget);
    }

    fn is_consistent(&self) -> bool {
        self.widgets.len() == self.by_z.len()
            && self
                .by_z
                .iter()
                .all(|(z, id)| self.widgets.get(id).is_some_and(|w| w.z == *z))
    }
}

/// Widget store held entirely in process memory.
///
/// Lookups by identity go through a hash map; ordered reads and top-z
/// assignment go through a `BTreeMap` keyed by z. Both live behind a single
/// readers-writer lock, so readers run in parallel and every mutation,
/// shift cascade included, is exclusive.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("InMemoryStore");
        if let Some(inner) = self.inner.try_read() {
            s.field("len", &inner.widgets.len())
                .field("top_z", &inner.by_z.last_key_value().map(|(z, _)| *z));
        }
        s.finish_non_exhaustive()
    }
}

impl WidgetStore for InMemoryStore {
    fn create_or_replace(&self, mut draft: WidgetDraft) -> Result<Widget, StoreError> {
        let mut inner = self.inner.write();
        // Stamped under the lock so timestamps follow write order.
        let now = Utc::now();

        let previous = draft
            .id
            .as_ref()
            .and_then(|id| inner.widgets.get(id))
            .map(|w| (w.z, w.created));
        let max_other = inner.max_z_excluding(previous.map(|(z, _)| z));

        // Resolve the z before touching anything so failures leave the store as it was.
        let z = match (draft.z, max_other) {
            (None, None) => 0,
            (None, Some(max)) => max.checked_add(1).ok_or(StoreError::ZOverflow { z: max })?,
            // Someone sits at the ceiling and would have to move up.
            (Some(_), Some(i32::MAX)) => return Err(StoreError::ZOverflow { z: i32::MAX }),
            (Some(target), _) => target,
        };

        let id = draft.id.take();
        if let Some(id) = &id {
            inner.remove(id);
        }
        if draft.z.is_some() {
            let shifted = inner.shift_up_from(z, now);
            if shifted > 0 {
                debug!(z, shifted, "shifted widgets up to make room");
            }
        }

        let (id, created) = match (id, previous) {
            (Some(id), Some((_, created))) => (id, created),
            (Some(id), None) => (id, now),
            (None, _) => (WidgetId::generate(), now),
        };
        let widget = Widget::from_draft(draft, id, z, created, now);
        inner.insert(widget.clone());
        debug_assert!(inner.is_consistent(), "identity map and z index diverged");
        debug!(
            id = %widget.id,
            z,
            replaced = previous.is_some(),
            "stored widget"
        );
        Ok(widget)
    }

    fn find_by_id(&self, id: &WidgetId) -> Result<Option<Widget>, StoreError> {
        trace!(%id, "find widget");
        Ok(self.inner.read().widgets.get(id).cloned())
    }

    fn delete_by_id(&self, id: &WidgetId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if let Some(widget) = inner.remove(id) {
            debug!(%id, z = widget.z, "deleted widget");
        }
        Ok(())
    }

    fn find_all_ordered(&self, page: usize, per_page: usize) -> Result<Vec<Widget>, StoreError> {
        let inner = self.inner.read();
        if paging::offset(page, per_page) >= inner.by_z.len() {
            return Ok(Vec::new());
        }
        Ok(paging::paginate(inner.by_z.values(), page, per_page)
            .filter_map(|id| inner.widgets.get(id).cloned())
            .collect())
    }

    fn find_all(&self) -> Result<Vec<Widget>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .by_z
            .values()
            .filter_map(|id| inner.widgets.get(id).cloned())
            .collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().widgets.len())
    }
}
