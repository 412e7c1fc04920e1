// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget operations on top of a [`WidgetStore`].

use core::fmt;
use std::sync::Arc;

use stackboard_store::{Widget, WidgetId, WidgetStore, paging};
use tracing::{debug, warn};

use crate::area::{Area, fits};
use crate::config::{Config, PageRequest};
use crate::description::WidgetDescription;
use crate::error::{Error, Result};

/// Validates, merges, and queries widgets held by a shared store.
///
/// Cloning a manager is cheap; clones share the same store.
pub struct WidgetManager<S: WidgetStore + ?Sized = dyn WidgetStore> {
    store: Arc<S>,
}

impl<S: WidgetStore + ?Sized> Clone for WidgetManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: WidgetStore + ?Sized> fmt::Debug for WidgetManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("WidgetManager");
        if let Ok(len) = self.store.len() {
            s.field("len", &len);
        }
        s.finish_non_exhaustive()
    }
}

impl<S: WidgetStore> WidgetManager<S> {
    /// Manage widgets in `store`.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl WidgetManager {
    /// Manage widgets in the store selected by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::from_shared(config.open_store())
    }
}

impl<S: WidgetStore + ?Sized> WidgetManager<S> {
    /// Manage widgets in an already shared store.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a widget.
    ///
    /// `x`, `y`, `width` and `height` must be present, and the dimensions
    /// positive. Without a `z` the widget goes on top.
    pub fn create(&self, description: &WidgetDescription) -> Result<Widget> {
        let draft = description.to_draft().inspect_err(|err| {
            warn!(%err, "rejected widget description");
        })?;
        let widget = self.store.create_or_replace(draft)?;
        debug!(id = %widget.id, z = widget.z, "created widget");
        Ok(widget)
    }

    /// Apply the present fields of `description` to the widget `id`.
    ///
    /// The stored widget is copied, patched, and written back as a whole, so a
    /// new `z` that collides with another widget shifts that widget up.
    pub fn update(&self, id: &WidgetId, description: &WidgetDescription) -> Result<Widget> {
        let mut draft = self.existing(id)?.to_draft();
        description.overlay(&mut draft).inspect_err(|err| {
            warn!(%id, %err, "rejected widget update");
        })?;
        let widget = self.store.create_or_replace(draft)?;
        debug!(%id, z = widget.z, "updated widget");
        Ok(widget)
    }

    /// Delete the widget `id`.
    pub fn delete(&self, id: &WidgetId) -> Result<()> {
        self.existing(id)?;
        self.store.delete_by_id(id)?;
        debug!(%id, "deleted widget");
        Ok(())
    }

    /// Fetch the widget `id`.
    pub fn find_by_id(&self, id: &WidgetId) -> Result<Widget> {
        self.existing(id)
    }

    /// One page of widgets in ascending z.
    pub fn list_paged(&self, page: usize, per_page: usize) -> Result<Vec<Widget>> {
        Ok(self.store.find_all_ordered(page, per_page)?)
    }

    /// [`list_paged`](Self::list_paged) with a resolved [`PageRequest`].
    pub fn list_paged_request(&self, request: PageRequest) -> Result<Vec<Widget>> {
        self.list_paged(request.page, request.per_page)
    }

    /// One page of the widgets lying entirely inside `area`.
    ///
    /// Paging is applied to the filtered widgets in the order the store
    /// enumerates them; the result is not re-sorted.
    pub fn list_in_area(&self, area: &Area, page: usize, per_page: usize) -> Result<Vec<Widget>> {
        let all = self.store.find_all()?;
        let inside = all.into_iter().filter(|w| fits(area, w));
        Ok(paging::paginate(inside, page, per_page).collect())
    }

    /// [`list_in_area`](Self::list_in_area) with a resolved [`PageRequest`].
    pub fn list_in_area_request(&self, area: &Area, request: PageRequest) -> Result<Vec<Widget>> {
        self.list_in_area(area, request.page, request.per_page)
    }

    /// Number of live widgets.
    pub fn count(&self) -> Result<usize> {
        Ok(self.store.len()?)
    }

    fn existing(&self, id: &WidgetId) -> Result<Widget> {
        self.store.find_by_id(id)?.ok_or_else(|| {
            warn!(%id, "widget not found");
            Error::NotFound { id: id.clone() }
        })
    }
}
