// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scan-based row table with a unique z constraint.

use core::cmp::Reverse;

use crate::backends::table::Table;
use crate::error::StoreError;
use crate::widget::{Widget, WidgetId};

/// Row table held in a vector.
///
/// Every query scans and sorts, the way a table without secondary indexes
/// would be answered. Writes that would give two rows the same z are
/// rejected with [`StoreError::Constraint`].
#[derive(Clone, Debug, Default)]
pub struct MemTable {
    rows: Vec<Widget>,
}

impl MemTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(&self) -> Vec<Widget> {
        let mut rows = self.rows.clone();
        rows.sort_unstable_by_key(|w| w.z);
        rows
    }
}

impl Table for MemTable {
    fn save(&mut self, row: Widget) -> Result<(), StoreError> {
        if let Some(clash) = self.rows.iter().find(|w| w.z == row.z && w.id != row.id) {
            return Err(StoreError::Constraint {
                detail: format!("z {} already held by {}", row.z, clash.id),
            });
        }
        match self.rows.iter_mut().find(|w| w.id == row.id) {
            Some(slot) => *slot = row,
            None => self.rows.push(row),
        }
        Ok(())
    }

    fn delete(&mut self, id: &WidgetId) -> Result<(), StoreError> {
        self.rows.retain(|w| &w.id != id);
        Ok(())
    }

    fn find(&self, id: &WidgetId) -> Result<Option<Widget>, StoreError> {
        Ok(self.rows.iter().find(|w| &w.id == id).cloned())
    }

    fn page_by_z(&self, offset: usize, limit: usize) -> Result<Vec<Widget>, StoreError> {
        Ok(self.sorted().into_iter().skip(offset).take(limit).collect())
    }

    fn at_or_above_desc(&self, z: i32) -> Result<Vec<Widget>, StoreError> {
        let mut rows: Vec<_> = self.rows.iter().filter(|w| w.z >= z).cloned().collect();
        rows.sort_unstable_by_key(|w| Reverse(w.z));
        Ok(rows)
    }

    fn top(&self) -> Result<Option<Widget>, StoreError> {
        Ok(self.rows.iter().max_by_key(|w| w.z).cloned())
    }

    fn all(&self) -> Result<Vec<Widget>, StoreError> {
        Ok(self.sorted())
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.rows.len())
    }
}
