// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query-backed stores built on a small set of persistence primitives.
//!
//! - `table`: the [`Table`] primitive trait and [`TableStore`], which runs the
//!   top-z and shift algorithms against any [`Table`].
//! - `mem_table`: [`MemTable`], an in-process row table that answers each
//!   primitive by scanning, with a unique-z constraint on writes.
//!
//! A relational database adapter only has to implement [`Table`]. The store
//! wraps it in a readers-writer lock held across the whole shift-and-save
//! sequence, and puts back every row it touched if a primitive fails partway.

pub(crate) mod mem_table;
pub(crate) mod table;

pub use mem_table::MemTable;
pub use table::{Table, TableStore};
