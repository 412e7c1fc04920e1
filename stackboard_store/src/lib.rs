// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stackboard_store --heading-base-level=0

//! Stackboard Store: a z-ordered widget store.
//!
//! Stackboard Store keeps rectangular widgets with a stacking order (`z`) that is
//! unique across the store at all times.
//!
//! - Create or replace widgets by value with [`WidgetStore::create_or_replace`].
//!   Widgets without a z go on top; widgets with a z take exactly that slot and
//!   push everything at or above it up by one, highest first.
//! - Look widgets up by identity, delete them, page through them in z order,
//!   or enumerate all of them.
//!
//! Stores only ever hand out copies, so a [`Widget`] in caller hands can be
//! changed freely without affecting the store.
//!
//! Backends implement the [`WidgetStore`] trait, so callers can pick one at
//! startup and hold it as `dyn WidgetStore`.
//!
//! # Example
//!
//! ```rust
//! use stackboard_store::{InMemoryStore, WidgetDraft, WidgetStore};
//!
//! let store = InMemoryStore::new();
//! let back = store.create_or_replace(WidgetDraft::new(1, 1, 10, 10)).unwrap();
//! assert_eq!(back.z, 0);
//!
//! // Claim z = 0; the first widget moves up.
//! let front = store
//!     .create_or_replace(WidgetDraft::new(1, 1, 10, 10).with_z(0))
//!     .unwrap();
//! assert_eq!(front.z, 0);
//! assert_eq!(store.find_by_id(&back.id).unwrap().unwrap().z, 1);
//!
//! let page = store.find_all_ordered(1, 10).unwrap();
//! assert_eq!(page[0].id, front.id);
//! assert_eq!(page[1].id, back.id);
//! ```
//!
//! The table-backed store runs the same algorithms on top of a handful of
//! persistence primitives:
//!
//! ```rust
//! use stackboard_store::backends::{MemTable, TableStore};
//! use stackboard_store::{WidgetDraft, WidgetStore};
//!
//! let store = TableStore::new(MemTable::new());
//! let w = store.create_or_replace(WidgetDraft::new(0, 0, 2, 2).with_z(5)).unwrap();
//! assert_eq!(w.z, 5);
//! assert_eq!(store.len().unwrap(), 1);
//! ```
//!
//! ## Choosing a backend
//!
//! - [`InMemoryStore`]: hash map by identity plus a `BTreeMap` by z, behind one
//!   readers-writer lock. Top-z lookup and shifting are logarithmic per moved widget.
//! - [`TableStore`](backends::TableStore): runs over any [`Table`](backends::Table)
//!   implementation. [`MemTable`](backends::MemTable) answers each primitive by
//!   scanning and enforces a unique z on every write.

mod error;
mod memory;
mod store;
mod widget;

pub mod backends;
pub mod paging;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use store::WidgetStore;
pub use widget::{Widget, WidgetDraft, WidgetId};
