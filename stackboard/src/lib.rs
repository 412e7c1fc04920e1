// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=stackboard --heading-base-level=0

//! Stackboard: a board of rectangular widgets with a unique stacking order.
//!
//! [`WidgetManager`] is the operation surface. It validates caller input,
//! merges partial updates onto stored widgets, and runs queries on top of a
//! [`WidgetStore`]:
//!
//! - [`create`](WidgetManager::create), [`update`](WidgetManager::update),
//!   [`delete`](WidgetManager::delete) and [`find_by_id`](WidgetManager::find_by_id).
//! - [`list_paged`](WidgetManager::list_paged): one page of widgets in ascending z.
//! - [`list_in_area`](WidgetManager::list_in_area): one page of the widgets
//!   lying entirely inside an [`Area`].
//!
//! Every z is unique. A widget created or moved onto an occupied z takes that
//! slot and the widgets at or above it move up by one.
//!
//! # Example
//!
//! ```rust
//! use stackboard::{Area, InMemoryStore, WidgetDescription, WidgetManager};
//!
//! let board = WidgetManager::new(InMemoryStore::new());
//! let a = board.create(&WidgetDescription::new(0, 0, 10, 10)).unwrap();
//! let b = board.create(&WidgetDescription::new(40, 40, 10, 10).with_z(0)).unwrap();
//! assert_eq!((b.z, board.find_by_id(&a.id).unwrap().z), (0, 1));
//!
//! let near_origin = board.list_in_area(&Area::new(-5, -5, 5, 5), 1, 10).unwrap();
//! assert_eq!(near_origin.len(), 1);
//! assert_eq!(near_origin[0].id, a.id);
//! ```
//!
//! Configuration picks the backing store and the paging limits:
//!
//! ```rust
//! use stackboard::{Config, StorageKind, WidgetManager};
//!
//! let config = Config {
//!     storage: StorageKind::Table,
//!     ..Config::default()
//! };
//! let board = WidgetManager::from_config(&config);
//! let page = config.paging.resolve(Some(0), Some(10_000));
//! assert_eq!((page.page, page.per_page), (1, 500));
//! assert!(board.list_paged_request(page).unwrap().is_empty());
//! ```

mod area;
mod config;
mod description;
mod error;
mod manager;

pub use area::{Area, Bounds, fits};
pub use config::{Config, ConfigError, PageRequest, PagingConfig, StorageKind};
pub use description::WidgetDescription;
pub use error::{Error, Result};
pub use manager::WidgetManager;

pub use stackboard_store::{InMemoryStore, StoreError, Widget, WidgetId, WidgetStore};
