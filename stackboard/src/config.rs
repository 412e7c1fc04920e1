// Copyright 2025 the Stackboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-level configuration: store selection and paging limits.

use core::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stackboard_store::backends::{MemTable, TableStore};
use stackboard_store::{InMemoryStore, WidgetStore};
use thiserror::Error;
use tracing::info;

/// Which store backs the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    /// [`InMemoryStore`].
    #[default]
    #[serde(rename = "inmemory")]
    InMemory,
    /// [`TableStore`] over a [`MemTable`].
    #[serde(rename = "table")]
    Table,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inmemory" | "in-memory" | "memory" => Ok(Self::InMemory),
            "table" => Ok(Self::Table),
            _ => Err(ConfigError::Invalid {
                key: STORAGE_VAR,
                value: s.to_owned(),
            }),
        }
    }
}

/// Defaults and limits applied to page requests before they reach the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Page used when the caller gives none.
    pub default_page: usize,
    /// Page size used when the caller gives none.
    pub default_per_page: usize,
    /// Largest page size a caller may ask for.
    pub max_per_page: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_per_page: 10,
            max_per_page: 500,
        }
    }
}

/// A clamped, 1-based page request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Page number, at least 1.
    pub page: usize,
    /// Page size, between 1 and the configured maximum.
    pub per_page: usize,
}

impl PagingConfig {
    /// Turn raw caller input into a page request.
    ///
    /// Missing values take the defaults, `page` is floored at 1, and
    /// `per_page` is kept within `1..=max_per_page`.
    pub fn resolve(&self, page: Option<i64>, per_page: Option<i64>) -> PageRequest {
        let page = page
            .map_or(self.default_page, saturating_usize)
            .max(1);
        let max = self.max_per_page.max(1);
        let per_page = per_page
            .map_or(self.default_per_page, saturating_usize)
            .clamp(1, max);
        PageRequest { page, per_page }
    }
}

fn saturating_usize(v: i64) -> usize {
    usize::try_from(v.max(0)).unwrap_or(usize::MAX)
}

/// Board configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store selected at startup.
    pub storage: StorageKind,
    /// Paging defaults and limits.
    pub paging: PagingConfig,
}

/// A configuration value could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The value of `key` is malformed.
    #[error("invalid value {value:?} for {key}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

const STORAGE_VAR: &str = "STACKBOARD_STORAGE";
const DEFAULT_PER_PAGE_VAR: &str = "STACKBOARD_DEFAULT_PER_PAGE";
const MAX_PER_PAGE_VAR: &str = "STACKBOARD_MAX_PER_PAGE";

impl Config {
    /// Defaults overridden by `STACKBOARD_*` environment variables.
    ///
    /// - `STACKBOARD_STORAGE`: `inmemory` or `table`.
    /// - `STACKBOARD_DEFAULT_PER_PAGE`, `STACKBOARD_MAX_PER_PAGE`: positive integers.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each setting name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(STORAGE_VAR) {
            config.storage = value.parse()?;
        }
        if let Some(value) = lookup(DEFAULT_PER_PAGE_VAR) {
            config.paging.default_per_page = parse_positive(DEFAULT_PER_PAGE_VAR, &value)?;
        }
        if let Some(value) = lookup(MAX_PER_PAGE_VAR) {
            config.paging.max_per_page = parse_positive(MAX_PER_PAGE_VAR, &value)?;
        }
        Ok(config)
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Arc<dyn WidgetStore> {
        info!(storage = ?self.storage, "opening widget store");
        match self.storage {
            StorageKind::InMemory => Arc::new(InMemoryStore::new()),
            StorageKind::Table => Arc::new(TableStore::new(MemTable::new())),
        }
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_owned(),
        }),
    }
}
