//! # CSV Repositories
//!
//! Flat-file persistence, one repository per actor. Each actor is the only writer of its
//! files, so a write simply rewrites the whole file (header row first) from the rows read back
//! plus the change. A missing file reads as empty.
//!
//! | Repository | Files |
//! |---|---|
//! | [`InventoryRepository`] | `inventory.csv` |
//! | [`AccountRepository`] | `users.csv` |
//! | [`OrderRepository`] | `orders.csv`, `order_items.csv`, `order_discounts.csv` |

mod accounts;
mod inventory;
mod orders;

pub use accounts::AccountRepository;
pub use inventory::InventoryRepository;
pub use orders::OrderRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Directory holding the store's CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

pub(crate) fn read_rows<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, RepositoryError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<R>, _>>()?;
    debug!(path = %path.display(), rows = rows.len(), "Loaded CSV");
    Ok(rows)
}

/// Writes to a sibling temp file and renames it over `path`, so readers never see half a file.
pub(crate) fn write_rows<R: Serialize>(path: &Path, rows: &[R]) -> Result<(), RepositoryError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = csv::Writer::from_path(&tmp)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote CSV");
    Ok(())
}
