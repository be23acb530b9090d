use super::{read_rows, write_rows, DataDir, RepositoryError};
use crate::model::{Candy, CandyId};
use std::path::PathBuf;

/// `inventory.csv`: one row per candy, columns `id,name,kind,price,weight,quantity`.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    path: PathBuf,
}

impl InventoryRepository {
    pub fn new(dir: &DataDir) -> Self {
        Self {
            path: dir.file("inventory.csv"),
        }
    }

    pub fn load_all(&self) -> Result<Vec<Candy>, RepositoryError> {
        read_rows(&self.path)
    }

    pub fn upsert(&self, candy: &Candy) -> Result<(), RepositoryError> {
        let mut rows: Vec<Candy> = self.load_all()?;
        match rows.iter_mut().find(|row| row.id == candy.id) {
            Some(row) => *row = candy.clone(),
            None => rows.push(candy.clone()),
        }
        rows.sort_by_key(|row| row.id);
        write_rows(&self.path, &rows)
    }

    /// Returns whether a row was removed.
    pub fn remove(&self, id: CandyId) -> Result<bool, RepositoryError> {
        let mut rows: Vec<Candy> = self.load_all()?;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Ok(false);
        }
        write_rows(&self.path, &rows)?;
        Ok(true)
    }
}
