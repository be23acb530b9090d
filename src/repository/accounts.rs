use super::{read_rows, write_rows, DataDir, RepositoryError};
use crate::model::UserAccount;
use std::path::PathBuf;

/// `users.csv`: one row per account, keyed by username. Secrets are stored as PHC strings.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    path: PathBuf,
}

impl AccountRepository {
    pub fn new(dir: &DataDir) -> Self {
        Self {
            path: dir.file("users.csv"),
        }
    }

    pub fn load_all(&self) -> Result<Vec<UserAccount>, RepositoryError> {
        read_rows(&self.path)
    }

    pub fn upsert(&self, account: &UserAccount) -> Result<(), RepositoryError> {
        let mut rows: Vec<UserAccount> = self.load_all()?;
        match rows.iter_mut().find(|row| row.username == account.username) {
            Some(row) => *row = account.clone(),
            None => rows.push(account.clone()),
        }
        write_rows(&self.path, &rows)
    }

    pub fn remove(&self, username: &str) -> Result<bool, RepositoryError> {
        let mut rows: Vec<UserAccount> = self.load_all()?;
        let before = rows.len();
        rows.retain(|row| row.username != username);
        if rows.len() == before {
            return Ok(false);
        }
        write_rows(&self.path, &rows)?;
        Ok(true)
    }
}
