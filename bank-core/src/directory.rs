//! Persisted account directory snapshot
//!
//! One row of metadata per account (`account_number,name,email,phone,balance`,
//! header row first) in `<data_dir>/accounts.csv`. The snapshot is
//! non-transactional: the `balance` column is an advisory cache, and the
//! per-account transaction log stays authoritative (see [`crate::Bank`]).

use crate::error::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Directory file name under the data dir
const DIRECTORY_FILE: &str = "accounts.csv";

/// Fixed header row, written even for an empty snapshot
const HEADER: [&str; 5] = ["account_number", "name", "email", "phone", "balance"];

/// One persisted directory row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryRow {
    /// Account number (unique key)
    pub account_number: String,
    /// Account holder name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Balance at snapshot time (advisory; the log is authoritative)
    pub balance: Decimal,
}

/// Handle on the directory snapshot file
///
/// Like [`crate::TransactionLog`], this holds only the path; the file is
/// opened and closed within each `load`/`save` call.
#[derive(Debug, Clone)]
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    /// Directory handle under `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DIRECTORY_FILE),
        }
    }

    /// Read the persisted snapshot, empty if none exists yet
    pub fn load(&self) -> Result<Vec<DirectoryRow>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let row: DirectoryRow = row?;
            rows.push(row);
        }

        Ok(rows)
    }

    /// Overwrite the snapshot with the given rows
    ///
    /// The new snapshot is written to a temp file and renamed into place,
    /// so a crash mid-save never leaves a torn directory behind.
    pub fn save(&self, rows: &[DirectoryRow]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        let mut file = File::create(&tmp_path)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut file);
            writer.write_record(HEADER)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            accounts = rows.len(),
            "Directory snapshot saved"
        );

        Ok(())
    }
}
