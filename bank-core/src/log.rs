//! Durable append-only transaction log, one file per account
//!
//! # Format
//!
//! `<data_dir>/transactions/<account_number>.csv`, header row
//! `Timestamp,Type,Amount,Balance`, timestamps as `YYYY-MM-DD HH:MM:SS`.
//! The format is fixed for compatibility with existing data.
//!
//! Replaying the log in file order rebuilds an account's full history; the
//! balance is always the last record's `Balance`, so no separate balance
//! persistence is needed.

use crate::{
    error::Result,
    types::TransactionRecord,
};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Subdirectory of the data dir holding per-account logs
const TX_DIR: &str = "transactions";

/// Append-only record store for one account's monetary events
///
/// Holds only the log path; the file is opened and closed within each
/// `append`/`load` call, never across operations.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    /// Log handle for the given account under `data_dir`
    pub fn new(data_dir: &Path, account_number: &str) -> Self {
        Self {
            path: data_dir.join(TX_DIR).join(format!("{account_number}.csv")),
        }
    }

    /// Whether a durable log exists for this account
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one record to the durable log
    ///
    /// Creates the backing directory and file (with header row) if missing.
    /// The write is flushed and fsynced before returning: once this returns
    /// `Ok`, the record is visible to every subsequent [`load`](Self::load).
    pub fn append(&self, record: &TransactionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let write_header = !self.path.exists();
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(write_header)
                .from_writer(&mut file);
            writer.serialize(record)?;
            writer.flush()?;
        }
        file.sync_all()?;

        tracing::debug!(
            path = %self.path.display(),
            kind = %record.kind,
            amount = %record.amount,
            balance = %record.balance_after,
            "Transaction appended"
        );

        Ok(())
    }

    /// Replay the full log in original append order
    ///
    /// A missing log yields an empty history. A row that cannot be parsed
    /// (malformed timestamp, kind, or number) fails the whole replay with
    /// [`Error::Format`](crate::Error::Format) rather than being skipped;
    /// silently dropping records would corrupt the balance invariant.
    pub fn load(&self) -> Result<Vec<TransactionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: TransactionRecord = row?;
            records.push(record);
        }

        tracing::debug!(
            path = %self.path.display(),
            records = records.len(),
            "Transaction log replayed"
        );

        Ok(records)
    }
}
