//! ABC Bank account ledger
//!
//! Append-only transaction ledger behind a bank-level account registry.
//!
//! # Architecture
//!
//! - **Log is authoritative**: an account's balance is always the last
//!   record of its durable transaction log; replay rebuilds full state
//! - **Append-only**: transaction records are never modified or deleted
//! - **Advisory directory**: the account-metadata snapshot caches balances
//!   for inspection but is reconciled against the logs at load time
//!
//! # Invariants
//!
//! - `balance == history.last().balance_after` whenever history is non-empty
//! - Balance never negative
//! - `balance` and `history` mutate only in lockstep, through
//!   [`Account::deposit`] and [`Account::withdraw`]

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod account;
pub mod bank;
pub mod config;
pub mod directory;
pub mod error;
pub mod log;
pub mod types;

// Re-exports
pub use account::Account;
pub use bank::Bank;
pub use config::Config;
pub use directory::{Directory, DirectoryRow};
pub use error::{Error, Result};
pub use log::TransactionLog;
pub use types::{Contact, Statement, TransactionKind, TransactionRecord};
