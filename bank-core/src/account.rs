//! Account state and the deposit/withdraw invariants
//!
//! An account's balance and its in-memory history move in lockstep: both
//! mutate only inside [`Account::deposit`] and [`Account::withdraw`], and
//! the durable append happens before either is touched, so a failed write
//! leaves the account exactly as it was.

use crate::{
    error::{Error, Result},
    log::TransactionLog,
    types::{Contact, Statement, TransactionKind, TransactionRecord},
};
use rust_decimal::Decimal;
use std::path::Path;

/// A named account with a running balance and append-only history
///
/// Invariants: `balance == history.last().balance_after` whenever the
/// history is non-empty, and the balance is never negative.
#[derive(Debug)]
pub struct Account {
    account_number: String,
    name: String,
    contact: Contact,
    balance: Decimal,
    history: Vec<TransactionRecord>,
    log: TransactionLog,
}

impl Account {
    /// Open an account, replaying its durable log if one exists
    ///
    /// When a log is present the balance comes from its last record and
    /// `initial_balance` is ignored. Otherwise a positive `initial_balance`
    /// synthesizes a single `INITIAL_DEPOSIT` record; zero leaves the
    /// history empty.
    pub(crate) fn open(
        data_dir: &Path,
        account_number: String,
        name: String,
        contact: Contact,
        initial_balance: Decimal,
    ) -> Result<Self> {
        let log = TransactionLog::new(data_dir, &account_number);
        let history = log.load()?;

        let mut account = Self {
            account_number,
            name,
            contact,
            balance: Decimal::ZERO,
            history,
            log,
        };

        if let Some(last) = account.history.last() {
            account.balance = last.balance_after;
        } else if initial_balance > Decimal::ZERO {
            let record = TransactionRecord::new(
                TransactionKind::InitialDeposit,
                initial_balance,
                initial_balance,
            );
            account.log.append(&record)?;
            account.balance = initial_balance;
            account.history.push(record);
        }

        Ok(account)
    }

    /// Add funds to the account
    ///
    /// Fails with [`Error::Validation`] unless `amount > 0`. On success the
    /// record is durably appended and the new balance is returned.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(format!(
                "deposit amount must be positive, got {amount}"
            )));
        }

        let new_balance = self.balance + amount;
        let record = TransactionRecord::new(TransactionKind::Deposit, amount, new_balance);
        self.log.append(&record)?;

        self.balance = new_balance;
        self.history.push(record);

        tracing::info!(
            account = %self.account_number,
            amount = %amount,
            balance = %self.balance,
            "Deposit recorded"
        );

        Ok(self.balance)
    }

    /// Remove funds from the account
    ///
    /// Fails with [`Error::Validation`] unless `amount > 0`, and with
    /// [`Error::InsufficientFunds`] when `amount` exceeds the balance; the
    /// balance is untouched in both cases. The logged record carries the
    /// negated amount (signed balance delta).
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(format!(
                "withdrawal amount must be positive, got {amount}"
            )));
        }
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        let new_balance = self.balance - amount;
        let record = TransactionRecord::new(TransactionKind::Withdrawal, -amount, new_balance);
        self.log.append(&record)?;

        self.balance = new_balance;
        self.history.push(record);

        tracing::info!(
            account = %self.account_number,
            amount = %amount,
            balance = %self.balance,
            "Withdrawal recorded"
        );

        Ok(self.balance)
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Account number (unique key)
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// Account holder name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact details
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Full transaction history in append order
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Read-only view for statement rendering
    pub fn statement(&self) -> Statement<'_> {
        Statement {
            account_number: &self.account_number,
            name: &self.name,
            phone: &self.contact.phone,
            history: &self.history,
            balance: self.balance,
        }
    }
}
