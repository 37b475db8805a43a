//! Bank orchestration layer
//!
//! Owns the collection of accounts keyed by account number, validates
//! creation inputs, and persists the account directory snapshot after every
//! structural or balance-affecting change. The per-account transaction log
//! stays authoritative for balances; the directory's balance column is an
//! advisory cache reconciled at load time.
//!
//! # Example
//!
//! ```no_run
//! use bank_core::{Bank, Config, Contact};
//! use rust_decimal::Decimal;
//!
//! fn main() -> bank_core::Result<()> {
//!     let config = Config::default();
//!     let mut bank = Bank::open(&config)?;
//!
//!     let contact = Contact::new("asha@example.com", "9876543210");
//!     bank.create_account("ACC001", "Asha Rao", contact, Decimal::new(10000, 2))?;
//!     bank.deposit("ACC001", Decimal::new(5000, 2))?;
//!
//!     Ok(())
//! }
//! ```

use crate::{
    account::Account,
    config::Config,
    directory::{Directory, DirectoryRow},
    error::{Error, Result},
    types::Contact,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::PathBuf;

/// The bank-level registry of accounts
#[derive(Debug)]
pub struct Bank {
    /// Accounts keyed by account number; every key equals the contained
    /// account's number
    accounts: HashMap<String, Account>,

    /// Account numbers in insertion order, for stable listing
    order: Vec<String>,

    /// Persisted directory snapshot
    directory: Directory,

    /// Root of the persisted state
    data_dir: PathBuf,
}

impl Bank {
    /// Open the bank, reconstructing every account from persisted state
    ///
    /// Each directory row is replayed through its own transaction log; the
    /// log-derived balance wins over the snapshot's stored balance, which
    /// can be stale if a prior process stopped between a log append and the
    /// directory save.
    pub fn open(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let mut bank = Self {
            accounts: HashMap::new(),
            order: Vec::new(),
            directory: Directory::new(&config.data_dir),
            data_dir: config.data_dir.clone(),
        };

        for row in bank.directory.load()? {
            let contact = Contact::new(row.email, row.phone);
            let account = Account::open(
                &bank.data_dir,
                row.account_number.clone(),
                row.name,
                contact,
                row.balance,
            )?;

            if account.balance() != row.balance {
                tracing::warn!(
                    account = %row.account_number,
                    directory_balance = %row.balance,
                    log_balance = %account.balance(),
                    "Stale directory balance reconciled from transaction log"
                );
            }

            bank.order.push(row.account_number.clone());
            bank.accounts.insert(row.account_number, account);
        }

        tracing::info!(
            data_dir = %bank.data_dir.display(),
            accounts = bank.accounts.len(),
            "Bank opened"
        );

        Ok(bank)
    }

    /// True iff `s` is 5-10 ASCII-alphanumeric characters
    pub fn validate_account_number(s: &str) -> bool {
        (5..=10).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
    }

    /// True iff the phone number is exactly 10 ASCII digits
    ///
    /// The email address is accepted opaquely.
    pub fn validate_contact(contact: &Contact) -> bool {
        contact.phone.len() == 10 && contact.phone.chars().all(|c| c.is_ascii_digit())
    }

    /// Create a new account and persist the directory snapshot
    ///
    /// A positive `initial_deposit` becomes the account's `INITIAL_DEPOSIT`
    /// record.
    pub fn create_account(
        &mut self,
        account_number: &str,
        name: &str,
        contact: Contact,
        initial_deposit: Decimal,
    ) -> Result<&Account> {
        if !Self::validate_account_number(account_number) {
            return Err(Error::Validation(format!(
                "account number must be 5-10 alphanumeric characters, got {account_number:?}"
            )));
        }
        if self.accounts.contains_key(account_number) {
            return Err(Error::DuplicateAccount(account_number.to_string()));
        }
        if name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".to_string()));
        }
        if !Self::validate_contact(&contact) {
            return Err(Error::Validation(format!(
                "phone number must be exactly 10 digits, got {:?}",
                contact.phone
            )));
        }
        if initial_deposit < Decimal::ZERO {
            return Err(Error::Validation(format!(
                "initial deposit must not be negative, got {initial_deposit}"
            )));
        }

        let account = Account::open(
            &self.data_dir,
            account_number.to_string(),
            name.to_string(),
            contact,
            initial_deposit,
        )?;

        self.order.push(account_number.to_string());
        self.accounts.insert(account_number.to_string(), account);
        self.save_directory()?;

        tracing::info!(account = %account_number, "Account created");

        self.get_account(account_number)
    }

    /// Look up an account; never constructs implicitly
    pub fn get_account(&self, account_number: &str) -> Result<&Account> {
        self.accounts
            .get(account_number)
            .ok_or_else(|| Error::AccountNotFound(account_number.to_string()))
    }

    /// Mutable account lookup for deposit/withdraw by the caller
    pub fn get_account_mut(&mut self, account_number: &str) -> Result<&mut Account> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| Error::AccountNotFound(account_number.to_string()))
    }

    /// Deposit into an account and persist the directory snapshot
    pub fn deposit(&mut self, account_number: &str, amount: Decimal) -> Result<Decimal> {
        let balance = self.get_account_mut(account_number)?.deposit(amount)?;
        self.save_directory()?;
        Ok(balance)
    }

    /// Withdraw from an account and persist the directory snapshot
    pub fn withdraw(&mut self, account_number: &str, amount: Decimal) -> Result<Decimal> {
        let balance = self.get_account_mut(account_number)?.withdraw(amount)?;
        self.save_directory()?;
        Ok(balance)
    }

    /// All accounts in insertion order
    pub fn list_accounts(&self) -> impl Iterator<Item = &Account> {
        self.order.iter().filter_map(|number| self.accounts.get(number))
    }

    /// Number of registered accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the bank holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Rewrite the directory snapshot for every account
    pub fn save_directory(&self) -> Result<()> {
        let rows: Vec<DirectoryRow> = self
            .list_accounts()
            .map(|account| DirectoryRow {
                account_number: account.account_number().to_string(),
                name: account.name().to_string(),
                email: account.contact().email.clone(),
                phone: account.contact().phone.clone(),
                balance: account.balance(),
            })
            .collect();

        self.directory.save(&rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use tempfile::TempDir;

    fn test_config() -> (Config, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
        };
        (config, temp_dir)
    }

    fn contact() -> Contact {
        Contact::new("asha@example.com", "9876543210")
    }

    #[test]
    fn test_validate_account_number() {
        assert!(Bank::validate_account_number("ACC001"));
        assert!(Bank::validate_account_number("ab123"));
        assert!(Bank::validate_account_number("abcdef1234"));

        assert!(!Bank::validate_account_number("ab")); // too short
        assert!(!Bank::validate_account_number("abcdef12345")); // too long
        assert!(!Bank::validate_account_number("ab!12")); // non-alphanumeric
        assert!(!Bank::validate_account_number(""));
    }

    #[test]
    fn test_validate_contact() {
        assert!(Bank::validate_contact(&contact()));
        assert!(!Bank::validate_contact(&Contact::new("a@b.c", "12345")));
        assert!(!Bank::validate_contact(&Contact::new("a@b.c", "12345678901")));
        assert!(!Bank::validate_contact(&Contact::new("a@b.c", "98765o3210")));
    }

    #[test]
    fn test_create_account_rejections() {
        let (config, _temp) = test_config();
        let mut bank = Bank::open(&config).unwrap();

        let cases: Vec<(&str, &str, Contact, Decimal)> = vec![
            ("ab", "Asha Rao", contact(), Decimal::ZERO),
            ("abcdef12345", "Asha Rao", contact(), Decimal::ZERO),
            ("ab!12", "Asha Rao", contact(), Decimal::ZERO),
            ("ACC001", "   ", contact(), Decimal::ZERO),
            ("ACC001", "Asha Rao", Contact::new("a@b.c", "12345"), Decimal::ZERO),
            ("ACC001", "Asha Rao", contact(), Decimal::new(-100, 2)),
        ];

        for (number, name, contact, deposit) in cases {
            let err = bank.create_account(number, name, contact, deposit).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "case {number:?}: {err:?}");
        }
        assert!(bank.is_empty());
    }

    #[test]
    fn test_create_account_rejects_duplicate() {
        let (config, _temp) = test_config();
        let mut bank = Bank::open(&config).unwrap();

        bank.create_account("ACC001", "Asha Rao", contact(), Decimal::ZERO)
            .unwrap();
        let err = bank
            .create_account("ACC001", "Birju Shah", contact(), Decimal::ZERO)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateAccount(_)), "got {err:?}");
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_get_account_never_constructs() {
        let (config, _temp) = test_config();
        let mut bank = Bank::open(&config).unwrap();

        let err = bank.get_account("NOSUCH1").unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(_)), "got {err:?}");
        let err = bank.get_account_mut("NOSUCH1").unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(_)), "got {err:?}");
        assert!(bank.is_empty());
    }

    #[test]
    fn test_full_scenario() {
        // create ACC001 with 100.00 -> deposit 50.00 -> overdraw 200.00
        // fails -> withdraw 150.00 to zero
        let (config, _temp) = test_config();
        let mut bank = Bank::open(&config).unwrap();

        bank.create_account("ACC001", "Asha Rao", contact(), Decimal::new(10000, 2))
            .unwrap();
        let account = bank.get_account("ACC001").unwrap();
        assert_eq!(account.balance(), Decimal::new(10000, 2));
        assert_eq!(account.history().len(), 1);
        assert_eq!(account.history()[0].kind, TransactionKind::InitialDeposit);

        let balance = bank.deposit("ACC001", Decimal::new(5000, 2)).unwrap();
        assert_eq!(balance, Decimal::new(15000, 2));

        let err = bank.withdraw("ACC001", Decimal::new(20000, 2)).unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }), "got {err:?}");
        assert_eq!(
            bank.get_account("ACC001").unwrap().balance(),
            Decimal::new(15000, 2)
        );

        let balance = bank.withdraw("ACC001", Decimal::new(15000, 2)).unwrap();
        assert_eq!(balance, Decimal::ZERO);

        let account = bank.get_account("ACC001").unwrap();
        let history = account.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].amount, Decimal::new(5000, 2));
        assert_eq!(history[1].balance_after, Decimal::new(15000, 2));
        assert_eq!(history[2].amount, Decimal::new(-15000, 2));
        assert_eq!(history[2].balance_after, Decimal::ZERO);
    }

    #[test]
    fn test_reload_reproduces_state() {
        let (config, _temp) = test_config();
        {
            let mut bank = Bank::open(&config).unwrap();
            bank.create_account("ACC001", "Asha Rao", contact(), Decimal::new(10000, 2))
                .unwrap();
            bank.deposit("ACC001", Decimal::new(5000, 2)).unwrap();
            bank.withdraw("ACC001", Decimal::new(15000, 2)).unwrap();
        }

        let bank = Bank::open(&config).unwrap();
        let account = bank.get_account("ACC001").unwrap();
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.history().len(), 3);
        assert_eq!(account.name(), "Asha Rao");
        assert_eq!(account.contact().phone, "9876543210");
    }

    #[test]
    fn test_list_accounts_keeps_insertion_order() {
        let (config, _temp) = test_config();
        let mut bank = Bank::open(&config).unwrap();

        for number in ["ZZ999", "AA111", "MM555"] {
            bank.create_account(number, "Asha Rao", contact(), Decimal::ZERO)
                .unwrap();
        }

        let listed: Vec<&str> = bank.list_accounts().map(Account::account_number).collect();
        assert_eq!(listed, vec!["ZZ999", "AA111", "MM555"]);

        // Order survives a reload: the directory is written in listing order
        drop(bank);
        let bank = Bank::open(&config).unwrap();
        let listed: Vec<&str> = bank.list_accounts().map(Account::account_number).collect();
        assert_eq!(listed, vec!["ZZ999", "AA111", "MM555"]);
    }

    #[test]
    fn test_stale_directory_balance_loses_to_log() {
        let (config, temp) = test_config();
        {
            let mut bank = Bank::open(&config).unwrap();
            bank.create_account("ACC001", "Asha Rao", contact(), Decimal::new(10000, 2))
                .unwrap();
            bank.deposit("ACC001", Decimal::new(5000, 2)).unwrap();
        }

        // Simulate a crash between log append and directory save by
        // rewriting the snapshot with an outdated balance.
        let directory_path = temp.path().join("accounts.csv");
        std::fs::write(
            &directory_path,
            "account_number,name,email,phone,balance\nACC001,Asha Rao,asha@example.com,9876543210,100.00\n",
        )
        .unwrap();

        let bank = Bank::open(&config).unwrap();
        assert_eq!(
            bank.get_account("ACC001").unwrap().balance(),
            Decimal::new(15000, 2)
        );
    }

    #[test]
    fn test_directory_row_without_log_synthesizes_initial_deposit() {
        // Legacy data: a directory row predating per-account logs
        let (config, temp) = test_config();
        std::fs::write(
            temp.path().join("accounts.csv"),
            "account_number,name,email,phone,balance\nACC001,Asha Rao,asha@example.com,9876543210,250.00\n",
        )
        .unwrap();

        let bank = Bank::open(&config).unwrap();
        let account = bank.get_account("ACC001").unwrap();
        assert_eq!(account.balance(), Decimal::new(25000, 2));
        assert_eq!(account.history().len(), 1);
        assert_eq!(account.history()[0].kind, TransactionKind::InitialDeposit);

        // The synthesized record is durable
        assert!(temp.path().join("transactions").join("ACC001.csv").exists());
    }

    #[test]
    fn test_corrupt_log_fails_open() {
        let (config, temp) = test_config();
        {
            let mut bank = Bank::open(&config).unwrap();
            bank.create_account("ACC001", "Asha Rao", contact(), Decimal::new(10000, 2))
                .unwrap();
        }

        let log_path = temp.path().join("transactions").join("ACC001.csv");
        let mut contents = std::fs::read_to_string(&log_path).unwrap();
        contents.push_str("garbage,row,here,zzz\n");
        std::fs::write(&log_path, contents).unwrap();

        let err = Bank::open(&config).unwrap_err();
        assert!(matches!(err, Error::Format(_)), "got {err:?}");
    }
}
