//! Interactive bank teller shell
//!
//! Thin collaborator over the core: collects input (re-prompting on
//! malformed numbers), renders statements and account listings, and maps
//! core errors to one-line messages. Business rules live in `bank_core`;
//! storage failures abort the shell.

use anyhow::Context;
use bank_core::{Account, Bank, Config, Contact, Error, Statement};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    // Initialize tracing; keep the default quiet so log lines don't
    // interleave with the menu.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = Config::from_env();
    let mut bank = Bank::open(&config).context("failed to open bank state")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!("=== Welcome to ABC Bank ===");
        println!("1. Create Account");
        println!("2. Deposit Funds");
        println!("3. Withdraw Funds");
        println!("4. Account Statement");
        println!("5. Display All Accounts");
        println!("6. Exit");

        let choice = prompt(&mut input, "\nEnter your choice (1-6): ")?;
        match choice.as_str() {
            "1" => create_account(&mut input, &mut bank)?,
            "2" => deposit(&mut input, &mut bank)?,
            "3" => withdraw(&mut input, &mut bank)?,
            "4" => statement(&mut input, &bank)?,
            "5" => display_all_accounts(&bank),
            "6" => {
                println!("Thank you for using ABC Bank!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }

    Ok(())
}

fn create_account(input: &mut impl BufRead, bank: &mut Bank) -> anyhow::Result<()> {
    let number = prompt(input, "Enter account number (5-10 alphanumeric characters): ")?;
    let name = prompt(input, "Enter customer name: ")?;
    let email = prompt(input, "Enter email address: ")?;
    let phone = prompt(input, "Enter phone number (10 digits): ")?;
    let initial_deposit = prompt_amount(input, "Enter initial deposit amount: ")?;

    match bank.create_account(&number, &name, Contact::new(email, phone), initial_deposit) {
        Ok(_) => println!("Account created successfully."),
        Err(err) => report(err)?,
    }
    Ok(())
}

fn deposit(input: &mut impl BufRead, bank: &mut Bank) -> anyhow::Result<()> {
    let number = prompt(input, "Enter account number: ")?;
    let amount = prompt_amount(input, "Enter deposit amount: ")?;

    match bank.deposit(&number, amount) {
        Ok(balance) => println!("Rs {amount:.2} deposited successfully. Balance: Rs {balance:.2}"),
        Err(err) => report(err)?,
    }
    Ok(())
}

fn withdraw(input: &mut impl BufRead, bank: &mut Bank) -> anyhow::Result<()> {
    let number = prompt(input, "Enter account number: ")?;
    let amount = prompt_amount(input, "Enter withdrawal amount: ")?;

    match bank.withdraw(&number, amount) {
        Ok(balance) => println!("Rs {amount:.2} withdrawn successfully. Balance: Rs {balance:.2}"),
        Err(err) => report(err)?,
    }
    Ok(())
}

fn statement(input: &mut impl BufRead, bank: &Bank) -> anyhow::Result<()> {
    let number = prompt(input, "Enter account number: ")?;
    match bank.get_account(&number) {
        Ok(account) => render_statement(account.statement()),
        Err(err) => report(err)?,
    }
    Ok(())
}

fn render_statement(statement: Statement<'_>) {
    println!();
    println!("---- Account Statement ----");
    println!("Account Number: {}", statement.account_number);
    println!("Account Holder: {}", statement.name);
    println!("Phone: {}", statement.phone);
    println!();
    println!("---- Transaction History ----");
    println!(
        "{:<20} {:<16} {:>14} {:>14}",
        "Timestamp", "Type", "Amount", "Balance"
    );
    println!("{}", "-".repeat(68));
    for record in statement.history {
        let timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        println!(
            "{:<20} {:<16} {:>14} {:>14}",
            timestamp,
            record.kind.to_string(),
            format!("Rs {:.2}", record.amount),
            format!("Rs {:.2}", record.balance_after),
        );
    }
    println!("{}", "-".repeat(68));
    println!("Current Balance: Rs {:.2}", statement.balance);
}

fn display_all_accounts(bank: &Bank) {
    if bank.is_empty() {
        println!("No accounts in the bank.");
        return;
    }

    println!();
    println!("=== All Bank Accounts ===");
    for account in bank.list_accounts() {
        render_account_summary(account);
    }
}

fn render_account_summary(account: &Account) {
    println!();
    println!("Account Number: {}", account.account_number());
    println!("Account Holder: {}", account.name());
    println!("Email: {}", account.contact().email);
    println!("Phone: {}", account.contact().phone);
    println!("Balance: Rs {:.2}", account.balance());
    println!("{}", "-".repeat(30));
}

/// Print a business error and continue; storage corruption aborts the shell
fn report(err: Error) -> anyhow::Result<()> {
    match err {
        err @ (Error::Io(_) | Error::Format(_)) => Err(err.into()),
        err => {
            println!("{err}");
            Ok(())
        }
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line.trim().to_string())
}

/// Prompt until the line parses as a decimal amount
fn prompt_amount(input: &mut impl BufRead, label: &str) -> anyhow::Result<Decimal> {
    loop {
        let raw = prompt(input, label)?;
        match raw.parse::<Decimal>() {
            Ok(amount) => return Ok(amount),
            Err(_) => println!("Please enter a valid number."),
        }
    }
}
