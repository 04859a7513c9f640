use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use super::account::Account;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Unknown username and wrong password collapse into one variant so a
    /// caller cannot tell which check failed.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User {0} already exists")]
    UserAlreadyExists(String),

    #[error("Export failed: {0}")]
    Io(#[from] io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Owns every registered account and gates each operation behind a
/// credential check. Single-threaded by design; there is exactly one
/// logical actor, so no locking.
#[derive(Debug, Default)]
pub struct Store {
    accounts: BTreeMap<String, Account>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Demo registry used by the binary at startup. Not part of the command
    /// protocol; `Store::new` stays empty.
    pub fn with_demo_accounts() -> Self {
        let mut store = Self::new();
        store
            .add_account(
                "aaa",
                "1234",
                &[("salary", dec!(1000.0)), ("bonus", dec!(200.0))],
                &[("rent", dec!(500.0)), ("groceries", dec!(150.0))],
            )
            .expect("demo seeds use distinct usernames");
        store
            .add_account(
                "bbb",
                "4321",
                &[("freelance", dec!(1200.0))],
                &[("utilities", dec!(300.0)), ("transport", dec!(100.0))],
            )
            .expect("demo seeds use distinct usernames");
        store
    }

    fn authenticate(&self, username: &str, password: &str) -> StoreResult<&Account> {
        self.accounts
            .get(username)
            .filter(|account| account.password_matches(password))
            .ok_or(StoreError::InvalidCredentials)
    }

    fn authenticate_mut(&mut self, username: &str, password: &str) -> StoreResult<&mut Account> {
        self.accounts
            .get_mut(username)
            .filter(|account| account.password_matches(password))
            .ok_or(StoreError::InvalidCredentials)
    }

    /// Registers an account, folding the optional seed entries in through
    /// the same accumulation rule later mutations use.
    pub fn add_account(
        &mut self,
        username: &str,
        password: &str,
        initial_income: &[(&str, Decimal)],
        initial_expenses: &[(&str, Decimal)],
    ) -> StoreResult<()> {
        if self.accounts.contains_key(username) {
            return Err(StoreError::UserAlreadyExists(username.to_owned()));
        }

        let mut account = Account::new(username, password);
        for (category, amount) in initial_income {
            account.record_income(*amount, category);
        }
        for (category, amount) in initial_expenses {
            account.record_expense(*amount, category);
        }

        debug!("registered account {username}");
        self.accounts.insert(username.to_owned(), account);
        Ok(())
    }

    pub fn remove_account(&mut self, username: &str, password: &str) -> StoreResult<()> {
        self.authenticate(username, password)?;
        self.accounts.remove(username);
        debug!("removed account {username}");
        Ok(())
    }

    /// The sign of `amount` is not checked here; sign policy belongs to the
    /// dispatcher, which validates before calling in.
    pub fn add_income(
        &mut self,
        username: &str,
        password: &str,
        amount: Decimal,
        category: &str,
    ) -> StoreResult<()> {
        self.authenticate_mut(username, password)?
            .record_income(amount, category);
        debug!("{username}: income {amount} under {category}");
        Ok(())
    }

    /// No balance floor here either; the insufficient-funds rule is the
    /// dispatcher's pre-check, applied before this is invoked.
    pub fn add_expense(
        &mut self,
        username: &str,
        password: &str,
        amount: Decimal,
        category: &str,
    ) -> StoreResult<()> {
        self.authenticate_mut(username, password)?
            .record_expense(amount, category);
        debug!("{username}: expense {amount} under {category}");
        Ok(())
    }

    /// Total income minus total expenses. A credential failure is distinct
    /// from a legitimate zero balance.
    pub fn balance(&self, username: &str, password: &str) -> StoreResult<Decimal> {
        Ok(self.authenticate(username, password)?.balance())
    }

    /// Snapshot copy; mutating the returned map cannot touch stored state.
    pub fn income(&self, username: &str, password: &str) -> StoreResult<BTreeMap<String, Decimal>> {
        Ok(self.authenticate(username, password)?.income().clone())
    }

    pub fn expenses(
        &self,
        username: &str,
        password: &str,
    ) -> StoreResult<BTreeMap<String, Decimal>> {
        Ok(self.authenticate(username, password)?.expenses().clone())
    }

    /// Writes the textual report for one account, overwriting `path`. A
    /// write failure mid-stream surfaces as `StoreError::Io`; partial file
    /// content is acceptable, there is no atomic-write guarantee.
    pub fn export_to_file(&self, username: &str, password: &str, path: &Path) -> StoreResult<()> {
        let account = self.authenticate(username, password)?;

        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "User: {}", account.username())?;
        writeln!(out, "Income:")?;
        for (category, amount) in account.income() {
            writeln!(out, "{category}: {amount}")?;
        }
        writeln!(out, "Expenses:")?;
        for (category, amount) in account.expenses() {
            writeln!(out, "{category}: {amount}")?;
        }
        out.flush()?;
        Ok(())
    }
}
