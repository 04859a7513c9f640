//! An in-memory, single-user personal-finance ledger driven by line
//! commands: register profiles, record income and expenses by category,
//! query balances, and export a snapshot to a plain-text file.
//!
//! The [`Store`] owns every account and gates each operation behind a
//! credential check; [`dispatch`] turns one command line into one
//! user-facing message. The interactive read loop lives in the binary.

#[macro_use]
extern crate log;

mod features;

pub use features::{dispatch, Account, Command, CommandError, Store, StoreError, StoreResult};
