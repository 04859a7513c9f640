use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use super::store::{Store, StoreError};

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

const HELP: &str = "\
Available commands:
addnewprof <username> <password> - Add a new user.
removeprof <username> <password> - Remove an existing user.
addcash <amount> <category> <username> <password> - Add income for a user.
addexpense <amount> <category> <username> <password> - Add expense for a user. Cannot exceed available funds.
marga <username> <password> - Show total balance for a user.
info <username> <password> - Show all income and expenses for a user.
save <username> <password> - Save all user data to a file.
help - Show this help message.";

/// Failures the dispatcher settles on its own, without touching the store.
/// The display strings are the protocol messages.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Amount must be a number.")]
    AmountNotANumber,

    #[error("Amount must be a positive number.")]
    AmountNotPositive,

    #[error("Unknown command. Type 'help' for a list of commands.")]
    UnknownCommand,
}

type CommandResult<T> = Result<T, CommandError>;

/// One parsed command line, ready to run against a [`Store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddProfile {
        username: String,
        password: String,
    },
    RemoveProfile {
        username: String,
        password: String,
    },
    AddCash {
        amount: Decimal,
        category: String,
        username: String,
        password: String,
    },
    AddExpense {
        amount: Decimal,
        category: String,
        username: String,
        password: String,
    },
    Balance {
        username: String,
        password: String,
    },
    Info {
        username: String,
        password: String,
    },
    Save {
        username: String,
        password: String,
    },
    Help,
}

impl Command {
    /// Tokenizes on whitespace; the verb is case-insensitive, everything
    /// else is taken verbatim. Arity is checked before any field is parsed,
    /// and a bad amount before its sign. Extra trailing tokens are ignored.
    pub fn parse(line: &str) -> CommandResult<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let verb = parts.first().map(|v| v.to_lowercase()).unwrap_or_default();

        match verb.as_str() {
            "addnewprof" => {
                let (username, password) = credentials(&parts, "addnewprof <username> <password>")?;
                Ok(Self::AddProfile { username, password })
            }
            "removeprof" => {
                let (username, password) = credentials(&parts, "removeprof <username> <password>")?;
                Ok(Self::RemoveProfile { username, password })
            }
            "addcash" => {
                let (amount, category, username, password) =
                    ledger_entry(&parts, "addcash <amount> <category> <username> <password>")?;
                Ok(Self::AddCash {
                    amount,
                    category,
                    username,
                    password,
                })
            }
            "addexpense" => {
                let (amount, category, username, password) =
                    ledger_entry(&parts, "addexpense <amount> <category> <username> <password>")?;
                Ok(Self::AddExpense {
                    amount,
                    category,
                    username,
                    password,
                })
            }
            "marga" => {
                let (username, password) = credentials(&parts, "marga <username> <password>")?;
                Ok(Self::Balance { username, password })
            }
            "info" => {
                let (username, password) = credentials(&parts, "info <username> <password>")?;
                Ok(Self::Info { username, password })
            }
            "save" => {
                let (username, password) = credentials(&parts, "save <username> <password>")?;
                Ok(Self::Save { username, password })
            }
            "help" => Ok(Self::Help),
            _ => Err(CommandError::UnknownCommand),
        }
    }

    /// Runs the command and renders the one protocol message for its
    /// outcome. Store failures never escape; they become messages here.
    pub fn run(self, store: &mut Store) -> String {
        match self {
            Self::AddProfile { username, password } => {
                match store.add_account(&username, &password, &[], &[]) {
                    Ok(()) => "User added successfully.".to_owned(),
                    Err(_) => "User already exists.".to_owned(),
                }
            }
            Self::RemoveProfile { username, password } => {
                match store.remove_account(&username, &password) {
                    Ok(()) => "User removed successfully.".to_owned(),
                    Err(_) => INVALID_CREDENTIALS.to_owned(),
                }
            }
            Self::AddCash {
                amount,
                category,
                username,
                password,
            } => match store.add_income(&username, &password, amount, &category) {
                Ok(()) => "Income added successfully.".to_owned(),
                Err(_) => INVALID_CREDENTIALS.to_owned(),
            },
            Self::AddExpense {
                amount,
                category,
                username,
                password,
            } => {
                // Authorization is settled by the balance lookup itself, so
                // a ghost user gets the credentials message before any
                // numeric comparison can happen.
                let balance = match store.balance(&username, &password) {
                    Ok(balance) => balance,
                    Err(_) => return INVALID_CREDENTIALS.to_owned(),
                };
                if balance - amount < Decimal::ZERO {
                    return "Insufficient funds. Expense cannot be added.".to_owned();
                }
                match store.add_expense(&username, &password, amount, &category) {
                    Ok(()) => "Expense added successfully.".to_owned(),
                    Err(_) => INVALID_CREDENTIALS.to_owned(),
                }
            }
            Self::Balance { username, password } => match store.balance(&username, &password) {
                Ok(balance) => format!("Total balance for {username}: {balance}"),
                Err(_) => INVALID_CREDENTIALS.to_owned(),
            },
            Self::Info { username, password } => {
                let income = match store.income(&username, &password) {
                    Ok(income) => income,
                    Err(_) => return INVALID_CREDENTIALS.to_owned(),
                };
                let expenses = match store.expenses(&username, &password) {
                    Ok(expenses) => expenses,
                    Err(_) => return INVALID_CREDENTIALS.to_owned(),
                };

                let mut out = String::from("Income:");
                for (category, amount) in &income {
                    out.push_str(&format!("\n{category}: {amount}"));
                }
                out.push_str("\nExpenses:");
                for (category, amount) in &expenses {
                    out.push_str(&format!("\n{category}: {amount}"));
                }
                out
            }
            Self::Save { username, password } => {
                let path = PathBuf::from(format!("{username}_data.txt"));
                match store.export_to_file(&username, &password, &path) {
                    Ok(()) => format!("Data saved successfully to {}", path.display()),
                    Err(error) => {
                        if matches!(error, StoreError::Io(_)) {
                            warn!("export for {username} failed: {error}");
                        }
                        // One generic message for both causes; the log line
                        // above keeps I/O failures distinguishable.
                        "Invalid username or password, or error saving data.".to_owned()
                    }
                }
            }
            Self::Help => HELP.to_owned(),
        }
    }
}

/// Parses one line and renders the outcome, never failing outward.
pub fn dispatch(line: &str, store: &mut Store) -> String {
    match Command::parse(line) {
        Ok(command) => command.run(store),
        Err(error) => error.to_string(),
    }
}

fn credentials(parts: &[&str], usage: &'static str) -> CommandResult<(String, String)> {
    match parts {
        [_, username, password, ..] => Ok(((*username).to_owned(), (*password).to_owned())),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn ledger_entry(
    parts: &[&str],
    usage: &'static str,
) -> CommandResult<(Decimal, String, String, String)> {
    let [_, amount, category, username, password, ..] = parts else {
        return Err(CommandError::Usage(usage));
    };

    let amount = Decimal::from_str(amount).map_err(|_| CommandError::AmountNotANumber)?;
    if amount <= Decimal::ZERO {
        return Err(CommandError::AmountNotPositive);
    }

    Ok((
        amount,
        (*category).to_owned(),
        (*username).to_owned(),
        (*password).to_owned(),
    ))
}
