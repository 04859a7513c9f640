mod account;
mod command;
mod store;

pub use self::{
    account::Account,
    command::{dispatch, Command, CommandError},
    store::{Store, StoreError, StoreResult},
};
