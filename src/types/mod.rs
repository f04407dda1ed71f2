//! Types module
//!
//! Contains the core data structures used throughout the application:
//! - `account`: the account entity, its rule enums, and the snapshot record
//! - `error`: the domain error taxonomy

pub mod account;
pub mod error;

pub use account::{
    Account, AccountRecord, AccountStatus, AccountType, HolderProfile, OpenAccount,
};
pub use error::BankError;
