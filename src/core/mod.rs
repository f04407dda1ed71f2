//! Core business logic module
//!
//! - `ledger` - the account collection, transfers, and administrative
//!   operations
//! - `validation` - input-format predicates for the presentation layer

pub mod ledger;
pub mod validation;

pub use ledger::Ledger;
