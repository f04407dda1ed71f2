//! Teller Library
//! # Overview
//!
//! This library implements a small retail bank for a single branch:
//! customers open accounts, authenticate with a PIN, and perform deposits,
//! withdrawals, transfers, and balance/history queries; administrators
//! manage the account lifecycle. State persists between runs in a
//! whole-file JSON snapshot.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, its rule enums, the error taxonomy)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - the account collection, transfers, and
//!     administrative operations
//!   - [`core::validation`] - input-format predicates for the presentation
//!     layer
//! - [`store`] - Persistence:
//!   - [`store::snapshot`] - the whole-file account snapshot with atomic
//!     replace and an exclusive store lock
//!   - [`store::admin`] - the separate administrator document
//! - [`cli`] - Argument parsing and the request/response command handlers
//!
//! # Transaction Rules
//!
//! Every account enforces its own rules: only `Active` accounts transact;
//! each account type carries a per-transaction ceiling (Savings 50,000;
//! Current 1,000,000; term products none at all); Savings accounts keep a
//! minimum balance of 1,000; Fixed Deposit accounts accept no deposits
//! after opening and can neither withdraw nor transfer. Transfers validate
//! every precondition on both accounts before mutating either side, so
//! funds are conserved exactly.
//!
//! # Concurrency Model
//!
//! Single-threaded, single-process, synchronous throughout. The snapshot is
//! shared only across separate invocations; an exclusive advisory file lock
//! around each load→mutate→save cycle guards against accidental concurrent
//! launches. Writers that bypass the lock race as last-writer-wins, an
//! accepted limitation of the whole-file design.

// Module declarations
pub mod cli;
pub mod core;
pub mod store;
pub mod types;

pub use crate::core::{validation, Ledger};
pub use crate::store::{Admin, AdminRole, AdminStore, LedgerStore, StoreGuard};
pub use crate::types::{
    Account, AccountRecord, AccountStatus, AccountType, BankError, HolderProfile, OpenAccount,
};
