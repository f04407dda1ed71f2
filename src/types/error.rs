//! Error types for the teller engine
//!
//! This module defines every failure the domain and persistence layers can
//! report. All errors are returned synchronously as typed values; the
//! presentation layer is responsible for rendering them. Nothing in the core
//! prints or retries.
//!
//! # Error Categories
//!
//! - **Input errors**: malformed arguments to constructors and setters
//! - **Transaction errors**: status gates, type restrictions, balance rules
//! - **Store errors**: duplicate keys, missing accounts, unreadable snapshots
//! - **I/O errors**: file system failures while reading or writing a store

use crate::types::account::{AccountStatus, AccountType};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the teller engine
///
/// Each variant carries enough context to produce a useful message without
/// the caller needing to re-derive state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Malformed input to a constructor, setter, or validator
    ///
    /// Covers every format violation: bad PINs, bad account numbers,
    /// negative opening balances, unparseable descriptive fields.
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        /// The field that failed validation
        field: String,
        /// Human-readable description of the violation
        message: String,
    },

    /// The account's status forbids any balance mutation
    ///
    /// Only `Active` accounts accept deposits, withdrawals, or transfers
    /// (inbound or outbound).
    #[error("transaction denied for account {account}: status is {status}")]
    AccountNotActive {
        /// Account number of the refusing account
        account: String,
        /// The status that caused the refusal
        status: AccountStatus,
    },

    /// The account type forbids this operation outright
    ///
    /// Fixed Deposit accounts accept no deposits after opening, and neither
    /// Fixed nor Recurring Deposit accounts allow withdrawals or transfers.
    #[error("{account_type} accounts do not allow {operation}")]
    UnsupportedOperation {
        /// The restricted account type
        account_type: AccountType,
        /// The operation that was refused ("deposits", "withdrawals", ...)
        operation: String,
    },

    /// The amount is not a positive quantity
    #[error("invalid amount {amount}: must be greater than zero")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The account balance cannot cover the requested debit
    #[error("insufficient balance in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account number of the debited account
        account: String,
        /// Current balance
        balance: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// The amount exceeds the per-transaction ceiling for the account type
    ///
    /// A ceiling of zero means the type admits no transaction of this kind
    /// at any amount.
    #[error("{account_type} account transaction limit is {limit}, requested {requested}")]
    LimitExceeded {
        /// The account type whose ceiling applies
        account_type: AccountType,
        /// The per-transaction ceiling
        limit: Decimal,
        /// The rejected amount
        requested: Decimal,
    },

    /// The debit would leave the account below its minimum balance
    ///
    /// Savings accounts must retain at least the minimum after any
    /// withdrawal or outgoing transfer.
    #[error("account {account} requires a minimum balance of {minimum}; {would_remain} would remain")]
    MinimumBalanceViolation {
        /// Account number of the debited account
        account: String,
        /// The minimum the type requires
        minimum: Decimal,
        /// The balance the debit would leave behind
        would_remain: Decimal,
    },

    /// An account with this number already exists in the store
    #[error("account number {account} already exists")]
    DuplicateKey {
        /// The colliding account number
        account: String,
    },

    /// An administrator with this username already exists
    #[error("admin {username} already exists")]
    DuplicateAdmin {
        /// The colliding username
        username: String,
    },

    /// The snapshot on disk cannot be parsed as any known schema
    ///
    /// Fatal to the operation in progress. The snapshot itself is left
    /// untouched so it can be inspected or repaired.
    #[error("corrupt store at {path}: {message}")]
    CorruptStore {
        /// Path of the unreadable document
        path: String,
        /// Description of the parse failure
        message: String,
    },

    /// No account with this number exists in the store
    #[error("account {account} not found")]
    NotFound {
        /// The missing account number
        account: String,
    },

    /// File system failure while reading or writing a store
    ///
    /// Fatal to the operation in progress, but never corrupts the
    /// previously committed snapshot: writes go to a new file that replaces
    /// the snapshot only on success.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O failure
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

// Helper constructors for the variants built in more than one place.

impl BankError {
    /// Create an InvalidArgument error
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        BankError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Create an AccountNotActive error
    pub fn not_active(account: &str, status: AccountStatus) -> Self {
        BankError::AccountNotActive {
            account: account.to_string(),
            status,
        }
    }

    /// Create an UnsupportedOperation error
    pub fn unsupported(account_type: AccountType, operation: &str) -> Self {
        BankError::UnsupportedOperation {
            account_type,
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create a LimitExceeded error
    pub fn limit_exceeded(account_type: AccountType, limit: Decimal, requested: Decimal) -> Self {
        BankError::LimitExceeded {
            account_type,
            limit,
            requested,
        }
    }

    /// Create a MinimumBalanceViolation error
    pub fn minimum_balance(account: &str, minimum: Decimal, would_remain: Decimal) -> Self {
        BankError::MinimumBalanceViolation {
            account: account.to_string(),
            minimum,
            would_remain,
        }
    }

    /// Create a DuplicateKey error
    pub fn duplicate_key(account: &str) -> Self {
        BankError::DuplicateKey {
            account: account.to_string(),
        }
    }

    /// Create a DuplicateAdmin error
    pub fn duplicate_admin(username: &str) -> Self {
        BankError::DuplicateAdmin {
            username: username.to_string(),
        }
    }

    /// Create a CorruptStore error
    pub fn corrupt_store(path: &std::path::Path, message: impl Into<String>) -> Self {
        BankError::CorruptStore {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(account: &str) -> Self {
        BankError::NotFound {
            account: account.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::invalid_argument(
        BankError::invalid_argument("pin", "PIN must be exactly 4 digits"),
        "invalid pin: PIN must be exactly 4 digits"
    )]
    #[case::not_active(
        BankError::not_active("ACC1700000000000", AccountStatus::Frozen),
        "transaction denied for account ACC1700000000000: status is Frozen"
    )]
    #[case::unsupported(
        BankError::unsupported(AccountType::FixedDeposit, "withdrawals"),
        "Fixed Deposit accounts do not allow withdrawals"
    )]
    #[case::invalid_amount(
        BankError::invalid_amount(Decimal::ZERO),
        "invalid amount 0: must be greater than zero"
    )]
    #[case::insufficient_funds(
        BankError::insufficient_funds("100001", Decimal::from(500), Decimal::from(900)),
        "insufficient balance in account 100001: balance 500, requested 900"
    )]
    #[case::limit_exceeded(
        BankError::limit_exceeded(AccountType::Savings, Decimal::from(50_000), Decimal::from(60_000)),
        "Savings account transaction limit is 50000, requested 60000"
    )]
    #[case::minimum_balance(
        BankError::minimum_balance("100001", Decimal::from(1000), Decimal::from(500)),
        "account 100001 requires a minimum balance of 1000; 500 would remain"
    )]
    #[case::duplicate_key(
        BankError::duplicate_key("100001"),
        "account number 100001 already exists"
    )]
    #[case::duplicate_admin(
        BankError::duplicate_admin("root"),
        "admin root already exists"
    )]
    #[case::not_found(
        BankError::not_found("999999"),
        "account 999999 not found"
    )]
    fn error_display(#[case] error: BankError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: BankError = io_error.into();
        assert!(matches!(error, BankError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn corrupt_store_includes_path() {
        let error = BankError::corrupt_store(
            std::path::Path::new("accounts.json"),
            "expected a map of account records",
        );
        assert_eq!(
            error.to_string(),
            "corrupt store at accounts.json: expected a map of account records"
        );
    }
}
