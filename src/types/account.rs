//! Account entity and transaction rules
//!
//! This module defines the `Account` entity together with every rule that
//! governs legal mutation of a single account: the status gate, the
//! per-type transaction ceilings, the Savings minimum balance, and the
//! Fixed/Recurring Deposit restrictions. The account also maintains its own
//! append-only audit history.
//!
//! The PIN is private to this module. It leaves only through
//! [`Account::verify_pin`] and the explicit serialization boundary
//! ([`Account::to_record`] / [`Account::from_record`]) that the snapshot
//! store calls.

use crate::types::error::BankError;
use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account product types
///
/// Each type carries its own transaction ceiling and balance rules.
/// Fixed and Recurring Deposit accounts are restricted products: they hold
/// funds but refuse ordinary transactions before maturity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Ordinary savings account with a minimum balance and a modest ceiling
    Savings,

    /// Business current account with a high ceiling and no minimum balance
    Current,

    /// Term deposit: no deposits after opening, no withdrawals, no transfers
    #[serde(rename = "Fixed Deposit")]
    FixedDeposit,

    /// Scheduled deposit product: no withdrawals or transfers before maturity
    #[serde(rename = "Recurring Deposit")]
    RecurringDeposit,
}

impl AccountType {
    /// Per-transaction ceiling for deposits, withdrawals, and transfers
    ///
    /// A ceiling of zero means the type admits no transaction of any
    /// amount.
    pub fn transaction_limit(&self) -> Decimal {
        match self {
            AccountType::Savings => Decimal::from(50_000),
            AccountType::Current => Decimal::from(1_000_000),
            AccountType::FixedDeposit | AccountType::RecurringDeposit => Decimal::ZERO,
        }
    }

    /// Lowest balance a withdrawal or outgoing transfer may leave behind
    pub fn minimum_balance(&self) -> Decimal {
        match self {
            AccountType::Savings => Decimal::from(1_000),
            _ => Decimal::ZERO,
        }
    }

    /// Whether the type permits withdrawals at all
    pub fn allows_withdrawals(&self) -> bool {
        matches!(self, AccountType::Savings | AccountType::Current)
    }

    /// Whether the type permits outgoing transfers at all
    pub fn allows_transfers_out(&self) -> bool {
        matches!(self, AccountType::Savings | AccountType::Current)
    }

    /// Whether the type can receive transfers
    ///
    /// Fixed Deposit accounts cannot; Recurring Deposit accounts can.
    pub fn accepts_transfers_in(&self) -> bool {
        !matches!(self, AccountType::FixedDeposit)
    }

    /// User-facing rule descriptions for this account type
    ///
    /// A pure lookup with no side effects, rendered verbatim by the
    /// presentation layer.
    pub fn restrictions(&self) -> &'static [&'static str] {
        match self {
            AccountType::Savings => &[
                "✓ Deposits: Allowed",
                "✓ Withdrawals: Allowed",
                "✓ Transfers: Allowed",
                "⚠ Minimum balance: 1,000",
                "⚠ Max transaction: 50,000",
            ],
            AccountType::Current => &[
                "✓ Deposits: Allowed",
                "✓ Withdrawals: Allowed",
                "✓ Transfers: Allowed",
                "✓ No minimum balance",
                "⚠ Max transaction: 1,000,000",
            ],
            AccountType::FixedDeposit => &[
                "✗ No additional deposits",
                "✗ No withdrawals before maturity",
                "✗ No transfers allowed",
                "⚠ Locked until maturity date",
            ],
            AccountType::RecurringDeposit => &[
                "⚠ Fixed monthly deposits only",
                "✗ No withdrawals before maturity",
                "✗ No transfers allowed",
                "⚠ Locked until maturity date",
            ],
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
            AccountType::FixedDeposit => "Fixed Deposit",
            AccountType::RecurringDeposit => "Recurring Deposit",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "savings" => Ok(AccountType::Savings),
            "current" => Ok(AccountType::Current),
            "fixeddeposit" | "fixed" => Ok(AccountType::FixedDeposit),
            "recurringdeposit" | "recurring" => Ok(AccountType::RecurringDeposit),
            _ => Err(format!(
                "unknown account type '{}' (expected savings, current, fixed-deposit, or recurring-deposit)",
                s
            )),
        }
    }
}

/// Administrative account status
///
/// Only `Active` accounts transact. There are no automatic transitions:
/// every status change is an unconditional administrative operation, and any
/// status is reachable from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
    Closed,
    Frozen,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
            AccountStatus::Suspended => "Suspended",
            AccountStatus::Closed => "Closed",
            AccountStatus::Frozen => "Frozen",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            "suspended" => Ok(AccountStatus::Suspended),
            "closed" => Ok(AccountStatus::Closed),
            "frozen" => Ok(AccountStatus::Frozen),
            _ => Err(format!(
                "unknown status '{}' (expected active, inactive, suspended, closed, or frozen)",
                s
            )),
        }
    }
}

/// Descriptive holder details
///
/// Carried for display and record-keeping only; no transaction rule reads
/// these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderProfile {
    pub gender: String,
    pub date_of_birth: String,
    pub address: String,
    pub mobile: String,
    pub email: String,
    pub branch_code: String,
}

/// Parameters for opening a new account
#[derive(Debug, Clone)]
pub struct OpenAccount {
    pub account_number: String,
    pub holder: String,
    pub pin: String,
    pub account_type: AccountType,
    pub initial_balance: Decimal,
    pub opening_date: String,
    pub kyc_completed: bool,
    pub profile: HolderProfile,
}

/// A single customer account
///
/// The unit of ownership of funds. Balance, status, PIN, and history are
/// private: every mutation goes through an operation that enforces the
/// account's rules, so the invariants (non-negative balance, append-only
/// history, 4-digit PIN) hold for any sequence of calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account number (`ACC<millis>` token or legacy 6-digit form)
    pub account_number: String,

    /// Account holder's name
    pub holder: String,

    /// Product type; fixes the ceilings and restrictions that apply
    pub account_type: AccountType,

    /// Know-Your-Customer compliance flag, descriptive only
    pub kyc_completed: bool,

    /// Date the account was opened (`YYYY-MM-DD`)
    pub opening_date: String,

    /// Descriptive holder details
    pub profile: HolderProfile,

    status: AccountStatus,
    balance: Decimal,
    pin: String,
    history: Vec<String>,
}

impl Account {
    /// Open a new account
    ///
    /// Initializes the account as `Active` with an empty history.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the PIN is not exactly 4 digits or the
    /// opening balance is negative. Descriptive-field formats are the
    /// caller's concern (see [`crate::core::validation`]); the entity does
    /// not re-check them.
    pub fn open(request: OpenAccount) -> Result<Account, BankError> {
        if !pin_is_valid(&request.pin) {
            return Err(BankError::invalid_argument(
                "pin",
                "PIN must be exactly 4 digits",
            ));
        }
        if request.initial_balance < Decimal::ZERO {
            return Err(BankError::invalid_argument(
                "initial balance",
                "opening balance cannot be negative",
            ));
        }

        Ok(Account {
            account_number: request.account_number,
            holder: request.holder,
            account_type: request.account_type,
            kyc_completed: request.kyc_completed,
            opening_date: request.opening_date,
            profile: request.profile,
            status: AccountStatus::Active,
            balance: request.initial_balance,
            pin: request.pin,
            history: Vec::new(),
        })
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Current status
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Ordered, append-only audit trail
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Set the status unconditionally (administrative operation)
    pub fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }

    /// Check a PIN candidate without mutating or logging
    pub fn verify_pin(&self, candidate: &str) -> bool {
        self.pin == candidate
    }

    /// Replace the PIN (administrative override)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless the new PIN is exactly 4 digits.
    pub fn set_pin(&mut self, new_pin: &str) -> Result<(), BankError> {
        if !pin_is_valid(new_pin) {
            return Err(BankError::invalid_argument(
                "pin",
                "PIN must be exactly 4 digits",
            ));
        }
        self.pin = new_pin.to_string();
        Ok(())
    }

    /// Credit funds to the account
    ///
    /// On success the balance increases and a history entry records the
    /// action, amount, and resulting balance. On failure the account is
    /// left completely unchanged.
    ///
    /// # Errors
    ///
    /// - `AccountNotActive` if the status is not `Active`
    /// - `InvalidAmount` if the amount is not positive
    /// - `UnsupportedOperation` for Fixed Deposit accounts
    /// - `LimitExceeded` if the amount exceeds the type's ceiling (a zero
    ///   ceiling blocks the deposit entirely, as for Recurring Deposit)
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        self.check_active()?;
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }
        if self.account_type == AccountType::FixedDeposit {
            return Err(BankError::unsupported(self.account_type, "deposits"));
        }
        self.check_transaction_limit(amount)?;

        self.balance += amount;
        self.record(format!("Deposited: {}, Balance: {}", amount, self.balance));
        Ok(())
    }

    /// Debit funds from the account
    ///
    /// On success the balance decreases and a history entry is appended.
    /// On failure the account is left completely unchanged.
    ///
    /// # Errors
    ///
    /// - `AccountNotActive` if the status is not `Active`
    /// - `UnsupportedOperation` for Fixed and Recurring Deposit accounts
    /// - `InvalidAmount` if the amount is not positive
    /// - `InsufficientFunds` if the amount exceeds the balance
    /// - `LimitExceeded` if the amount exceeds the type's ceiling
    /// - `MinimumBalanceViolation` if a Savings account would drop below
    ///   its minimum balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        self.check_active()?;
        if !self.account_type.allows_withdrawals() {
            return Err(BankError::unsupported(self.account_type, "withdrawals"));
        }
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }
        if amount > self.balance {
            return Err(BankError::insufficient_funds(
                &self.account_number,
                self.balance,
                amount,
            ));
        }
        self.check_transaction_limit(amount)?;
        self.check_minimum_balance(amount)?;

        self.balance -= amount;
        self.record(format!("Withdrew: {}, Balance: {}", amount, self.balance));
        Ok(())
    }

    /// Whether this account may originate a transfer at all
    ///
    /// Pure check: status gate plus the sender-type restriction. Amount and
    /// balance rules are covered by [`Account::check_debit`].
    pub(crate) fn check_transfer_out(&self) -> Result<(), BankError> {
        self.check_active()?;
        if !self.account_type.allows_transfers_out() {
            return Err(BankError::unsupported(self.account_type, "transfers"));
        }
        Ok(())
    }

    /// Whether this account may receive a transfer
    pub(crate) fn check_transfer_in(&self) -> Result<(), BankError> {
        self.check_active()?;
        if !self.account_type.accepts_transfers_in() {
            return Err(BankError::unsupported(
                self.account_type,
                "inbound transfers",
            ));
        }
        Ok(())
    }

    /// Whether a debit of `amount` would be legal, without applying it
    ///
    /// Identical to the withdrawal amount rules: positive amount,
    /// sufficient funds, per-type ceiling, minimum balance.
    pub(crate) fn check_debit(&self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }
        if amount > self.balance {
            return Err(BankError::insufficient_funds(
                &self.account_number,
                self.balance,
                amount,
            ));
        }
        self.check_transaction_limit(amount)?;
        self.check_minimum_balance(amount)?;
        Ok(())
    }

    /// Apply the sender side of a fully validated transfer
    ///
    /// Callers must have passed [`Account::check_transfer_out`] and
    /// [`Account::check_debit`] first; this method performs no checks.
    pub(crate) fn apply_transfer_out(&mut self, to: &str, amount: Decimal) {
        self.balance -= amount;
        self.record(format!(
            "Transferred: {} to {}, Balance: {}",
            amount, to, self.balance
        ));
    }

    /// Apply the receiver side of a fully validated transfer
    pub(crate) fn apply_transfer_in(&mut self, from: &str, amount: Decimal) {
        self.balance += amount;
        self.record(format!(
            "Received: {} from {}, Balance: {}",
            amount, from, self.balance
        ));
    }

    /// Produce the serialization record for the snapshot store
    ///
    /// The only path that exposes the PIN outside this module.
    pub fn to_record(&self) -> AccountRecord {
        AccountRecord {
            holder: self.holder.clone(),
            gender: self.profile.gender.clone(),
            dob: self.profile.date_of_birth.clone(),
            address: self.profile.address.clone(),
            mobile: self.profile.mobile.clone(),
            email: self.profile.email.clone(),
            account_type: self.account_type,
            status: self.status,
            kyc: self.kyc_completed,
            branch_code: self.profile.branch_code.clone(),
            opening_date: self.opening_date.clone(),
            pin: self.pin.clone(),
            balance: self.balance,
            history: self.history.clone(),
        }
    }

    /// Rebuild an account from its serialization record
    ///
    /// Stored data is trusted as previously validated; no format checks are
    /// repeated here.
    pub fn from_record(account_number: String, record: AccountRecord) -> Account {
        Account {
            account_number,
            holder: record.holder,
            account_type: record.account_type,
            kyc_completed: record.kyc,
            opening_date: record.opening_date,
            profile: HolderProfile {
                gender: record.gender,
                date_of_birth: record.dob,
                address: record.address,
                mobile: record.mobile,
                email: record.email,
                branch_code: record.branch_code,
            },
            status: record.status,
            balance: record.balance,
            pin: record.pin,
            history: record.history,
        }
    }

    fn check_active(&self) -> Result<(), BankError> {
        if self.status != AccountStatus::Active {
            return Err(BankError::not_active(&self.account_number, self.status));
        }
        Ok(())
    }

    fn check_transaction_limit(&self, amount: Decimal) -> Result<(), BankError> {
        let limit = self.account_type.transaction_limit();
        // A zero limit blocks the transaction outright.
        if limit.is_zero() || amount > limit {
            return Err(BankError::limit_exceeded(self.account_type, limit, amount));
        }
        Ok(())
    }

    fn check_minimum_balance(&self, amount: Decimal) -> Result<(), BankError> {
        let minimum = self.account_type.minimum_balance();
        if minimum > Decimal::ZERO && self.balance - amount < minimum {
            return Err(BankError::minimum_balance(
                &self.account_number,
                minimum,
                self.balance - amount,
            ));
        }
        Ok(())
    }

    fn record(&mut self, action: String) {
        let time = Local::now().format("%Y-%m-%d %H:%M:%S");
        self.history.push(format!("[{}] {}", time, action));
    }
}

fn pin_is_valid(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}

/// On-disk representation of a single account
///
/// Field names match the canonical snapshot schema. `Status` is accepted as
/// an alias because one historical writer capitalized the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub holder: String,
    pub gender: String,
    #[serde(rename = "DOB")]
    pub dob: String,
    pub address: String,
    pub mobile: String,
    pub email: String,
    pub account_type: AccountType,
    #[serde(alias = "Status")]
    pub status: AccountStatus,
    #[serde(rename = "KYC")]
    pub kyc: bool,
    pub branch_code: String,
    pub opening_date: String,
    pub pin: String,
    pub balance: Decimal,
    pub history: Vec<String>,
}
