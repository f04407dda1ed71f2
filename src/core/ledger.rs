//! Account collection and cross-account operations
//!
//! This module provides the `Ledger` struct which maintains the full set of
//! accounts keyed by account number and provides the operations that involve
//! more than one account or the collection itself: opening (uniqueness),
//! transfers (two-sided, atomic), and the administrative lifecycle
//! operations.
//!
//! Single-account rules live on [`Account`]; the ledger looks accounts up
//! and delegates. For transfers it validates every precondition on both
//! accounts before mutating either side, so a failure partway can never
//! leave a half-applied transfer behind.

use crate::types::{Account, AccountStatus, BankError, OpenAccount};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// The full collection of accounts, keyed by account number
///
/// Owned in memory; persistence is the snapshot store's concern. All
/// mutating operations either complete fully or leave the collection
/// untouched.
pub struct Ledger {
    accounts: HashMap<String, Account>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            accounts: HashMap::new(),
        }
    }

    /// Number of accounts in the ledger
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether an account with this number exists
    pub fn contains(&self, account_number: &str) -> bool {
        self.accounts.contains_key(account_number)
    }

    /// Look up an account by number
    pub fn get(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    /// Insert an account as-is, replacing any existing entry
    ///
    /// Used by the snapshot store when rebuilding the ledger from disk and
    /// when replacing a single entry. Uniqueness-checked creation goes
    /// through [`Ledger::open_account`] instead.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.account_number.clone(), account);
    }

    /// Iterate over all accounts in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// All accounts sorted by account number
    ///
    /// Deterministic ordering for listings and snapshot output.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        accounts
    }

    /// Open a new account
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if the account number is already taken, or
    /// any `InvalidArgument` from [`Account::open`].
    pub fn open_account(&mut self, request: OpenAccount) -> Result<&Account, BankError> {
        if self.accounts.contains_key(&request.account_number) {
            return Err(BankError::duplicate_key(&request.account_number));
        }

        let number = request.account_number.clone();
        let account = Account::open(request)?;
        debug!(account = %number, "account opened");
        Ok(self.accounts.entry(number).or_insert(account))
    }

    /// Deposit into an account, returning the new balance
    pub fn deposit(&mut self, account_number: &str, amount: Decimal) -> Result<Decimal, BankError> {
        let account = self.account_mut(account_number)?;
        account.deposit(amount)?;
        Ok(account.balance())
    }

    /// Withdraw from an account, returning the new balance
    pub fn withdraw(
        &mut self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<Decimal, BankError> {
        let account = self.account_mut(account_number)?;
        account.withdraw(amount)?;
        Ok(account.balance())
    }

    /// Move funds between two accounts atomically
    ///
    /// Every precondition on both sides is validated before either account
    /// is touched: sender Active and allowed to transfer out, receiver
    /// Active and allowed to receive, positive amount, sufficient sender
    /// funds, sender ceiling, and sender minimum balance. Only then are
    /// both balances updated and both history entries appended, so the two
    /// balance deltas always sum to exactly zero.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a self-transfer
    /// - `NotFound` if either account number is unknown
    /// - `AccountNotActive` if either account is not `Active`
    /// - `UnsupportedOperation` if the sender type cannot transfer out or
    ///   the receiver type cannot receive
    /// - `InvalidAmount`, `InsufficientFunds`, `LimitExceeded`, or
    ///   `MinimumBalanceViolation` from the sender's debit rules
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), BankError> {
        if from == to {
            return Err(BankError::invalid_argument(
                "recipient",
                "cannot transfer to the same account",
            ));
        }

        {
            let sender = self
                .accounts
                .get(from)
                .ok_or_else(|| BankError::not_found(from))?;
            let receiver = self
                .accounts
                .get(to)
                .ok_or_else(|| BankError::not_found(to))?;

            sender.check_transfer_out()?;
            receiver.check_transfer_in()?;
            sender.check_debit(amount)?;
        }

        // Both accounts exist and every rule passed; apply both sides.
        let [Some(sender), Some(receiver)] = self.accounts.get_disjoint_mut([from, to]) else {
            return Err(BankError::not_found(from));
        };
        sender.apply_transfer_out(to, amount);
        receiver.apply_transfer_in(from, amount);

        debug!(from, to, %amount, "transfer applied");
        Ok(())
    }

    /// Change an account holder's name (administrative)
    pub fn rename_holder(
        &mut self,
        account_number: &str,
        new_holder: &str,
    ) -> Result<(), BankError> {
        let account = self.account_mut(account_number)?;
        account.holder = new_holder.to_string();
        Ok(())
    }

    /// Replace an account's PIN (administrative)
    pub fn reset_pin(&mut self, account_number: &str, new_pin: &str) -> Result<(), BankError> {
        self.account_mut(account_number)?.set_pin(new_pin)
    }

    /// Set an account's status unconditionally (administrative)
    pub fn set_status(
        &mut self,
        account_number: &str,
        status: AccountStatus,
    ) -> Result<(), BankError> {
        self.account_mut(account_number)?.set_status(status);
        Ok(())
    }

    /// Remove an account from the ledger entirely (administrative)
    ///
    /// Hard delete: the account and its history leave the collection and,
    /// after the next save, the snapshot.
    pub fn remove(&mut self, account_number: &str) -> Result<Account, BankError> {
        self.accounts
            .remove(account_number)
            .ok_or_else(|| BankError::not_found(account_number))
    }

    fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| BankError::not_found(account_number))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
