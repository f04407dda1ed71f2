//! Snapshot persistence for the account ledger
//!
//! The ledger is persisted as a single JSON document mapping account-number
//! strings to account records. Every change rewrites the whole document:
//! the store serializes to a temporary file in the snapshot's directory and
//! renames it over the snapshot, so a failed write never corrupts the
//! previously committed state.
//!
//! # Locking
//!
//! The store is built for one process at a time. To make that assumption
//! hold under accidental concurrent launches, [`LedgerStore::lock`] takes an
//! exclusive advisory lock on a sidecar `.lock` file; callers hold the
//! guard across each load→mutate→save cycle. Processes that bypass the lock
//! race as last-writer-wins; that limitation is accepted, not handled.
//!
//! # Schemas
//!
//! The canonical schema is the rich per-account record
//! ([`AccountRecord`]). Records in the reduced legacy form
//! `{pin, holder, balance, history}` are accepted on load and upgraded in
//! place with default lifecycle fields; the next save rewrites them in
//! canonical form.

use crate::core::Ledger;
use crate::types::{Account, AccountRecord, AccountStatus, AccountType, BankError};
use fs2::FileExt;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// File-backed store for the full account collection
///
/// Owns no business rules; it is a serialization boundary plus the
/// uniqueness check on creation.
pub struct LedgerStore {
    path: PathBuf,
}

/// Exclusive hold on the store's sidecar lock file
///
/// Released when dropped. The lock is advisory and not reentrant: a second
/// acquisition from the same process blocks until the first guard drops.
pub struct StoreGuard {
    file: File,
}

impl Drop for StoreGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl LedgerStore {
    /// Create a store over the given snapshot path
    ///
    /// The file does not have to exist yet; a missing snapshot reads as an
    /// empty ledger.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LedgerStore { path: path.into() }
    }

    /// Path of the snapshot document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the exclusive store lock
    ///
    /// Hold the returned guard across a full load→mutate→save cycle.
    /// [`LedgerStore::save_one`] takes the lock itself, so callers must not
    /// hold a guard when calling it.
    pub fn lock(&self) -> Result<StoreGuard, BankError> {
        let lock_path = lock_path(&self.path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)?;
        file.lock_exclusive()?;
        Ok(StoreGuard { file })
    }

    /// Read the entire snapshot into a ledger
    ///
    /// # Errors
    ///
    /// Returns `CorruptStore` if the document cannot be parsed as either
    /// the canonical or the legacy schema, and `Io` for file system
    /// failures. A missing file is not an error.
    pub fn load_all(&self) -> Result<Ledger, BankError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot yet, starting empty");
            return Ok(Ledger::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let records: BTreeMap<String, StoredAccount> = serde_json::from_str(&contents)
            .map_err(|e| BankError::corrupt_store(&self.path, e.to_string()))?;

        let mut ledger = Ledger::new();
        for (number, stored) in records {
            let record = match stored {
                StoredAccount::Rich(record) => record,
                StoredAccount::Legacy(legacy) => {
                    warn!(account = %number, "upgrading legacy account record");
                    upgrade_legacy(legacy)
                }
            };
            ledger.insert(Account::from_record(number, record));
        }

        debug!(path = %self.path.display(), accounts = ledger.len(), "snapshot loaded");
        Ok(ledger)
    }

    /// Look up a single account, equivalent to `load_all` filtered by key
    pub fn load_one(&self, account_number: &str) -> Result<Option<Account>, BankError> {
        let mut ledger = self.load_all()?;
        Ok(ledger.remove(account_number).ok())
    }

    /// Overwrite the snapshot with the given ledger
    ///
    /// Serializes the whole mapping, writes it to a temporary file next to
    /// the snapshot, and atomically renames it into place.
    pub fn save_all(&self, ledger: &Ledger) -> Result<(), BankError> {
        let records: BTreeMap<&str, AccountRecord> = ledger
            .iter()
            .map(|account| (account.account_number.as_str(), account.to_record()))
            .collect();
        let contents = serde_json::to_string_pretty(&records).map_err(|e| BankError::Io {
            message: e.to_string(),
        })?;

        let dir = snapshot_dir(&self.path);
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents.as_bytes())?;
        staged
            .persist(&self.path)
            .map_err(|e| BankError::from(e.error))?;

        debug!(path = %self.path.display(), accounts = ledger.len(), "snapshot written");
        Ok(())
    }

    /// Insert or replace a single account in the snapshot
    ///
    /// A self-contained read-modify-write cycle under the store lock.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` when `allow_update` is false and the account
    /// number already exists; the snapshot is left unchanged.
    pub fn save_one(&self, account: &Account, allow_update: bool) -> Result<(), BankError> {
        let _guard = self.lock()?;
        let mut ledger = self.load_all()?;

        if !allow_update && ledger.contains(&account.account_number) {
            return Err(BankError::duplicate_key(&account.account_number));
        }

        ledger.insert(account.clone());
        self.save_all(&ledger)
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".lock");
    path.with_file_name(name)
}

fn snapshot_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// A stored record in either schema, canonical tried first
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredAccount {
    Rich(AccountRecord),
    Legacy(LegacyRecord),
}

/// The reduced schema of the original simple variant
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    pin: LegacyPin,
    holder: String,
    balance: Decimal,
    #[serde(default)]
    history: Vec<String>,
}

/// Legacy writers stored PINs as bare numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LegacyPin {
    Text(String),
    Number(u64),
}

fn upgrade_legacy(record: LegacyRecord) -> AccountRecord {
    AccountRecord {
        holder: record.holder,
        gender: String::new(),
        dob: String::new(),
        address: String::new(),
        mobile: String::new(),
        email: String::new(),
        account_type: AccountType::Savings,
        status: AccountStatus::Active,
        kyc: false,
        branch_code: String::new(),
        opening_date: String::new(),
        pin: match record.pin {
            LegacyPin::Text(pin) => pin,
            LegacyPin::Number(pin) => pin.to_string(),
        },
        balance: record.balance,
        history: record.history,
    }
}
