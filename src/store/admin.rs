//! Administrator store
//!
//! A separate JSON document holding the list of administrator records.
//! The list is loaded in full and rewritten in full on every creation,
//! with the same write-new-then-rename discipline as the account snapshot.
//!
//! The first administrator is the "supreme" one; the presentation layer
//! uses [`AdminStore::has_any`] / [`AdminStore::create`] to bootstrap it
//! interactively before normal operation.

use crate::types::BankError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Administrator privilege level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// The bootstrap administrator; created when the store is empty
    Supreme,
    /// An ordinary administrator created by another administrator
    Standard,
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminRole::Supreme => write!(f, "supreme"),
            AdminRole::Standard => write!(f, "standard"),
        }
    }
}

/// One administrator record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub username: String,
    pub password: String,
    pub role: AdminRole,
}

/// File-backed store for administrator records
pub struct AdminStore {
    path: PathBuf,
}

impl AdminStore {
    /// Create a store over the given document path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AdminStore { path: path.into() }
    }

    /// Path of the administrator document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all administrator records
    ///
    /// A missing file reads as an empty list; an unparseable file fails
    /// with `CorruptStore`.
    pub fn load(&self) -> Result<Vec<Admin>, BankError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .map_err(|e| BankError::corrupt_store(&self.path, e.to_string()))
    }

    /// Whether any administrator exists yet
    ///
    /// False means the presentation layer must bootstrap the supreme
    /// administrator before anything else.
    pub fn has_any(&self) -> Result<bool, BankError> {
        Ok(!self.load()?.is_empty())
    }

    /// Add an administrator
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAdmin` on a username collision and
    /// `InvalidArgument` for an empty username or password; the document is
    /// left unchanged in both cases.
    pub fn create(
        &self,
        username: &str,
        password: &str,
        role: AdminRole,
    ) -> Result<(), BankError> {
        if username.trim().is_empty() {
            return Err(BankError::invalid_argument(
                "username",
                "username cannot be empty",
            ));
        }
        if password.is_empty() {
            return Err(BankError::invalid_argument(
                "password",
                "password cannot be empty",
            ));
        }

        let mut admins = self.load()?;
        if admins.iter().any(|admin| admin.username == username) {
            return Err(BankError::duplicate_admin(username));
        }

        admins.push(Admin {
            username: username.to_string(),
            password: password.to_string(),
            role,
        });
        self.save(&admins)?;
        debug!(username, %role, "admin created");
        Ok(())
    }

    /// Check a username/password pair against the stored records
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, BankError> {
        Ok(self
            .load()?
            .iter()
            .any(|admin| admin.username == username && admin.password == password))
    }

    fn save(&self, admins: &[Admin]) -> Result<(), BankError> {
        let contents = serde_json::to_string_pretty(admins).map_err(|e| BankError::Io {
            message: e.to_string(),
        })?;

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents.as_bytes())?;
        staged
            .persist(&self.path)
            .map_err(|e| BankError::from(e.error))?;
        Ok(())
    }
}
