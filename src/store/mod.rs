//! Persistence module
//!
//! - `snapshot` - whole-file JSON snapshot of the account ledger
//! - `admin` - the separate administrator document

pub mod admin;
pub mod snapshot;

pub use admin::{Admin, AdminRole, AdminStore};
pub use snapshot::{LedgerStore, StoreGuard};
