use crate::types::{AccountStatus, AccountType};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Single-branch retail bank teller
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(about = "Single-branch retail bank teller", long_about = None)]
pub struct CliArgs {
    /// Path of the account snapshot document
    #[arg(
        long = "data-file",
        value_name = "PATH",
        default_value = "accounts.json",
        global = true
    )]
    pub data_file: PathBuf,

    /// Path of the administrator document
    #[arg(
        long = "admin-file",
        value_name = "PATH",
        default_value = "admins.json",
        global = true
    )]
    pub admin_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// One teller operation per invocation
///
/// Each subcommand is a single request/response action: authenticate,
/// run one store cycle, print the outcome.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a new account
    Open(OpenArgs),

    /// Deposit funds into an account
    Deposit {
        /// Account number
        account: String,
        /// Amount to deposit
        amount: Decimal,
        /// Account PIN
        #[arg(long)]
        pin: String,
    },

    /// Withdraw funds from an account
    Withdraw {
        /// Account number
        account: String,
        /// Amount to withdraw
        amount: Decimal,
        /// Account PIN
        #[arg(long)]
        pin: String,
    },

    /// Transfer funds between two accounts
    Transfer {
        /// Sender account number
        from: String,
        /// Recipient account number
        to: String,
        /// Amount to transfer
        amount: Decimal,
        /// Sender's PIN
        #[arg(long)]
        pin: String,
    },

    /// Show an account balance
    Balance {
        /// Account number
        account: String,
        /// Account PIN
        #[arg(long)]
        pin: String,
    },

    /// Show an account's transaction history
    History {
        /// Account number
        account: String,
        /// Account PIN
        #[arg(long)]
        pin: String,
    },

    /// Show the rules for an account type
    Restrictions {
        /// Account type (savings, current, fixed-deposit, recurring-deposit)
        account_type: AccountType,
    },

    /// Administrative operations
    #[command(subcommand)]
    Admin(AdminCommand),
}

/// Arguments for opening a new account
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Account number; a fresh ACC token is generated when omitted
    #[arg(long)]
    pub account_number: Option<String>,

    /// Account holder's name
    #[arg(long)]
    pub holder: String,

    /// 4-digit PIN for the new account
    #[arg(long)]
    pub pin: String,

    /// Account type (savings, current, fixed-deposit, recurring-deposit)
    #[arg(long = "type", value_name = "TYPE")]
    pub account_type: AccountType,

    /// Opening balance
    #[arg(long, default_value = "0")]
    pub initial_balance: Decimal,

    /// Opening date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub opening_date: Option<String>,

    /// Know-Your-Customer verification completed
    #[arg(long)]
    pub kyc: bool,

    /// Holder's gender (male, female, other)
    #[arg(long)]
    pub gender: Option<String>,

    /// Holder's date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: Option<String>,

    /// Holder's postal address
    #[arg(long)]
    pub address: Option<String>,

    /// Holder's 10-digit mobile number
    #[arg(long)]
    pub mobile: Option<String>,

    /// Holder's email address
    #[arg(long)]
    pub email: Option<String>,

    /// Branch code of the opening branch
    #[arg(long)]
    pub branch_code: Option<String>,
}

/// Administrator credentials, required by every admin operation
#[derive(Args, Debug)]
pub struct AdminAuth {
    /// Administrator username
    #[arg(long)]
    pub username: String,

    /// Administrator password
    #[arg(long)]
    pub password: String,
}

/// Administrative subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Create the first (supreme) administrator; only valid while none exist
    Bootstrap {
        /// Username for the supreme administrator
        #[arg(long)]
        username: String,
        /// Password for the supreme administrator
        #[arg(long)]
        password: String,
    },

    /// Create an additional administrator
    CreateAdmin {
        #[command(flatten)]
        auth: AdminAuth,
        /// Username for the new administrator
        #[arg(long)]
        new_username: String,
        /// Password for the new administrator
        #[arg(long)]
        new_password: String,
    },

    /// List all accounts
    ListAccounts {
        #[command(flatten)]
        auth: AdminAuth,
    },

    /// Delete an account permanently
    DeleteAccount {
        /// Account number to delete
        account: String,
        #[command(flatten)]
        auth: AdminAuth,
    },

    /// Change an account holder's name
    RenameHolder {
        /// Account number
        account: String,
        /// New holder name
        new_holder: String,
        #[command(flatten)]
        auth: AdminAuth,
    },

    /// Reset an account's PIN
    ResetPin {
        /// Account number
        account: String,
        /// New 4-digit PIN
        new_pin: String,
        #[command(flatten)]
        auth: AdminAuth,
    },

    /// Set an account's status
    SetStatus {
        /// Account number
        account: String,
        /// New status (active, inactive, suspended, closed, frozen)
        status: AccountStatus,
        #[command(flatten)]
        auth: AdminAuth,
    },
}
