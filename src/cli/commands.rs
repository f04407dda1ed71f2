//! Command handlers
//!
//! The presentation layer: each handler validates input formats,
//! authenticates the caller, runs one locked load→mutate→save cycle
//! against the stores, and prints the outcome. All domain failures come
//! back as [`BankError`] values; nothing in the core prints.

use crate::cli::args::{AdminAuth, AdminCommand, CliArgs, Command, OpenArgs};
use crate::core::{validation, Ledger};
use crate::store::{AdminRole, AdminStore, LedgerStore};
use crate::types::{Account, BankError, HolderProfile, OpenAccount};
use chrono::{Local, Utc};
use rust_decimal::Decimal;

/// Execute one teller command
///
/// The single entry point the binary calls after parsing arguments.
pub fn run(args: CliArgs) -> Result<(), BankError> {
    let accounts = LedgerStore::new(&args.data_file);
    let admins = AdminStore::new(&args.admin_file);

    match args.command {
        Command::Open(open) => open_account(&accounts, open),
        Command::Deposit {
            account,
            amount,
            pin,
        } => deposit(&accounts, &account, amount, &pin),
        Command::Withdraw {
            account,
            amount,
            pin,
        } => withdraw(&accounts, &account, amount, &pin),
        Command::Transfer {
            from,
            to,
            amount,
            pin,
        } => transfer(&accounts, &from, &to, amount, &pin),
        Command::Balance { account, pin } => balance(&accounts, &account, &pin),
        Command::History { account, pin } => history(&accounts, &account, &pin),
        Command::Restrictions { account_type } => {
            println!("{} account rules:", account_type);
            for rule in account_type.restrictions() {
                println!("  {}", rule);
            }
            Ok(())
        }
        Command::Admin(command) => admin(&accounts, &admins, command),
    }
}

/// Run one locked load→mutate→save cycle against the snapshot store
///
/// The closure mutates the ledger; any error aborts the cycle before the
/// snapshot is rewritten.
fn with_ledger<T>(
    store: &LedgerStore,
    mutate: impl FnOnce(&mut Ledger) -> Result<T, BankError>,
) -> Result<T, BankError> {
    let _guard = store.lock()?;
    let mut ledger = store.load_all()?;
    let value = mutate(&mut ledger)?;
    store.save_all(&ledger)?;
    Ok(value)
}

/// Check the caller's PIN against an account already in the ledger
fn authorize(ledger: &Ledger, account_number: &str, pin: &str) -> Result<(), BankError> {
    let account = ledger
        .get(account_number)
        .ok_or_else(|| BankError::not_found(account_number))?;
    if !account.verify_pin(pin) {
        return Err(BankError::invalid_argument("pin", "incorrect PIN"));
    }
    Ok(())
}

/// Load a single account and check the caller's PIN (read-only commands)
fn load_authorized(
    store: &LedgerStore,
    account_number: &str,
    pin: &str,
) -> Result<Account, BankError> {
    let account = store
        .load_one(account_number)?
        .ok_or_else(|| BankError::not_found(account_number))?;
    if !account.verify_pin(pin) {
        return Err(BankError::invalid_argument("pin", "incorrect PIN"));
    }
    Ok(account)
}

fn open_account(store: &LedgerStore, args: OpenArgs) -> Result<(), BankError> {
    let account_number = match args.account_number {
        Some(number) => {
            validation::account_number(&number)?;
            number
        }
        None => generate_account_number(),
    };
    validation::holder_name(&args.holder)?;
    validation::pin(&args.pin)?;
    if !args.initial_balance.is_zero() {
        validation::amount(args.initial_balance)?;
    }
    if let Some(gender) = &args.gender {
        validation::gender(gender)?;
    }
    if let Some(date_of_birth) = &args.date_of_birth {
        validation::date(date_of_birth)?;
    }
    if let Some(mobile) = &args.mobile {
        validation::mobile(mobile)?;
    }
    if let Some(email) = &args.email {
        validation::email(email)?;
    }
    if let Some(branch_code) = &args.branch_code {
        validation::branch_code(branch_code)?;
    }
    let opening_date = match args.opening_date {
        Some(date) => {
            validation::date(&date)?;
            date
        }
        None => Local::now().format("%Y-%m-%d").to_string(),
    };

    let request = OpenAccount {
        account_number: account_number.clone(),
        holder: args.holder,
        pin: args.pin,
        account_type: args.account_type,
        initial_balance: args.initial_balance,
        opening_date,
        kyc_completed: args.kyc,
        profile: HolderProfile {
            gender: args.gender.unwrap_or_default(),
            date_of_birth: args.date_of_birth.unwrap_or_default(),
            address: args.address.unwrap_or_default(),
            mobile: args.mobile.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
            branch_code: args.branch_code.unwrap_or_default(),
        },
    };

    let balance = with_ledger(store, |ledger| {
        let account = ledger.open_account(request)?;
        Ok(account.balance())
    })?;

    println!("Account {} opened with balance {}", account_number, balance);
    Ok(())
}

fn deposit(
    store: &LedgerStore,
    account: &str,
    amount: Decimal,
    pin: &str,
) -> Result<(), BankError> {
    validation::amount(amount)?;
    let new_balance = with_ledger(store, |ledger| {
        authorize(ledger, account, pin)?;
        ledger.deposit(account, amount)
    })?;
    println!("Deposited {} into {}. Balance: {}", amount, account, new_balance);
    Ok(())
}

fn withdraw(
    store: &LedgerStore,
    account: &str,
    amount: Decimal,
    pin: &str,
) -> Result<(), BankError> {
    validation::amount(amount)?;
    let new_balance = with_ledger(store, |ledger| {
        authorize(ledger, account, pin)?;
        ledger.withdraw(account, amount)
    })?;
    println!("Withdrew {} from {}. Balance: {}", amount, account, new_balance);
    Ok(())
}

fn transfer(
    store: &LedgerStore,
    from: &str,
    to: &str,
    amount: Decimal,
    pin: &str,
) -> Result<(), BankError> {
    validation::amount(amount)?;
    with_ledger(store, |ledger| {
        authorize(ledger, from, pin)?;
        ledger.transfer(from, to, amount)
    })?;
    println!("Transferred {} from {} to {}", amount, from, to);
    Ok(())
}

fn balance(store: &LedgerStore, account: &str, pin: &str) -> Result<(), BankError> {
    let account = load_authorized(store, account, pin)?;
    println!("Balance: {}", account.balance());
    Ok(())
}

fn history(store: &LedgerStore, account: &str, pin: &str) -> Result<(), BankError> {
    let account = load_authorized(store, account, pin)?;
    if account.history().is_empty() {
        println!("No transaction history");
        return Ok(());
    }
    for entry in account.history() {
        println!("{}", entry);
    }
    Ok(())
}

fn admin(
    accounts: &LedgerStore,
    admins: &AdminStore,
    command: AdminCommand,
) -> Result<(), BankError> {
    match command {
        AdminCommand::Bootstrap { username, password } => {
            if admins.has_any()? {
                return Err(BankError::invalid_argument(
                    "admin",
                    "administrators already exist; ask the supreme admin to create more",
                ));
            }
            admins.create(&username, &password, AdminRole::Supreme)?;
            println!("Supreme administrator '{}' created", username);
            Ok(())
        }
        AdminCommand::CreateAdmin {
            auth,
            new_username,
            new_password,
        } => {
            authenticate_admin(admins, &auth)?;
            admins.create(&new_username, &new_password, AdminRole::Standard)?;
            println!("Administrator '{}' created", new_username);
            Ok(())
        }
        AdminCommand::ListAccounts { auth } => {
            authenticate_admin(admins, &auth)?;
            let ledger = accounts.load_all()?;
            if ledger.is_empty() {
                println!("No accounts found");
                return Ok(());
            }
            for account in ledger.accounts() {
                println!(
                    "Account {}, Holder: {}, Type: {}, Status: {}, Balance: {}",
                    account.account_number,
                    account.holder,
                    account.account_type,
                    account.status(),
                    account.balance()
                );
            }
            Ok(())
        }
        AdminCommand::DeleteAccount { account, auth } => {
            authenticate_admin(admins, &auth)?;
            with_ledger(accounts, |ledger| ledger.remove(&account))?;
            println!("Account {} deleted", account);
            Ok(())
        }
        AdminCommand::RenameHolder {
            account,
            new_holder,
            auth,
        } => {
            authenticate_admin(admins, &auth)?;
            validation::holder_name(&new_holder)?;
            with_ledger(accounts, |ledger| ledger.rename_holder(&account, &new_holder))?;
            println!("Holder name updated for account {}", account);
            Ok(())
        }
        AdminCommand::ResetPin {
            account,
            new_pin,
            auth,
        } => {
            authenticate_admin(admins, &auth)?;
            validation::pin(&new_pin)?;
            with_ledger(accounts, |ledger| ledger.reset_pin(&account, &new_pin))?;
            println!("PIN reset for account {}", account);
            Ok(())
        }
        AdminCommand::SetStatus {
            account,
            status,
            auth,
        } => {
            authenticate_admin(admins, &auth)?;
            with_ledger(accounts, |ledger| ledger.set_status(&account, status))?;
            println!("Account {} status set to {}", account, status);
            Ok(())
        }
    }
}

fn authenticate_admin(admins: &AdminStore, auth: &AdminAuth) -> Result<(), BankError> {
    if !admins.has_any()? {
        return Err(BankError::invalid_argument(
            "admin",
            "no administrators exist yet; run 'admin bootstrap' first",
        ));
    }
    if !admins.verify(&auth.username, &auth.password)? {
        return Err(BankError::invalid_argument(
            "credentials",
            "invalid admin credentials",
        ));
    }
    Ok(())
}

fn generate_account_number() -> String {
    format!("ACC{}", Utc::now().timestamp_millis())
}
