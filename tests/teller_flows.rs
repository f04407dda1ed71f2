//! End-to-end command flows
//!
//! These tests drive complete customer and administrator flows through the
//! CLI entry point against stores in a temporary directory, then assert on
//! the persisted state. They cover the full pipeline: argument parsing,
//! format validation, authentication, the locked load→mutate→save cycle,
//! and the snapshot schema.

use clap::Parser;
use rust_decimal::Decimal;
use teller::cli::{run, CliArgs};
use teller::{AccountStatus, AccountType, BankError, LedgerStore};
use tempfile::TempDir;

/// Run one teller invocation against the stores in `dir`
fn teller(dir: &TempDir, args: &[&str]) -> Result<(), BankError> {
    let data_file = dir.path().join("accounts.json");
    let admin_file = dir.path().join("admins.json");

    let mut argv: Vec<String> = vec!["teller".to_string()];
    argv.extend(args.iter().map(|s| s.to_string()));
    argv.push("--data-file".to_string());
    argv.push(data_file.display().to_string());
    argv.push("--admin-file".to_string());
    argv.push(admin_file.display().to_string());

    let parsed = CliArgs::try_parse_from(argv).expect("arguments should parse");
    run(parsed)
}

fn store(dir: &TempDir) -> LedgerStore {
    LedgerStore::new(dir.path().join("accounts.json"))
}

fn open_savings(dir: &TempDir, number: &str, pin: &str, balance: &str) {
    teller(
        dir,
        &[
            "open",
            "--account-number",
            number,
            "--holder",
            "Asha Rao",
            "--pin",
            pin,
            "--type",
            "savings",
            "--initial-balance",
            balance,
        ],
    )
    .expect("open should succeed");
}

fn bootstrap_admin(dir: &TempDir) {
    teller(
        dir,
        &[
            "admin",
            "bootstrap",
            "--username",
            "root",
            "--password",
            "secret",
        ],
    )
    .expect("bootstrap should succeed");
}

#[test]
fn deposit_withdraw_flow_updates_the_snapshot() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "2000");

    teller(&dir, &["deposit", "100001", "500", "--pin", "4321"]).unwrap();
    teller(&dir, &["withdraw", "100001", "900", "--pin", "4321"]).unwrap();

    let account = store(&dir).load_one("100001").unwrap().unwrap();
    assert_eq!(account.balance(), Decimal::from(1600));
    assert_eq!(account.history().len(), 2);
    assert!(account.history()[0].contains("Deposited: 500"));
    assert!(account.history()[1].contains("Withdrew: 900"));
}

#[test]
fn transfer_flow_conserves_funds() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "5000");
    teller(
        &dir,
        &[
            "open",
            "--account-number",
            "100002",
            "--holder",
            "Ravi Iyer",
            "--pin",
            "1111",
            "--type",
            "current",
        ],
    )
    .unwrap();

    teller(
        &dir,
        &["transfer", "100001", "100002", "750", "--pin", "4321"],
    )
    .unwrap();

    let ledger = store(&dir).load_all().unwrap();
    let sender = ledger.get("100001").unwrap();
    let receiver = ledger.get("100002").unwrap();
    assert_eq!(sender.balance(), Decimal::from(4250));
    assert_eq!(receiver.balance(), Decimal::from(750));
    assert_eq!(sender.balance() + receiver.balance(), Decimal::from(5000));
    assert!(sender.history()[0].contains("Transferred: 750 to 100002"));
    assert!(receiver.history()[0].contains("Received: 750 from 100001"));
}

#[test]
fn wrong_pin_is_rejected_and_nothing_changes() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "2000");

    let result = teller(&dir, &["deposit", "100001", "500", "--pin", "9999"]);

    assert!(matches!(result, Err(BankError::InvalidArgument { .. })));
    let account = store(&dir).load_one("100001").unwrap().unwrap();
    assert_eq!(account.balance(), Decimal::from(2000));
    assert!(account.history().is_empty());
}

#[test]
fn open_with_short_pin_persists_nothing() {
    let dir = TempDir::new().unwrap();

    let result = teller(
        &dir,
        &[
            "open",
            "--account-number",
            "ACC1",
            "--holder",
            "Asha Rao",
            "--pin",
            "12",
            "--type",
            "savings",
        ],
    );

    assert!(matches!(result, Err(BankError::InvalidArgument { .. })));
    assert!(store(&dir).load_all().unwrap().is_empty());
}

#[test]
fn opening_a_taken_account_number_fails_with_duplicate_key() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "0");

    let result = teller(
        &dir,
        &[
            "open",
            "--account-number",
            "100001",
            "--holder",
            "Ravi Iyer",
            "--pin",
            "1111",
            "--type",
            "current",
        ],
    );

    assert_eq!(result, Err(BankError::duplicate_key("100001")));
    let account = store(&dir).load_one("100001").unwrap().unwrap();
    assert_eq!(account.holder, "Asha Rao");
}

#[test]
fn open_without_account_number_generates_an_acc_token() {
    let dir = TempDir::new().unwrap();

    teller(
        &dir,
        &[
            "open", "--holder", "Asha Rao", "--pin", "4321", "--type", "savings",
        ],
    )
    .unwrap();

    let ledger = store(&dir).load_all().unwrap();
    assert_eq!(ledger.len(), 1);
    let account = ledger.accounts()[0];
    assert!(account.account_number.starts_with("ACC"));
    assert!(account.account_number[3..].chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn savings_minimum_balance_blocks_the_withdrawal_end_to_end() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "2000");

    let result = teller(&dir, &["withdraw", "100001", "1500", "--pin", "4321"]);

    assert!(matches!(
        result,
        Err(BankError::MinimumBalanceViolation { .. })
    ));
    assert_eq!(
        store(&dir).load_one("100001").unwrap().unwrap().balance(),
        Decimal::from(2000)
    );
}

#[test]
fn balance_history_and_restrictions_commands_run() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "2000");
    teller(&dir, &["deposit", "100001", "100", "--pin", "4321"]).unwrap();

    teller(&dir, &["balance", "100001", "--pin", "4321"]).unwrap();
    teller(&dir, &["history", "100001", "--pin", "4321"]).unwrap();
    teller(&dir, &["restrictions", "fixed-deposit"]).unwrap();
}

#[test]
fn admin_lifecycle_flow() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "2000");
    bootstrap_admin(&dir);

    // A second bootstrap is refused.
    let again = teller(
        &dir,
        &["admin", "bootstrap", "--username", "other", "--password", "pw"],
    );
    assert!(matches!(again, Err(BankError::InvalidArgument { .. })));

    // The supreme admin can create a standard admin, once.
    teller(
        &dir,
        &[
            "admin",
            "create-admin",
            "--username",
            "root",
            "--password",
            "secret",
            "--new-username",
            "clerk",
            "--new-password",
            "pw2",
        ],
    )
    .unwrap();
    let duplicate = teller(
        &dir,
        &[
            "admin",
            "create-admin",
            "--username",
            "root",
            "--password",
            "secret",
            "--new-username",
            "clerk",
            "--new-password",
            "pw3",
        ],
    );
    assert_eq!(duplicate, Err(BankError::duplicate_admin("clerk")));

    // Rename, reset the PIN, freeze, then delete.
    teller(
        &dir,
        &[
            "admin",
            "rename-holder",
            "100001",
            "Asha Kapoor",
            "--username",
            "clerk",
            "--password",
            "pw2",
        ],
    )
    .unwrap();
    teller(
        &dir,
        &[
            "admin", "reset-pin", "100001", "9876", "--username", "clerk", "--password", "pw2",
        ],
    )
    .unwrap();

    let account = store(&dir).load_one("100001").unwrap().unwrap();
    assert_eq!(account.holder, "Asha Kapoor");
    assert!(account.verify_pin("9876"));
    assert!(!account.verify_pin("4321"));

    teller(
        &dir,
        &[
            "admin", "set-status", "100001", "frozen", "--username", "clerk", "--password", "pw2",
        ],
    )
    .unwrap();
    let frozen_deposit = teller(&dir, &["deposit", "100001", "10", "--pin", "9876"]);
    assert_eq!(
        frozen_deposit,
        Err(BankError::not_active("100001", AccountStatus::Frozen))
    );

    teller(
        &dir,
        &[
            "admin",
            "list-accounts",
            "--username",
            "clerk",
            "--password",
            "pw2",
        ],
    )
    .unwrap();
    teller(
        &dir,
        &[
            "admin",
            "delete-account",
            "100001",
            "--username",
            "clerk",
            "--password",
            "pw2",
        ],
    )
    .unwrap();
    assert!(store(&dir).load_all().unwrap().is_empty());
}

#[test]
fn admin_commands_require_bootstrap_and_valid_credentials() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "0");

    // No administrators yet.
    let unbootstrapped = teller(
        &dir,
        &[
            "admin",
            "list-accounts",
            "--username",
            "root",
            "--password",
            "secret",
        ],
    );
    assert!(matches!(
        unbootstrapped,
        Err(BankError::InvalidArgument { .. })
    ));

    bootstrap_admin(&dir);

    let bad_password = teller(
        &dir,
        &[
            "admin",
            "delete-account",
            "100001",
            "--username",
            "root",
            "--password",
            "wrong",
        ],
    );
    assert!(matches!(bad_password, Err(BankError::InvalidArgument { .. })));
    assert!(store(&dir).load_one("100001").unwrap().is_some());
}

#[test]
fn transactions_on_a_legacy_snapshot_upgrade_it_in_place() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("accounts.json");
    std::fs::write(
        &data_file,
        r#"{"100001": {"pin": 4321, "holder": "Old Holder", "balance": 2000, "history": []}}"#,
    )
    .unwrap();

    teller(&dir, &["deposit", "100001", "250", "--pin", "4321"]).unwrap();

    let account = store(&dir).load_one("100001").unwrap().unwrap();
    assert_eq!(account.balance(), Decimal::from(2250));
    assert_eq!(account.account_type, AccountType::Savings);

    // The rewrite uses the canonical schema.
    let contents = std::fs::read_to_string(&data_file).unwrap();
    assert!(contents.contains("account_type"));
    assert!(contents.contains("opening_date"));
}

#[test]
fn corrupt_snapshot_fails_loudly_and_is_left_intact() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("accounts.json");
    std::fs::write(&data_file, "definitely not json").unwrap();

    let result = teller(&dir, &["deposit", "100001", "250", "--pin", "4321"]);

    assert!(matches!(result, Err(BankError::CorruptStore { .. })));
    assert_eq!(
        std::fs::read_to_string(&data_file).unwrap(),
        "definitely not json"
    );
}

#[test]
fn fixed_deposit_refuses_deposits_end_to_end() {
    let dir = TempDir::new().unwrap();
    teller(
        &dir,
        &[
            "open",
            "--account-number",
            "100009",
            "--holder",
            "Ravi Iyer",
            "--pin",
            "2222",
            "--type",
            "fixed-deposit",
            "--initial-balance",
            "50000",
        ],
    )
    .unwrap();

    let result = teller(&dir, &["deposit", "100009", "100", "--pin", "2222"]);

    assert_eq!(
        result,
        Err(BankError::unsupported(
            AccountType::FixedDeposit,
            "deposits"
        ))
    );
    assert_eq!(
        store(&dir).load_one("100009").unwrap().unwrap().balance(),
        Decimal::from(50_000)
    );
}

#[test]
fn transfer_to_a_closed_account_leaves_the_sender_untouched() {
    let dir = TempDir::new().unwrap();
    open_savings(&dir, "100001", "4321", "5000");
    teller(
        &dir,
        &[
            "open",
            "--account-number",
            "100002",
            "--holder",
            "Ravi Iyer",
            "--pin",
            "1111",
            "--type",
            "current",
        ],
    )
    .unwrap();
    bootstrap_admin(&dir);
    teller(
        &dir,
        &[
            "admin", "set-status", "100002", "closed", "--username", "root", "--password",
            "secret",
        ],
    )
    .unwrap();

    let result = teller(
        &dir,
        &["transfer", "100001", "100002", "500", "--pin", "4321"],
    );

    assert_eq!(
        result,
        Err(BankError::not_active("100002", AccountStatus::Closed))
    );
    let sender = store(&dir).load_one("100001").unwrap().unwrap();
    assert_eq!(sender.balance(), Decimal::from(5000));
    assert!(sender.history().is_empty());
}

#[test]
fn open_validates_descriptive_fields_when_provided() {
    let dir = TempDir::new().unwrap();

    let result = teller(
        &dir,
        &[
            "open",
            "--account-number",
            "100001",
            "--holder",
            "Asha Rao",
            "--pin",
            "4321",
            "--type",
            "savings",
            "--mobile",
            "12345",
        ],
    );

    assert!(matches!(result, Err(BankError::InvalidArgument { .. })));
    assert!(store(&dir).load_all().unwrap().is_empty());
}

#[test]
fn open_records_the_full_profile() {
    let dir = TempDir::new().unwrap();

    teller(
        &dir,
        &[
            "open",
            "--account-number",
            "100001",
            "--holder",
            "Asha Rao",
            "--pin",
            "4321",
            "--type",
            "savings",
            "--initial-balance",
            "2000",
            "--opening-date",
            "2024-03-01",
            "--kyc",
            "--gender",
            "female",
            "--date-of-birth",
            "1991-06-20",
            "--address",
            "5 Lake View",
            "--mobile",
            "9876543210",
            "--email",
            "asha@example.com",
            "--branch-code",
            "BR02",
        ],
    )
    .unwrap();

    let account = store(&dir).load_one("100001").unwrap().unwrap();
    assert!(account.kyc_completed);
    assert_eq!(account.opening_date, "2024-03-01");
    assert_eq!(account.profile.mobile, "9876543210");
    assert_eq!(account.profile.branch_code, "BR02");
}
