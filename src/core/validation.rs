//! Input-format validation
//!
//! Format predicates for everything the presentation layer collects from
//! the user. Each function checks one field and reports violations as
//! `InvalidArgument` with a human-readable message; expected bad input is
//! never a panic.
//!
//! These checks are about *format* only. Business rules (ceilings, minimum
//! balances, status gates) live on the account itself.

use crate::types::BankError;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Validate an account number
///
/// Accepts the generated `ACC<digits>` token or the legacy 6-digit numeric
/// form.
pub fn account_number(value: &str) -> Result<(), BankError> {
    if let Some(digits) = value.strip_prefix("ACC") {
        if digits.is_empty() || digits.len() > 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(BankError::invalid_argument(
                "account number",
                "ACC token must be followed by 1 to 16 digits",
            ));
        }
        return Ok(());
    }
    if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(BankError::invalid_argument(
            "account number",
            "account number must be 6 digits or an ACC token",
        ));
    }
    if value.starts_with('0') {
        return Err(BankError::invalid_argument(
            "account number",
            "6-digit account numbers cannot start with 0",
        ));
    }
    Ok(())
}

/// Validate a PIN: exactly 4 digits
pub fn pin(value: &str) -> Result<(), BankError> {
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(BankError::invalid_argument(
            "pin",
            "PIN must be exactly 4 digits",
        ));
    }
    Ok(())
}

/// Validate a holder name: non-empty, letters and spaces only
pub fn holder_name(value: &str) -> Result<(), BankError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BankError::invalid_argument(
            "holder name",
            "holder name cannot be empty",
        ));
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(BankError::invalid_argument(
            "holder name",
            "holder name must contain only letters",
        ));
    }
    Ok(())
}

/// Validate a monetary amount: positive, at most 2 fraction digits
pub fn amount(value: Decimal) -> Result<(), BankError> {
    if value <= Decimal::ZERO {
        return Err(BankError::invalid_argument(
            "amount",
            "amount must be greater than zero",
        ));
    }
    if value.normalize().scale() > 2 {
        return Err(BankError::invalid_argument(
            "amount",
            "amount cannot have more than 2 decimal places",
        ));
    }
    Ok(())
}

/// Validate a date in `YYYY-MM-DD` form
pub fn date(value: &str) -> Result<(), BankError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        BankError::invalid_argument("date", format!("'{}' is not a valid YYYY-MM-DD date", value))
    })?;
    Ok(())
}

/// Validate a mobile number: exactly 10 digits
pub fn mobile(value: &str) -> Result<(), BankError> {
    if value.len() != 10 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(BankError::invalid_argument(
            "mobile",
            "mobile number must be exactly 10 digits",
        ));
    }
    Ok(())
}

/// Validate an email address: one `@`, non-empty local part, dotted domain
pub fn email(value: &str) -> Result<(), BankError> {
    let invalid = || {
        BankError::invalid_argument("email", format!("'{}' is not a valid email address", value))
    };
    if value.contains(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}

/// Validate a gender label: male, female, or other (case-insensitive)
pub fn gender(value: &str) -> Result<(), BankError> {
    match value.to_lowercase().as_str() {
        "male" | "female" | "other" => Ok(()),
        _ => Err(BankError::invalid_argument(
            "gender",
            "gender must be one of male, female, other",
        )),
    }
}

/// Validate a branch code: 3 to 8 alphanumeric characters
pub fn branch_code(value: &str) -> Result<(), BankError> {
    if !(3..=8).contains(&value.len()) || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(BankError::invalid_argument(
            "branch code",
            "branch code must be 3 to 8 alphanumeric characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::legacy("100001", true)]
    #[case::legacy_leading_zero("012345", false)]
    #[case::too_short("12345", false)]
    #[case::too_long("1234567", false)]
    #[case::token("ACC1700000000000", true)]
    #[case::token_short("ACC1", true)]
    #[case::token_empty("ACC", false)]
    #[case::token_letters("ACC12x4", false)]
    #[case::garbage("hello", false)]
    fn account_number_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(account_number(value).is_ok(), ok);
    }

    #[rstest]
    #[case::valid("1234", true)]
    #[case::leading_zero("0001", true)]
    #[case::short("12", false)]
    #[case::long("12345", false)]
    #[case::letters("12a4", false)]
    fn pin_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(pin(value).is_ok(), ok);
    }

    #[rstest]
    #[case::simple("Asha Rao", true)]
    #[case::empty("", false)]
    #[case::blank("   ", false)]
    #[case::digits("Asha R2o", false)]
    #[case::unicode("Ásha Rao", true)]
    fn holder_name_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(holder_name(value).is_ok(), ok);
    }

    #[rstest]
    #[case::whole("100", true)]
    #[case::two_places("100.25", true)]
    #[case::trailing_zeros("100.2500", true)]
    #[case::three_places("100.255", false)]
    #[case::zero("0", false)]
    #[case::negative("-5", false)]
    fn amount_format(#[case] value: &str, #[case] ok: bool) {
        let value: Decimal = value.parse().unwrap();
        assert_eq!(amount(value).is_ok(), ok);
    }

    #[rstest]
    #[case::valid("2024-02-29", true)]
    #[case::not_a_leap_year("2023-02-29", false)]
    #[case::wrong_order("29-02-2024", false)]
    #[case::garbage("yesterday", false)]
    fn date_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(date(value).is_ok(), ok);
    }

    #[rstest]
    #[case::valid("9876543210", true)]
    #[case::short("98765", false)]
    #[case::letters("98765abcde", false)]
    fn mobile_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(mobile(value).is_ok(), ok);
    }

    #[rstest]
    #[case::valid("asha@example.com", true)]
    #[case::no_at("asha.example.com", false)]
    #[case::two_ats("a@b@example.com", false)]
    #[case::empty_local("@example.com", false)]
    #[case::no_dot_domain("asha@example", false)]
    #[case::dot_at_edge("asha@.com", false)]
    #[case::whitespace("asha @example.com", false)]
    fn email_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(email(value).is_ok(), ok);
    }

    #[rstest]
    #[case::male("Male", true)]
    #[case::female("female", true)]
    #[case::other("OTHER", true)]
    #[case::unknown("unknown", false)]
    fn gender_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(gender(value).is_ok(), ok);
    }

    #[rstest]
    #[case::valid("BR01", true)]
    #[case::short("BR", false)]
    #[case::long("BRANCH001", false)]
    #[case::symbols("BR-1", false)]
    fn branch_code_format(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(branch_code(value).is_ok(), ok);
    }
}
