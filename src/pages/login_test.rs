use super::*;

#[test]
fn validate_credentials_trims_email() {
    assert_eq!(
        validate_credentials("  user@example.com  ", "pw"),
        Ok(Credentials { email: "user@example.com".to_owned(), password: "pw".to_owned() })
    );
}

#[test]
fn validate_credentials_keeps_password_whitespace() {
    let credentials = validate_credentials("a@b.com", " pw ").unwrap();
    assert_eq!(credentials.password, " pw ");
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("   ", "pw"), Err(MISSING_FIELDS_MESSAGE));
    assert_eq!(validate_credentials("a@b.com", ""), Err(MISSING_FIELDS_MESSAGE));
}
