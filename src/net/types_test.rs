use super::*;
use serde_json::json;

#[test]
fn session_response_parses_camel_case_fields() {
    let body = json!({
        "token": "access-1",
        "refreshToken": "refresh-1",
        "permissions": ["users.list", "metrics.list"],
        "roles": ["administrator"]
    });
    let parsed: SessionResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.token, "access-1");
    assert_eq!(parsed.refresh_token, "refresh-1");
    assert_eq!(parsed.permissions, vec!["users.list", "metrics.list"]);
    assert_eq!(parsed.roles, vec!["administrator"]);
}

#[test]
fn roles_accepts_single_string() {
    let user: User = serde_json::from_value(json!({
        "email": "a@b.com",
        "permissions": [],
        "roles": "editor"
    }))
    .unwrap();
    assert_eq!(user.roles, vec!["editor"]);
}

#[test]
fn roles_missing_or_null_is_empty() {
    let missing: User = serde_json::from_value(json!({ "email": "a@b.com" })).unwrap();
    assert!(missing.roles.is_empty());
    assert!(missing.permissions.is_empty());

    let null: User = serde_json::from_value(json!({ "email": "a@b.com", "roles": null })).unwrap();
    assert!(null.roles.is_empty());
}

#[test]
fn session_response_requires_tokens() {
    let result = serde_json::from_value::<SessionResponse>(json!({ "token": "only-access" }));
    assert!(result.is_err());
}

#[test]
fn user_for_uses_submitted_email() {
    let response = SessionResponse {
        token: "t".to_owned(),
        refresh_token: "r".to_owned(),
        permissions: vec!["metrics.list".to_owned()],
        roles: vec!["editor".to_owned()],
    };
    let user = response.user_for("me@example.com");
    assert_eq!(user.email, "me@example.com");
    assert_eq!(user.permissions, vec!["metrics.list"]);
    assert_eq!(user.roles, vec!["editor"]);
}

#[test]
fn credentials_serialize_as_email_and_password() {
    let credentials = Credentials { email: "a@b.com".to_owned(), password: "secret".to_owned() };
    assert_eq!(
        serde_json::to_value(&credentials).unwrap(),
        json!({ "email": "a@b.com", "password": "secret" })
    );
}

#[test]
fn credentials_debug_redacts_password() {
    let credentials = Credentials { email: "a@b.com".to_owned(), password: "secret".to_owned() };
    let rendered = format!("{credentials:?}");
    assert!(rendered.contains("a@b.com"));
    assert!(!rendered.contains("secret"));
}
