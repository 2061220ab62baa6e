use super::*;
use crate::net::types::User;
use crate::state::auth::AuthStatus;
use std::cell::RefCell;
use std::rc::Rc;

fn user() -> User {
    User { email: "a@b.com".to_owned(), permissions: vec![], roles: vec!["editor".to_owned()] }
}

#[test]
fn should_redirect_unauth_when_settled_and_user_missing() {
    let state = AuthState { user: None, status: AuthStatus::Unauthenticated };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_restoring() {
    let state = AuthState { user: None, status: AuthStatus::Restoring };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = AuthState { user: Some(user()), status: AuthStatus::Authenticated };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn closures_act_as_navigators() {
    let visited = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = visited.clone();
    let navigator = move |path: &str| sink.borrow_mut().push(path.to_owned());
    navigator.navigate("/dashboard");
    Navigator::navigate(&navigator, "/");
    assert_eq!(*visited.borrow(), vec!["/dashboard".to_owned(), "/".to_owned()]);
}
