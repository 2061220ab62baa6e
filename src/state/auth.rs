//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthController` is the single writer of [`AuthState`]. The Leptos
//! provider mirrors every change into an `RwSignal<AuthState>` so route guards
//! and user-aware components render from context.
//!
//! STATE MACHINE
//! =============
//! `Unauthenticated` -> `Restoring` (persisted token, awaiting `/me`) ->
//! `Authenticated`; `sign_out` returns to `Unauthenticated` from anywhere.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded. Every committed transition bumps an epoch; an in-flight
//! restore that observes a different epoch when `/me` answers drops the
//! result instead of overwriting newer state. A pending sign-in is only
//! cancelled by an explicit `sign_out`, tracked by a separate sign-out epoch,
//! so a failed restore cannot discard a login the backend accepted. Only one
//! sign-in request may be pending at a time.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::net::api::{AuthApi, bearer};
use crate::net::types::{Credentials, SessionResponse, User};
use crate::util::auth::Navigator;
use crate::util::broadcast::{AuthChannel, AuthMessage, Subscription};
use crate::util::cookies::{CookieOptions, SessionStore};

/// Coarse session status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Unauthenticated,
    /// A persisted token exists and `/me` has not answered yet.
    Restoring,
    Authenticated,
}

/// Authentication state tracking the current user and restore status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub status: AuthStatus,
}

impl AuthState {
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user), status: AuthStatus::Authenticated }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.status == AuthStatus::Restoring
    }
}

/// Result of a mount-time session restore.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// No persisted access token; nothing was requested.
    NoSession,
    Restored(User),
    /// `/me` failed and the session was signed out.
    Failed(AuthError),
    /// A sign-in or sign-out landed first; the response was dropped.
    Superseded,
}

type StateObserver = Rc<dyn Fn(&AuthState)>;

struct Inner {
    config: AuthConfig,
    api: Rc<dyn AuthApi>,
    store: Rc<dyn SessionStore>,
    channel: Rc<dyn AuthChannel>,
    navigator: Rc<dyn Navigator>,
    state: RefCell<AuthState>,
    epoch: Cell<u64>,
    signout_epoch: Cell<u64>,
    sign_in_pending: Cell<bool>,
    observers: RefCell<Vec<StateObserver>>,
}

/// Clears the single-flight flag when the sign-in future finishes or is dropped.
struct PendingFlag<'a>(&'a Cell<bool>);

impl Drop for PendingFlag<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Owner of the session state machine. Cloning shares the same session.
#[derive(Clone)]
pub struct AuthController {
    inner: Rc<Inner>,
}

impl fmt::Debug for AuthController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthController")
            .field("state", &*self.inner.state.borrow())
            .field("epoch", &self.inner.epoch.get())
            .field("signout_epoch", &self.inner.signout_epoch.get())
            .field("sign_in_pending", &self.inner.sign_in_pending.get())
            .finish_non_exhaustive()
    }
}

impl AuthController {
    pub fn new(
        config: AuthConfig,
        api: Rc<dyn AuthApi>,
        store: Rc<dyn SessionStore>,
        channel: Rc<dyn AuthChannel>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                api,
                store,
                channel,
                navigator,
                state: RefCell::new(AuthState::default()),
                epoch: Cell::new(0),
                signout_epoch: Cell::new(0),
                sign_in_pending: Cell::new(false),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.inner.config
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_sign_in_pending(&self) -> bool {
        self.inner.sign_in_pending.get()
    }

    /// Register `observer` to receive every subsequent state change.
    pub fn on_change(&self, observer: impl Fn(&AuthState) + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Persisted access token, read from the store at call time.
    pub fn access_token(&self) -> Option<String> {
        self.inner.store.get(&self.inner.config.access_token_cookie)
    }

    /// Persisted refresh token. Opaque; nothing here exchanges it.
    pub fn refresh_token(&self) -> Option<String> {
        self.inner.store.get(&self.inner.config.refresh_token_cookie)
    }

    /// `Authorization` header value for further API calls, if signed in.
    pub fn authorization(&self) -> Option<String> {
        self.access_token().map(|token| bearer(&token))
    }

    /// Re-establish the session from the persisted access token.
    ///
    /// The token check and the move to `Restoring` happen before this returns;
    /// the returned future performs the `/me` request.
    pub fn restore(&self) -> impl Future<Output = RestoreOutcome> + use<> {
        let token = self.access_token();
        if token.as_deref() == Some("") {
            log::debug!("discarding empty persisted session");
            self.destroy_tokens();
        }
        let pending = token.filter(|token| !token.is_empty()).map(|token| {
            let current = self.state();
            if current.user.is_none() {
                self.apply(AuthState { user: None, status: AuthStatus::Restoring });
            }
            (token, self.inner.epoch.get())
        });
        let this = self.clone();
        async move {
            let Some((token, epoch)) = pending else {
                log::debug!("no persisted session");
                return RestoreOutcome::NoSession;
            };
            let result = this.inner.api.me(&token).await;
            if this.inner.epoch.get() != epoch {
                log::debug!("dropping superseded session restore");
                return RestoreOutcome::Superseded;
            }
            match result {
                Ok(user) => {
                    log::info!("session restored for {}", user.email);
                    this.commit(AuthState::authenticated(user.clone()));
                    RestoreOutcome::Restored(user)
                }
                Err(err) => {
                    log::warn!("session restore failed: {err}");
                    this.end_session();
                    RestoreOutcome::Failed(err.into())
                }
            }
        }
    }

    /// Exchange credentials for a session, persist the tokens, and navigate
    /// to the authenticated route.
    ///
    /// # Errors
    ///
    /// - [`AuthError::SignInPending`] if another sign-in has not finished.
    /// - [`AuthError::Api`] if the backend rejects the request; state is unchanged.
    /// - [`AuthError::Superseded`] if `sign_out` ran while the request was pending.
    pub async fn sign_in(&self, credentials: Credentials) -> Result<User, AuthError> {
        if self.inner.sign_in_pending.replace(true) {
            log::debug!("ignoring sign-in while another is pending");
            return Err(AuthError::SignInPending);
        }
        let _pending = PendingFlag(&self.inner.sign_in_pending);
        let epoch = self.inner.signout_epoch.get();

        let result = self.inner.api.create_session(&credentials).await;
        if self.inner.signout_epoch.get() != epoch {
            log::debug!("dropping sign-in response after sign-out");
            return Err(AuthError::Superseded);
        }
        let session = result.map_err(|err| {
            log::warn!("sign-in failed for {}: {err}", credentials.email);
            AuthError::from(err)
        })?;

        self.persist_tokens(&session);
        let user = session.user_for(&credentials.email);
        self.commit(AuthState::authenticated(user.clone()));
        log::info!("signed in as {}", user.email);
        self.inner.navigator.navigate(&self.inner.config.authenticated_route);
        Ok(user)
    }

    /// Clear the persisted tokens and in-memory user, tell other tabs, and
    /// navigate to the landing route. Safe to call in any state.
    pub fn sign_out(&self) {
        self.inner.signout_epoch.set(self.inner.signout_epoch.get() + 1);
        self.end_session();
    }

    /// React to a raw payload from the cross-tab channel.
    ///
    /// A logout from another tab only navigates; this tab's in-memory user is
    /// left for the landing route to discard.
    pub fn handle_channel_message(&self, payload: &str) {
        match AuthMessage::parse(payload) {
            Some(AuthMessage::Logout) => {
                log::debug!("logout received from another tab");
                self.inner.navigator.navigate(&self.inner.config.landing_route);
            }
            None => log::debug!("ignoring unknown auth channel message: {payload}"),
        }
    }

    /// Subscribe this controller to logout broadcasts until the guard drops.
    pub fn listen_for_logout(&self) -> Subscription {
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        self.inner.channel.subscribe(Rc::new(move |payload: &str| {
            if let Some(inner) = weak.upgrade() {
                AuthController { inner }.handle_channel_message(payload);
            }
        }))
    }

    /// Sign-out teardown without cancelling a pending sign-in.
    fn end_session(&self) {
        self.destroy_tokens();
        self.commit(AuthState::default());
        self.inner.channel.post(AuthMessage::Logout.as_str());
        log::info!("signed out");
        self.inner.navigator.navigate(&self.inner.config.landing_route);
    }

    fn destroy_tokens(&self) {
        let config = &self.inner.config;
        self.inner.store.destroy(&config.access_token_cookie, &config.cookie_path);
        self.inner.store.destroy(&config.refresh_token_cookie, &config.cookie_path);
    }

    fn persist_tokens(&self, session: &SessionResponse) {
        let config = &self.inner.config;
        let options = CookieOptions::persistent(config);
        self.inner.store.set(&config.access_token_cookie, &session.token, &options);
        self.inner.store.set(&config.refresh_token_cookie, &session.refresh_token, &options);
    }

    fn commit(&self, next: AuthState) {
        self.inner.epoch.set(self.inner.epoch.get() + 1);
        self.apply(next);
    }

    fn apply(&self, next: AuthState) {
        *self.inner.state.borrow_mut() = next.clone();
        // Snapshot so observers may register further observers.
        let observers: Vec<StateObserver> = self.inner.observers.borrow().clone();
        for observer in observers {
            observer(&next);
        }
    }
}
