//! Login page: email + password form delegating to `AuthController::sign_in`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::components::auth_provider::AuthHandle;
use crate::net::types::Credentials;

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Enter both email and password.";

/// Trim the email and require both fields. The password is sent as typed.
pub(crate) fn validate_credentials(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS_MESSAGE);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let controller = expect_context::<AuthHandle>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let controller = controller.get_value();
        leptos::task::spawn_local(async move {
            // On success the controller navigates away and these signals may be disposed.
            if let Err(err) = controller.sign_in(credentials).await {
                let _ = info.try_set(err.user_message());
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <input
                    class="login-input"
                    type="email"
                    autocomplete="username"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="login-input"
                    type="password"
                    autocomplete="current-password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Sign in"
                </button>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </form>
        </div>
    }
}
