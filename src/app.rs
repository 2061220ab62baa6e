//! Root application component with routing and the auth provider.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_provider::AuthProvider;
use crate::config::AuthConfig;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::util::broadcast::{AuthChannel, open_auth_channel};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Opens the cross-tab auth channel once for the lifetime of the app and
/// mounts the auth provider inside the router so it can navigate.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AuthConfig::from_build_env();
    let channel: StoredValue<Rc<dyn AuthChannel>, LocalStorage> =
        StoredValue::new_local(open_auth_channel(&config.channel_name));

    view! {
        <Stylesheet id="leptos" href="/pkg/auth-client.css"/>
        <Title text="Sign in"/>

        <Router>
            <AuthProvider channel config>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=LoginPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                </Routes>
            </AuthProvider>
        </Router>
    }
}
