//! Same-origin cross-tab notification channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! A logout in one tab must send every other tab back to the landing route.
//! The browser `BroadcastChannel` gives one-to-many delivery with no echo to
//! the sender; `LocalChannelHub` reproduces those semantics in-process for
//! SSR and tests.
//!
//! LIFECYCLE
//! =========
//! The app shell opens one channel at startup and hands it to the auth
//! provider. Each `subscribe` returns a [`Subscription`] guard; dropping it
//! detaches the handler.

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod broadcast_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Payloads understood on the auth channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMessage {
    Logout,
}

impl AuthMessage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logout => "logout",
        }
    }

    /// Decode a raw payload. Unknown payloads yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "logout" => Some(Self::Logout),
            _ => None,
        }
    }
}

/// Handler invoked with each raw payload posted by another endpoint.
pub type MessageHandler = Rc<dyn Fn(&str)>;

/// A named broadcast channel shared by all tabs of the origin.
pub trait AuthChannel {
    fn name(&self) -> &str;

    /// Deliver `payload` to every other subscriber of the same channel name.
    fn post(&self, payload: &str);

    /// Attach `handler`. The handler stays attached until the guard drops.
    fn subscribe(&self, handler: MessageHandler) -> Subscription;
}

/// Guard that detaches a channel handler when dropped.
#[must_use = "dropping a Subscription detaches its handler immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Detach now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.release.is_some()).finish()
    }
}

// =============================================================================
// IN-PROCESS HUB
// =============================================================================

struct HubSubscriber {
    id: u64,
    endpoint: u64,
    channel: String,
    handler: MessageHandler,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<HubSubscriber>,
}

impl HubInner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process stand-in for the browser's origin-wide channel registry.
/// Each [`LocalChannel`] opened from one hub behaves like a separate tab.
#[derive(Clone, Default)]
pub struct LocalChannelHub {
    inner: Rc<RefCell<HubInner>>,
}

impl LocalChannelHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new endpoint on channel `name`.
    pub fn open(&self, name: &str) -> LocalChannel {
        let endpoint = self.inner.borrow_mut().next_id();
        LocalChannel { hub: self.clone(), name: name.to_owned(), endpoint }
    }

    /// Number of live handlers across all channels.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// One endpoint of a [`LocalChannelHub`].
#[derive(Clone)]
pub struct LocalChannel {
    hub: LocalChannelHub,
    name: String,
    endpoint: u64,
}

impl AuthChannel for LocalChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn post(&self, payload: &str) {
        // Snapshot handlers so they can subscribe/unsubscribe while running.
        let targets: Vec<MessageHandler> = self
            .hub
            .inner
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.channel == self.name && s.endpoint != self.endpoint)
            .map(|s| s.handler.clone())
            .collect();
        for handler in targets {
            handler(payload);
        }
    }

    fn subscribe(&self, handler: MessageHandler) -> Subscription {
        let id = {
            let mut inner = self.hub.inner.borrow_mut();
            let id = inner.next_id();
            inner.subscribers.push(HubSubscriber { id, endpoint: self.endpoint, channel: self.name.clone(), handler });
            id
        };
        let hub = Rc::downgrade(&self.hub.inner);
        Subscription::new(move || {
            if let Some(inner) = hub.upgrade() {
                inner.borrow_mut().subscribers.retain(|s| s.id != id);
            }
        })
    }
}

// =============================================================================
// BROWSER CHANNEL
// =============================================================================

/// `BroadcastChannel`-backed channel. Requires a browser environment.
#[cfg(feature = "hydrate")]
#[derive(Clone)]
pub struct BrowserChannel {
    name: String,
    inner: web_sys::BroadcastChannel,
}

#[cfg(feature = "hydrate")]
impl BrowserChannel {
    /// Open channel `name`. Returns `None` when the browser lacks `BroadcastChannel`.
    pub fn open(name: &str) -> Option<Self> {
        let inner = web_sys::BroadcastChannel::new(name).ok()?;
        Some(Self { name: name.to_owned(), inner })
    }
}

#[cfg(feature = "hydrate")]
impl AuthChannel for BrowserChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn post(&self, payload: &str) {
        let _ = self.inner.post_message(&wasm_bindgen::JsValue::from_str(payload));
    }

    fn subscribe(&self, handler: MessageHandler) -> Subscription {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
            if let Some(payload) = ev.data().as_string() {
                handler(&payload);
            }
        });
        let _ = self
            .inner
            .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref());

        let channel = self.inner.clone();
        Subscription::new(move || {
            let _ = channel.remove_event_listener_with_callback("message", on_message.as_ref().unchecked_ref());
        })
    }
}

/// Open the auth channel for this environment: the browser channel when
/// hydrated, otherwise an isolated in-process endpoint.
pub fn open_auth_channel(name: &str) -> Rc<dyn AuthChannel> {
    #[cfg(feature = "hydrate")]
    {
        if let Some(channel) = BrowserChannel::open(name) {
            return Rc::new(channel);
        }
        log::warn!("BroadcastChannel unavailable; logout will not propagate across tabs");
    }
    Rc::new(LocalChannelHub::new().open(name))
}
