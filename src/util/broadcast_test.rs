use super::*;
use std::cell::RefCell;

fn recorder() -> (Rc<RefCell<Vec<String>>>, MessageHandler) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let handler: MessageHandler = Rc::new(move |payload: &str| sink.borrow_mut().push(payload.to_owned()));
    (seen, handler)
}

// =============================================================
// AuthMessage
// =============================================================

#[test]
fn auth_message_logout_wire_value() {
    assert_eq!(AuthMessage::Logout.as_str(), "logout");
    assert_eq!(AuthMessage::parse("logout"), Some(AuthMessage::Logout));
}

#[test]
fn auth_message_unknown_payload_is_none() {
    assert_eq!(AuthMessage::parse("login"), None);
    assert_eq!(AuthMessage::parse(""), None);
    assert_eq!(AuthMessage::parse("LOGOUT"), None);
}

// =============================================================
// LocalChannelHub delivery
// =============================================================

#[test]
fn post_reaches_other_endpoints_not_sender() {
    let hub = LocalChannelHub::new();
    let tab_a = hub.open("auth");
    let tab_b = hub.open("auth");
    let (seen_a, handler_a) = recorder();
    let (seen_b, handler_b) = recorder();
    let _sub_a = tab_a.subscribe(handler_a);
    let _sub_b = tab_b.subscribe(handler_b);

    tab_a.post("logout");

    assert!(seen_a.borrow().is_empty());
    assert_eq!(*seen_b.borrow(), vec!["logout".to_owned()]);
}

#[test]
fn post_is_scoped_to_channel_name() {
    let hub = LocalChannelHub::new();
    let auth = hub.open("auth");
    let other = hub.open("presence");
    let (seen, handler) = recorder();
    let _sub = other.subscribe(handler);

    auth.post("logout");

    assert!(seen.borrow().is_empty());
}

#[test]
fn post_fans_out_to_every_other_tab() {
    let hub = LocalChannelHub::new();
    let sender = hub.open("auth");
    let tabs: Vec<_> = (0..3).map(|_| hub.open("auth")).collect();
    let recorders: Vec<_> = tabs.iter().map(|_| recorder()).collect();
    let _subs: Vec<_> = tabs.iter().zip(&recorders).map(|(tab, (_, handler))| tab.subscribe(handler.clone())).collect();

    sender.post("logout");

    for (seen, _) in &recorders {
        assert_eq!(seen.borrow().len(), 1);
    }
}

#[test]
fn dropping_subscription_detaches_handler() {
    let hub = LocalChannelHub::new();
    let tab_a = hub.open("auth");
    let tab_b = hub.open("auth");
    let (seen, handler) = recorder();
    let sub = tab_b.subscribe(handler);
    assert_eq!(hub.subscriber_count(), 1);

    drop(sub);
    tab_a.post("logout");

    assert_eq!(hub.subscriber_count(), 0);
    assert!(seen.borrow().is_empty());
}

#[test]
fn unsubscribe_is_equivalent_to_drop() {
    let hub = LocalChannelHub::new();
    let tab = hub.open("auth");
    let (_, handler) = recorder();
    tab.subscribe(handler).unsubscribe();
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn subscription_outliving_hub_drops_cleanly() {
    let (_, handler) = recorder();
    let sub = {
        let hub = LocalChannelHub::new();
        let tab = hub.open("auth");
        tab.subscribe(handler)
    };
    drop(sub);
}

#[test]
fn handler_may_unsubscribe_during_delivery() {
    let hub = LocalChannelHub::new();
    let tab_a = hub.open("auth");
    let tab_b = hub.open("auth");
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let slot_in_handler = slot.clone();
    let sub = tab_b.subscribe(Rc::new(move |_payload: &str| {
        slot_in_handler.borrow_mut().take();
    }));
    *slot.borrow_mut() = Some(sub);

    tab_a.post("logout");

    assert_eq!(hub.subscriber_count(), 0);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn open_auth_channel_outside_browser_is_isolated() {
    let channel = open_auth_channel("auth");
    assert_eq!(channel.name(), "auth");
    channel.post("logout");
}
