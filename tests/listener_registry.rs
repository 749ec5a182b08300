//! Integration tests for event fan-out: registration identity, delivery
//! order, decode-failure tolerance, and deregistration.

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::{wait_for, MockEngine, RecordingHandler};
use serde_json::json;
use rtc_client_core::engine::EventEnvelope;
use rtc_client_core::{
    ClientBuilder, EventKind, EventPayload, RtcClient, RtcEventHandler,
};

async fn build_client(engine: Arc<MockEngine>) -> Arc<RtcClient> {
    common::init_tracing();
    ClientBuilder::new()
        .engine(engine)
        .build()
        .await
        .unwrap()
}

fn remote_enter_event(user_id: &str) -> EventEnvelope {
    EventEnvelope::structured(
        EventKind::RemoteUserEntered,
        json!({ "userId": user_id }),
    )
}

#[tokio::test]
async fn registered_handler_receives_decoded_events() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let handler = RecordingHandler::new();
    client.register_listener(handler.clone());

    engine.emit(remote_enter_event("bob"));
    assert!(wait_for(|| handler.event_count() == 1).await);

    let events = handler.events();
    assert_eq!(events[0].0, EventKind::RemoteUserEntered);
    match &events[0].1 {
        Some(EventPayload::RemoteUserEntered(info)) => assert_eq!(info.user_id, "bob"),
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn duplicate_registration_delivers_once() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let handler = RecordingHandler::new();

    let first = client.register_listener(handler.clone());
    let second = client.register_listener(handler.clone());
    assert_eq!(first.token(), second.token());

    engine.emit(remote_enter_event("bob"));
    assert!(wait_for(|| handler.event_count() >= 1).await);

    // Give a second delivery a chance to happen before asserting it did not.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(handler.event_count(), 1);
}

#[tokio::test]
async fn unregister_stops_delivery() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let handler = RecordingHandler::new();
    let keep = RecordingHandler::new();

    client.register_listener(handler.clone());
    client.register_listener(keep.clone());
    client.unregister_listener(&(handler.clone() as Arc<dyn RtcEventHandler>));

    engine.emit(remote_enter_event("bob"));
    assert!(wait_for(|| keep.event_count() == 1).await);
    assert_eq!(handler.event_count(), 0);
}

#[tokio::test]
async fn unregister_all_silences_every_handler() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let first = RecordingHandler::new();
    let second = RecordingHandler::new();

    client.register_listener(first.clone());
    client.register_listener(second.clone());
    client.unregister_all_listeners();

    engine.emit(remote_enter_event("bob"));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(first.event_count(), 0);
    assert_eq!(second.event_count(), 0);
}

#[tokio::test]
async fn handle_remove_detaches_only_its_own_subscription() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let removed = RecordingHandler::new();
    let kept = RecordingHandler::new();

    let handle = client.register_listener(removed.clone());
    client.register_listener(kept.clone());
    handle.remove();

    engine.emit(remote_enter_event("bob"));
    assert!(wait_for(|| kept.event_count() == 1).await);
    assert_eq!(removed.event_count(), 0);
}

#[tokio::test]
async fn malformed_text_payload_is_delivered_empty_not_fatal() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let handler = RecordingHandler::new();
    client.register_listener(handler.clone());

    // Unparseable text: the kind is still delivered, with no payload, and
    // the stream survives.
    engine.emit(EventEnvelope::text(EventKind::RemoteUserEntered, "{not json"));
    engine.emit(remote_enter_event("carol"));

    assert!(wait_for(|| handler.event_count() == 2).await);
    let events = handler.events();
    assert_eq!(events[0].0, EventKind::RemoteUserEntered);
    assert!(events[0].1.is_none());
    match &events[1].1 {
        Some(EventPayload::RemoteUserEntered(info)) => assert_eq!(info.user_id, "carol"),
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn schema_mismatch_delivers_the_kind_with_no_payload() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let handler = RecordingHandler::new();
    client.register_listener(handler.clone());

    // Parseable value that does not match the kind's schema.
    engine.emit(EventEnvelope::structured(
        EventKind::RemoteUserEntered,
        json!({ "unrelated": true }),
    ));

    assert!(wait_for(|| handler.event_count() == 1).await);
    let events = handler.events();
    assert_eq!(events[0].0, EventKind::RemoteUserEntered);
    assert!(events[0].1.is_none());
}

#[tokio::test]
async fn textual_payloads_decode_like_structured_ones() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let handler = RecordingHandler::new();
    client.register_listener(handler.clone());

    engine.emit(EventEnvelope::text(
        EventKind::RoomEntered,
        r#"{"result":650}"#,
    ));

    assert!(wait_for(|| handler.event_count() == 1).await);
    let events = handler.events();
    match &events[0].1 {
        Some(EventPayload::RoomEntered(entry)) => assert_eq!(entry.result, 650),
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn delivery_follows_registration_order() {
    struct OrderedHandler {
        tag: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl RtcEventHandler for OrderedHandler {
        async fn on_event(&self, _kind: EventKind, _payload: Option<EventPayload>) {
            self.log.lock().unwrap().push(self.tag);
        }
    }

    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let log = Arc::new(Mutex::new(Vec::new()));

    for tag in ["first", "second", "third"] {
        client.register_listener(Arc::new(OrderedHandler {
            tag,
            log: Arc::clone(&log),
        }));
    }

    engine.emit(remote_enter_event("bob"));
    engine.emit(remote_enter_event("carol"));

    assert!(wait_for(|| log.lock().unwrap().len() == 6).await);
    assert_eq!(
        *log.lock().unwrap(),
        vec!["first", "second", "third", "first", "second", "third"]
    );
}
