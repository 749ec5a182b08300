//! Integration tests for the room session state machine: enter/exit
//! pairing, rejection of concurrent lifecycle calls, the sign-overloaded
//! entry completion, and room switching.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::MockEngine;
use rtc_client_core::engine::{
    EngineBinding, EngineError, EngineResult, EventEnvelope, WireCall,
};
use serde_json::Value;
use tokio::sync::{mpsc, Notify};
use tokio_test::assert_ok;
use rtc_client_core::{
    ClientBuilder, ClientError, Role, RoomEntryParams, RoomIdentifier, RtcClient, Scene,
    SessionState, SwitchRoomConfig,
};

async fn build_client(engine: Arc<MockEngine>) -> Arc<RtcClient> {
    common::init_tracing();
    ClientBuilder::new()
        .engine(engine)
        .build()
        .await
        .unwrap()
}

fn entry_params() -> RoomEntryParams {
    RoomEntryParams::new(1400000001, "alice", "sig-token", RoomIdentifier::Numeric(100))
}

#[tokio::test]
async fn successful_entry_reaches_in_room() {
    let engine = MockEngine::new();
    engine.script_enter_result(820);
    let client = build_client(Arc::clone(&engine)).await;

    let result = client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    assert_eq!(result, 820);
    assert_eq!(client.state().await, SessionState::InRoom);

    let session = client.session().await;
    assert_eq!(session.room, Some(RoomIdentifier::Numeric(100)));
    assert_eq!(session.scene, Some(Scene::VideoCall));
    assert!(session.entered_at.is_some());
}

#[tokio::test]
async fn entry_while_in_room_is_rejected_without_engine_call() {
    let engine = MockEngine::new();
    engine.script_enter_result(500);
    let client = build_client(Arc::clone(&engine)).await;

    client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    let calls_before = engine.call_count();

    let second = client.enter_room(entry_params(), Scene::VideoCall).await;
    assert!(matches!(second, Err(ClientError::InvalidState { .. })));
    assert_eq!(client.state().await, SessionState::InRoom);
    assert_eq!(engine.call_count(), calls_before);
}

#[tokio::test]
async fn negative_completion_is_a_value_and_returns_to_idle() {
    let engine = MockEngine::new();
    engine.script_enter_result(-3301);
    let client = build_client(Arc::clone(&engine)).await;

    let result = client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    assert_eq!(result, -3301);
    assert_eq!(client.state().await, SessionState::Idle);
    assert_eq!(client.session().await.room, None);
}

#[tokio::test]
async fn exit_while_idle_is_a_silent_no_op() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;
    let calls_before = engine.call_count();

    client.exit_room().await.unwrap();
    assert_eq!(client.state().await, SessionState::Idle);
    // No engine call was made for the no-op exit.
    assert_eq!(engine.call_count(), calls_before);
}

#[tokio::test]
async fn full_cycle_enter_exit_reenter() {
    let engine = MockEngine::new();
    engine.script_enter_result(640);
    let client = build_client(Arc::clone(&engine)).await;

    client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    assert_eq!(client.state().await, SessionState::InRoom);

    assert_ok!(client.exit_room().await);
    assert_eq!(client.state().await, SessionState::Idle);
    assert_eq!(client.session().await.room, None);

    // The cycle permits a fresh entry after exit completes.
    let result = client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    assert_eq!(result, 640);
    assert_eq!(client.state().await, SessionState::InRoom);
}

#[tokio::test]
async fn switch_room_requires_membership() {
    let engine = MockEngine::new();
    let client = build_client(Arc::clone(&engine)).await;

    let config = SwitchRoomConfig::new(RoomIdentifier::Numeric(200));
    let result = client.switch_room(config).await;
    assert!(matches!(result, Err(ClientError::InvalidState { .. })));
    assert!(!engine.calls().contains(&"switchRoom".to_owned()));
}

#[tokio::test]
async fn switch_room_moves_the_session_to_the_new_room() {
    let engine = MockEngine::new();
    engine.script_enter_result(500);
    let client = build_client(Arc::clone(&engine)).await;

    client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    client
        .switch_room(SwitchRoomConfig::new(RoomIdentifier::Numeric(200)))
        .await
        .unwrap();

    assert_eq!(client.state().await, SessionState::InRoom);
    assert_eq!(client.session().await.room, Some(RoomIdentifier::Numeric(200)));
}

#[tokio::test]
async fn failed_switch_keeps_the_original_room() {
    let engine = MockEngine::new();
    engine.script_enter_result(500);
    let client = build_client(Arc::clone(&engine)).await;

    client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    engine.script_switch_error(EngineError::rejected(-100013, "switch refused"));

    let result = client
        .switch_room(SwitchRoomConfig::new(RoomIdentifier::Text("lobby".into())))
        .await;
    assert!(matches!(result, Err(ClientError::Engine { .. })));
    assert_eq!(client.state().await, SessionState::InRoom);
    assert_eq!(client.session().await.room, Some(RoomIdentifier::Numeric(100)));
}

#[tokio::test]
async fn role_switch_requires_membership_and_updates_the_session() {
    let engine = MockEngine::new();
    engine.script_enter_result(500);
    let client = build_client(Arc::clone(&engine)).await;

    let denied = client.switch_role(Role::Audience).await;
    assert!(matches!(denied, Err(ClientError::InvalidState { .. })));

    let params = entry_params().with_role(Role::Anchor);
    client.enter_room(params, Scene::Live).await.unwrap();
    assert_eq!(client.session().await.role, Some(Role::Anchor));

    client.switch_role(Role::Audience).await.unwrap();
    assert_eq!(client.session().await.role, Some(Role::Audience));
}

#[tokio::test]
async fn relay_operations_require_membership() {
    let engine = MockEngine::new();
    engine.script_enter_result(500);
    let client = build_client(Arc::clone(&engine)).await;

    let connect = client.connect_other_room(r#"{"roomId":300,"userId":"bob"}"#).await;
    assert!(matches!(connect, Err(ClientError::InvalidState { .. })));
    let disconnect = client.disconnect_other_room().await;
    assert!(matches!(disconnect, Err(ClientError::InvalidState { .. })));
    assert_eq!(client.state().await, SessionState::Idle);

    client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    client
        .connect_other_room(r#"{"roomId":300,"userId":"bob"}"#)
        .await
        .unwrap();
    client.disconnect_other_room().await.unwrap();

    // Relay operations never move the lifecycle state.
    assert_eq!(client.state().await, SessionState::InRoom);
    assert!(engine.calls().contains(&"connectOtherRoom".to_owned()));
    assert!(engine.calls().contains(&"disconnectOtherRoom".to_owned()));
}

#[tokio::test]
async fn room_identity_does_not_leak_across_cycles() {
    let engine = MockEngine::new();
    engine.script_enter_result(700);
    let client = build_client(Arc::clone(&engine)).await;

    let params = RoomEntryParams::new(1, "alice", "sig", RoomIdentifier::Text("warmup".into()));
    client.enter_room(params, Scene::AudioCall).await.unwrap();
    assert_eq!(
        client.session().await.room,
        Some(RoomIdentifier::Text("warmup".into()))
    );

    client.exit_room().await.unwrap();
    client.enter_room(entry_params(), Scene::VideoCall).await.unwrap();
    assert_eq!(client.session().await.room, Some(RoomIdentifier::Numeric(100)));
}

/// Engine whose room entry stalls until the test releases it, making the
/// `Entering` state observable from outside.
struct GatedEngine {
    gate: Notify,
}

impl GatedEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self { gate: Notify::new() })
    }

    fn complete_entry(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl EngineBinding for GatedEngine {
    async fn acquire(&self) -> EngineResult<()> {
        Ok(())
    }

    async fn release(&self) -> EngineResult<()> {
        Ok(())
    }

    async fn enter_room(&self, _args: Value, _scene: Scene) -> EngineResult<i64> {
        self.gate.notified().await;
        Ok(800)
    }

    async fn exit_room(&self) -> EngineResult<()> {
        Ok(())
    }

    async fn switch_room(&self, _args: Value) -> EngineResult<()> {
        Ok(())
    }

    async fn switch_role(&self, _args: Value) -> EngineResult<()> {
        Ok(())
    }

    async fn connect_other_room(&self, _args: Value) -> EngineResult<()> {
        Ok(())
    }

    async fn disconnect_other_room(&self) -> EngineResult<()> {
        Ok(())
    }

    async fn command(&self, _call: WireCall) -> EngineResult<Value> {
        Ok(Value::Null)
    }

    fn notifications(&self) -> mpsc::UnboundedReceiver<EventEnvelope> {
        mpsc::unbounded_channel().1
    }
}

#[tokio::test]
async fn exit_during_entry_wins_over_late_completion() {
    common::init_tracing();
    let engine = GatedEngine::new();
    let client = ClientBuilder::new()
        .engine(engine.clone())
        .build()
        .await
        .unwrap();

    let entry = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.enter_room(entry_params(), Scene::VideoCall).await }
    });

    let mut entering = false;
    for _ in 0..100 {
        if client.state().await == SessionState::Entering {
            entering = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(entering, "entry never became observable");

    client.exit_room().await.unwrap();
    assert_eq!(client.state().await, SessionState::Idle);

    // Release the stalled entry; its positive completion arrives after the
    // exit and must not resurrect the session.
    engine.complete_entry();
    let result = entry.await.unwrap().unwrap();
    assert_eq!(result, 800);
    assert_eq!(client.state().await, SessionState::Idle);
    assert_eq!(client.session().await.room, None);
}
