//! Shared test infrastructure: a scriptable mock engine and a recording
//! event handler.

// Each integration suite compiles this module separately and uses a
// different slice of it.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use rtc_client_core::engine::{
    EngineBinding, EngineError, EngineResult, EventEnvelope, WireCall,
};
use rtc_client_core::{EventKind, EventPayload, RtcEventHandler};

/// Scriptable engine stub.
///
/// Records the name of every call crossing the boundary, answers commands
/// from a reply table, and exposes the notification sender so tests can
/// emit events as the engine would.
pub struct MockEngine {
    calls: Mutex<Vec<String>>,
    replies: Mutex<HashMap<&'static str, Value>>,
    enter_result: Mutex<i64>,
    switch_error: Mutex<Option<EngineError>>,
    sender: mpsc::UnboundedSender<EventEnvelope>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<EventEnvelope>>>,
}

impl MockEngine {
    pub fn new() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            replies: Mutex::new(HashMap::new()),
            enter_result: Mutex::new(0),
            switch_error: Mutex::new(None),
            sender: tx,
            receiver: Mutex::new(Some(rx)),
        })
    }

    /// Script the completion value of the next `enterRoom` call. Positive
    /// values model elapsed milliseconds, negative values entry error codes.
    pub fn script_enter_result(&self, result: i64) {
        *self.enter_result.lock().unwrap() = result;
    }

    /// Script the next `switchRoom` call to fail.
    pub fn script_switch_error(&self, error: EngineError) {
        *self.switch_error.lock().unwrap() = Some(error);
    }

    /// Script a reply for a named command.
    pub fn reply_with(&self, method: &'static str, value: Value) {
        self.replies.lock().unwrap().insert(method, value);
    }

    /// Emit a notification as the engine would.
    pub fn emit(&self, envelope: EventEnvelope) {
        let _ = self.sender.send(envelope);
    }

    /// Names of every call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_owned());
    }
}

#[async_trait]
impl EngineBinding for MockEngine {
    async fn acquire(&self) -> EngineResult<()> {
        self.record("acquire");
        Ok(())
    }

    async fn release(&self) -> EngineResult<()> {
        self.record("release");
        Ok(())
    }

    async fn enter_room(
        &self,
        _args: Value,
        _scene: rtc_client_core::Scene,
    ) -> EngineResult<i64> {
        self.record("enterRoom");
        Ok(*self.enter_result.lock().unwrap())
    }

    async fn exit_room(&self) -> EngineResult<()> {
        self.record("exitRoom");
        Ok(())
    }

    async fn switch_room(&self, _args: Value) -> EngineResult<()> {
        self.record("switchRoom");
        match self.switch_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn switch_role(&self, _args: Value) -> EngineResult<()> {
        self.record("switchRole");
        Ok(())
    }

    async fn connect_other_room(&self, _args: Value) -> EngineResult<()> {
        self.record("connectOtherRoom");
        Ok(())
    }

    async fn disconnect_other_room(&self) -> EngineResult<()> {
        self.record("disconnectOtherRoom");
        Ok(())
    }

    async fn command(&self, call: WireCall) -> EngineResult<Value> {
        self.record(call.method);
        match self.replies.lock().unwrap().get(call.method) {
            Some(value) => Ok(value.clone()),
            None => Ok(Value::Null),
        }
    }

    fn notifications(&self) -> mpsc::UnboundedReceiver<EventEnvelope> {
        self.receiver
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| mpsc::unbounded_channel().1)
    }
}

/// Handler that records every delivered event.
#[derive(Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<(EventKind, Option<EventPayload>)>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<(EventKind, Option<EventPayload>)> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl RtcEventHandler for RecordingHandler {
    async fn on_event(&self, kind: EventKind, payload: Option<EventPayload>) {
        self.events.lock().unwrap().push((kind, payload));
    }
}

/// Install a log subscriber for the test binary; safe to call repeatedly.
/// Run with `RUST_LOG=rtc_client_core=debug` to see bridge activity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Poll until `predicate` holds or roughly a second has passed.
pub async fn wait_for<F: Fn() -> bool>(predicate: F) -> bool {
    for _ in 0..100 {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    predicate()
}
