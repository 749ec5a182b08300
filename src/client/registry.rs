//! Listener registry bridging engine notifications to application callbacks
//!
//! The engine emits every notification on one shared multiplexed channel.
//! This module de-multiplexes that channel to application-supplied handlers:
//! a single pump task owns the channel receiver, decodes each envelope once
//! through [`ParameterCodec`], and invokes the registered handlers
//! sequentially in registration order.
//!
//! # Contract
//!
//! - The handler reference is the subscription identity: registering the
//!   same `Arc` twice is a no-op that returns a handle to the existing
//!   subscription, so each event is delivered at most once per identity.
//! - Delivery order for one event is registration order; there is no
//!   ordering guarantee across distinct event kinds.
//! - A payload that fails to decode is logged and delivered as `None`; the
//!   pump never terminates because of one malformed payload.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use rtc_client_core::{RtcClient, events::{EventKind, EventPayload, RtcEventHandler}};
//! # use async_trait::async_trait;
//! # struct Logger;
//! # #[async_trait]
//! # impl RtcEventHandler for Logger {
//! #     async fn on_event(&self, kind: EventKind, _payload: Option<EventPayload>) {}
//! # }
//! # async fn example(client: Arc<RtcClient>) {
//! let handler: Arc<dyn RtcEventHandler> = Arc::new(Logger);
//! let handle = client.register_listener(handler.clone());
//!
//! // ... later: remove exactly this subscription
//! handle.remove();
//! # }
//! ```

use std::sync::{Arc, RwLock, Weak};

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::codec::ParameterCodec;
use crate::engine::EventEnvelope;
use crate::events::RtcEventHandler;

/// One tracked subscription
struct Subscriber {
    token: Uuid,
    identity: usize,
    handler: Arc<dyn RtcEventHandler>,
}

struct RegistryInner {
    codec: ParameterCodec,
    /// Ordered; delivery walks this front to back
    subscribers: RwLock<Vec<Subscriber>>,
    /// Handler pointer identity -> subscription token, for dedup lookups
    identities: DashMap<usize, Uuid>,
}

impl RegistryInner {
    fn remove_token(&self, token: Uuid) {
        let mut subscribers = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        if let Some(position) = subscribers.iter().position(|s| s.token == token) {
            let removed = subscribers.remove(position);
            self.identities.remove(&removed.identity);
        }
    }
}

/// Disposer for exactly one subscription
///
/// Removing is idempotent; a handle outliving its registry is a no-op.
pub struct ListenerHandle {
    token: Uuid,
    inner: Weak<RegistryInner>,
}

impl ListenerHandle {
    /// Opaque token identifying this subscription
    pub fn token(&self) -> Uuid {
        self.token
    }

    /// Remove this subscription, and only this one
    pub fn remove(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.remove_token(self.token);
        }
    }
}

/// Identity-keyed registry over the engine's shared notification channel
pub struct ListenerRegistry {
    inner: Arc<RegistryInner>,
    pump: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl ListenerRegistry {
    pub(crate) fn new(codec: ParameterCodec) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                codec,
                subscribers: RwLock::new(Vec::new()),
                identities: DashMap::new(),
            }),
            pump: std::sync::Mutex::new(None),
        }
    }

    /// Attach the engine's notification receiver and start the pump task.
    ///
    /// Called once during client construction; the registry is the channel's
    /// only consumer.
    pub(crate) fn attach(&self, mut notifications: mpsc::UnboundedReceiver<EventEnvelope>) {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            while let Some(envelope) = notifications.recv().await {
                let payload = inner.codec.decode_event(&envelope);

                // Snapshot under the lock, deliver outside it; registration
                // order is preserved and handlers may re-enter the registry.
                let handlers: Vec<Arc<dyn RtcEventHandler>> = {
                    let subscribers =
                        inner.subscribers.read().unwrap_or_else(|e| e.into_inner());
                    subscribers.iter().map(|s| Arc::clone(&s.handler)).collect()
                };

                tracing::debug!(
                    kind = ?envelope.kind,
                    subscribers = handlers.len(),
                    decoded = payload.is_some(),
                    "dispatching engine event"
                );
                for handler in handlers {
                    handler.on_event(envelope.kind, payload.clone()).await;
                }
            }
            tracing::debug!("engine notification channel closed, event pump stopping");
        });
        *self.pump.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
    }

    /// Subscribe a handler to every engine notification.
    ///
    /// If this handler identity is already subscribed, no new subscription
    /// is created and the returned handle refers to the existing one.
    pub fn register(&self, handler: Arc<dyn RtcEventHandler>) -> ListenerHandle {
        let identity = handler_identity(&handler);

        if let Some(existing) = self.inner.identities.get(&identity) {
            return ListenerHandle {
                token: *existing,
                inner: Arc::downgrade(&self.inner),
            };
        }

        let token = Uuid::new_v4();
        {
            let mut subscribers = self
                .inner
                .subscribers
                .write()
                .unwrap_or_else(|e| e.into_inner());
            // Re-check under the write lock so a racing register of the same
            // identity cannot create a second subscription.
            if let Some(existing) = subscribers.iter().find(|s| s.identity == identity) {
                return ListenerHandle {
                    token: existing.token,
                    inner: Arc::downgrade(&self.inner),
                };
            }
            subscribers.push(Subscriber {
                token,
                identity,
                handler,
            });
            self.inner.identities.insert(identity, token);
        }

        ListenerHandle {
            token,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Remove the subscription for this handler identity; no-op if absent
    pub fn unregister(&self, handler: &Arc<dyn RtcEventHandler>) {
        let identity = handler_identity(handler);
        if let Some((_, token)) = self.inner.identities.remove(&identity) {
            let mut subscribers = self
                .inner
                .subscribers
                .write()
                .unwrap_or_else(|e| e.into_inner());
            subscribers.retain(|s| s.token != token);
        }
    }

    /// Remove every subscription registered through this registry
    pub fn unregister_all(&self) {
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner());
        subscribers.clear();
        self.inner.identities.clear();
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop the pump task; called on client teardown
    pub(crate) fn shutdown(&self) {
        if let Some(handle) = self.pump.lock().unwrap_or_else(|e| e.into_inner()).take() {
            handle.abort();
        }
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Pointer identity of a handler reference, the registry's dedup key
fn handler_identity(handler: &Arc<dyn RtcEventHandler>) -> usize {
    Arc::as_ptr(handler) as *const () as usize
}
