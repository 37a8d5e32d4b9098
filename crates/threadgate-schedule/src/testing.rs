//! Test doubles shared by the engine's test modules.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

use threadgate_types::{GatewayError, MessageRef, ReactionMarker, ThreadHandle};

use crate::clock::Clock;
use crate::gateway::ThreadGateway;

/// Clock advanced manually by tests.
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap()
    }
}

/// In-memory `ThreadGateway` that records every side effect.
#[derive(Default)]
pub struct MockGateway {
    threads: Mutex<HashMap<u64, ThreadHandle>>,
    resolve_calls: AtomicUsize,
    fail_resolve: AtomicBool,
    fail_unlock: AtomicBool,
    fail_react: AtomicBool,
    unlocks: Mutex<Vec<u64>>,
    notifies: Mutex<Vec<(u64, String)>>,
    reactions: Mutex<Vec<(MessageRef, ReactionMarker)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_thread(&self, id: u64, name: &str, hidden: bool) {
        self.threads.lock().unwrap().insert(
            id,
            ThreadHandle {
                id,
                name: name.to_string(),
                parent_id: Some(1),
                guild_id: Some(1),
                hidden,
            },
        );
    }

    pub fn remove_thread(&self, id: u64) {
        self.threads.lock().unwrap().remove(&id);
    }

    pub fn fail_resolve(&self, fail: bool) {
        self.fail_resolve.store(fail, Ordering::SeqCst);
    }

    pub fn fail_unlock(&self, fail: bool) {
        self.fail_unlock.store(fail, Ordering::SeqCst);
    }

    pub fn fail_react(&self, fail: bool) {
        self.fail_react.store(fail, Ordering::SeqCst);
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn unlocks(&self) -> Vec<u64> {
        self.unlocks.lock().unwrap().clone()
    }

    pub fn notifies(&self) -> Vec<(u64, String)> {
        self.notifies.lock().unwrap().clone()
    }

    pub fn reactions(&self) -> Vec<(MessageRef, ReactionMarker)> {
        self.reactions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ThreadGateway for MockGateway {
    async fn resolve_thread(&self, id: u64) -> Result<Option<ThreadHandle>, GatewayError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(GatewayError::Platform("simulated lookup failure".into()));
        }
        Ok(self.threads.lock().unwrap().get(&id).cloned())
    }

    fn is_hidden(&self, thread: &ThreadHandle) -> bool {
        thread.hidden
    }

    async fn unlock(&self, thread: &ThreadHandle) -> Result<(), GatewayError> {
        if self.fail_unlock.load(Ordering::SeqCst) {
            return Err(GatewayError::Platform("simulated unlock failure".into()));
        }
        self.unlocks.lock().unwrap().push(thread.id);
        if let Some(t) = self.threads.lock().unwrap().get_mut(&thread.id) {
            t.hidden = false;
        }
        Ok(())
    }

    async fn notify(&self, thread: &ThreadHandle, text: &str) -> Result<(), GatewayError> {
        self.notifies
            .lock()
            .unwrap()
            .push((thread.id, text.to_string()));
        Ok(())
    }

    async fn react(
        &self,
        message: &MessageRef,
        marker: ReactionMarker,
    ) -> Result<(), GatewayError> {
        if self.fail_react.load(Ordering::SeqCst) {
            return Err(GatewayError::Platform("simulated reaction failure".into()));
        }
        self.reactions.lock().unwrap().push((*message, marker));
        Ok(())
    }
}
