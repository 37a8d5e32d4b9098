//! Background loop that fires due schedule requests.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use threadgate_types::ScheduleRequest;

use crate::clock::{Clock, SystemClock};
use crate::gateway::ThreadGateway;
use crate::queue::SharedQueue;

/// Default scheduler tick.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Periodic scheduler: inspects the queue head each tick and performs
/// the unlock+notify side effect for every entry whose time has come.
///
/// Fire-once, best-effort: a failed side effect is logged and the entry
/// is discarded, never requeued.
pub struct Publisher {
    queue: SharedQueue,
    gateway: Arc<dyn ThreadGateway>,
    clock: Arc<dyn Clock>,
    tick: Duration,
}

impl Publisher {
    pub fn new(queue: SharedQueue, gateway: Arc<dyn ThreadGateway>, tick: Duration) -> Self {
        Self::with_clock(queue, gateway, Arc::new(SystemClock), tick)
    }

    pub fn with_clock(
        queue: SharedQueue,
        gateway: Arc<dyn ThreadGateway>,
        clock: Arc<dyn Clock>,
        tick: Duration,
    ) -> Self {
        Self {
            queue,
            gateway,
            clock,
            tick,
        }
    }

    /// Run for the lifetime of the process.
    pub async fn run(self) {
        info!(tick_secs = self.tick.as_secs_f64(), "publish scheduler started");
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick_once().await;
        }
    }

    /// One scheduler pass: drain every due entry, head-first.
    ///
    /// The queue lock is held for the whole pass. An entry is popped
    /// after its side effect but before the lock is released, so no
    /// concurrent pass can ever observe (and fire) the same head twice.
    pub async fn tick_once(&self) {
        let mut queue = self.queue.lock().await;
        loop {
            let now = self.clock.now();
            let Some(head) = queue.peek_due(now) else {
                break;
            };
            let req = head.clone();
            debug!(
                thread_id = req.thread_id,
                pending = queue.len(),
                "queue head is due"
            );
            self.fire(&req).await;
            queue.pop_front();
        }
    }

    /// Perform the unlock+notify side effect for a due request.
    async fn fire(&self, req: &ScheduleRequest) {
        let handle = match self.gateway.resolve_thread(req.thread_id).await {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                warn!(
                    thread_id = req.thread_id,
                    publish_at = %req.publish_at,
                    "scheduled thread no longer exists, discarding"
                );
                return;
            }
            Err(e) => {
                warn!(
                    thread_id = req.thread_id,
                    publish_at = %req.publish_at,
                    "thread lookup failed, discarding: {e}"
                );
                return;
            }
        };

        if self.gateway.is_hidden(&handle) {
            if let Err(e) = self.gateway.unlock(&handle).await {
                warn!(
                    thread_id = req.thread_id,
                    publish_at = %req.publish_at,
                    "unlock failed: {e}"
                );
            }
        } else {
            debug!(thread_id = req.thread_id, "thread already visible");
        }

        let text = format!("Thread is now open: {}", handle.name);
        match self.gateway.notify(&handle, &text).await {
            Ok(()) => info!(
                thread_id = req.thread_id,
                thread = %handle.name,
                "published thread"
            ),
            Err(e) => warn!(
                thread_id = req.thread_id,
                publish_at = %req.publish_at,
                "publication notice failed: {e}"
            ),
        }
    }
}
