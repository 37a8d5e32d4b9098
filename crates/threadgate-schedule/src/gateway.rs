//! Platform capability contract the scheduling engine consumes.

use async_trait::async_trait;

use threadgate_types::{GatewayError, MessageRef, ReactionMarker, ThreadHandle};

/// External platform capabilities: thread lookup, the unlock/notify
/// side effects, and acknowledgment reactions.
///
/// Implementations must be safe for concurrent independent calls.
#[async_trait]
pub trait ThreadGateway: Send + Sync {
    /// Existence + state lookup. `Ok(None)` means the thread does not
    /// currently resolve; `Err` is a platform failure.
    async fn resolve_thread(&self, id: u64) -> Result<Option<ThreadHandle>, GatewayError>;

    /// Whether the thread is still in its pre-publication hidden state.
    fn is_hidden(&self, thread: &ThreadHandle) -> bool;

    /// Make the thread visible.
    async fn unlock(&self, thread: &ThreadHandle) -> Result<(), GatewayError>;

    /// Post the publication notice into the thread.
    async fn notify(&self, thread: &ThreadHandle, text: &str) -> Result<(), GatewayError>;

    /// Apply an acknowledgment marker to an intake message.
    async fn react(
        &self,
        message: &MessageRef,
        marker: ReactionMarker,
    ) -> Result<(), GatewayError>;
}
