//! Inbound command processing: parse, validate, acknowledge, enqueue.

use tracing::{info, warn};

use threadgate_types::{MessageRef, ReactionMarker, RejectReason, ScheduleRequest};

use crate::gateway::ThreadGateway;
use crate::parse::parse;
use crate::queue::SharedQueue;

/// Process one raw intake message.
///
/// Both validation stages (grammar, then thread existence) complete
/// before any acknowledgment reaction is sent. Accepted requests are
/// inserted into the shared queue; rejected ones only get the ❌
/// marker — there is no error reply text.
pub async fn handle_submission(
    text: &str,
    source: MessageRef,
    gateway: &dyn ThreadGateway,
    queue: &SharedQueue,
) -> Result<ScheduleRequest, RejectReason> {
    let admitted = admit(text, source, gateway).await;

    let marker = match &admitted {
        Ok(_) => ReactionMarker::Accepted,
        Err(_) => ReactionMarker::Rejected,
    };
    if let Err(e) = gateway.react(&source, marker).await {
        warn!(message_id = source.message_id, "failed to add reaction: {e}");
    }

    let req = admitted?;
    queue.lock().await.insert(req.clone());
    info!(
        thread_id = req.thread_id,
        publish_at = %req.publish_at,
        "schedule request accepted"
    );
    Ok(req)
}

async fn admit(
    text: &str,
    source: MessageRef,
    gateway: &dyn ThreadGateway,
) -> Result<ScheduleRequest, RejectReason> {
    let parsed = parse(text)?;

    let resolved = match gateway.resolve_thread(parsed.thread_id).await {
        Ok(handle) => handle,
        Err(e) => {
            warn!(
                thread_id = parsed.thread_id,
                "thread lookup failed during intake: {e}"
            );
            None
        }
    };
    if resolved.is_none() {
        return Err(RejectReason::UnknownThread);
    }

    Ok(ScheduleRequest {
        thread_id: parsed.thread_id,
        publish_at: parsed.publish_at,
        source,
    })
}
