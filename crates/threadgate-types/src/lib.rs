use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ──────────────────── Time ────────────────────

static CIVIL_TZ: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(9 * 3600).expect("UTC+9 is a valid offset"));

/// The single civil timezone used for parsing and comparison (UTC+9).
///
/// Asia/Tokyo has no daylight saving, so a fixed offset is exact.
pub fn civil_tz() -> FixedOffset {
    *CIVIL_TZ
}

// ──────────────────── Schedule Types ────────────────────

/// Reference back to an originating intake message.
///
/// Used only for acknowledgment reactions, never for scheduling logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    /// Channel the message was posted in.
    pub channel_id: u64,
    /// The message itself.
    pub message_id: u64,
}

/// A validated (thread id, publish time) pair awaiting action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Target thread id. Resolved lazily; existence is not guaranteed
    /// to persist until fire time.
    pub thread_id: u64,
    /// When to publish, in the fixed civil timezone.
    pub publish_at: DateTime<FixedOffset>,
    /// The command message this request came from.
    pub source: MessageRef,
}

/// Snapshot of a resolved thread at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadHandle {
    pub id: u64,
    /// Display name, used in the publication notice.
    pub name: String,
    /// Parent container channel, if the platform reports one.
    pub parent_id: Option<u64>,
    pub guild_id: Option<u64>,
    /// Whether the thread is still in its pre-publication hidden state.
    pub hidden: bool,
}

// ──────────────────── Errors ────────────────────

/// Why an inbound schedule command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The message does not match the command grammar.
    #[error("message does not match the schedule command grammar")]
    MalformedRequest,
    /// Syntactically valid, but the target thread does not resolve.
    #[error("target thread does not exist")]
    UnknownThread,
}

/// Failure reported by the external platform gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("platform request failed: {0}")]
    Platform(String),
}

// ──────────────────── Acknowledgment ────────────────────

/// Reaction applied to the originating message. This is the only
/// user-facing error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionMarker {
    /// Request parsed, validated, and queued.
    Accepted,
    /// Request rejected (malformed or unresolvable).
    Rejected,
}

impl ReactionMarker {
    pub fn emoji(self) -> &'static str {
        match self {
            ReactionMarker::Accepted => "👍",
            ReactionMarker::Rejected => "❌",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_civil_tz_offset() {
        assert_eq!(civil_tz().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_marker_emoji() {
        assert_eq!(ReactionMarker::Accepted.emoji(), "👍");
        assert_eq!(ReactionMarker::Rejected.emoji(), "❌");
    }

    #[test]
    fn test_schedule_request_serde() {
        let req = ScheduleRequest {
            thread_id: 42,
            publish_at: civil_tz().with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
            source: MessageRef {
                channel_id: 1,
                message_id: 2,
            },
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: ScheduleRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.thread_id, 42);
        assert_eq!(back.publish_at, req.publish_at);
        // The fixed offset survives the round trip.
        assert_eq!(back.publish_at.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_reject_reason_messages() {
        assert!(RejectReason::MalformedRequest.to_string().contains("grammar"));
        assert!(RejectReason::UnknownThread.to_string().contains("does not exist"));
    }
}
