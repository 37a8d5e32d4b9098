//! threadgate-schedule: the scheduling engine.
//!
//! Parses schedule commands, keeps a time-ordered queue of pending
//! publications, and runs the background loop that fires each entry
//! exactly once when its time arrives. Platform side effects go through
//! the [`gateway::ThreadGateway`] capability trait.

pub mod clock;
pub mod gateway;
pub mod intake;
pub mod parse;
pub mod publisher;
pub mod queue;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, SystemClock};
pub use gateway::ThreadGateway;
pub use parse::{ParsedRequest, parse};
pub use publisher::Publisher;
pub use queue::{ScheduleQueue, SharedQueue};
