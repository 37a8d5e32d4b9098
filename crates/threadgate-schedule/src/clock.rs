//! Clock source in the fixed civil timezone.

use chrono::{DateTime, FixedOffset, Utc};

use threadgate_types::civil_tz;

/// Single consistent clock used for all due-time comparisons.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&civil_tz())
    }
}
