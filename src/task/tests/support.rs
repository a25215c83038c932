//! Shared helpers for task unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that advances by a fixed step (one second by default) on every
/// reading.
pub struct SteppingClock {
    current: Mutex<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
            step: TimeDelta::seconds(1),
        }
    }

    /// A clock whose readings never change.
    pub fn frozen() -> Self {
        Self {
            step: TimeDelta::zero(),
            ..Self::default()
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 20, 9, 0, 0)
            .single()
            .expect("valid start instant");
        Self::starting_at(start)
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().expect("clock lock");
        let reading = *current;
        *current = reading + self.step;
        reading
    }
}
