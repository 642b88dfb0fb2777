//! Blocking counters with a day-rollover rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlockStats {
    pub total_blocked: u64,
    pub today_blocked: u64,
    /// Day label of the most recent block, e.g. "Mon Jan 01 2024".
    pub last_blocked: Option<String>,
}

/// Day label in the original export format (`Date.toDateString()`).
pub fn day_label(now: DateTime<Utc>) -> String {
    now.format("%a %b %d %Y").to_string()
}

impl BlockStats {
    /// Record one blocking redirect. `totalBlocked` always increments;
    /// `todayBlocked` resets to 1 when the stored day label differs
    /// from today's, else increments.
    pub fn record_block(&mut self, now: DateTime<Utc>) {
        let today = day_label(now);
        self.total_blocked += 1;
        self.today_blocked = if self.last_blocked.as_deref() == Some(today.as_str()) {
            self.today_blocked + 1
        } else {
            1
        };
        self.last_blocked = Some(today);
    }
}
