//! Event descriptors produced by the decomposer.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Calendar color bucket for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    /// On-duty work time.
    Work,
    /// Rest/catchup time inside a shift.
    Catchup,
}

/// Reminder treatment for a block.
///
/// Only the first chronological block of a shift carries `Standard`
/// reminders; the rest are silent so the provider isn't pinged mid-shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderPolicy {
    None,
    /// Popups at 1440 and 10 minutes before start.
    Standard,
}

impl ReminderPolicy {
    /// Minutes-before-start offsets for popup reminders.
    pub fn minutes(self) -> &'static [i64] {
        match self {
            ReminderPolicy::None => &[],
            ReminderPolicy::Standard => &[1440, 10],
        }
    }
}

/// One calendar event to be created remotely.
///
/// Times are civil (wall clock) and carry a single IANA timezone label;
/// the engine never converts to UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDescriptor {
    pub summary: String,
    pub location: String,
    /// Always embeds the work-group number for traceability.
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub timezone: Tz,
    pub color: ColorTag,
    pub reminders: ReminderPolicy,
}
