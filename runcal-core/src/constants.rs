//! Deployment-wide constants.

use chrono_tz::Tz;

/// Timezone label attached to every event when no override is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;

/// Title fragments that mark an event as managed by runcal. The reconciler
/// only ever deletes events whose summary contains one of these.
pub const SYNC_TAGS: [&str; 2] = ["Run Calendar", "Catchup"];
