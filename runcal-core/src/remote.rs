//! Remote calendar capability.
//!
//! The reconciler works against this trait so the engine can be exercised
//! with an in-memory fake; the Google provider crate supplies the real
//! implementation. Timestamps cross the boundary as UTC instants and come
//! back as whatever slice of the remote event the reconciler needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RunCalResult;
use crate::event::EventDescriptor;

/// The slice of a remote event the reconciler needs: enough to recognize
/// previously-synced events and delete them by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: String,
    pub summary: String,
}

/// List/insert/delete capability on one remote calendar service.
///
/// Calls are independent and issued sequentially; retry policy belongs to
/// the implementation or its caller, not the reconciler.
#[allow(async_fn_in_trait)]
pub trait RemoteCalendar {
    /// Events whose start time falls within `[time_min, time_max)`.
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> RunCalResult<Vec<RemoteEvent>>;

    /// Create one event; returns the remote-assigned id.
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventDescriptor,
    ) -> RunCalResult<String>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> RunCalResult<()>;
}
