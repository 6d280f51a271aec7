//! Delete-then-insert reconciliation against the remote calendar.
//!
//! Previously-synced events inside the batch window are recognized by
//! their sync tags and removed before the fresh batch is created. The run
//! is not transactional: every remote failure is recorded per event and
//! the remaining calls still go out.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::batch::SyncWindow;
use crate::constants::SYNC_TAGS;
use crate::event::EventDescriptor;
use crate::remote::RemoteCalendar;

/// Which remote call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    List,
    Delete,
    Create,
}

/// One best-effort failure, identified by the event it concerned.
#[derive(Debug, Clone)]
pub struct SyncFailure {
    pub op: SyncOp,
    /// Summary of the affected event; empty for the initial listing call.
    pub summary: String,
    pub reason: String,
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    pub events_deleted: usize,
    pub events_created: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncResult {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// True when a remote event's title marks it as managed by runcal.
pub fn is_synced_event(summary: &str) -> bool {
    SYNC_TAGS.iter().any(|tag| summary.contains(tag))
}

/// Compute the deletion query bounds from the batch window.
///
/// The lower bound never reaches into the past (`now` wins over the window
/// start), and a degenerate window is extended by one day so the remote
/// query is never empty or inverted. The correction is internal; callers
/// never see it.
pub fn query_bounds(window: &SyncWindow, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = window.earliest.and_time(NaiveTime::MIN).and_utc();
    let end = window.latest_exclusive.and_time(NaiveTime::MIN).and_utc();

    let time_min = start.max(now);
    let time_max = if end <= time_min {
        time_min + Duration::days(1)
    } else {
        end
    };

    (time_min, time_max)
}

/// Replace previously-synced events in the window with the new batch.
///
/// Deletion only touches events whose titles carry a sync tag; everything
/// else on the calendar is left alone. Failures accumulate in the result
/// instead of aborting, so a partial sync is always reportable.
pub async fn reconcile<R: RemoteCalendar>(
    remote: &R,
    calendar_id: &str,
    window: &SyncWindow,
    events: &[EventDescriptor],
    now: DateTime<Utc>,
) -> SyncResult {
    let mut result = SyncResult::default();

    let (time_min, time_max) = query_bounds(window, now);

    match remote.list_events(calendar_id, time_min, time_max).await {
        Ok(existing) => {
            for event in existing.iter().filter(|e| is_synced_event(&e.summary)) {
                match remote.delete_event(calendar_id, &event.id).await {
                    Ok(()) => result.events_deleted += 1,
                    Err(e) => result.failures.push(SyncFailure {
                        op: SyncOp::Delete,
                        summary: event.summary.clone(),
                        reason: e.to_string(),
                    }),
                }
            }
        }
        // Listing failed: nothing to delete, but creation still proceeds.
        Err(e) => result.failures.push(SyncFailure {
            op: SyncOp::List,
            summary: String::new(),
            reason: e.to_string(),
        }),
    }

    for event in events {
        match remote.insert_event(calendar_id, event).await {
            Ok(_) => result.events_created += 1,
            Err(e) => result.failures.push(SyncFailure {
                op: SyncOp::Create,
                summary: event.summary.clone(),
                reason: e.to_string(),
            }),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RunCalError, RunCalResult};
    use crate::event::{ColorTag, ReminderPolicy};
    use crate::remote::RemoteEvent;
    use chrono::{NaiveDate, TimeZone};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory remote calendar for reconciler tests.
    #[derive(Default)]
    struct FakeCalendar {
        existing: Vec<RemoteEvent>,
        deleted: Mutex<Vec<String>>,
        inserted: Mutex<Vec<String>>,
        fail_deletes: HashSet<String>,
        fail_inserts: HashSet<String>,
        fail_listing: bool,
    }

    impl RemoteCalendar for FakeCalendar {
        async fn list_events(
            &self,
            _calendar_id: &str,
            _time_min: DateTime<Utc>,
            _time_max: DateTime<Utc>,
        ) -> RunCalResult<Vec<RemoteEvent>> {
            if self.fail_listing {
                return Err(RunCalError::Remote("listing unavailable".into()));
            }
            Ok(self.existing.clone())
        }

        async fn insert_event(
            &self,
            _calendar_id: &str,
            event: &EventDescriptor,
        ) -> RunCalResult<String> {
            if self.fail_inserts.contains(&event.summary) {
                return Err(RunCalError::Remote("insert refused".into()));
            }
            self.inserted.lock().unwrap().push(event.summary.clone());
            Ok(format!("id-{}", event.summary))
        }

        async fn delete_event(&self, _calendar_id: &str, event_id: &str) -> RunCalResult<()> {
            if self.fail_deletes.contains(event_id) {
                return Err(RunCalError::Remote("delete refused".into()));
            }
            self.deleted.lock().unwrap().push(event_id.to_string());
            Ok(())
        }
    }

    fn remote_event(id: &str, summary: &str) -> RemoteEvent {
        RemoteEvent {
            id: id.to_string(),
            summary: summary.to_string(),
        }
    }

    fn descriptor(summary: &str) -> EventDescriptor {
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        EventDescriptor {
            summary: summary.to_string(),
            location: "Home".to_string(),
            description: "Group: 7".to_string(),
            start: date.and_hms_opt(18, 30, 0).unwrap(),
            end: date.and_hms_opt(23, 0, 0).unwrap(),
            timezone: chrono_tz::America::Los_Angeles,
            color: ColorTag::Work,
            reminders: ReminderPolicy::Standard,
        }
    }

    fn window(from_day: u32, to_day: u32) -> SyncWindow {
        SyncWindow {
            earliest: NaiveDate::from_ymd_opt(2025, 3, from_day).unwrap(),
            latest_exclusive: NaiveDate::from_ymd_opt(2025, 3, to_day).unwrap(),
        }
    }

    fn past_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sync_tag_matching() {
        assert!(is_synced_event("Run Calendar Shift (Front) - Home"));
        assert!(is_synced_event("Catchup Time - Downtown"));
        assert!(!is_synced_event("Dentist appointment"));
        assert!(!is_synced_event(""));
    }

    #[test]
    fn test_query_bounds_clamp_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 3, 22, 8, 0, 0).unwrap();
        let (time_min, time_max) = query_bounds(&window(20, 26), now);
        assert_eq!(time_min, now);
        assert_eq!(
            time_max,
            Utc.with_ymd_and_hms(2025, 3, 26, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_query_bounds_extend_degenerate_window() {
        // Everything in the batch is already in the past: end <= start
        // after clamping, so the window is pushed out a day.
        let now = Utc.with_ymd_and_hms(2025, 4, 10, 8, 0, 0).unwrap();
        let (time_min, time_max) = query_bounds(&window(20, 26), now);
        assert_eq!(time_min, now);
        assert_eq!(time_max, now + Duration::days(1));
    }

    #[tokio::test]
    async fn test_reconcile_replaces_tagged_events() {
        let fake = FakeCalendar {
            existing: vec![
                remote_event("a", "Run Calendar Shift (Front) - Home"),
                remote_event("b", "Catchup Time - Home"),
                remote_event("c", "Dentist appointment"),
            ],
            ..Default::default()
        };

        let events = vec![descriptor("Run Calendar Shift (Front) - Home")];
        let result = reconcile(&fake, "primary", &window(20, 26), &events, past_now()).await;

        assert_eq!(result.events_deleted, 2);
        assert_eq!(result.events_created, 1);
        assert!(result.is_clean());

        // The untagged event survives.
        let deleted = fake.deleted.lock().unwrap();
        assert_eq!(*deleted, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_batch_still_deletes_stale_events() {
        let fake = FakeCalendar {
            existing: vec![remote_event("a", "Run Calendar Back Half - Home")],
            ..Default::default()
        };

        let result = reconcile(&fake, "primary", &window(20, 26), &[], past_now()).await;
        assert_eq!(result.events_deleted, 1);
        assert_eq!(result.events_created, 0);
    }

    #[tokio::test]
    async fn test_failures_accumulate_without_aborting() {
        let fake = FakeCalendar {
            existing: vec![
                remote_event("a", "Run Calendar Shift (Front) - Home"),
                remote_event("b", "Run Calendar Shift (Back) - Home"),
            ],
            fail_deletes: HashSet::from(["a".to_string()]),
            fail_inserts: HashSet::from(["bad event".to_string()]),
            ..Default::default()
        };

        let events = vec![descriptor("bad event"), descriptor("good event")];
        let result = reconcile(&fake, "primary", &window(20, 26), &events, past_now()).await;

        // One delete and one insert failed; the others still went through.
        assert_eq!(result.events_deleted, 1);
        assert_eq!(result.events_created, 1);
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].op, SyncOp::Delete);
        assert_eq!(result.failures[0].summary, "Run Calendar Shift (Front) - Home");
        assert_eq!(result.failures[1].op, SyncOp::Create);
        assert_eq!(result.failures[1].summary, "bad event");
    }

    #[tokio::test]
    async fn test_listing_failure_still_creates() {
        let fake = FakeCalendar {
            fail_listing: true,
            ..Default::default()
        };

        let events = vec![descriptor("Run Calendar Shift (Front) - Home")];
        let result = reconcile(&fake, "primary", &window(20, 26), &events, past_now()).await;

        assert_eq!(result.events_deleted, 0);
        assert_eq!(result.events_created, 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].op, SyncOp::List);
    }
}
