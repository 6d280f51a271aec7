//! Whole-schedule batch building.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;

use crate::constants::DEFAULT_TIMEZONE;
use crate::decompose::decompose_in;
use crate::error::{RunCalError, RunCalResult};
use crate::event::EventDescriptor;
use crate::shift::ShiftRecord;

/// Date window bounding the reconciliation's deletion query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    /// Earliest session date in the batch.
    pub earliest: NaiveDate,
    /// One day past the latest session date, exclusive. Back-half blocks
    /// land on the day after their session date, so the extra day keeps
    /// them inside the window.
    pub latest_exclusive: NaiveDate,
}

/// Counts reported to the user before syncing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub shifts: usize,
    pub events: usize,
    /// Shift counts keyed by kind label, in display order.
    pub by_kind: BTreeMap<String, usize>,
}

/// Decomposed events for a whole schedule, plus the window and summary.
#[derive(Debug, Clone)]
pub struct EventBatch {
    pub events: Vec<EventDescriptor>,
    pub window: SyncWindow,
    pub summary: BatchSummary,
}

/// Build the event batch for a provider's shifts, using the deployment's
/// default timezone label.
pub fn build_batch(shifts: &[ShiftRecord]) -> RunCalResult<EventBatch> {
    build_batch_in(shifts, DEFAULT_TIMEZONE)
}

/// Build the event batch with an explicit timezone label.
///
/// Shifts are decomposed in input order and concatenated, preserving the
/// wall-clock ordering within each shift. Deterministic: the same input
/// always yields descriptor-for-descriptor identical output. Fails with
/// `EmptyBatch` when there is nothing to sync, before any remote call can
/// be made.
pub fn build_batch_in(shifts: &[ShiftRecord], tz: Tz) -> RunCalResult<EventBatch> {
    let earliest = shifts
        .iter()
        .map(|s| s.session_date)
        .min()
        .ok_or(RunCalError::EmptyBatch)?;
    let latest = shifts
        .iter()
        .map(|s| s.session_date)
        .max()
        .ok_or(RunCalError::EmptyBatch)?;

    let mut events = Vec::new();
    let mut by_kind = BTreeMap::new();

    for shift in shifts {
        *by_kind.entry(shift.kind.label()).or_insert(0) += 1;
        events.extend(decompose_in(shift, tz));
    }

    let summary = BatchSummary {
        shifts: shifts.len(),
        events: events.len(),
        by_kind,
    };

    Ok(EventBatch {
        events,
        window: SyncWindow {
            earliest,
            latest_exclusive: latest + Days::new(1),
        },
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shift::ShiftKind;

    fn shift(day: u32, kind: ShiftKind, group: u32) -> ShiftRecord {
        ShiftRecord {
            session_date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            kind,
            group,
            location: "Home".to_string(),
            provider_name: "Dr. Example".to_string(),
        }
    }

    #[test]
    fn test_empty_input_fails_with_empty_batch() {
        assert!(matches!(build_batch(&[]), Err(RunCalError::EmptyBatch)));
    }

    #[test]
    fn test_window_spans_min_to_max_plus_one() {
        let shifts = vec![
            shift(25, ShiftKind::Full, 7),
            shift(20, ShiftKind::FrontHalf, 3),
            shift(22, ShiftKind::BackHalf, 3),
        ];
        let batch = build_batch(&shifts).unwrap();
        assert_eq!(batch.window.earliest, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(
            batch.window.latest_exclusive,
            NaiveDate::from_ymd_opt(2025, 3, 26).unwrap()
        );
    }

    #[test]
    fn test_events_concatenate_in_input_order() {
        let shifts = vec![shift(25, ShiftKind::Full, 7), shift(20, ShiftKind::FrontHalf, 3)];
        let batch = build_batch(&shifts).unwrap();

        // 4 blocks for the full shift, then 2 for the front half, in that
        // order even though the second shift is earlier in the month.
        assert_eq!(batch.events.len(), 6);
        assert!(batch.events[0].summary.starts_with("Run Calendar Shift (Front)"));
        assert!(batch.events[4].summary.starts_with("Run Calendar Front Half"));
    }

    #[test]
    fn test_summary_counts_by_kind() {
        let shifts = vec![
            shift(20, ShiftKind::Full, 7),
            shift(21, ShiftKind::Full, 15),
            shift(22, ShiftKind::BackHalf, 16),
            shift(23, ShiftKind::Other("Vacation - N/A".to_string()), 1),
        ];
        let batch = build_batch(&shifts).unwrap();

        assert_eq!(batch.summary.shifts, 4);
        assert_eq!(batch.summary.by_kind["Full"], 2);
        assert_eq!(batch.summary.by_kind["Half - Second"], 1);
        assert_eq!(batch.summary.by_kind["Vacation - N/A"], 1);
        // 4 blocks + 1 front-only + 0 + 0
        assert_eq!(batch.summary.events, 5);
    }

    #[test]
    fn test_build_is_idempotent() {
        let shifts = vec![
            shift(20, ShiftKind::Full, 7),
            shift(21, ShiftKind::BackHalf, 4),
            shift(22, ShiftKind::FrontHalf, 9),
        ];
        let first = build_batch(&shifts).unwrap();
        let second = build_batch(&shifts).unwrap();
        assert_eq!(first.events, second.events);
        assert_eq!(first.window, second.window);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn test_all_other_shifts_still_build_a_window() {
        // A schedule of only unrecognized rows has dates but no events;
        // the batch itself is not empty.
        let shifts = vec![shift(20, ShiftKind::Other("Clinic - N/A".to_string()), 2)];
        let batch = build_batch(&shifts).unwrap();
        assert!(batch.events.is_empty());
        assert_eq!(batch.summary.shifts, 1);
    }
}
