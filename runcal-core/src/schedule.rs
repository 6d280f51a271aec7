//! Reading the normalized schedule export.
//!
//! Spreadsheet/HTML extraction happens upstream; what reaches this module
//! is its JSON hand-off: an array of row objects keyed by the original
//! column names. See `RawShiftRow` for the accepted shape.

use crate::error::{RunCalError, RunCalResult};
use crate::shift::{RawShiftRow, ShiftRecord};

/// Parse the JSON row export produced by the schedule extraction step.
pub fn parse_rows(json: &str) -> RunCalResult<Vec<RawShiftRow>> {
    serde_json::from_str(json).map_err(|e| RunCalError::ScheduleParse(e.to_string()))
}

/// Distinct provider names found in the schedule, deduplicated
/// case-insensitively (first spelling wins) and sorted for display.
pub fn unique_provider_names(rows: &[RawShiftRow]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        let Some(name) = row.full_name.as_deref().map(str::trim) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
            seen.push(name.to_string());
        }
    }
    seen.sort_by_key(|s| s.to_lowercase());
    seen
}

/// Validate the rows whose provider name contains `name` (case-insensitive
/// substring match, as in the source schedule tooling).
///
/// Malformed rows are returned separately so the caller can report them
/// without aborting the run.
pub fn shifts_for_provider(
    rows: &[RawShiftRow],
    name: &str,
) -> (Vec<ShiftRecord>, Vec<RunCalError>) {
    let needle = name.to_lowercase();
    let mut shifts = Vec::new();
    let mut rejected = Vec::new();

    for row in rows {
        let Some(full_name) = row.full_name.as_deref() else {
            continue;
        };
        if !full_name.to_lowercase().contains(&needle) {
            continue;
        }
        match ShiftRecord::from_raw(row) {
            Ok(shift) => shifts.push(shift),
            Err(e) => rejected.push(e),
        }
    }

    (shifts, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "Full name": "Avery Lin",
            "Session Start Date": "03/20/2025",
            "Half or Full": "Full",
            "Group": 7,
            "Med Center": "Downtown"
        },
        {
            "Full name": "avery lin",
            "Session Start Date": "03/21/2025",
            "Half or Full": "Half",
            "Detail": "Second",
            "Group": 3
        },
        {
            "Full name": "Blake Osei",
            "Session Start Date": "03/22/2025",
            "Half or Full": "Full",
            "Group": 15
        },
        {
            "Full name": "Avery Lin",
            "Half or Full": "Full",
            "Group": 2
        }
    ]"#;

    #[test]
    fn test_parse_rows_reads_export_columns() {
        let rows = parse_rows(SAMPLE).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].full_name.as_deref(), Some("Avery Lin"));
        assert_eq!(rows[0].group, Some(7));
        assert_eq!(rows[1].detail.as_deref(), Some("Second"));
    }

    #[test]
    fn test_parse_rows_rejects_garbage() {
        assert!(matches!(
            parse_rows("not json"),
            Err(RunCalError::ScheduleParse(_))
        ));
    }

    #[test]
    fn test_unique_names_dedupe_case_insensitively() {
        let rows = parse_rows(SAMPLE).unwrap();
        let names = unique_provider_names(&rows);
        assert_eq!(names, vec!["Avery Lin".to_string(), "Blake Osei".to_string()]);
    }

    #[test]
    fn test_filter_matches_substring_case_insensitively() {
        let rows = parse_rows(SAMPLE).unwrap();
        let (shifts, rejected) = shifts_for_provider(&rows, "avery");
        // Two valid rows; the dateless one is rejected, not dropped silently.
        assert_eq!(shifts.len(), 2);
        assert_eq!(rejected.len(), 1);
        assert!(matches!(rejected[0], RunCalError::MalformedShift(_)));

        let (others, _) = shifts_for_provider(&rows, "Osei");
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].group, 15);
    }
}
