//! Validated shift records and their parsing boundary.
//!
//! Raw schedule rows keep the column names of the source export. They are
//! normalized into `ShiftRecord` exactly once, here, so the decomposition
//! logic never has to consider missing fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RunCalError, RunCalResult};

/// Location used when the source row leaves the site blank.
pub const DEFAULT_LOCATION: &str = "Home";

/// Which portion of the overnight shift a row assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    /// Whole overnight shift: front and back portions.
    Full,
    /// Front half only: evening until midnight, plus a fixed catchup.
    FrontHalf,
    /// Back half only: midnight until morning, placement depends on group.
    BackHalf,
    /// Anything else in the schedule; decomposes to no events.
    Other(String),
}

impl ShiftKind {
    /// Derive the kind from the `Half or Full` and `Detail` columns.
    ///
    /// "Full" wins regardless of detail; otherwise the detail column decides
    /// which half the row assigns.
    pub fn from_columns(half_or_full: &str, detail: Option<&str>) -> Self {
        if half_or_full.trim() == "Full" {
            return ShiftKind::Full;
        }
        match detail.map(str::trim) {
            Some("First") => ShiftKind::FrontHalf,
            Some("Second") => ShiftKind::BackHalf,
            _ => ShiftKind::Other(format!(
                "{} - {}",
                half_or_full.trim(),
                detail.map(str::trim).filter(|d| !d.is_empty()).unwrap_or("N/A")
            )),
        }
    }

    /// Human-readable label used for summary counts.
    pub fn label(&self) -> String {
        match self {
            ShiftKind::Full => "Full".to_string(),
            ShiftKind::FrontHalf => "Half - First".to_string(),
            ShiftKind::BackHalf => "Half - Second".to_string(),
            ShiftKind::Other(s) => s.clone(),
        }
    }
}

/// One validated schedule row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Calendar date the shift starts on (the evening side).
    pub session_date: NaiveDate,
    pub kind: ShiftKind,
    /// Work group, 1-based; determines catchup placement.
    pub group: u32,
    pub location: String,
    pub provider_name: String,
}

/// A row as it appears in the schedule export, before validation.
///
/// Field names mirror the source spreadsheet columns so the export can be
/// deserialized without a mapping step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawShiftRow {
    #[serde(rename = "Full name", default)]
    pub full_name: Option<String>,
    #[serde(rename = "Session Start Date", default)]
    pub session_date: Option<String>,
    #[serde(rename = "Half or Full", default)]
    pub half_or_full: Option<String>,
    #[serde(rename = "Detail", default)]
    pub detail: Option<String>,
    #[serde(rename = "Group", default)]
    pub group: Option<u32>,
    #[serde(rename = "Med Center", default)]
    pub med_center: Option<String>,
}

impl ShiftRecord {
    /// Validate a raw row into a complete record.
    ///
    /// Rows missing their date, shift type, or group are rejected with
    /// `MalformedShift`; callers skip and report them rather than aborting.
    pub fn from_raw(raw: &RawShiftRow) -> RunCalResult<Self> {
        let date_str = non_blank(raw.session_date.as_deref())
            .ok_or_else(|| RunCalError::MalformedShift("missing Session Start Date".into()))?;
        let session_date = parse_session_date(date_str)?;

        let half_or_full = non_blank(raw.half_or_full.as_deref())
            .ok_or_else(|| RunCalError::MalformedShift("missing Half or Full".into()))?;
        let kind = ShiftKind::from_columns(half_or_full, raw.detail.as_deref());

        let group = raw
            .group
            .filter(|g| *g >= 1)
            .ok_or_else(|| RunCalError::MalformedShift("missing or invalid Group".into()))?;

        let location = non_blank(raw.med_center.as_deref())
            .unwrap_or(DEFAULT_LOCATION)
            .to_string();
        let provider_name = non_blank(raw.full_name.as_deref())
            .unwrap_or_default()
            .to_string();

        Ok(ShiftRecord {
            session_date,
            kind,
            group,
            location,
            provider_name,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse the export's date column. Both US-style and ISO dates appear in
/// the wild, depending on how the sheet was generated.
fn parse_session_date(s: &str) -> RunCalResult<NaiveDate> {
    for fmt in ["%m/%d/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    Err(RunCalError::MalformedShift(format!(
        "unparseable Session Start Date '{s}'"
    )))
}
