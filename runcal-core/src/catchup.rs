//! Group-based catchup window resolution.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A rest period inserted into the back portion of an overnight shift.
///
/// Both times are civil times on the day after the shift's session date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchupWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Map a work group to its catchup window.
///
/// Groups 13-18 are down after midnight and get no window, and so does any
/// group outside the deployed numbering (including 1). This function is
/// pure and total; out-of-table values are not an error.
pub fn resolve_catchup(group: u32) -> Option<CatchupWindow> {
    let (start, end) = match group {
        2..=5 => (hm(0, 0), hm(2, 0)),
        6..=9 => (hm(2, 0), hm(4, 0)),
        10..=12 => (hm(4, 0), hm(6, 0)),
        _ => return None,
    };
    Some(CatchupWindow { start, end })
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_groups_get_midnight_window() {
        for group in 2..=5 {
            let window = resolve_catchup(group).unwrap();
            assert_eq!(window.start, hm(0, 0), "group {group}");
            assert_eq!(window.end, hm(2, 0), "group {group}");
        }
    }

    #[test]
    fn test_middle_groups_get_two_am_window() {
        for group in 6..=9 {
            let window = resolve_catchup(group).unwrap();
            assert_eq!(window.start, hm(2, 0), "group {group}");
            assert_eq!(window.end, hm(4, 0), "group {group}");
        }
    }

    #[test]
    fn test_late_groups_get_four_am_window() {
        for group in 10..=12 {
            let window = resolve_catchup(group).unwrap();
            assert_eq!(window.start, hm(4, 0), "group {group}");
            assert_eq!(window.end, hm(6, 0), "group {group}");
        }
    }

    #[test]
    fn test_down_after_midnight_groups_have_no_window() {
        for group in 13..=18 {
            assert_eq!(resolve_catchup(group), None, "group {group}");
        }
    }

    #[test]
    fn test_out_of_table_groups_have_no_window() {
        assert_eq!(resolve_catchup(0), None);
        assert_eq!(resolve_catchup(1), None);
        assert_eq!(resolve_catchup(19), None);
        assert_eq!(resolve_catchup(100), None);
    }
}
