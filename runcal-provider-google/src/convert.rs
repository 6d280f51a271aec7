//! Conversions between engine descriptors and Google API types.

use runcal_core::{ColorTag, EventDescriptor};

/// Google Calendar color ids for the two block kinds (blue and green).
const COLOR_WORK: &str = "9";
const COLOR_CATCHUP: &str = "10";

/// Build the Google API event body for one descriptor.
///
/// Civil times travel as the naive timestamp plus the event's IANA
/// timezone label; Google resolves the wall-clock meaning, so no UTC
/// conversion happens here. Reminder defaults are always suppressed so a
/// calendar-level default never pings mid-shift blocks.
pub fn to_google_event(event: &EventDescriptor) -> google_calendar::types::Event {
    let color_id = match event.color {
        ColorTag::Work => COLOR_WORK,
        ColorTag::Catchup => COLOR_CATCHUP,
    };

    let reminders = Some(google_calendar::types::Reminders {
        use_default: false,
        overrides: event
            .reminders
            .minutes()
            .iter()
            .map(|&minutes| google_calendar::types::EventReminder {
                method: "popup".to_string(),
                minutes,
            })
            .collect(),
    });

    google_calendar::types::Event {
        summary: event.summary.clone(),
        location: event.location.clone(),
        description: event.description.clone(),
        start: Some(event_time_to_google(event, event.start)),
        end: Some(event_time_to_google(event, event.end)),
        color_id: color_id.to_string(),
        reminders,
        ..Default::default()
    }
}

fn event_time_to_google(
    event: &EventDescriptor,
    time: chrono::NaiveDateTime,
) -> google_calendar::types::EventDateTime {
    google_calendar::types::EventDateTime {
        date: None,
        date_time: Some(time.and_utc()),
        time_zone: event.timezone.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use runcal_core::ReminderPolicy;

    fn descriptor(color: ColorTag, reminders: ReminderPolicy) -> EventDescriptor {
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        EventDescriptor {
            summary: "Run Calendar Shift (Front) - Home".to_string(),
            location: "Home".to_string(),
            description: "Full shift - Front portion\nGroup: 7".to_string(),
            start: date.and_hms_opt(18, 30, 0).unwrap(),
            end: date.and_hms_opt(23, 59, 0).unwrap(),
            timezone: chrono_tz::America::Los_Angeles,
            color,
            reminders,
        }
    }

    #[test]
    fn test_work_event_body() {
        let body = to_google_event(&descriptor(ColorTag::Work, ReminderPolicy::Standard));

        assert_eq!(body.summary, "Run Calendar Shift (Front) - Home");
        assert_eq!(body.color_id, "9");

        let start = body.start.unwrap();
        assert_eq!(start.time_zone, "America/Los_Angeles");
        assert_eq!(
            start.date_time.unwrap().naive_utc(),
            NaiveDate::from_ymd_opt(2025, 3, 20)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap()
        );

        let reminders = body.reminders.unwrap();
        assert!(!reminders.use_default);
        let minutes: Vec<i64> = reminders.overrides.iter().map(|r| r.minutes).collect();
        assert_eq!(minutes, vec![1440, 10]);
    }

    #[test]
    fn test_catchup_event_has_no_reminders() {
        let body = to_google_event(&descriptor(ColorTag::Catchup, ReminderPolicy::None));

        assert_eq!(body.color_id, "10");

        // Defaults are still suppressed even with no overrides.
        let reminders = body.reminders.unwrap();
        assert!(!reminders.use_default);
        assert!(reminders.overrides.is_empty());
    }
}
