//! Shift-to-event decomposition.
//!
//! One schedule row becomes zero to four wall-clock-ordered blocks. The
//! front portion runs 18:30 to midnight on the session date; back portions
//! run on the following day, interrupted by the group's catchup window.
//! Only the first chronological block of a shift carries reminders.
//!
//! Segments are never merged or dropped: a present catchup window always
//! produces its own block, and exactly one of them.

use chrono::{Days, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use crate::catchup::{CatchupWindow, resolve_catchup};
use crate::constants::DEFAULT_TIMEZONE;
use crate::event::{ColorTag, EventDescriptor, ReminderPolicy};
use crate::shift::{ShiftKind, ShiftRecord};

const MIDNIGHT: NaiveTime = NaiveTime::MIN;

/// Decompose one shift into its calendar blocks, using the deployment's
/// default timezone label.
pub fn decompose(shift: &ShiftRecord) -> Vec<EventDescriptor> {
    decompose_in(shift, DEFAULT_TIMEZONE)
}

/// Decompose one shift with an explicit timezone label.
///
/// Unrecognized kinds produce an empty list; this is a defined no-op, not
/// an error.
pub fn decompose_in(shift: &ShiftRecord, tz: Tz) -> Vec<EventDescriptor> {
    match shift.kind {
        ShiftKind::Full => full_blocks(shift, resolve_catchup(shift.group), tz),
        ShiftKind::FrontHalf => front_half_blocks(shift, tz),
        ShiftKind::BackHalf => back_half_blocks(shift, resolve_catchup(shift.group), tz),
        ShiftKind::Other(_) => Vec::new(),
    }
}

/// Full shift: front block, then (group permitting) back blocks around the
/// catchup window.
fn full_blocks(shift: &ShiftRecord, catchup: Option<CatchupWindow>, tz: Tz) -> Vec<EventDescriptor> {
    let next_day = shift.session_date + Days::new(1);
    let mut blocks = Blocks::new(shift, tz);

    blocks.push(
        "Run Calendar Shift (Front)",
        format!("Full shift - Front portion\nGroup: {}", shift.group),
        shift.session_date.and_time(hm(18, 30)),
        next_day.and_time(MIDNIGHT),
        ColorTag::Work,
        ReminderPolicy::Standard,
    );

    let Some(catchup) = catchup else {
        // Groups 13-18 and unmapped groups: down after midnight, no back
        // portion at all.
        return blocks.into_events();
    };

    let back_description = format!("Full shift - Back portion\nGroup: {}", shift.group);

    // Groups 2-5 open their window at midnight, which would make this
    // block zero-length, so it is skipped.
    if catchup.start != MIDNIGHT {
        blocks.push(
            "Run Calendar Shift (Back)",
            back_description.clone(),
            next_day.and_time(MIDNIGHT),
            next_day.and_time(catchup.start),
            ColorTag::Work,
            ReminderPolicy::None,
        );
    }

    blocks.push(
        "Catchup Time",
        format!("Back half catchup (Group {})", shift.group),
        next_day.and_time(catchup.start),
        next_day.and_time(catchup.end),
        ColorTag::Catchup,
        ReminderPolicy::None,
    );

    blocks.push(
        "Run Calendar Shift (Back)",
        back_description,
        next_day.and_time(catchup.end),
        next_day.and_time(hm(7, 0)),
        ColorTag::Work,
        ReminderPolicy::None,
    );

    blocks.into_events()
}

/// Front half only: evening block plus a fixed midnight-to-1am catchup.
/// The group resolver is not consulted for this kind.
fn front_half_blocks(shift: &ShiftRecord, tz: Tz) -> Vec<EventDescriptor> {
    let next_day = shift.session_date + Days::new(1);
    let mut blocks = Blocks::new(shift, tz);

    blocks.push(
        "Run Calendar Front Half",
        format!("Front half shift\nGroup: {}", shift.group),
        shift.session_date.and_time(hm(18, 30)),
        next_day.and_time(MIDNIGHT),
        ColorTag::Work,
        ReminderPolicy::Standard,
    );

    blocks.push(
        "Catchup Time",
        format!("Front half catchup\nGroup: {}", shift.group),
        next_day.and_time(MIDNIGHT),
        next_day.and_time(hm(1, 0)),
        ColorTag::Catchup,
        ReminderPolicy::None,
    );

    blocks.into_events()
}

/// Back half only: the shift physically occurs on the day after the
/// session date. Whichever block comes first chronologically carries the
/// reminder.
fn back_half_blocks(
    shift: &ShiftRecord,
    catchup: Option<CatchupWindow>,
    tz: Tz,
) -> Vec<EventDescriptor> {
    // Down after midnight: this record produces no shift at all.
    let Some(catchup) = catchup else {
        return Vec::new();
    };

    let next_day = shift.session_date + Days::new(1);
    let mut blocks = Blocks::new(shift, tz);

    let shift_description = format!("Back half shift\nGroup: {}", shift.group);
    let catchup_description = format!("Back half catchup (Group {})", shift.group);

    if catchup.start != MIDNIGHT {
        blocks.push(
            "Run Calendar Back Half",
            shift_description.clone(),
            next_day.and_time(MIDNIGHT),
            next_day.and_time(catchup.start),
            ColorTag::Work,
            ReminderPolicy::Standard,
        );
        blocks.push(
            "Catchup Time",
            catchup_description,
            next_day.and_time(catchup.start),
            next_day.and_time(catchup.end),
            ColorTag::Catchup,
            ReminderPolicy::None,
        );
    } else {
        // The catchup opens the shift: it carries the reminder, and exactly
        // one catchup block is emitted.
        blocks.push(
            "Catchup Time",
            catchup_description,
            next_day.and_time(MIDNIGHT),
            next_day.and_time(catchup.end),
            ColorTag::Catchup,
            ReminderPolicy::Standard,
        );
    }

    blocks.push(
        "Run Calendar Back Half",
        shift_description,
        next_day.and_time(catchup.end),
        next_day.and_time(hm(7, 0)),
        ColorTag::Work,
        ReminderPolicy::None,
    );

    blocks.into_events()
}

/// Accumulates blocks for one shift, applying the shared location suffix
/// and timezone label.
struct Blocks<'a> {
    shift: &'a ShiftRecord,
    tz: Tz,
    events: Vec<EventDescriptor>,
}

impl<'a> Blocks<'a> {
    fn new(shift: &'a ShiftRecord, tz: Tz) -> Self {
        Blocks {
            shift,
            tz,
            events: Vec::new(),
        }
    }

    fn push(
        &mut self,
        summary: &str,
        description: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
        color: ColorTag,
        reminders: ReminderPolicy,
    ) {
        let location = self.shift.location.as_str();
        let summary = if location.is_empty() {
            summary.to_string()
        } else {
            format!("{summary} - {location}")
        };

        debug_assert!(start < end, "blocks must have positive duration");

        self.events.push(EventDescriptor {
            summary,
            location: location.to_string(),
            description,
            start,
            end,
            timezone: self.tz,
            color,
            reminders,
        });
    }

    fn into_events(self) -> Vec<EventDescriptor> {
        self.events
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}
