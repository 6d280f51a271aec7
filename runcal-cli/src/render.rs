//! Colored terminal output for engine types.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use runcal_core::{BatchSummary, ColorTag, EventDescriptor, SyncOp, SyncResult};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// One event line: colored summary plus dimmed time range.
pub fn render_event(event: &EventDescriptor) -> String {
    let summary = match event.color {
        ColorTag::Work => event.summary.blue().to_string(),
        ColorTag::Catchup => event.summary.green().to_string(),
    };

    let time = format!(
        "{} - {}",
        event.start.format("%a %b %-d %H:%M"),
        event.end.format("%H:%M")
    );

    format!("   {} {}", summary, time.dimmed())
}

pub fn render_summary(summary: &BatchSummary) -> String {
    let mut lines = vec![format!(
        "{} shift(s), {} event(s)",
        summary.shifts, summary.events
    )];

    for (kind, count) in &summary.by_kind {
        lines.push(format!("   {}: {}", kind.dimmed(), count));
    }

    lines.join("\n")
}

pub fn render_result(result: &SyncResult) -> String {
    let mut lines = vec![format!(
        "Synced: {} deleted, {} created",
        result.events_deleted, result.events_created
    )];

    for failure in &result.failures {
        let op = match failure.op {
            SyncOp::List => "list",
            SyncOp::Delete => "delete",
            SyncOp::Create => "create",
        };
        let subject = if failure.summary.is_empty() {
            "(calendar listing)".to_string()
        } else {
            failure.summary.clone()
        };
        lines.push(format!(
            "   {} {} failed: {} ({})",
            "!".red(),
            op,
            subject.red(),
            failure.reason.dimmed()
        ));
    }

    lines.join("\n")
}
