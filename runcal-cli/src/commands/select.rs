//! Interactive selection shared by the preview and sync commands.

use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use runcal_core::{EventBatch, RawShiftRow, build_batch_in, schedule};

use crate::config::Settings;
use crate::render;

/// Load a schedule export and build the event batch for one provider.
///
/// Updates `settings` with the chosen name but does not save it; the
/// caller persists once the run succeeds.
pub fn load_batch(
    file: &Path,
    name_flag: Option<&str>,
    settings: &mut Settings,
) -> Result<(String, EventBatch)> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read schedule from {}", file.display()))?;
    let rows = schedule::parse_rows(&contents)?;

    let name = match name_flag {
        Some(n) => n.to_string(),
        None => choose_name(&rows, settings.provider_name.as_deref())?,
    };

    let (shifts, rejected) = schedule::shifts_for_provider(&rows, &name);

    for e in &rejected {
        eprintln!("Skipping row: {}", e);
    }

    if shifts.is_empty() {
        anyhow::bail!("No shifts found for \"{}\" in {}", name, file.display());
    }

    let batch = build_batch_in(&shifts, settings.timezone()?)?;

    settings.provider_name = Some(name.clone());

    Ok((name, batch))
}

fn choose_name(rows: &[RawShiftRow], last_used: Option<&str>) -> Result<String> {
    let names = schedule::unique_provider_names(rows);

    if names.is_empty() {
        anyhow::bail!("No provider names found in the schedule");
    }

    let mut items = names.clone();
    items.push("Enter a different name...".to_string());

    // Preselect the last-used name when it is still in the schedule.
    let default = last_used
        .and_then(|last| names.iter().position(|n| n.eq_ignore_ascii_case(last)))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Whose shifts should be synced?")
        .items(&items)
        .default(default)
        .interact()?;

    if selection < names.len() {
        Ok(names[selection].clone())
    } else {
        let input: String = Input::new()
            .with_prompt("Name (substring match)")
            .interact_text()?;
        Ok(input.trim().to_string())
    }
}

/// Resolve the target calendar, prompting unless `--calendar` was given.
/// Returns its id and display label.
pub async fn choose_calendar(
    account: &str,
    flag: Option<&str>,
    settings: &mut Settings,
) -> Result<(String, String)> {
    if let Some(id) = flag {
        settings.calendar_id = Some(id.to_string());
        settings.calendar_label = None;
        return Ok((id.to_string(), id.to_string()));
    }

    let spinner = render::create_spinner("Fetching calendars...".to_string());
    let result = runcal_provider_google::list_writable_calendars(account).await;
    spinner.finish_and_clear();

    let calendars = result?;

    if calendars.is_empty() {
        anyhow::bail!("No writable calendars found for {}", account);
    }

    let items: Vec<String> = calendars
        .iter()
        .map(|c| {
            if c.primary {
                format!("{} (primary)", c.name)
            } else {
                c.name.clone()
            }
        })
        .collect();

    let default = settings
        .calendar_id
        .as_deref()
        .and_then(|id| calendars.iter().position(|c| c.id == id))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Which calendar should receive the events?")
        .items(&items)
        .default(default)
        .interact()?;

    let chosen = &calendars[selection];
    settings.calendar_id = Some(chosen.id.clone());
    settings.calendar_label = Some(chosen.name.clone());

    Ok((chosen.id.clone(), chosen.name.clone()))
}
