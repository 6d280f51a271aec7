use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use runcal_core::reconcile;
use runcal_provider_google::GoogleRemote;

use crate::commands::select;
use crate::config::Settings;
use crate::render;

pub async fn run(
    file: &Path,
    name: Option<&str>,
    calendar: Option<&str>,
    yes: bool,
) -> Result<()> {
    let mut settings = Settings::load()?;
    let account = settings.require_account()?.to_string();

    let (name, batch) = select::load_batch(file, name, &mut settings)?;
    let (calendar_id, calendar_label) =
        select::choose_calendar(&account, calendar, &mut settings).await?;

    println!("\n{}", render::render_summary(&batch.summary));
    println!(
        "\nThis will delete previously synced events on \"{}\" between {} and {}, \
        then create {} event(s) for {}.",
        calendar_label,
        batch.window.earliest,
        batch.window.latest_exclusive,
        batch.events.len(),
        name
    );

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Continue?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let remote = GoogleRemote::new(&account);

    let spinner = render::create_spinner("Syncing...".to_string());
    let result = reconcile(&remote, &calendar_id, &batch.window, &batch.events, Utc::now()).await;
    spinner.finish_and_clear();

    println!("{}", render::render_result(&result));

    settings.save()?;

    if !result.is_clean() {
        println!(
            "{}",
            format!(
                "{} operation(s) failed; re-run sync to retry.",
                result.failures.len()
            )
            .yellow()
        );
    }

    Ok(())
}
