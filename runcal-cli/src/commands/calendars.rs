use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::Settings;
use crate::render;

pub async fn run() -> Result<()> {
    let settings = Settings::load()?;
    let account = settings.require_account()?;

    let spinner = render::create_spinner("Fetching calendars...".to_string());
    let result = runcal_provider_google::list_writable_calendars(account).await;
    spinner.finish_and_clear();

    let calendars = result?;

    if calendars.is_empty() {
        println!("No writable calendars found for {}", account);
        return Ok(());
    }

    for cal in &calendars {
        let marker = if cal.primary { " (primary)" } else { "" };
        println!("{}{} {}", cal.name, marker, cal.id.dimmed());
    }

    Ok(())
}
