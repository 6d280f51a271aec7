use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::select;
use crate::config::Settings;
use crate::render;

pub fn run(file: &Path, name: Option<&str>) -> Result<()> {
    let mut settings = Settings::load()?;
    let (name, batch) = select::load_batch(file, name, &mut settings)?;

    println!("Schedule for {}", name);
    println!("{}\n", render::render_summary(&batch.summary));

    for event in &batch.events {
        println!("{}", render::render_event(event));
    }

    if batch.events.is_empty() {
        println!("   {}", "No calendar events for this schedule".dimmed());
    }

    println!(
        "\nSync window: {} to {}",
        batch.window.earliest, batch.window.latest_exclusive
    );

    settings.save()?;

    Ok(())
}
