use anyhow::Result;

use crate::config::Settings;

pub async fn run() -> Result<()> {
    let account = runcal_provider_google::authenticate().await?;

    let mut settings = Settings::load()?;
    settings.account = Some(account.clone());
    settings.save()?;

    println!("Connected as {}", account);

    Ok(())
}
