//! `RemoteCalendar` implementation on the Google Calendar v3 API.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use google_calendar::types::{MinAccessRole, OrderBy, SendUpdates};
use runcal_core::{EventDescriptor, RemoteCalendar, RemoteEvent, RunCalError, RunCalResult};
use serde::{Deserialize, Serialize};

use crate::convert::to_google_event;
use crate::session::Session;

/// A calendar the account can write to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub id: String,
    pub name: String,
    pub primary: bool,
}

/// Google Calendar bound to one authenticated account.
pub struct GoogleRemote {
    account: String,
}

impl GoogleRemote {
    pub fn new(account: &str) -> Self {
        GoogleRemote {
            account: account.to_string(),
        }
    }

    /// A valid API client, refreshing the session token if expired.
    async fn client(&self) -> Result<google_calendar::Client> {
        Session::load_valid(&self.account).await?.client()
    }
}

impl RemoteCalendar for GoogleRemote {
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> RunCalResult<Vec<RemoteEvent>> {
        let client = self.client().await.map_err(remote_err)?;

        let response = client
            .events()
            .list_all(
                calendar_id,
                "",
                0,
                OrderBy::default(),
                &[],
                "", // search query
                &[],
                false,
                false,
                false,
                &time_max.to_rfc3339(),
                &time_min.to_rfc3339(),
                "",
                "",
            )
            .await
            .context("Failed to fetch events")
            .map_err(remote_err)?;

        Ok(response
            .body
            .into_iter()
            .filter(|e| e.status != "cancelled" && !e.id.is_empty())
            .map(|e| RemoteEvent {
                id: e.id,
                summary: e.summary,
            })
            .collect())
    }

    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &EventDescriptor,
    ) -> RunCalResult<String> {
        let client = self.client().await.map_err(remote_err)?;

        // Leave the id empty so Google assigns one.
        let google_event = to_google_event(event);

        let response = client
            .events()
            .insert(
                calendar_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to create event: {}", event.summary))
            .map_err(remote_err)?;

        Ok(response.body.id)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> RunCalResult<()> {
        let client = self.client().await.map_err(remote_err)?;

        let result = client
            .events()
            .delete(calendar_id, event_id, false, SendUpdates::None)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                // Already gone counts as deleted.
                let error_str = e.to_string();
                if error_str.contains("410") || error_str.contains("Gone") {
                    Ok(())
                } else {
                    Err(e)
                        .with_context(|| format!("Failed to delete event: {}", event_id))
                        .map_err(remote_err)
                }
            }
        }
    }
}

/// Calendars the account can modify, primary first.
pub async fn list_writable_calendars(account: &str) -> Result<Vec<CalendarInfo>> {
    let client = Session::load_valid(account).await?.client()?;

    let response = client
        .calendar_list()
        .list_all(MinAccessRole::default(), false, false)
        .await
        .context("Failed to fetch calendars")?;

    let mut calendars: Vec<CalendarInfo> = response
        .body
        .into_iter()
        .filter(|c| !c.id.is_empty())
        .filter(|c| c.access_role == "owner" || c.access_role == "writer")
        .map(|c| CalendarInfo {
            id: c.id,
            name: if c.summary.is_empty() {
                "(unnamed)".to_string()
            } else {
                c.summary
            },
            primary: c.primary,
        })
        .collect();

    calendars.sort_by_key(|c| !c.primary);

    Ok(calendars)
}

fn remote_err(e: anyhow::Error) -> RunCalError {
    RunCalError::Remote(format!("{:#}", e))
}
