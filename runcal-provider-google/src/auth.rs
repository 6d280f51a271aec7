//! OAuth authentication flow for the Google provider.
//!
//! Opens the consent URL in the user's browser and receives the
//! authorization code on a local callback listener.

use std::collections::HashMap;

use anyhow::{Context, Result};
use google_calendar::Client;
use google_calendar::types::MinAccessRole;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::app_config;
use crate::session::{Session, SessionData};

pub const REDIRECT_PORT: u16 = 8085;
const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

pub fn redirect_uri() -> String {
    format!("http://localhost:{}/callback", REDIRECT_PORT)
}

/// Run the full OAuth authentication flow.
/// Returns the account email/identifier.
pub async fn authenticate() -> Result<String> {
    let creds = app_config::load()?;
    let mut client = Client::new(
        creds.client_id.clone(),
        creds.client_secret.clone(),
        redirect_uri(),
        String::new(),
        String::new(),
    );

    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();
    let auth_url = client.user_consent_url(&scopes);

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let params = wait_for_callback(REDIRECT_PORT).await?;

    let code = params
        .get("code")
        .ok_or_else(|| anyhow::anyhow!("No code in callback"))?;
    let state = params
        .get("state")
        .ok_or_else(|| anyhow::anyhow!("No state in callback"))?;

    eprintln!("\nReceived authorization code, exchanging for tokens...");

    let access_token = client
        .get_access_token(code, state)
        .await
        .context("Failed to exchange code for tokens")?;

    let data: SessionData = (&access_token).into();

    // Discover the account's email from its primary calendar
    let api_client = Client::new(
        creds.client_id,
        creds.client_secret,
        String::new(),
        access_token.access_token.clone(),
        access_token.refresh_token.clone(),
    );
    let response = api_client
        .calendar_list()
        .list_all(MinAccessRole::default(), false, false)
        .await
        .context("Failed to fetch calendar list for account discovery")?;

    let email = response
        .body
        .iter()
        .find(|cal| cal.primary)
        .map(|cal| cal.id.clone())
        .unwrap_or_else(|| "(unknown)".to_string());

    Session::new(&email, data).save()?;

    eprintln!("Authentication successful!");

    Ok(email)
}

/// Listen for the OAuth redirect and return its query parameters.
async fn wait_for_callback(port: u16) -> Result<HashMap<String, String>> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind to port {}", port))?;

    eprintln!("Waiting for OAuth callback on port {}...", port);

    let (mut stream, _) = listener
        .accept()
        .await
        .context("Failed to accept connection")?;

    let (reader, mut writer) = stream.split();
    let mut reader = BufReader::new(reader);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .context("Invalid request")?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))?;

    let params: HashMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let response = "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>\
        <h1>Authentication successful!</h1>\
        <p>You can close this window and return to the terminal.</p>\
        </body></html>";

    writer.write_all(response.as_bytes()).await?;
    writer.flush().await?;

    Ok(params)
}
