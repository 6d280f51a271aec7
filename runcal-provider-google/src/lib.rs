//! Google Calendar backing for the runcal sync engine.
//!
//! Implements the core `RemoteCalendar` trait on top of the Google
//! Calendar v3 API. The provider manages its own OAuth credentials and
//! token sessions:
//!   ~/.config/runcal/google/app_config.toml
//!   ~/.config/runcal/google/session/{account}.toml

pub mod app_config;
pub mod auth;
pub mod convert;
pub mod remote;
pub mod session;

pub use auth::authenticate;
pub use remote::{CalendarInfo, GoogleRemote, list_writable_calendars};
