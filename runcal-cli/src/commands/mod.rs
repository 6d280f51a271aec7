pub mod auth;
pub mod calendars;
pub mod preview;
pub mod sync;

mod select;
