//! Core engine for the runcal ecosystem.
//!
//! This crate turns schedule rows into calendar event descriptors and
//! reconciles them against a remote calendar:
//! - `shift` and `schedule` for validated shift records
//! - `catchup` and `decompose` for the shift-to-event rules
//! - `batch` for whole-schedule batches
//! - `remote` and `sync` for the delete-then-insert reconciliation

pub mod batch;
pub mod catchup;
pub mod constants;
pub mod decompose;
pub mod error;
pub mod event;
pub mod remote;
pub mod schedule;
pub mod shift;
pub mod sync;

pub use batch::{BatchSummary, EventBatch, SyncWindow, build_batch, build_batch_in};
pub use catchup::{CatchupWindow, resolve_catchup};
pub use decompose::{decompose, decompose_in};
pub use error::{RunCalError, RunCalResult};
pub use event::{ColorTag, EventDescriptor, ReminderPolicy};
pub use remote::{RemoteCalendar, RemoteEvent};
pub use shift::{RawShiftRow, ShiftKind, ShiftRecord};
pub use sync::{SyncFailure, SyncOp, SyncResult, reconcile};
