//! Execute-report action for reportdesk.
//!
//! This crate provides [`ExecuteReportAction`], the handler behind the
//! "execute report" button of the administration console, and the small
//! action contract it is invoked through.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    ConfirmationGate                          │
//! │  - asks the operator before anything runs                   │
//! │  - Idle → AwaitingConfirmation → Executing → Idle            │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   ExecuteReportAction                        │
//! │  - resolve parameters      (ReportService)                   │
//! │  - run the query           (SearchService)                   │
//! │  - generate the file       (ReportService)                   │
//! │  - stream it to the client (Download), then delete it        │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!             ActionOutcome  +  ActionEvent (error dialog)
//! ```
//!
//! Failures produce a single message, rendered from [`Labels`], that is both
//! returned in the [`ActionOutcome`] and sent to the [`ActionNotifier`].

mod action;
mod error;
mod events;
mod executor;
mod labels;
mod outcome;

pub use action::{Action, AutoConfirm, Confirm, ConfirmationGate, GateState};
pub use error::ActionError;
pub use events::{ActionEvent, ActionNotifier, ChannelNotifier, NoopNotifier};
pub use executor::ExecuteReportAction;
pub use labels::{
  CONFIRMATION, FILE_READ_ERROR, Labels, REPORT_GENERATE_ERROR, SEARCH_ERROR, format_message,
};
pub use outcome::ActionOutcome;
