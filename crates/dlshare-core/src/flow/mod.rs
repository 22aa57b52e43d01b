//! The download-and-share flow.
//!
//! `Idle → Validating → Downloading → Probing → {Success, Failed}`, with
//! `Abandoned` when the screen goes away while the worker runs. Validation and
//! all user-visible effects happen on the caller's task; download and probe run
//! on one blocking worker whose result comes back exactly once.

mod controller;
mod state;
mod worker;

pub use controller::{FlowController, FlowOutcome, FlowReport, FlowSettings};
pub use state::{FailureKind, FlowState};
pub use worker::{DownloadJob, WorkOutcome};
