//! Online job search for jobtrack.
//!
//! Queries the Jooble API and merges the answer with local state.
//!
//! # Architecture
//!
//! - **Signal**: [`CancelSignal`] is created per search and closed by cancel,
//!   navigate-away, or a newer search.
//! - **Client**: [`JoobleClient`] (behind the [`JobSource`] seam) performs one
//!   POST, racing every wait against the signal.
//! - **Orchestrator**: [`SearchOrchestrator`] spawns the client, drops results
//!   already in the [`jobtrack_core::RecordStore`], and resolves an [`Outcome`].
//! - **Handoff**: the outcome reaches the caller only through [`Foreground`].

pub mod cancel;
pub mod client;
pub mod error;
pub mod foreground;
pub mod orchestrator;
pub mod outcome;
pub mod types;

pub use cancel::CancelSignal;
pub use client::{JobSource, JoobleClient};
pub use error::{ClientError, SearchError};
pub use foreground::{foreground_queue, Foreground, ForegroundQueue, ForegroundReceiver, ForegroundTask};
pub use orchestrator::{SearchHandle, SearchId, SearchOrchestrator};
pub use outcome::Outcome;
