//! Session orchestration for the deterministic trial engine.
//!
//! This crate owns everything the pure engine deliberately does not: the
//! player's run-level vitals and pill inventory, the cleared-stage counter,
//! the random stream shared by consecutive trials, and the hand-off of
//! terminal rewards to meta-progression.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts [`TrialSession`], the driver clients embed
//! - [`profile`] holds the player data carried between trials
//! - [`settlement`] defines the meta-progression seam
//! - [`replay`] re-runs recorded trials for verification
pub mod error;
pub mod profile;
pub mod replay;
pub mod session;
pub mod settlement;

pub use error::{Result, SessionError};
pub use profile::PlayerProfile;
pub use replay::{ReplaySummary, TrialRecord, replay};
pub use session::{SubmitOutcome, TrialSession};
pub use settlement::{InMemorySettlement, MetaSettlement, Settlement};
