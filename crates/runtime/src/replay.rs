//! Recorded trials and deterministic re-execution.
//!
//! A trial is fully described by its stage, the generator position it
//! started from, the player profile it was entered with and the accepted
//! actions. Replaying those inputs reproduces every intermediate
//! [`TrialState`] byte for byte, which [`replay`] checks through SHA-256
//! digests.

use serde::{Deserialize, Serialize};
use trial_core::{PcgRng, TrialAction, TrialEngine, TrialRegistry, TrialResult, TrialState};

use crate::error::{Result, SessionError};
use crate::profile::PlayerProfile;

/// Inputs and final digest of one trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub level: u8,
    pub seed: u64,
    /// Draws consumed from `seed` before the trial started.
    pub start_offset: u64,
    /// Profile as it was when the trial was entered.
    pub entry: PlayerProfile,
    /// Accepted actions in order. Rejected actions are not recorded.
    pub actions: Vec<TrialAction>,
    pub result: Option<TrialResult>,
    pub final_digest: Option<[u8; 32]>,
}

impl TrialRecord {
    pub(crate) fn begin(level: u8, rng: &PcgRng, entry: PlayerProfile) -> Self {
        Self {
            level,
            seed: rng.seed(),
            start_offset: rng.offset(),
            entry,
            actions: Vec::new(),
            result: None,
            final_digest: None,
        }
    }

    pub(crate) fn finish(&mut self, result: TrialResult, state: &TrialState) {
        self.result = Some(result);
        self.final_digest = Some(state.digest());
    }

    pub fn digest_hex(&self) -> Option<String> {
        self.final_digest.map(hex::encode)
    }
}

/// Everything a replay reconstructed.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplaySummary {
    pub final_state: TrialState,
    pub profile: PlayerProfile,
    /// `None` if the recorded actions stop before a live trial ends.
    pub result: Option<TrialResult>,
    /// Digest after start and after every action.
    pub digests: Vec<[u8; 32]>,
    pub rng_offset: u64,
}

impl ReplaySummary {
    pub fn final_digest(&self) -> [u8; 32] {
        self.final_state.digest()
    }

    /// Whether this replay ends in the state the record was concluded with.
    pub fn matches(&self, record: &TrialRecord) -> bool {
        record.final_digest == Some(self.final_digest())
    }
}

/// Re-runs a recorded trial against `registry`.
///
/// # Errors
///
/// Propagates engine errors, and rejects records that keep acting after the
/// trial has concluded.
pub fn replay(registry: &TrialRegistry, record: &TrialRecord) -> Result<ReplaySummary> {
    let engine = TrialEngine::new(registry);
    let mut rng = PcgRng::with_offset(record.seed, record.start_offset);
    let mut profile = record.entry.clone();

    let mut state = engine.start(record.level, &mut rng)?;
    let mut digests = vec![state.digest()];
    let mut result = None;

    for (index, action) in record.actions.iter().enumerate() {
        if result.is_some() {
            return Err(SessionError::ReplayOverrun { index });
        }
        let outcome = engine.act(&state, &profile.turn_context(), action, &mut rng)?;
        profile.apply(&outcome);
        result = outcome.progress.result();
        state = outcome.progress.into_state();
        digests.push(state.digest());
    }

    if record.result == Some(TrialResult::Abandoned) && result.is_none() {
        result = Some(TrialResult::Abandoned);
    }

    Ok(ReplaySummary {
        final_state: state,
        profile,
        result,
        digests,
        rng_offset: rng.offset(),
    })
}
