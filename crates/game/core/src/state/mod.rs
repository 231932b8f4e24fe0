//! Trial state value types.
//!
//! [`TrialState`] is an immutable snapshot of an ongoing trial. The engine
//! reads a snapshot and returns a new one; fields are only writable inside
//! the crate, so callers cannot edit a trial behind the engine's back.
mod player;

pub use player::{Modifiers, PillInventory, PillRef, PlayerVitals, TurnContext};

use arrayvec::ArrayVec;

use crate::config::TrialConfig;
use crate::intent::{DebuffKind, Intent};

/// Debuff stacks carried between turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debuffs {
    pub mind_chaos: u8,
    pub burn: u8,
    pub weak: u8,
}

impl Debuffs {
    pub const NONE: Self = Self {
        mind_chaos: 0,
        burn: 0,
        weak: 0,
    };

    pub const fn get(&self, kind: DebuffKind) -> u8 {
        match kind {
            DebuffKind::MindChaos => self.mind_chaos,
            DebuffKind::Burn => self.burn,
            DebuffKind::Weak => self.weak,
        }
    }

    fn slot(&mut self, kind: DebuffKind) -> &mut u8 {
        match kind {
            DebuffKind::MindChaos => &mut self.mind_chaos,
            DebuffKind::Burn => &mut self.burn,
            DebuffKind::Weak => &mut self.weak,
        }
    }

    #[must_use]
    pub fn added(mut self, kind: DebuffKind, stacks: u8) -> Self {
        let slot = self.slot(kind);
        *slot = slot.saturating_add(stacks);
        self
    }

    #[must_use]
    pub fn removed(mut self, kind: DebuffKind, stacks: u8) -> Self {
        let slot = self.slot(kind);
        *slot = slot.saturating_sub(stacks);
        self
    }

    #[must_use]
    pub fn cleared(mut self, kind: DebuffKind) -> Self {
        *self.slot(kind) = 0;
        self
    }

    pub const fn is_clear(&self) -> bool {
        self.mind_chaos == 0 && self.burn == 0 && self.weak == 0
    }
}

/// Bounded log of turn summaries; the oldest line is dropped when full.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialLog {
    lines: ArrayVec<String, { TrialConfig::LOG_CAPACITY }>,
}

impl TrialLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn appended(mut self, line: impl Into<String>) -> Self {
        if self.lines.is_full() {
            self.lines.remove(0);
        }
        self.lines.push(line.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Snapshot of one ongoing trial.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialState {
    pub(crate) level: u8,
    pub(crate) total_turns: u8,
    pub(crate) turn: u8,
    pub(crate) shield: u32,
    pub(crate) debuffs: Debuffs,
    pub(crate) wrath: u8,
    pub(crate) current_intent: Intent,
    pub(crate) log: TrialLog,
}

impl TrialState {
    pub(crate) fn begin(level: u8, total_turns: u8, wrath: u8, current_intent: Intent) -> Self {
        Self {
            level,
            total_turns,
            turn: 0,
            shield: 0,
            debuffs: Debuffs::NONE,
            wrath: wrath.min(TrialConfig::MAX_WRATH),
            current_intent,
            log: TrialLog::new(),
        }
    }

    /// Stage index (1-12) this trial runs at.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn total_turns(&self) -> u8 {
        self.total_turns
    }

    /// Turns completed so far.
    pub fn turn(&self) -> u8 {
        self.turn
    }

    pub fn turns_remaining(&self) -> u8 {
        self.total_turns.saturating_sub(self.turn)
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    pub fn debuffs(&self) -> Debuffs {
        self.debuffs
    }

    pub fn wrath(&self) -> u8 {
        self.wrath
    }

    /// Intent the opponent will use on the upcoming turn.
    pub fn current_intent(&self) -> &Intent {
        &self.current_intent
    }

    pub fn log(&self) -> &TrialLog {
        &self.log
    }

    /// Whether every turn has been played.
    pub fn is_complete(&self) -> bool {
        self.turn >= self.total_turns
    }

    /// SHA-256 over the bincode encoding of this snapshot.
    ///
    /// Two trials replayed from the same seed and actions produce the same
    /// digest at every turn.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        // Every field has a known length and no custom serializer, so encoding
        // into a Vec cannot fail.
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentEffect;

    #[test]
    fn debuffs_saturate_and_clear() {
        let debuffs = Debuffs::NONE
            .added(DebuffKind::Burn, 3)
            .added(DebuffKind::Weak, 1)
            .removed(DebuffKind::Weak, 4);
        assert_eq!(debuffs.burn, 3);
        assert_eq!(debuffs.weak, 0);
        assert_eq!(debuffs.added(DebuffKind::MindChaos, 255).added(DebuffKind::MindChaos, 9).mind_chaos, 255);
        assert!(debuffs.cleared(DebuffKind::Burn).is_clear());
    }

    #[test]
    fn log_drops_oldest_beyond_capacity() {
        let mut log = TrialLog::new();
        for i in 0..TrialConfig::LOG_CAPACITY + 3 {
            log = log.appended(format!("line {i}"));
        }
        assert_eq!(log.len(), TrialConfig::LOG_CAPACITY);
        assert_eq!(log.lines()[0], "line 3");
        assert_eq!(log.last(), Some(format!("line {}", TrialConfig::LOG_CAPACITY + 2).as_str()));
    }

    #[test]
    fn begin_clamps_wrath() {
        let intent = Intent::new("palm", "Palm", IntentEffect::damage(1, 2), 0, 1.0);
        let state = TrialState::begin(1, 3, 250, intent);
        assert_eq!(state.wrath(), TrialConfig::MAX_WRATH);
        assert_eq!(state.turn(), 0);
        assert_eq!(state.turns_remaining(), 3);
        assert!(!state.is_complete());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn digest_covers_the_encoded_snapshot() {
        use sha2::{Digest, Sha256};

        let intent = Intent::new("palm", "Palm", IntentEffect::damage(1, 2), 0, 1.0);
        let state = TrialState::begin(1, 3, 20, intent.clone());
        let expected: [u8; 32] = Sha256::digest(bincode::serialize(&state).unwrap()).into();
        let empty: [u8; 32] = Sha256::digest(b"").into();

        assert_eq!(state.digest(), expected);
        assert_ne!(state.digest(), empty);
        assert_ne!(state.digest(), TrialState::begin(1, 3, 28, intent).digest());
    }
}
