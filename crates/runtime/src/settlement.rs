//! Hand-off of terminal trial results to meta-progression.

use serde::{Deserialize, Serialize};
use trial_core::{RewardDescriptor, TrialResult};

/// Receiver of concluded trials, implemented by the legacy/achievement layer.
///
/// Called exactly once per trial that ends in a win, a loss or abandonment.
pub trait MetaSettlement {
    fn settle(&mut self, stage_idx: u8, result: TrialResult, reward: &RewardDescriptor);
}

/// One settled trial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub stage_idx: u8,
    pub result: TrialResult,
    pub reward: RewardDescriptor,
}

/// Settlement sink that keeps every record in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemorySettlement {
    records: Vec<Settlement>,
}

impl InMemorySettlement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Settlement] {
        &self.records
    }

    /// Sums one reward key over every settled trial.
    pub fn total(&self, key: &str) -> i64 {
        self.records
            .iter()
            .filter_map(|record| record.reward.get(key))
            .sum()
    }
}

impl MetaSettlement for InMemorySettlement {
    fn settle(&mut self, stage_idx: u8, result: TrialResult, reward: &RewardDescriptor) {
        self.records.push(Settlement {
            stage_idx,
            result,
            reward: reward.clone(),
        });
    }
}

impl<S: MetaSettlement + ?Sized> MetaSettlement for &mut S {
    fn settle(&mut self, stage_idx: u8, result: TrialResult, reward: &RewardDescriptor) {
        (**self).settle(stage_idx, result, reward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_across_records() {
        let mut sink = InMemorySettlement::new();
        sink.settle(1, TrialResult::Won, &RewardDescriptor::new().with("legacy_points", 10));
        sink.settle(2, TrialResult::Lost, &RewardDescriptor::new().with("legacy_points", 4));
        sink.settle(2, TrialResult::Abandoned, &RewardDescriptor::new());

        assert_eq!(sink.records().len(), 3);
        assert_eq!(sink.total("legacy_points"), 14);
        assert_eq!(sink.total("insight"), 0);
    }
}
