//! Run report printed when the scripted trial ends.
use serde::Serialize;
use trial_core::{RewardDescriptor, TrialResult, TurnReport};

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub session_id: Option<String>,
    pub seed: u64,
    pub level: u8,
    pub stage: String,
    pub result: Option<TrialResult>,
    pub hp: u32,
    pub max_hp: u32,
    pub extra_lives: u32,
    pub turns: Vec<TurnReport>,
    pub rejected: Vec<String>,
    pub log: Vec<String>,
    pub reward: Option<RewardDescriptor>,
    /// Hex SHA-256 of the final trial state.
    pub digest: Option<String>,
}

impl RunReport {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("Trial {} ({}) seed {}\n", self.level, self.stage, self.seed);
        for line in &self.log {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        for rejection in &self.rejected {
            out.push_str(&format!("  rejected: {}\n", rejection));
        }
        let result = self
            .result
            .map_or_else(|| "unfinished".to_string(), |result| result.to_string());
        out.push_str(&format!(
            "Result: {} with {}/{} hp, {} extra lives\n",
            result, self.hp, self.max_hp, self.extra_lives
        ));
        if let Some(reward) = self.reward.as_ref().filter(|reward| !reward.is_empty()) {
            let entries: Vec<String> = reward
                .0
                .iter()
                .map(|(key, amount)| format!("{} {}", key, amount))
                .collect();
            out.push_str(&format!("Reward: {}\n", entries.join(", ")));
        }
        if let Some(digest) = &self.digest {
            out.push_str(&format!("Digest: {}\n", digest));
        }
        out
    }
}
