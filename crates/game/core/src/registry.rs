//! Read-only bundle of every table the engine consults.

use crate::config::TrialConfig;
use crate::env::PillCatalog;
use crate::intent::IntentCatalog;
use crate::stage::StageTable;

/// Validated content for one game build.
///
/// Constructed once by the content loaders and shared by reference with every
/// [`TrialEngine`](crate::engine::TrialEngine).
#[derive(Clone, Debug)]
pub struct TrialRegistry {
    intents: IntentCatalog,
    stages: StageTable,
    pills: PillCatalog,
    config: TrialConfig,
}

impl TrialRegistry {
    pub fn new(
        intents: IntentCatalog,
        stages: StageTable,
        pills: PillCatalog,
        config: TrialConfig,
    ) -> Self {
        Self {
            intents,
            stages,
            pills,
            config,
        }
    }

    pub fn intents(&self) -> &IntentCatalog {
        &self.intents
    }

    pub fn stages(&self) -> &StageTable {
        &self.stages
    }

    pub fn pills(&self) -> &PillCatalog {
        &self.pills
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }
}
