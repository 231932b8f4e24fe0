//! Trial client binary.
//!
//! Loads the trial tables, enters the configured stage and plays the action
//! script from the environment, printing the trial log and result.
//!
//! # Examples
//!
//! ```bash
//! TRIAL_SEED=42 TRIAL_LEVEL=3 TRIAL_ACTIONS=guard,steady,surge cargo run -p trial-client
//!
//! TRIAL_PILLS=qi_pill:fine=2 TRIAL_ACTIONS=steady,pill:qi_pill:fine,steady \
//!     TRIAL_OUTPUT=json cargo run -p trial-client
//! ```

mod config;
mod logging;
mod report;

use anyhow::{Context, Result};
use trial_content::ContentFactory;
use trial_core::{PlayerVitals, StageCursor, TrialConfig};
use trial_runtime::{InMemorySettlement, PlayerProfile, SessionError, TrialSession};

use config::{ClientConfig, OutputFormat};
use report::RunReport;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env()?;
    logging::setup_logging(&config.session_id)?;

    tracing::info!("Starting trial client");
    tracing::info!("Content: {}", config.data_dir.display());

    let registry = ContentFactory::new(&config.data_dir)
        .load_registry()
        .with_context(|| format!("failed to load content from {}", config.data_dir.display()))?;

    if !(1..=TrialConfig::STAGE_COUNT).contains(&config.level) {
        anyhow::bail!("TRIAL_LEVEL must be within 1..=12, got {}", config.level);
    }

    let mut profile = PlayerProfile::new(PlayerVitals::full(config.hp))
        .with_extra_lives(config.extra_lives)
        .with_pills(config.pills.clone());
    profile.cleared = config.level - 1;

    let mut session = TrialSession::new(&registry, profile, config.seed, InMemorySettlement::new());
    if session.cursor() != StageCursor::Next(config.level) {
        anyhow::bail!("stage {} is not reachable", config.level);
    }
    let mut last_state = session.enter_next_trial()?.clone();

    let mut turns = Vec::new();
    let mut rejected = Vec::new();
    for action in &config.actions {
        if session.active_state().is_none() {
            break;
        }
        match session.submit(action.clone()) {
            Ok(outcome) => {
                last_state = outcome.progress.state().clone();
                turns.push(outcome.report);
            }
            Err(SessionError::Trial(err)) if err.is_rejection() => {
                rejected.push(format!("{:?}: {}", action, err));
            }
            Err(err) => return Err(err.into()),
        }
    }

    if session.active_state().is_some() {
        tracing::warn!("Action script ended before the trial did, abandoning");
        session.abandon()?;
    }

    let record = session
        .history()
        .last()
        .context("trial produced no record")?;
    let last_settlement = session.settlement().records().last();
    let stage_name = registry
        .stages()
        .get(config.level)
        .map(|stage| stage.name.clone())
        .unwrap_or_default();

    let report = RunReport {
        session_id: config.session_id.clone(),
        seed: config.seed,
        level: config.level,
        stage: stage_name,
        result: record.result,
        hp: session.profile().vitals.hp,
        max_hp: session.profile().vitals.max_hp,
        extra_lives: session.profile().extra_lives,
        turns,
        rejected,
        log: last_state.log().lines().to_vec(),
        reward: last_settlement.map(|settlement| settlement.reward.clone()),
        digest: record.digest_hex(),
    };

    match config.output {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    tracing::info!("Trial client finished");
    Ok(())
}
