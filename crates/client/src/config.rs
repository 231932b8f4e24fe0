//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use trial_content::ContentFactory;
use trial_core::{PillInventory, PillQuality, PillRef, TrialAction};

/// Output format of the run report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for one scripted trial run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub seed: u64,
    pub level: u8,
    pub actions: Vec<TrialAction>,
    pub hp: u32,
    pub extra_lives: u32,
    pub pills: PillInventory,
    pub output: OutputFormat,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: ContentFactory::bundled_data_dir(),
            seed: 0,
            level: 1,
            actions: vec![TrialAction::Steady; 5],
            hp: 200,
            extra_lives: 0,
            pills: PillInventory::new(),
            output: OutputFormat::Text,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Directory holding the trial tables (default: bundled data)
    /// - `TRIAL_SEED` - Seed of the random stream (default: 0)
    /// - `TRIAL_LEVEL` - Stage to attempt, 1-12 (default: 1)
    /// - `TRIAL_ACTIONS` - Comma list: steady, guard, surge, pill:<id>[:<quality>]
    /// - `TRIAL_HP` - Starting and maximum hp (default: 200)
    /// - `TRIAL_EXTRA_LIVES` - Extra lives carried in (default: 0)
    /// - `TRIAL_PILLS` - Comma list of `<id>[:<quality>]=<count>`
    /// - `TRIAL_OUTPUT` - `text` or `json` (default: text)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: auto-generated)
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = env::var("CONTENT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_env::<u64>("TRIAL_SEED") {
            config.seed = seed;
        }
        if let Some(level) = read_env::<u8>("TRIAL_LEVEL") {
            config.level = level;
        }
        if let Ok(raw) = env::var("TRIAL_ACTIONS") {
            config.actions = parse_actions(&raw)?;
        }
        if let Some(hp) = read_env::<u32>("TRIAL_HP") {
            config.hp = hp.max(1);
        }
        if let Some(lives) = read_env::<u32>("TRIAL_EXTRA_LIVES") {
            config.extra_lives = lives;
        }
        if let Ok(raw) = env::var("TRIAL_PILLS") {
            config.pills = parse_pills(&raw)?;
        }
        if let Ok(raw) = env::var("TRIAL_OUTPUT") {
            config.output = match raw.trim().to_ascii_lowercase().as_str() {
                "json" => OutputFormat::Json,
                "text" | "" => OutputFormat::Text,
                other => anyhow::bail!("TRIAL_OUTPUT must be text or json, got '{}'", other),
            };
        }

        config.session_id = env::var("GAME_SESSION_ID").ok();

        Ok(config)
    }
}

pub fn parse_actions(raw: &str) -> Result<Vec<TrialAction>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<TrialAction>()
                .with_context(|| format!("invalid entry in TRIAL_ACTIONS: '{}'", item))
        })
        .collect()
}

pub fn parse_pills(raw: &str) -> Result<PillInventory> {
    let mut inventory = PillInventory::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (pill, count) = item
            .split_once('=')
            .with_context(|| format!("pill entry '{}' is missing '=<count>'", item))?;
        let count: u32 = count
            .trim()
            .parse()
            .with_context(|| format!("invalid pill count in '{}'", item))?;
        let (id, quality) = match pill.split_once(':') {
            Some((id, quality)) => (
                id,
                quality
                    .parse::<PillQuality>()
                    .with_context(|| format!("unknown pill quality in '{}'", item))?,
            ),
            None => (pill, PillQuality::Common),
        };
        inventory.add(PillRef::new(id.trim(), quality), count);
    }
    Ok(inventory)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
