use std::fs;

use trial_content::ContentFactory;
use trial_core::{
    PcgRng, PillId, PillOracle, RandomSource, StageCursor, TrialConfig, TrialEngine, roll_intent,
};

#[test]
fn bundled_data_builds_a_registry() {
    let registry = ContentFactory::bundled()
        .load_registry()
        .expect("bundled content should load");

    assert!(registry.intents().universal().count() >= 1);
    assert_eq!(registry.stages().iter().count(), usize::from(TrialConfig::STAGE_COUNT));
    assert!(registry.pills().definition(&PillId::new("qi_pill")).is_some());
    assert_eq!(registry.config().initial_wrath, 20);
    assert_eq!(registry.stages().current_idx(12), StageCursor::AllCleared);
}

#[test]
fn bundled_turn_counts_follow_level_bands() {
    let registry = ContentFactory::bundled().load_registry().unwrap();

    for stage in registry.stages().iter() {
        let expected = match stage.mods.max_rounds {
            Some(rounds) => rounds,
            None => TrialConfig::total_turns(stage.idx),
        };
        assert_eq!(stage.total_turns(), expected, "stage {}", stage.idx);
    }
}

#[test]
fn bundled_intents_respect_tier_gates() {
    let registry = ContentFactory::bundled().load_registry().unwrap();
    let mut rng = PcgRng::new(0x5EED);

    for tier in 1..=TrialConfig::STAGE_COUNT {
        for _ in 0..200 {
            let intent = roll_intent(registry.intents(), tier, &mut rng).unwrap();
            assert!(intent.min_tier <= tier, "{} drawn at tier {tier}", intent.id);
        }
    }
    assert_eq!(rng.draws(), 200 * u64::from(TrialConfig::STAGE_COUNT));
}

#[test]
fn every_bundled_stage_can_start() {
    let registry = ContentFactory::bundled().load_registry().unwrap();
    let engine = TrialEngine::new(&registry);

    for level in 1..=TrialConfig::STAGE_COUNT {
        let state = engine.start(level, &mut PcgRng::new(u64::from(level))).unwrap();
        assert!(state.current_intent().min_tier <= level);
        assert!(engine.reward(level, trial_core::TrialResult::Won).is_some());
    }
}

#[test]
fn malformed_stage_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let bundled = ContentFactory::bundled_data_dir();
    for file in ["config.toml", "intents.ron", "pills.ron"] {
        fs::copy(bundled.join(file), dir.path().join(file)).unwrap();
    }
    fs::write(
        dir.path().join("stages.ron"),
        r#"(stages: [(idx: 1, name: "Only", tier: "One")])"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path()).load_registry().unwrap_err();
    assert!(err.to_string().contains("Invalid stage table"), "{err}");
}

#[test]
fn syntax_errors_name_the_table() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("intents.ron"), "(intents: [").unwrap();

    let err = ContentFactory::new(dir.path()).load_intents().unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse intent table RON"), "{err}");
}
