use trial_content::ContentFactory;
use trial_core::{
    ActionError, ActionKind, PillQuality, PillRef, PlayerVitals, StageCursor, TrialAction,
    TrialError, TrialRegistry, TrialResult,
};
use trial_runtime::{InMemorySettlement, PlayerProfile, SessionError, TrialSession};

fn registry() -> TrialRegistry {
    ContentFactory::bundled()
        .load_registry()
        .expect("bundled content should load")
}

fn stocked_profile(hp: u32) -> PlayerProfile {
    let pills = trial_core::PillInventory::new()
        .with(PillRef::new("qi_pill", PillQuality::Fine), 3)
        .with(PillRef::new("clear_mind", PillQuality::Common), 2);
    PlayerProfile::new(PlayerVitals::full(hp)).with_pills(pills)
}

fn choose(session: &TrialSession<'_, InMemorySettlement>) -> TrialAction {
    let state = session.active_state().expect("trial should be active");
    let profile = session.profile();
    let available = session.available_actions();

    if profile.vitals.hp * 2 < profile.vitals.max_hp && available.contains(&ActionKind::Pill) {
        if let Some((pill, _)) = profile.pills.iter().find(|(_, count)| *count > 0) {
            return TrialAction::Pill(pill.clone());
        }
    }
    let debuffs = state.debuffs();
    if debuffs.mind_chaos > 0 || debuffs.burn > 0 {
        TrialAction::Steady
    } else {
        TrialAction::Guard
    }
}

#[test]
fn steady_only_clears_the_first_stage() {
    let registry = registry();
    let profile = PlayerProfile::new(PlayerVitals::full(200));
    let mut session = TrialSession::new(&registry, profile, 2024, InMemorySettlement::new());

    let state = session.enter_next_trial().unwrap();
    assert_eq!(state.level(), 1);
    assert_eq!(state.total_turns(), 3);

    let mut turns = 0;
    let settlement = loop {
        turns += 1;
        let outcome = session.submit(TrialAction::Steady).unwrap();
        if let Some(settlement) = outcome.settlement {
            assert_eq!(outcome.progress.state().turn(), 3);
            break settlement;
        }
    };

    assert_eq!(turns, 3);
    assert_eq!(settlement.result, TrialResult::Won);
    assert_eq!(settlement.reward.get("legacy_points"), Some(10));
    assert_eq!(session.cursor(), StageCursor::Next(2));
    assert!(session.profile().vitals.hp >= 200 - 3 * 11);
}

#[test]
fn a_full_run_settles_every_trial_once() {
    let registry = registry();
    let mut session = TrialSession::new(&registry, stocked_profile(400), 77, InMemorySettlement::new());

    let mut cleared_before = 0;
    for _ in 0..200 {
        if session.active_state().is_none() {
            match session.enter_next_trial() {
                Ok(_) => {}
                Err(SessionError::AllStagesCleared | SessionError::Incapacitated) => break,
                Err(err) => panic!("unexpected session error: {err}"),
            }
        }
        let action = choose(&session);
        let outcome = session.submit(action).unwrap();

        let profile = session.profile();
        assert!(profile.vitals.hp <= profile.vitals.max_hp);
        assert!(profile.cleared >= cleared_before);
        cleared_before = profile.cleared;
        if outcome.settlement.is_some() {
            assert!(session.active_state().is_none());
        }
    }

    let records = session.settlement().records();
    assert!(!records.is_empty());
    assert_eq!(records.len(), session.history().len());
    let wins = records.iter().filter(|r| r.result == TrialResult::Won).count();
    assert_eq!(usize::from(session.profile().cleared), wins);
}

#[test]
fn pills_are_consumed_from_the_profile() {
    let registry = registry();
    let mut session = TrialSession::new(&registry, stocked_profile(200), 5, InMemorySettlement::new());
    let qi = PillRef::new("qi_pill", PillQuality::Fine);

    session.enter_next_trial().unwrap();
    let outcome = session.submit(TrialAction::Pill(qi.clone())).unwrap();

    assert_eq!(outcome.report.action, ActionKind::Pill);
    assert_eq!(session.profile().pills.count(&qi), 2);
}

#[test]
fn rejected_actions_do_not_advance_the_stream() {
    let registry = registry();
    let mut session = TrialSession::new(&registry, stocked_profile(200), 9, InMemorySettlement::new());

    session.enter_next_trial().unwrap();
    session.submit(TrialAction::Guard).unwrap();

    let before = session.rng().offset();
    let turn = session.active_state().map(|s| s.turn());
    let err = session.submit(TrialAction::Surge).unwrap_err();
    assert_eq!(
        err,
        SessionError::Trial(TrialError::Action(ActionError::SurgeLocked { weak: 1 }))
    );

    let missing = TrialAction::Pill(PillRef::new("jade_marrow", PillQuality::Perfect));
    assert!(matches!(
        session.submit(missing),
        Err(SessionError::Trial(TrialError::Action(ActionError::PillUnavailable(_))))
    ));

    assert_eq!(session.rng().offset(), before);
    assert_eq!(session.active_state().map(|s| s.turn()), turn);
    session.submit(TrialAction::Steady).unwrap();
}

#[test]
fn extra_life_carries_the_player_through() {
    let registry = registry();
    let profile = PlayerProfile::new(PlayerVitals::new(1, 200)).with_extra_lives(2);
    let mut session = TrialSession::new(&registry, profile, 11, InMemorySettlement::new());

    session.enter_next_trial().unwrap();
    let outcome = session.submit(TrialAction::Steady).unwrap();

    assert!(outcome.report.extra_life_used);
    assert_eq!(session.profile().vitals.hp, 1);
    assert_eq!(session.profile().extra_lives, 1);
    assert!(outcome.settlement.is_none());
}

#[test]
fn abandoning_pays_the_losing_reward() {
    let registry = registry();
    let mut session = TrialSession::new(&registry, stocked_profile(200), 3, InMemorySettlement::new());

    session.enter_next_trial().unwrap();
    session.submit(TrialAction::Steady).unwrap();
    let settlement = session.abandon().unwrap();

    assert_eq!(settlement.result, TrialResult::Abandoned);
    assert_eq!(settlement.reward.get("legacy_points"), Some(2));
    assert_eq!(session.cursor(), StageCursor::Next(1));
    assert_eq!(session.history()[0].result, Some(TrialResult::Abandoned));
}
