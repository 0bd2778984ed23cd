//! Structural invariants that must hold at every published snapshot of any
//! match, whatever the seed.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use ps_core::engine::events::EventType;
use ps_core::engine::pitch;
use ps_core::engine::MatchEngine;
use ps_core::models::{Player, PlayerRole, Team};
use ps_core::MatchPlan;

fn roster(id: u32) -> Team {
    let players = (0..11)
        .map(|i| {
            let role = match i {
                0 => PlayerRole::Goalkeeper,
                1..=4 => PlayerRole::Defender,
                5..=8 => PlayerRole::Midfielder,
                _ => PlayerRole::Forward,
            };
            Player::new(id * 100 + i, format!("T{id} P{i}"), role)
        })
        .collect();
    Team {
        id,
        name: format!("Team {id}"),
        color: "#444444".into(),
        players,
    }
}

fn engine_for(seed: u64, duration_s: u32) -> MatchEngine {
    MatchEngine::new(MatchPlan {
        home_team: roster(1),
        away_team: roster(2),
        duration_s,
        seed,
        config: Default::default(),
    })
    .expect("valid plan")
}

#[test]
fn test_snapshot_invariants_hold_throughout() {
    let mut engine = engine_for(99, 120);

    let violations = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = violations.clone();
    let mut prev_remaining = u32::MAX;
    let mut prev_total = 0u16;
    engine.on_state(Box::new(move |state| {
        if !pitch::contains(state.ball_position) {
            sink.borrow_mut()
                .push(format!("ball out of bounds at {:?}", state.ball_position));
        }
        if let Some(owner) = state.current_ball_owner {
            if owner >= 22 {
                sink.borrow_mut().push(format!("owner index {owner}"));
            }
        }
        if state.time_remaining > prev_remaining {
            sink.borrow_mut().push("countdown went up".to_string());
        }
        prev_remaining = state.time_remaining;
        if state.score.total() < prev_total {
            sink.borrow_mut().push("score went down".to_string());
        }
        prev_total = state.score.total();
    }));

    engine.simulate();
    assert!(
        violations.borrow().is_empty(),
        "invariant violations: {:?}",
        violations.borrow()
    );

    // Players and stamina stay on the pitch and in their pools.
    for pos in engine.player_positions() {
        assert!(pitch::contains(pos), "player off the pitch at {pos:?}");
    }
    for (stamina, max) in engine.player_staminas() {
        assert!((0.0..=max).contains(&stamina));
    }
}

#[test]
fn test_event_stream_is_ordered_and_closed() {
    let mut engine = engine_for(5, 90);
    engine.simulate();

    let events = engine.events();
    assert!(!events.is_empty());
    for pair in events.windows(2) {
        assert!(
            pair[1].elapsed_s >= pair[0].elapsed_s,
            "events out of order: {pair:?}"
        );
    }
    assert_eq!(events.first().unwrap().event_type, EventType::CoinToss);
    assert_eq!(events.last().unwrap().event_type, EventType::FullTime);

    let halftimes = events
        .iter()
        .filter(|e| e.event_type == EventType::HalfTime)
        .count();
    assert_eq!(halftimes, 1);
}

#[test]
fn test_goals_match_goal_events() {
    let mut engine = engine_for(31, 600);
    engine.simulate();
    let goal_events = engine
        .events()
        .iter()
        .filter(|e| e.event_type == EventType::Goal)
        .count() as u16;
    assert_eq!(engine.score().total(), goal_events);
}

#[test]
fn test_display_minute_never_exceeds_ninety() {
    let mut engine = engine_for(8, 45);
    engine.simulate();
    for event in engine.events() {
        assert!(event.display_minute <= 90);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_short_matches_always_finish(seed in any::<u64>()) {
        let mut engine = engine_for(seed, 45);
        engine.simulate();
        prop_assert!(!engine.is_running());
        prop_assert_eq!(engine.time_remaining(), 0);
        let last = engine.events().last().expect("at least full time");
        prop_assert_eq!(last.event_type, EventType::FullTime);
    }
}
