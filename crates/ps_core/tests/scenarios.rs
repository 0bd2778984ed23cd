//! End-to-end scenario checks: full short matches plus surgically prepared
//! situations (injected flights, rolling balls) driven through the public
//! frame API.

use ps_core::engine::ball::{BallFlight, FlightKind};
use ps_core::engine::clock::MatchPhase;
use ps_core::engine::events::EventType;
use ps_core::engine::geometry::Vec2;
use ps_core::engine::pitch;
use ps_core::engine::{MatchEngine, FRAME_DT_MS};
use ps_core::models::{Player, PlayerRole, Team, TeamSide};
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
        color: "#333333".into(),
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
fn test_short_match_runs_to_completion() {
    let mut engine = engine_for(42, 45);
    engine.simulate();

    assert_eq!(engine.phase(), MatchPhase::Finished);
    assert!(!engine.is_running());
    assert_eq!(engine.time_remaining(), 0);
    assert!(engine
        .events()
        .iter()
        .any(|e| e.event_type == EventType::Kickoff));
}

#[test]
fn test_stopped_engine_goes_inert() {
    let mut engine = engine_for(42, 300);
    for _ in 0..100 {
        engine.step_frame(FRAME_DT_MS);
    }
    engine.stop_game();
    let remaining = engine.time_remaining();
    let events = engine.events().len();

    for _ in 0..200 {
        engine.step_frame(FRAME_DT_MS);
    }
    assert_eq!(engine.time_remaining(), remaining);
    assert_eq!(engine.events().len(), events);

    // Stopping twice is fine.
    engine.stop_game();
}

#[test]
fn test_loose_ball_is_picked_up() {
    let mut engine = engine_for(6, 300);
    engine.force_in_play();
    engine.place_loose_ball(Vec2::new(40.0, 20.0));
    engine.place_player(7, Vec2::new(40.5, 20.0));

    // Within a few decision intervals the nearest player collects it.
    for _ in 0..10 {
        engine.step_frame(FRAME_DT_MS);
        if engine.ball().owner.is_some() {
            break;
        }
    }
    assert_eq!(engine.ball().owner, Some(7));
}

#[test]
fn test_ball_over_the_line_scores_exactly_one() {
    let mut engine = engine_for(13, 300);
    engine.force_in_play();
    let before = engine.score();

    // Roll the ball into the open goal mouth with nobody near it.
    for idx in 0..22 {
        engine.place_player(idx, Vec2::new(20.0, 60.0));
    }
    engine.place_rolling_ball(
        Vec2::new(100.0, pitch::CENTER_Y),
        Vec2::new(12.0, 0.0),
        TeamSide::Home,
    );
    for _ in 0..20 {
        engine.step_frame(FRAME_DT_MS);
        if engine.score() != before {
            break;
        }
    }

    let after = engine.score();
    assert_eq!(after.home, before.home + 1);
    assert_eq!(after.away, before.away);
    assert_eq!(
        engine
            .events()
            .iter()
            .filter(|e| e.event_type == EventType::Goal)
            .count(),
        1
    );
    // Conceding side restarts with the kickoff.
    let kickoff_owner = engine.ball().owner.expect("kickoff taker");
    assert_eq!(TeamSide::of_index(kickoff_owner), TeamSide::Away);
}

#[test]
fn test_wide_shot_restarts_with_goal_kick() {
    let mut engine = engine_for(13, 300);
    engine.force_in_play();

    engine.inject_flight(BallFlight {
        kind: FlightKind::Shot,
        kicker: 9,
        receiver: None,
        interceptor: None,
        start: Vec2::new(95.0, 10.0),
        end: Vec2::new(pitch::LENGTH_M, 5.0), // well outside the mouth
        start_ms: 0,
        duration_ms: 1,
        xg: Some(0.05),
    });
    engine.step_frame(FRAME_DT_MS);

    assert!(engine
        .events()
        .iter()
        .any(|e| e.event_type == EventType::GoalKick));
    let owner = engine.ball().owner.expect("keeper restarts");
    assert_eq!(owner, engine.gk_index(TeamSide::Away));
}

#[test]
fn test_on_target_shot_beats_the_keeper_and_scores() {
    // The keeper always keeps a residual save chance, so scan a handful of
    // seeds; the contest rolls are pure hashes of the seed and tick, so the
    // seed that produces the goal produces it on every run.
    for seed in 0..40 {
        let mut engine = engine_for(seed, 300);
        engine.force_in_play();
        engine.inject_flight(BallFlight {
            kind: FlightKind::Shot,
            kicker: 9,
            receiver: None,
            interceptor: None,
            start: Vec2::new(95.0, pitch::CENTER_Y),
            end: Vec2::new(pitch::LENGTH_M, pitch::CENTER_Y), // dead center of the mouth
            start_ms: 0,
            duration_ms: 1,
            xg: Some(0.8),
        });
        engine.step_frame(FRAME_DT_MS);

        if engine.score().home == 1 {
            assert_eq!(engine.score().away, 0);
            let goals: Vec<_> = engine
                .events()
                .iter()
                .filter(|e| e.event_type == EventType::Goal)
                .collect();
            assert_eq!(goals.len(), 1);
            assert_eq!(goals[0].team, Some(TeamSide::Home));
            assert_eq!(goals[0].player_idx, Some(9));
            assert_eq!(goals[0].xg, Some(0.8));
            return;
        }
        // Not a goal means the keeper got credit for the stop.
        assert!(engine
            .events()
            .iter()
            .any(|e| e.event_type == EventType::Save));
    }
    panic!("an on-target shot at xG 0.8 was saved on 40 straight seeds");
}

#[test]
fn test_rolling_ball_over_touchline_awards_opposite_throw() {
    let mut engine = engine_for(19, 300);
    engine.force_in_play();
    // Park everyone away from the ball path so nothing intervenes.
    for idx in 0..22 {
        engine.place_player(idx, Vec2::new(90.0, 60.0));
    }
    engine.place_rolling_ball(Vec2::new(30.0, 1.0), Vec2::new(0.0, -8.0), TeamSide::Home);

    for _ in 0..40 {
        engine.step_frame(FRAME_DT_MS);
        if engine
            .events()
            .iter()
            .any(|e| e.event_type == EventType::ThrowIn)
        {
            break;
        }
    }
    let throw = engine
        .events()
        .iter()
        .find(|e| e.event_type == EventType::ThrowIn)
        .expect("ball must go out");
    assert_eq!(throw.team, Some(TeamSide::Away));
}

#[test]
fn test_halftime_switches_attack_direction() {
    let mut engine = engine_for(4, 60);

    let mut saw_first_half = false;
    while engine.is_running() {
        engine.step_frame(FRAME_DT_MS);
        if !saw_first_half {
            assert!(engine.attacks_right(TeamSide::Home));
            assert!(!engine.attacks_right(TeamSide::Away));
            saw_first_half = true;
        }
        if engine
            .events()
            .iter()
            .any(|e| e.event_type == EventType::HalfTime)
        {
            break;
        }
    }
    assert!(!engine.attacks_right(TeamSide::Home));
    assert!(engine.attacks_right(TeamSide::Away));
}
