//! Integration tests for the turn engine through the public API.

use std::collections::BTreeSet;

use ladder_games::core::{
    Board, GameError, RandomSource, ScriptedRng, TurnEngine, TurnOutcome, TurnPhase,
};
use ladder_games::types::{GameEvent, Ladder, FINISH_NODE};

fn quiet_board() -> Board {
    Board::new(
        [
            Ladder::new(4, 20),
            Ladder::new(7, 30),
            Ladder::new(11, 25),
            Ladder::new(33, 50),
            Ladder::new(41, 63),
        ],
        52..=61,
    )
    .unwrap()
}

/// Roll until someone wins, answering bonus offers alternately.
/// Returns the number of rolls.
fn play_to_win<R: RandomSource>(engine: &mut TurnEngine<R>) -> usize {
    let mut rolls = 0;
    loop {
        let result = engine.roll_dice().unwrap();
        rolls += 1;
        assert!(rolls < 100_000, "game did not finish");
        match result.outcome {
            TurnOutcome::Won { .. } => return rolls,
            TurnOutcome::BonusRollOffered { .. } => {
                engine.resolve_bonus(rolls % 2 == 0).unwrap();
            }
            TurnOutcome::Passed { .. } => {}
        }
        assert_queue_covers_roster(engine);
    }
}

fn assert_queue_covers_roster<R: RandomSource>(engine: &TurnEngine<R>) {
    let mut seen = BTreeSet::new();
    let current = engine.current_player().unwrap();
    seen.insert(current.name().to_owned());
    for p in engine.turn_queue() {
        seen.insert(p.name().to_owned());
    }
    assert_eq!(engine.turn_queue().len() + 1, engine.players().len());
    assert_eq!(seen.len(), engine.players().len());
}

#[test]
fn test_full_game_ends_with_exactly_one_win() {
    let mut engine = TurnEngine::new(2024);
    engine.start_game(&["Ana", "Budi", "Citra"]).unwrap();
    play_to_win(&mut engine);

    let winner = engine.winner().unwrap();
    assert_eq!(winner.position(), FINISH_NODE);
    assert_eq!(winner.total_wins(), 1);
    let total_wins: u32 = engine.records().iter().map(|(_, r)| r.total_wins).sum();
    assert_eq!(total_wins, 1);
    assert!(!engine.is_started());

    let wins: Vec<_> = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::PlayerWon { .. }))
        .collect();
    assert_eq!(wins.len(), 1);
}

#[test]
fn test_same_seed_replays_identically() {
    let mut a = TurnEngine::new(77);
    let mut b = TurnEngine::new(77);
    a.start_game(&["x", "y"]).unwrap();
    b.start_game(&["x", "y"]).unwrap();

    let rolls_a = play_to_win(&mut a);
    let rolls_b = play_to_win(&mut b);
    assert_eq!(rolls_a, rolls_b);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.drain_events(), b.drain_events());
}

#[test]
fn test_session_scores_sum_to_record_scores_in_first_session() {
    let mut engine = TurnEngine::new(5);
    engine.start_game(&["p", "q", "r", "s"]).unwrap();
    play_to_win(&mut engine);

    for player in engine.players() {
        assert_eq!(player.session_score(), player.total_score());
        assert_eq!(player.session_score() % 10, 0);
    }
}

#[test]
fn test_records_survive_new_rounds_and_games() {
    let mut engine = TurnEngine::new(31337);
    engine.start_game(&["Ana", "Budi"]).unwrap();
    play_to_win(&mut engine);
    let first_winner = engine.winner().unwrap().name().to_owned();
    let score_after_first = engine.records().get(&first_winner).unwrap().total_score();

    engine.start_new_round().unwrap();
    assert_eq!(engine.round(), 2);
    assert!(engine.players().iter().all(|p| p.position() == 1));
    assert!(engine.players().iter().all(|p| p.session_score() == 0));
    play_to_win(&mut engine);

    let wins: u32 = engine.records().iter().map(|(_, r)| r.total_wins).sum();
    assert_eq!(wins, 2);
    assert!(engine.records().get(&first_winner).unwrap().total_score() >= score_after_first);

    // A new game with one returning name keeps that record.
    let before = engine.records().get("Ana").unwrap().get();
    engine.start_game(&["Ana", "Dewi"]).unwrap();
    let ana = &engine.players()[0];
    assert_eq!(ana.record_totals(), before);
    assert_eq!(engine.records().len(), 3);
}

#[test]
fn test_rejections_leave_state_unchanged() {
    let mut engine = TurnEngine::new(9);
    assert_eq!(engine.roll_dice().unwrap_err(), GameError::NotStarted);
    assert_eq!(engine.resolve_bonus(true), Err(GameError::NoBonusPending));
    assert_eq!(engine.start_new_round(), Err(GameError::NotStarted));

    engine.start_game(&["a", "b"]).unwrap();
    engine.drain_events();
    let before = engine.snapshot();
    assert_eq!(engine.start_new_round(), Err(GameError::RoundNotOver));
    assert_eq!(
        engine.start_game(&["only"]),
        Err(GameError::InvalidPlayerCount { count: 1 })
    );
    assert_eq!(engine.snapshot(), before);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn test_scripted_bonus_chain() {
    // Two rolls of 4 forward: 1 -> 5 earns a bonus, and 5 is prime so the second roll climbs.
    let mut engine = TurnEngine::with_rng(ScriptedRng::new([3, 50, 3, 50]));
    engine
        .start_game_with_board(&["Ana", "Budi"], quiet_board())
        .unwrap();

    let first = engine.roll_dice().unwrap();
    assert_eq!(first.outcome, TurnOutcome::BonusRollOffered { node: 5 });
    assert_eq!(engine.phase(), TurnPhase::BonusOffer { node: 5 });
    engine.resolve_bonus(true).unwrap();

    let second = engine.roll_dice().unwrap();
    assert!(second.roll.ladder_eligible);
    // 5 -> 6, 7 climbs to 30, then 31, 32.
    assert_eq!(second.roll.path, vec![6, 7, 30, 31, 32]);
    assert_eq!(second.outcome, TurnOutcome::Passed { next: "Budi".into() });
    assert_eq!(engine.players()[0].position(), 32);
}

#[test]
fn test_stepwise_play_matches_batch_play() {
    let mut batch = TurnEngine::new(404);
    let mut stepwise = TurnEngine::new(404);
    batch.start_game(&["a", "b", "c"]).unwrap();
    stepwise.start_game(&["a", "b", "c"]).unwrap();

    for _ in 0..40 {
        if !batch.is_started() {
            break;
        }
        if let TurnPhase::BonusOffer { .. } = batch.phase() {
            batch.resolve_bonus(false).unwrap();
            stepwise.resolve_bonus(false).unwrap();
            continue;
        }
        let result = batch.roll_dice().unwrap();
        let roll = stepwise.begin_roll().unwrap();
        assert_eq!(roll, result.roll);
        let mut steps = Vec::new();
        while let Some(step) = stepwise.advance_step() {
            steps.push(step);
        }
        assert_eq!(steps, result.steps);
        assert_eq!(stepwise.snapshot(), batch.snapshot());
    }
}
