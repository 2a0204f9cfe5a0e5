//! Интеграционные тесты run-it-twice через фасад PokerEngine.

use poker_core::domain::chips::Chips;
use poker_core::domain::table::{Table, TableConfig, TableStakes};
use poker_core::domain::variant::{BettingMode, GameVariant};
use poker_core::engine::{EngineError, HandStatus, PlayerAction, PlayerActionKind};
use poker_core::infra::rng::DeterministicRng;
use poker_core::{EngineConfig, PokerEngine};

fn holdem_table() -> Table {
    let config = TableConfig {
        max_seats: 6,
        variant: GameVariant::Holdem,
        betting_mode: BettingMode::NoLimit,
        stakes: TableStakes::no_ante(Chips::new(50), Chips::new(100)),
    };
    Table::new(9, "RIT".to_string(), config)
}

fn heads_up_engine() -> PokerEngine {
    let mut engine = PokerEngine::new(holdem_table(), EngineConfig::default());
    engine.sit_player(0, 100, Chips::new(1000)).unwrap();
    engine.sit_player(1, 200, Chips::new(1000)).unwrap();
    engine
}

fn act(engine: &mut PokerEngine, kind: PlayerActionKind) -> HandStatus {
    let seat = engine.current_actor().expect("есть чей-то ход");
    let player_id = engine.table().player_at(seat).unwrap().player_id;
    engine
        .handle_action(PlayerAction {
            player_id,
            seat,
            kind,
        })
        .expect("действие валидно")
}

fn total_stacks(engine: &PokerEngine) -> u64 {
    engine
        .table()
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .map(|p| p.stack.0)
        .sum()
}

/// Довести хедз-ап раздачу до оллына с включённым run-it-twice.
fn all_in_with_rit(engine: &mut PokerEngine, runs: u8) -> HandStatus {
    let mut rng = DeterministicRng::from_u64(2024);
    engine.start_new_hand(&mut rng).unwrap();

    // SB пушит, появляется оллын – можно собирать согласия и включать RIT.
    act(engine, PlayerActionKind::AllIn);
    engine.consent_run_it_twice(100).unwrap();
    engine.consent_run_it_twice(200).unwrap();
    engine
        .enable_run_it_twice(runs, [7u8; 32], b"players", 1_700_000_000)
        .unwrap();

    // Колл закрывает торги: доигровка придержана под RIT.
    act(engine, PlayerActionKind::Call)
}

#[test]
fn two_runs_produce_two_full_boards() {
    let mut engine = heads_up_engine();
    let status = all_in_with_rit(&mut engine, 2);
    assert_eq!(status, HandStatus::AwaitingRunItTwice);

    let status = engine.run_it_twice_now().unwrap();
    assert!(matches!(status, HandStatus::Finished(_)));

    let rit = engine.run_it_twice_state();
    assert_eq!(rit.runs.len(), 2);
    for run in &rit.runs {
        assert_eq!(run.board.len(), 5);
        assert!(!run.winners.is_empty());
    }

    // Борды различаются seed'ами цепочки (совпадение крайне маловероятно
    // и означало бы одинаковые seed'ы прогонов).
    assert_ne!(rit.runs[0].board, rit.runs[1].board);
}

#[test]
fn pot_distribution_sums_to_original_pot() {
    let mut engine = heads_up_engine();
    all_in_with_rit(&mut engine, 2);
    engine.run_it_twice_now().unwrap();

    let rit = engine.run_it_twice_state();
    let distributed: u64 = rit.pot_distribution.values().map(|c| c.0).sum();
    assert_eq!(distributed, 2000);

    // Сохранение фишек на столе.
    assert_eq!(total_stacks(&engine), 2000);
}

#[test]
fn three_runs_split_remainder_starting_from_first_run() {
    // Банк 2000 на 3 прогона: 667 + 667 + 666.
    let mut engine = heads_up_engine();
    all_in_with_rit(&mut engine, 3);
    engine.run_it_twice_now().unwrap();

    let rit = engine.run_it_twice_state();
    assert_eq!(rit.runs.len(), 3);
    assert_eq!(rit.runs[0].pot_share, Chips::new(667));
    assert_eq!(rit.runs[1].pot_share, Chips::new(667));
    assert_eq!(rit.runs[2].pot_share, Chips::new(666));

    let distributed: u64 = rit.pot_distribution.values().map(|c| c.0).sum();
    assert_eq!(distributed, 2000);
}

#[test]
fn rit_seeds_verify_after_the_runs() {
    let mut engine = heads_up_engine();
    all_in_with_rit(&mut engine, 2);
    engine.run_it_twice_now().unwrap();

    let report = engine.verify_run_it_twice_seeds();
    assert!(report.ok);
    assert_eq!(report.computed_chain.len(), 2);
}

#[test]
fn enable_requires_an_all_in() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(1);
    engine.start_new_hand(&mut rng).unwrap();

    engine.consent_run_it_twice(100).unwrap();
    engine.consent_run_it_twice(200).unwrap();

    let err = engine.enable_run_it_twice(2, [1u8; 32], b"e", 1);
    assert_eq!(err, Err(EngineError::RunItTwiceNeedsAllIn));
}

#[test]
fn enable_requires_unanimous_consent() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(1);
    engine.start_new_hand(&mut rng).unwrap();

    act(&mut engine, PlayerActionKind::AllIn);
    engine.consent_run_it_twice(100).unwrap();
    // Второй игрок согласия не давал.

    let err = engine.enable_run_it_twice(2, [1u8; 32], b"e", 1);
    assert_eq!(err, Err(EngineError::RunItTwiceNeedsConsent));
}

#[test]
fn bad_run_count_rejected() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(1);
    engine.start_new_hand(&mut rng).unwrap();
    act(&mut engine, PlayerActionKind::AllIn);
    engine.consent_run_it_twice(100).unwrap();
    engine.consent_run_it_twice(200).unwrap();

    assert_eq!(
        engine.enable_run_it_twice(1, [1u8; 32], b"e", 1),
        Err(EngineError::RunItTwiceBadRunCount)
    );
    assert_eq!(
        engine.enable_run_it_twice(5, [1u8; 32], b"e", 1),
        Err(EngineError::RunItTwiceBadRunCount)
    );
}

#[test]
fn run_now_without_enable_rejected() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(1);
    engine.start_new_hand(&mut rng).unwrap();

    assert_eq!(
        engine.run_it_twice_now(),
        Err(EngineError::RunItTwiceNotEnabled)
    );
}

#[test]
fn run_now_with_action_pending_rejected() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(2024);
    engine.start_new_hand(&mut rng).unwrap();

    act(&mut engine, PlayerActionKind::AllIn);
    engine.consent_run_it_twice(100).unwrap();
    engine.consent_run_it_twice(200).unwrap();
    engine
        .enable_run_it_twice(2, [7u8; 32], b"players", 1_700_000_000)
        .unwrap();

    // Второй игрок ещё не ответил на оллын – прогонять борды нельзя.
    assert_eq!(
        engine.run_it_twice_now(),
        Err(EngineError::RunItTwiceBettingOpen)
    );

    // Колл закрывает торги – теперь доигровка разрешена.
    let status = act(&mut engine, PlayerActionKind::Call);
    assert_eq!(status, HandStatus::AwaitingRunItTwice);
    assert!(matches!(
        engine.run_it_twice_now(),
        Ok(HandStatus::Finished(_))
    ));
}

#[test]
fn consent_resets_between_hands() {
    let mut engine = heads_up_engine();
    let status = all_in_with_rit(&mut engine, 2);
    assert_eq!(status, HandStatus::AwaitingRunItTwice);
    engine.run_it_twice_now().unwrap();

    // Следующая раздача: старые согласия не действуют.
    let mut rng = DeterministicRng::from_u64(77);
    // После оллына один из игроков мог остаться без фишек – тогда
    // новая раздача не стартует, и это тоже валидный исход.
    if engine.start_new_hand(&mut rng).is_ok() {
        act(&mut engine, PlayerActionKind::AllIn);
        let err = engine.enable_run_it_twice(2, [2u8; 32], b"e", 2);
        assert_eq!(err, Err(EngineError::RunItTwiceNeedsConsent));
    }
}

#[test]
fn verification_without_security_is_vacuously_true() {
    let engine = heads_up_engine();
    let report = engine.verify_run_it_twice_seeds();
    assert!(report.ok);
    assert!(report.computed_chain.is_empty());
}
