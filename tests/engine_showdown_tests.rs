//! Тесты шоудауна: делёж потов, остаток фишек, сохранение фишек,
//! победа без вскрытия.

use poker_core::domain::card::Card;
use poker_core::domain::chips::Chips;
use poker_core::domain::player::PlayerAtTable;
use poker_core::domain::table::{Table, TableConfig, TableStakes};
use poker_core::domain::variant::{BettingMode, GameVariant};
use poker_core::engine::showdown::{high_winners_on_board, split_among};
use poker_core::engine::{HandStatus, PlayerAction, PlayerActionKind};
use poker_core::infra::rng::DeterministicRng;
use poker_core::{EngineConfig, PokerEngine};

fn c(s: &str) -> Card {
    s.parse().expect("валидная карта")
}

fn holdem_table(max_seats: u8) -> Table {
    let config = TableConfig {
        max_seats,
        variant: GameVariant::Holdem,
        betting_mode: BettingMode::NoLimit,
        stakes: TableStakes::no_ante(Chips::new(50), Chips::new(100)),
    };
    Table::new(7, "Showdown".to_string(), config)
}

/// Движок с двумя игроками по 1000 фишек.
fn heads_up_engine() -> PokerEngine {
    let mut engine = PokerEngine::new(holdem_table(6), EngineConfig::default());
    engine.sit_player(0, 100, Chips::new(1000)).unwrap();
    engine.sit_player(1, 200, Chips::new(1000)).unwrap();
    engine
}

/// Сумма всех стеков за столом.
fn total_stacks(engine: &PokerEngine) -> u64 {
    engine
        .table()
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .map(|p| p.stack.0)
        .sum()
}

/// Сходить текущим игроком.
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

#[test]
fn split_remainder_goes_to_last_winner() {
    // 101 фишка на двоих: 50 + 51, лишняя фишка последнему в порядке оценки.
    let payouts = split_among(Chips::new(101), &[3, 5]);
    assert_eq!(payouts, vec![(3, Chips::new(50)), (5, Chips::new(51))]);
}

#[test]
fn split_exact_division_has_no_remainder() {
    let payouts = split_among(Chips::new(300), &[0, 1, 2]);
    assert_eq!(
        payouts,
        vec![
            (0, Chips::new(100)),
            (1, Chips::new(100)),
            (2, Chips::new(100)),
        ]
    );
}

#[test]
fn high_winner_determined_by_board_and_hole_cards() {
    let mut table = holdem_table(6);
    table.seats[0] = Some(PlayerAtTable::new(10, Chips::new(1000)));
    table.seats[1] = Some(PlayerAtTable::new(20, Chips::new(1000)));
    table.player_at_mut(0).unwrap().hole_cards = vec![c("Ah"), c("Ad")];
    table.player_at_mut(1).unwrap().hole_cards = vec![c("Kh"), c("Kd")];

    let board = [c("2c"), c("7d"), c("9h"), c("Js"), c("4s")];
    let (winners, ranks) = high_winners_on_board(&table, &[0, 1], &board);

    assert_eq!(winners, vec![0]);
    assert!(ranks[&0] > ranks[&1]);
}

#[test]
fn tied_hands_split_the_pot() {
    // Оба играют борд: роял-флеш на столе.
    let mut table = holdem_table(6);
    table.seats[0] = Some(PlayerAtTable::new(10, Chips::new(1000)));
    table.seats[1] = Some(PlayerAtTable::new(20, Chips::new(1000)));
    table.player_at_mut(0).unwrap().hole_cards = vec![c("2c"), c("3d")];
    table.player_at_mut(1).unwrap().hole_cards = vec![c("4c"), c("5d")];

    let board = [c("10h"), c("Jh"), c("Qh"), c("Kh"), c("Ah")];
    let (winners, _) = high_winners_on_board(&table, &[0, 1], &board);
    assert_eq!(winners, vec![0, 1]);
}

#[test]
fn win_by_fold_awards_pot_without_showdown() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(7);
    engine.start_new_hand(&mut rng).unwrap();

    // Хедз-ап: дилер (SB) ходит первым и фолдит.
    let status = act(&mut engine, PlayerActionKind::Fold);
    let HandStatus::Finished(summary) = status else {
        panic!("раздача должна закончиться");
    };

    // Банк = SB + BB, достаётся оставшемуся игроку; фишки сохранены.
    assert_eq!(summary.total_pot, Chips::new(150));
    assert_eq!(total_stacks(&engine), 2000);

    // Победитель не вскрывался – рангов нет.
    let winner = summary.results.iter().find(|r| r.is_winner).unwrap();
    assert_eq!(winner.rank, None);
    assert_eq!(winner.net_chips, Chips::new(150));
}

#[test]
fn checked_down_hand_reaches_showdown_and_conserves_chips() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(42);
    engine.start_new_hand(&mut rng).unwrap();

    // Префлоп: SB коллирует, BB чекает.
    act(&mut engine, PlayerActionKind::Call);
    let mut status = act(&mut engine, PlayerActionKind::Check);

    // Флоп/тёрн/ривер: чек-чек.
    while status == HandStatus::Ongoing {
        status = act(&mut engine, PlayerActionKind::Check);
    }

    let HandStatus::Finished(summary) = status else {
        panic!("должен быть шоудаун");
    };

    assert_eq!(summary.board.len(), 5);
    assert_eq!(summary.total_pot, Chips::new(200));
    assert_eq!(total_stacks(&engine), 2000);

    // Хотя бы один победитель с рангом.
    assert!(summary
        .results
        .iter()
        .any(|r| r.is_winner && r.rank.is_some()));
}

#[test]
fn all_in_hand_runs_out_the_board_and_conserves_chips() {
    let mut engine = heads_up_engine();
    let mut rng = DeterministicRng::from_u64(99);
    engine.start_new_hand(&mut rng).unwrap();

    // SB пушит, BB коллирует: без run-it-twice борд доигрывается сам.
    act(&mut engine, PlayerActionKind::AllIn);
    let status = act(&mut engine, PlayerActionKind::Call);

    let HandStatus::Finished(summary) = status else {
        panic!("оллын должен доиграться до шоудауна");
    };

    assert_eq!(summary.board.len(), 5);
    assert_eq!(summary.total_pot, Chips::new(2000));
    assert_eq!(total_stacks(&engine), 2000);
}

#[test]
fn short_stack_cannot_win_more_than_matched() {
    // Трое: короткий стек 100, двое по 1000. Все в оллыне префлоп.
    let mut engine = PokerEngine::new(holdem_table(6), EngineConfig::default());
    engine.sit_player(0, 100, Chips::new(1000)).unwrap();
    engine.sit_player(1, 200, Chips::new(100)).unwrap();
    engine.sit_player(2, 300, Chips::new(1000)).unwrap();

    let mut rng = DeterministicRng::from_u64(11);
    engine.start_new_hand(&mut rng).unwrap();

    let mut status = HandStatus::Ongoing;
    while status == HandStatus::Ongoing {
        status = act(&mut engine, PlayerActionKind::AllIn);
    }

    let HandStatus::Finished(_) = status else {
        panic!("раздача должна закончиться");
    };

    // Сохранение фишек при любом исходе сайд-потов.
    assert_eq!(total_stacks(&engine), 2100);

    // Короткий стек не может уйти с суммой больше 100*3 = 300.
    let short = engine
        .table()
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .find(|p| p.player_id == 200)
        .unwrap();
    assert!(short.stack.0 <= 300);
}
