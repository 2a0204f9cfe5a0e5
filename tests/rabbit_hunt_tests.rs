//! Тесты rabbit hunt: превью борда без влияния на живую раздачу.

use poker_core::domain::card::Card;
use poker_core::domain::hand::Street;
use poker_core::engine::rabbit::RabbitHunt;
use poker_core::engine::EngineError;
use poker_core::infra::rng_seed::RngSeed;

fn c(s: &str) -> Card {
    s.parse().expect("валидная карта")
}

fn board_after_flop() -> Vec<Card> {
    vec![c("2c"), c("7d"), c("Jh")]
}

fn known_hole_cards() -> Vec<Card> {
    vec![c("Ah"), c("Ad"), c("Kc"), c("Kd")]
}

#[test]
fn preview_turn_deals_exactly_one_card() {
    let mut rabbit = RabbitHunt::prepare(
        &board_after_flop(),
        &known_hole_cards(),
        RngSeed::from_u64(5),
    );

    let turn = rabbit.preview(Street::Turn).unwrap();
    assert_eq!(turn.len(), 1);
}

#[test]
fn preview_river_after_turn_is_incremental() {
    let mut rabbit = RabbitHunt::prepare(
        &board_after_flop(),
        &known_hole_cards(),
        RngSeed::from_u64(5),
    );

    let turn = rabbit.preview(Street::Turn).unwrap();
    let river = rabbit.preview(Street::River).unwrap();

    // Ривер включает уже показанный тёрн плюс одну новую карту.
    assert_eq!(river.len(), 2);
    assert_eq!(river[0], turn[0]);
    assert_ne!(river[1], river[0]);
}

#[test]
fn repeated_preview_does_not_redeal() {
    let mut rabbit = RabbitHunt::prepare(
        &board_after_flop(),
        &known_hole_cards(),
        RngSeed::from_u64(5),
    );

    let first = rabbit.preview(Street::River).unwrap();
    let second = rabbit.preview(Street::River).unwrap();
    assert_eq!(first, second);

    // Более ранняя улица после поздней – префикс, не новая раздача.
    let turn = rabbit.preview(Street::Turn).unwrap();
    assert_eq!(turn.as_slice(), &first[..1]);
}

#[test]
fn previewed_cards_never_collide_with_known_cards() {
    let board = board_after_flop();
    let known = known_hole_cards();
    let mut rabbit = RabbitHunt::prepare(&board, &known, RngSeed::from_u64(123));

    let river = rabbit.preview(Street::River).unwrap();
    for card in &river {
        assert!(!board.contains(card));
        assert!(!known.contains(card));
    }
    assert_ne!(river[0], river[1]);
}

#[test]
fn same_seed_gives_same_preview() {
    let mut a = RabbitHunt::prepare(&board_after_flop(), &known_hole_cards(), RngSeed::from_u64(9));
    let mut b = RabbitHunt::prepare(&board_after_flop(), &known_hole_cards(), RngSeed::from_u64(9));

    assert_eq!(
        a.preview(Street::River).unwrap(),
        b.preview(Street::River).unwrap()
    );
}

#[test]
fn preview_from_preflop_fills_whole_flop() {
    // Раздача закончилась до флопа: превью флопа – три карты.
    let mut rabbit = RabbitHunt::prepare(&[], &known_hole_cards(), RngSeed::from_u64(31));

    let flop = rabbit.preview(Street::Flop).unwrap();
    assert_eq!(flop.len(), 3);

    let river = rabbit.preview(Street::River).unwrap();
    assert_eq!(river.len(), 5);
    assert_eq!(&river[..3], flop.as_slice());
}

#[test]
fn flop_preview_when_flop_already_dealt_is_empty() {
    let mut rabbit = RabbitHunt::prepare(
        &board_after_flop(),
        &known_hole_cards(),
        RngSeed::from_u64(5),
    );

    // Флоп уже на столе – показывать нечего.
    let flop = rabbit.preview(Street::Flop).unwrap();
    assert!(flop.is_empty());
}

#[test]
fn derived_seeds_are_reproducible_and_domain_separated() {
    // Seed, выведенный из (стол, раздача, индекс), детерминирован:
    // то же превью при повторном выводе, другое – при другом индексе.
    let base = RngSeed::from_u64(5);
    let seed_a = base.derive(9, 42, 0);
    assert_eq!(seed_a, base.derive(9, 42, 0));

    let mut first = RabbitHunt::prepare(&board_after_flop(), &known_hole_cards(), seed_a.clone());
    let mut replay = RabbitHunt::prepare(&board_after_flop(), &known_hole_cards(), seed_a);
    assert_eq!(
        first.preview(Street::River).unwrap(),
        replay.preview(Street::River).unwrap()
    );

    let mut other = RabbitHunt::prepare(
        &board_after_flop(),
        &known_hole_cards(),
        base.derive(9, 42, 1),
    );
    assert_ne!(
        first.preview(Street::River).unwrap(),
        other.preview(Street::River).unwrap()
    );
}

#[test]
fn non_board_street_is_rejected() {
    let mut rabbit = RabbitHunt::prepare(
        &board_after_flop(),
        &known_hole_cards(),
        RngSeed::from_u64(5),
    );

    assert_eq!(
        rabbit.preview(Street::Preflop),
        Err(EngineError::RabbitBadStreet(Street::Preflop))
    );
}
