//! Тесты порядка хода: хедз-ап против полного стола, стад bring-in.

use poker_core::domain::card::{Card, Rank, Suit};
use poker_core::domain::chips::Chips;
use poker_core::domain::hand::Street;
use poker_core::domain::player::PlayerAtTable;
use poker_core::domain::table::{Table, TableConfig, TableStakes};
use poker_core::domain::variant::{BettingMode, GameVariant};
use poker_core::engine::betting::BettingState;
use poker_core::engine::positions::{first_to_act, lowest_up_card_seat};

/// Стол нужного варианта на max_seats мест.
fn make_table(variant: GameVariant, max_seats: u8) -> Table {
    let config = TableConfig {
        max_seats,
        variant,
        betting_mode: BettingMode::NoLimit,
        stakes: TableStakes::no_ante(Chips::new(50), Chips::new(100)),
    };
    Table::new(1, "Turn order".to_string(), config)
}

/// Посадить игрока со стеком 1000.
fn seat(table: &mut Table, seat: u8, player_id: u64) {
    table.seats[seat as usize] = Some(PlayerAtTable::new(player_id, Chips::new(1000)));
}

fn card(rank: Rank, suit: Suit) -> Card {
    Card { rank, suit }
}

fn empty_betting(street: Street) -> BettingState {
    BettingState::new(street, Chips::ZERO, Chips::new(100))
}

#[test]
fn heads_up_preflop_dealer_acts_first() {
    let mut table = make_table(GameVariant::Holdem, 6);
    seat(&mut table, 2, 10);
    seat(&mut table, 5, 20);
    table.dealer_button = Some(2);

    let betting = empty_betting(Street::Preflop);
    assert_eq!(first_to_act(&table, Street::Preflop, &betting), Some(2));
}

#[test]
fn heads_up_postflop_non_dealer_acts_first() {
    let mut table = make_table(GameVariant::Holdem, 6);
    seat(&mut table, 2, 10);
    seat(&mut table, 5, 20);
    table.dealer_button = Some(2);

    let betting = empty_betting(Street::Flop);
    assert_eq!(first_to_act(&table, Street::Flop, &betting), Some(5));
}

#[test]
fn ring_preflop_first_is_left_of_big_blind() {
    let mut table = make_table(GameVariant::Holdem, 6);
    for (s, id) in [(0u8, 10u64), (1, 20), (2, 30), (3, 40)] {
        seat(&mut table, s, id);
    }
    table.dealer_button = Some(0);

    // SB=1, BB=2, первым ходит UTG=3.
    let betting = empty_betting(Street::Preflop);
    assert_eq!(first_to_act(&table, Street::Preflop, &betting), Some(3));
}

#[test]
fn ring_postflop_first_is_left_of_dealer() {
    let mut table = make_table(GameVariant::Holdem, 6);
    for (s, id) in [(0u8, 10u64), (1, 20), (2, 30), (3, 40)] {
        seat(&mut table, s, id);
    }
    table.dealer_button = Some(0);

    let betting = empty_betting(Street::Flop);
    assert_eq!(first_to_act(&table, Street::Flop, &betting), Some(1));
}

#[test]
fn ring_preflop_wraps_around_the_table() {
    // Кнопка на последнем занятом месте – UTG через начало вектора.
    let mut table = make_table(GameVariant::Holdem, 6);
    for (s, id) in [(0u8, 10u64), (1, 20), (2, 30), (5, 40)] {
        seat(&mut table, s, id);
    }
    table.dealer_button = Some(5);

    // SB=0, BB=1, первым ходит 2.
    let betting = empty_betting(Street::Preflop);
    assert_eq!(first_to_act(&table, Street::Preflop, &betting), Some(2));
}

#[test]
fn stud_bring_in_is_lowest_up_card() {
    let mut table = make_table(GameVariant::SevenCardStud, 6);
    for (s, id) in [(0u8, 10u64), (1, 20), (2, 30)] {
        seat(&mut table, s, id);
    }
    table.player_at_mut(0).unwrap().up_cards = vec![card(Rank::King, Suit::Hearts)];
    table.player_at_mut(1).unwrap().up_cards = vec![card(Rank::Two, Suit::Hearts)];
    table.player_at_mut(2).unwrap().up_cards = vec![card(Rank::Nine, Suit::Clubs)];

    assert_eq!(lowest_up_card_seat(&table), Some(1));
}

#[test]
fn stud_bring_in_rank_tie_resolved_by_suit() {
    // Две двойки: clubs < diamonds < hearts < spades, младшая масть платит.
    let mut table = make_table(GameVariant::SevenCardStud, 6);
    for (s, id) in [(0u8, 10u64), (1, 20), (2, 30)] {
        seat(&mut table, s, id);
    }
    table.player_at_mut(0).unwrap().up_cards = vec![card(Rank::Two, Suit::Spades)];
    table.player_at_mut(1).unwrap().up_cards = vec![card(Rank::Two, Suit::Clubs)];
    table.player_at_mut(2).unwrap().up_cards = vec![card(Rank::Ace, Suit::Hearts)];

    assert_eq!(lowest_up_card_seat(&table), Some(1));
}

#[test]
fn stud_later_streets_highest_up_cards_act_first() {
    let mut table = make_table(GameVariant::SevenCardStud, 6);
    for (s, id) in [(0u8, 10u64), (1, 20), (2, 30)] {
        seat(&mut table, s, id);
    }
    // Открытая пара у seat 2 против старших карт без пары.
    table.player_at_mut(0).unwrap().up_cards =
        vec![card(Rank::Ace, Suit::Hearts), card(Rank::King, Suit::Clubs)];
    table.player_at_mut(1).unwrap().up_cards =
        vec![card(Rank::Queen, Suit::Hearts), card(Rank::Jack, Suit::Clubs)];
    table.player_at_mut(2).unwrap().up_cards =
        vec![card(Rank::Three, Suit::Hearts), card(Rank::Three, Suit::Clubs)];

    let betting = empty_betting(Street::Fourth);
    assert_eq!(first_to_act(&table, Street::Fourth, &betting), Some(2));
}

#[test]
fn stud_no_pairs_highest_rank_acts_first() {
    let mut table = make_table(GameVariant::SevenCardStud, 6);
    for (s, id) in [(0u8, 10u64), (1, 20), (2, 30)] {
        seat(&mut table, s, id);
    }
    table.player_at_mut(0).unwrap().up_cards =
        vec![card(Rank::Ace, Suit::Hearts), card(Rank::King, Suit::Clubs)];
    table.player_at_mut(1).unwrap().up_cards =
        vec![card(Rank::Queen, Suit::Hearts), card(Rank::Jack, Suit::Clubs)];
    table.player_at_mut(2).unwrap().up_cards =
        vec![card(Rank::Nine, Suit::Hearts), card(Rank::Eight, Suit::Clubs)];

    let betting = empty_betting(Street::Fifth);
    assert_eq!(first_to_act(&table, Street::Fifth, &betting), Some(0));
}
