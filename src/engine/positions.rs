//! Порядок хода: обход мест по кругу и стратегии "кто ходит первым"
//! для каждого семейства вариантов.
//!
//! Стратегия – чистая функция `first_to_act(table, street)`, выбираемая
//! по тегу варианта, без вложенных ветвлений по всему движку.

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::variant::VariantFamily;
use crate::domain::SeatIndex;
use crate::engine::betting::BettingState;

/// Найти следующее занятое место по кругу (включая/исключая start).
pub fn next_occupied_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    if table.seats.is_empty() {
        return None;
    }

    let max = table.max_seats() as usize;
    let mut idx = start as usize;

    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if idx < table.seats.len() && table.seats[idx].is_some() {
            return Some(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Собрать все занятые места начиная с start (по кругу).
pub fn collect_occupied_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.max_seats() as usize;
    let mut seats = Vec::new();

    if max == 0 {
        return seats;
    }

    let mut idx = start as usize;
    for _ in 0..max {
        if idx < table.seats.len() && table.seats[idx].is_some() {
            seats.push(idx as SeatIndex);
        }
        idx = (idx + 1) % max;
    }

    seats
}

/// Предложить следующую позицию дилера:
/// - если есть текущая кнопка – следующая занятая;
/// - если нет – первая занятая.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    if let Some(button) = table.dealer_button {
        next_occupied_seat(table, button, false)
    } else {
        next_occupied_seat(table, 0, true)
    }
}

/// Собрать места участников раздачи (Active/AllIn) начиная с start.
pub fn collect_in_hand_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    collect_occupied_seats_from(table, start)
        .into_iter()
        .filter(|&s| table.player_at(s).map_or(false, |p| p.is_in_hand()))
        .collect()
}

/// Нужно ли игроку ещё действовать в этом раунде.
fn needs_action(table: &Table, seat: SeatIndex, betting: &BettingState) -> bool {
    match table.player_at(seat) {
        Some(p) if p.status == PlayerStatus::Active => {
            !p.has_acted || p.current_bet.0 < betting.current_bet.0
        }
        _ => false,
    }
}

/// Следующий игрок, обязанный действовать, начиная СО СЛЕДУЮЩЕГО места
/// после `from` по кругу. Folded/all-in/пустые места пропускаются.
/// None = раунд ставок закрыт.
pub fn find_next_active_player(
    table: &Table,
    betting: &BettingState,
    from: SeatIndex,
) -> Option<SeatIndex> {
    let max = table.max_seats() as usize;
    if max == 0 {
        return None;
    }

    let mut idx = (from as usize + 1) % max;
    for _ in 0..max {
        let seat = idx as SeatIndex;
        if needs_action(table, seat, betting) {
            return Some(seat);
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Кто открывает раунд ставок на данной улице.
///
/// Возвращает None, если действовать некому (все all-in/fold).
pub fn first_to_act(table: &Table, street: Street, betting: &BettingState) -> Option<SeatIndex> {
    let seat = match table.config.variant.family() {
        VariantFamily::Flop => flop_first_to_act(table, street)?,
        VariantFamily::Stud => stud_first_to_act(table, street)?,
    };

    // Стартовое место может быть уже all-in – берём первого обязанного
    // действовать начиная с него.
    if needs_action(table, seat, betting) {
        Some(seat)
    } else {
        let max = table.max_seats();
        let prev = if seat == 0 { max - 1 } else { seat - 1 };
        find_next_active_player(table, betting, prev)
    }
}

/// Flop-семейство (холдем/омаха).
///
/// Хедз-ап: префлоп первым ходит дилер (он же SB), постфлоп – не-дилер (BB).
/// 3+ игроков: префлоп – слева от BB, постфлоп – слева от дилера.
fn flop_first_to_act(table: &Table, street: Street) -> Option<SeatIndex> {
    let dealer = table.dealer_button?;
    let in_hand = collect_in_hand_seats_from(table, dealer);
    if in_hand.is_empty() {
        return None;
    }

    let heads_up = in_hand.len() == 2;

    match street {
        Street::Preflop => {
            if heads_up {
                // Дилер = SB, он открывает торги.
                Some(dealer)
            } else {
                // SB = dealer+1, BB = dealer+2, открывает dealer+3 (UTG).
                in_hand.get(3 % in_hand.len()).copied()
            }
        }
        _ => {
            if heads_up {
                // Постфлоп первым ходит не-дилер.
                in_hand.iter().find(|&&s| s != dealer).copied()
            } else {
                // Первый в раздаче слева от дилера.
                in_hand.iter().find(|&&s| s != dealer).copied().or(Some(dealer))
            }
        }
    }
}

/// Стад: третья улица – bring-in по младшей открытой карте,
/// дальше – старшая комбинация открытых карт.
fn stud_first_to_act(table: &Table, street: Street) -> Option<SeatIndex> {
    match street {
        Street::Third => lowest_up_card_seat(table),
        _ => highest_up_cards_seat(table),
    }
}

/// Место с самой младшей открытой картой (bring-in).
/// Ничья по рангу бьётся мастью: clubs < diamonds < hearts < spades,
/// младшая масть ходит первой.
pub fn lowest_up_card_seat(table: &Table) -> Option<SeatIndex> {
    let mut best: Option<(Rank, Suit, SeatIndex)> = None;

    for (idx, seat_opt) in table.seats.iter().enumerate() {
        let Some(p) = seat_opt.as_ref() else { continue };
        if !p.is_in_hand() {
            continue;
        }
        let Some(card) = p.up_cards.first() else { continue };

        let key = (card.rank, card.suit, idx as SeatIndex);
        match best {
            None => best = Some(key),
            Some((r, s, _)) => {
                if (card.rank, card.suit) < (r, s) {
                    best = Some(key);
                }
            }
        }
    }

    best.map(|(_, _, seat)| seat)
}

/// Сила открытых карт для выбора первого ходящего на 4–7 улицах.
///
/// Ключ: (категория по открытым картам, ранги по убыванию, масть
/// решающей карты). Больший ключ ходит первым; при полном равенстве
/// побеждает МЕНЬШИЙ seat – это обеспечивает перебор в порядке мест.
fn up_card_strength(cards: &[Card]) -> (u8, Vec<u8>, Suit) {
    // Подсчёт одинаковых рангов среди 1–4 открытых карт.
    let mut groups: Vec<(Rank, u8)> = Vec::new();
    for card in cards {
        match groups.iter_mut().find(|(r, _)| *r == card.rank) {
            Some((_, n)) => *n += 1,
            None => groups.push((card.rank, 1)),
        }
    }
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let category = match groups.first().map(|g| g.1).unwrap_or(0) {
        4 => 4,                                                  // каре в открытую
        3 => 3,                                                  // трипс
        2 if groups.len() >= 2 && groups[1].1 == 2 => 2,         // две пары
        2 => 1,                                                  // пара
        _ => 0,                                                  // старшая карта
    };

    let ranks: Vec<u8> = groups.iter().map(|(r, _)| *r as u8).collect();

    // Решающая карта: старшая карта старшей группы.
    let deciding_rank = groups.first().map(|(r, _)| *r);
    let deciding_suit = deciding_rank
        .and_then(|r| {
            cards
                .iter()
                .filter(|c| c.rank == r)
                .map(|c| c.suit)
                .max()
        })
        .unwrap_or(Suit::Clubs);

    (category, ranks, deciding_suit)
}

/// Место со старшей комбинацией открытых карт.
pub fn highest_up_cards_seat(table: &Table) -> Option<SeatIndex> {
    let mut best: Option<((u8, Vec<u8>, Suit), SeatIndex)> = None;

    for (idx, seat_opt) in table.seats.iter().enumerate() {
        let Some(p) = seat_opt.as_ref() else { continue };
        if !p.is_in_hand() || p.up_cards.is_empty() {
            continue;
        }

        let key = up_card_strength(&p.up_cards);
        match &best {
            None => best = Some((key, idx as SeatIndex)),
            Some((best_key, _)) => {
                // Строго больше: при равенстве остаётся меньший seat.
                if key > *best_key {
                    best = Some((key, idx as SeatIndex));
                }
            }
        }
    }

    best.map(|(_, seat)| seat)
}
