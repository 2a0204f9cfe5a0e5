//! Шоудаун: выбор победителей, делёж потов (включая хай/лоу) и
//! контроль сохранения фишек.
//!
//! Правило дележа одного пота: floor-деление поровну, остаток –
//! ПОСЛЕДНЕМУ победителю в порядке оценки (eligible места по возрастанию).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::HandRank;
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::variant::GameVariant;
use crate::domain::{PlayerId, SeatIndex};
use crate::eval::{evaluate_best_hand, evaluate_omaha_hand, evaluate_omaha_low_hand, LowRank};
use crate::engine::side_pots::SidePot;

/// Итог хай/лоу сплита (по всем потам раздачи суммарно).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HiLoResult {
    pub high_winners: Vec<PlayerId>,
    /// Пусто, если квалифицированного лоу не было.
    pub low_winners: Vec<PlayerId>,
    pub high_half: Chips,
    pub low_half: Chips,
}

/// Ранг руки игрока для данного варианта и борда.
pub fn rank_for_seat(table: &Table, seat: SeatIndex, board: &[Card]) -> Option<HandRank> {
    let player = table.player_at(seat)?;
    let rank = match table.config.variant {
        GameVariant::Holdem => {
            let mut cards = player.hole_cards.clone();
            cards.extend_from_slice(board);
            evaluate_best_hand(&cards)
        }
        GameVariant::Omaha | GameVariant::OmahaHiLo => {
            evaluate_omaha_hand(&player.hole_cards, board)
        }
        GameVariant::SevenCardStud => evaluate_best_hand(&player.all_cards()),
    };
    Some(rank)
}

/// Лоу-ранг игрока (только для хай-лоу вариантов).
pub fn low_rank_for_seat(table: &Table, seat: SeatIndex, board: &[Card]) -> Option<LowRank> {
    let player = table.player_at(seat)?;
    match table.config.variant {
        GameVariant::OmahaHiLo => evaluate_omaha_low_hand(&player.hole_cards, board),
        // Для не-сплит вариантов лоу не считаем.
        GameVariant::Holdem | GameVariant::Omaha | GameVariant::SevenCardStud => None,
    }
}

/// Победители по хаю среди кандидатов на данном борде.
/// Возвращает (места победителей в порядке оценки, ранги всех кандидатов).
pub fn high_winners_on_board(
    table: &Table,
    candidates: &[SeatIndex],
    board: &[Card],
) -> (Vec<SeatIndex>, HashMap<SeatIndex, HandRank>) {
    let mut ranks = HashMap::new();
    let mut best: Option<HandRank> = None;
    let mut winners: Vec<SeatIndex> = Vec::new();

    for &seat in candidates {
        let Some(rank) = rank_for_seat(table, seat, board) else {
            continue;
        };
        ranks.insert(seat, rank);

        match best {
            None => {
                best = Some(rank);
                winners.push(seat);
            }
            Some(br) if rank > br => {
                best = Some(rank);
                winners.clear();
                winners.push(seat);
            }
            Some(br) if rank == br => winners.push(seat),
            Some(_) => {}
        }
    }

    (winners, ranks)
}

/// Победители по лоу (None, если ни у кого нет квалифицированного лоу).
pub fn low_winners_on_board(
    table: &Table,
    candidates: &[SeatIndex],
    board: &[Card],
) -> Option<Vec<SeatIndex>> {
    let mut best: Option<LowRank> = None;
    let mut winners: Vec<SeatIndex> = Vec::new();

    for &seat in candidates {
        let Some(low) = low_rank_for_seat(table, seat, board) else {
            continue;
        };
        match best {
            None => {
                best = Some(low);
                winners.push(seat);
            }
            Some(bl) if low < bl => {
                best = Some(low);
                winners.clear();
                winners.push(seat);
            }
            Some(bl) if low == bl => winners.push(seat),
            Some(_) => {}
        }
    }

    if winners.is_empty() {
        None
    } else {
        Some(winners)
    }
}

/// Разделить сумму поровну между победителями:
/// floor-доля каждому, остаток – последнему в порядке оценки.
pub fn split_among(amount: Chips, winners: &[SeatIndex]) -> Vec<(SeatIndex, Chips)> {
    if winners.is_empty() || amount.is_zero() {
        return Vec::new();
    }

    let share = Chips(amount.0 / winners.len() as u64);
    let remainder = Chips(amount.0 % winners.len() as u64);

    let mut out: Vec<(SeatIndex, Chips)> = winners.iter().map(|&s| (s, share)).collect();
    if let Some(last) = out.last_mut() {
        last.1 += remainder;
    }
    out
}

/// Разделить один пот по правилу хай/лоу:
/// поты делятся пополам, нечётная фишка уходит в хай-половину;
/// без квалифицированного лоу весь пот играет как хай.
pub fn split_pot_hi_lo(
    table: &Table,
    pot: &SidePot,
    board: &[Card],
) -> (Vec<(SeatIndex, Chips)>, Option<HiLoResult>) {
    let candidates: Vec<SeatIndex> = pot
        .eligible_seats
        .iter()
        .copied()
        .filter(|&s| {
            table
                .player_at(s)
                .map_or(false, |p| !matches!(p.status, PlayerStatus::Folded | PlayerStatus::Busted))
        })
        .collect();

    let (high_winners, _) = high_winners_on_board(table, &candidates, board);
    if high_winners.is_empty() {
        return (Vec::new(), None);
    }

    let low_winners = low_winners_on_board(table, &candidates, board);

    match low_winners {
        None => {
            // Лоу нет – весь пот хай-победителям.
            let payouts = split_among(pot.amount, &high_winners);
            let result = HiLoResult {
                high_winners: seats_to_players(table, &high_winners),
                low_winners: Vec::new(),
                high_half: pot.amount,
                low_half: Chips::ZERO,
            };
            (payouts, Some(result))
        }
        Some(low_winners) => {
            let low_half = Chips(pot.amount.0 / 2);
            let high_half = pot.amount - low_half; // нечётная фишка в хай

            let mut payouts = split_among(high_half, &high_winners);
            payouts.extend(split_among(low_half, &low_winners));

            let result = HiLoResult {
                high_winners: seats_to_players(table, &high_winners),
                low_winners: seats_to_players(table, &low_winners),
                high_half,
                low_half,
            };
            (payouts, Some(result))
        }
    }
}

fn seats_to_players(table: &Table, seats: &[SeatIndex]) -> Vec<PlayerId> {
    seats
        .iter()
        .filter_map(|&s| table.player_at(s).map(|p| p.player_id))
        .collect()
}

/// Контроль сохранения фишек после дележа.
///
/// Сумма стеков обязана вырасти ровно на размер банка. Дрейф – дефект
/// резолвера: в debug-сборке падаем, в release логируем и доотдаём
/// недостающие фишки первому оставшемуся в раздаче игроку, чтобы стол
/// никогда не терял фишки.
pub fn enforce_conservation(table: &mut Table, stacks_before: Chips, pot_total: Chips) {
    let stacks_after: Chips = table
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .map(|p| p.stack)
        .fold(Chips::ZERO, |acc, s| acc + s);

    let expected = stacks_before + pot_total;
    if stacks_after == expected {
        return;
    }

    error!(
        table_id = table.id,
        expected = expected.0,
        actual = stacks_after.0,
        "chip conservation violated during pot distribution"
    );
    debug_assert_eq!(
        stacks_after, expected,
        "дележ банка нарушил сохранение фишек"
    );

    if stacks_after < expected {
        let missing = expected - stacks_after;
        if let Some(p) = table
            .seats
            .iter_mut()
            .filter_map(|s| s.as_mut())
            .find(|p| p.is_in_hand())
        {
            p.stack += missing;
        }
    }
}
