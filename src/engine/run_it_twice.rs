//! Run-it-twice: доигровка all-in банка несколькими бордами.
//!
//! Каждый прогон получает свой детерминированный deck из hash-chain
//! seed'а (см. infra::rng_security) и свою долю банка:
//! ⌊pot / runs⌋, остаток по одной фишке прогонам начиная с первого.
//! Side pots сохраняются внутри каждого прогона, чтобы короткий стек
//! не мог выиграть больше своего вклада ни на одном борде.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandSummary, PlayerHandResult, Street};
use crate::domain::table::Table;
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::HandEngine;
use crate::engine::hand_history::HandEventKind;
use crate::engine::showdown::{high_winners_on_board, split_among, split_pot_hi_lo};
use crate::engine::side_pots::SidePot;

pub const MIN_RUNS: u8 = 2;
pub const MAX_RUNS: u8 = 4;

/// Итог одного прогона.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResult {
    /// Номер прогона, 1-based.
    pub run_index: u8,
    pub board: Vec<Card>,
    pub winners: Vec<PlayerId>,
    /// Сколько фишек разыграно на этом борде.
    pub pot_share: Chips,
}

/// Состояние run-it-twice на раздачу.
#[derive(Clone, Debug, Default)]
pub struct RunItTwiceState {
    pub enabled: bool,
    pub number_of_runs: u8,
    pub runs: Vec<RunResult>,
    /// Суммарные выигрыши по игрокам за все прогоны.
    pub pot_distribution: HashMap<PlayerId, Chips>,
    pub security: Option<crate::infra::rng_security::RngSecurity>,
}

/// Доля side pot'а в прогоне `run`: ⌊amount/runs⌋ плюс фишка остатка
/// первым (amount mod runs) прогонам.
fn run_share(amount: Chips, runs: u8, run: u8) -> Chips {
    let base = amount.0 / runs as u64;
    let extra = if (run as u64) < amount.0 % runs as u64 {
        1
    } else {
        0
    };
    Chips(base + extra)
}

/// Все известные карты: борд плюс карты не сфолдивших игроков.
fn known_cards(table: &Table) -> Vec<Card> {
    let mut known = table.board.clone();
    for seat_opt in table.seats.iter() {
        if let Some(p) = seat_opt {
            if p.is_in_hand() {
                known.extend(p.all_cards());
            }
        }
    }
    known
}

/// Прогнать все борды и раздать банк. Вызывается фасадом вместо
/// обычной доигровки, когда run-it-twice включён.
///
/// Возвращает состояние прогонов и итог раздачи. Стеки применяются
/// здесь же, одним аккумулированным проходом после всех бордов.
pub fn execute_runs(
    table: &mut Table,
    engine: &mut HandEngine,
    security: &crate::infra::rng_security::RngSecurity,
    number_of_runs: u8,
) -> Result<(RunItTwiceState, HandSummary), EngineError> {
    if !(MIN_RUNS..=MAX_RUNS).contains(&number_of_runs) {
        return Err(EngineError::RunItTwiceBadRunCount);
    }

    let known = known_cards(table);
    let base_board = table.board.clone();
    let missing = 5usize.saturating_sub(base_board.len());

    let side_pots = crate::engine::side_pots::compute_side_pots(&engine.contributions);
    let total_pot = engine.pot_total();
    let stacks_before = crate::engine::game_loop::sum_stacks(table);
    let hi_lo = table.config.variant.is_hi_lo();

    let mut state = RunItTwiceState {
        enabled: true,
        number_of_runs,
        runs: Vec::with_capacity(number_of_runs as usize),
        pot_distribution: HashMap::new(),
        security: Some(security.clone()),
    };

    // Выплаты копим по seat'ам и применяем к стекам одним проходом.
    let mut payouts_by_seat: HashMap<SeatIndex, Chips> = HashMap::new();

    for run in 0..number_of_runs {
        let seed = security
            .run_seed(run as usize)
            .ok_or(EngineError::Internal("hash chain короче числа прогонов"))?;

        let mut deck = crate::domain::deck::Deck::excluding(&known);
        let mut rng = seed.to_rng();
        crate::engine::RandomSource::shuffle(&mut rng, &mut deck.cards);

        let mut run_board = base_board.clone();
        run_board.extend(deck.draw_n(missing));

        let mut run_winners: Vec<PlayerId> = Vec::new();
        let mut run_total = Chips::ZERO;

        for sp in &side_pots {
            let share = run_share(sp.amount, number_of_runs, run);
            if share.is_zero() {
                continue;
            }

            let candidates: Vec<SeatIndex> = sp
                .eligible_seats
                .iter()
                .copied()
                .filter(|&s| table.player_at(s).map_or(false, |p| p.is_in_hand()))
                .collect();
            if candidates.is_empty() {
                continue;
            }

            let pot_payouts = if hi_lo {
                let synthetic = SidePot {
                    amount: share,
                    eligible_seats: candidates.clone(),
                };
                let (p, _) = split_pot_hi_lo(table, &synthetic, &run_board);
                p
            } else {
                let (winners, _) = high_winners_on_board(table, &candidates, &run_board);
                split_among(share, &winners)
            };

            for (seat, prize) in pot_payouts {
                if prize.is_zero() {
                    continue;
                }
                *payouts_by_seat.entry(seat).or_insert(Chips::ZERO) += prize;
                run_total += prize;
                if let Some(p) = table.player_at(seat) {
                    if !run_winners.contains(&p.player_id) {
                        run_winners.push(p.player_id);
                    }
                }
            }
        }

        engine.history.push(HandEventKind::RunBoardDealt {
            run_index: run + 1,
            board: run_board.clone(),
            pot_share: run_total,
        });

        state.runs.push(RunResult {
            run_index: run + 1,
            board: run_board,
            winners: run_winners,
            pot_share: run_total,
        });
    }

    // Применяем аккумулированные выигрыши.
    for (&seat, &prize) in payouts_by_seat.iter() {
        if let Some(p) = table.player_at_mut(seat) {
            p.stack += prize;
            let player_id = p.player_id;
            engine.history.push(HandEventKind::PotAwarded {
                seat,
                player_id,
                amount: prize,
            });
            *state
                .pot_distribution
                .entry(player_id)
                .or_insert(Chips::ZERO) += prize;
        }
    }

    table.street = Street::Showdown;
    table.hand_in_progress = false;
    engine.current_actor = None;

    crate::engine::showdown::enforce_conservation(table, stacks_before, total_pot);

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
    });

    crate::engine::game_loop::update_busted_statuses_after_hand(table);

    let mut results: Vec<PlayerHandResult> = Vec::new();
    for (idx, seat_opt) in table.seats.iter().enumerate() {
        if let Some(p) = seat_opt.as_ref() {
            let won = payouts_by_seat
                .get(&(idx as SeatIndex))
                .copied()
                .unwrap_or(Chips::ZERO);
            results.push(PlayerHandResult {
                player_id: p.player_id,
                rank: None,
                net_chips: won,
                is_winner: !won.is_zero(),
            });
        }
    }

    let summary = HandSummary {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
        street_reached: Street::Showdown,
        board: base_board,
        total_pot,
        results,
    };

    Ok((state, summary))
}
