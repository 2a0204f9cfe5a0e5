use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerAtTable;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
///
/// Очередь хода не хранится: кто следующий – вычисляется по флагам
/// `has_acted`/`current_bet` игроков (см. engine::positions).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (bet/raise/all-in).
    pub last_aggressor: Option<SeatIndex>,
    /// Улица, к которой относится этот раунд.
    pub street: Street,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips) -> Self {
        Self {
            current_bet,
            min_raise,
            last_aggressor: None,
            street,
        }
    }

    /// Обновить состояние после bet/raise.
    pub fn on_raise(&mut self, seat: SeatIndex, new_bet: Chips, raise_size: Chips) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(seat);
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
pub fn diff_to_call(player: &PlayerAtTable, betting: &BettingState) -> Chips {
    if betting.current_bet.0 <= player.current_bet.0 {
        Chips::ZERO
    } else {
        Chips(betting.current_bet.0 - player.current_bet.0)
    }
}

/// Максимальная повышающая часть рейза в пот-лимите:
/// текущий банк (включая все ставки на столе) плюс сумма колла инициатора.
///
/// pot_total уже содержит все внесённые фишки, включая current_bet'ы
/// этого раунда – contributions пополняются сразу при действии.
pub fn pot_limit_max_raise(pot_total: Chips, to_call: Chips) -> Chips {
    pot_total + to_call
}
