use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet на новой улице (когда ещё нет текущей ставки).
    Bet(Chips),
    /// Raise существующей ставки (total – до какой суммы).
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

/// Конкретное действие игрока. Транзиентный вход – в состоянии стола
/// не хранится, только в истории раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// В каком месте он сидит (0..max_seats-1).
    pub seat: SeatIndex,
    /// Само действие.
    pub kind: PlayerActionKind,
}
