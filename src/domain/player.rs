use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус игрока именно в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в оллыне – не может больше делать ставки.
    AllIn,
    /// Игрок сидит за столом, но не участвует в раздаче (sit out).
    SittingOut,
    /// Игрок вылетел (нулевой стек).
    Busted,
}

/// Состояние игрока за конкретным столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Ставка в текущем раунде (для удобства движка).
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Закрытые карты: 2 (холдем), 4 (омаха), down-карты в стаде.
    pub hole_cards: Vec<Card>,
    /// Открытые карты (только стад). Для flop-игр всегда пусто.
    pub up_cards: Vec<Card>,
    /// Действовал ли игрок в текущем раунде ставок.
    pub has_acted: bool,
    /// Таймбанк в секундах. Ядро его не тратит – это забота транспорта.
    pub time_bank_secs: u32,
}

impl PlayerAtTable {
    pub fn new(player_id: PlayerId, stack: Chips) -> Self {
        Self {
            player_id,
            stack,
            current_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
            up_cards: Vec::new(),
            has_acted: false,
            time_bank_secs: 0,
        }
    }

    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Все карты игрока (закрытые + открытые) – вход для eval.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards = self.hole_cards.clone();
        cards.extend_from_slice(&self.up_cards);
        cards
    }
}
