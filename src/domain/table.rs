use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerAtTable;
use crate::domain::variant::{BettingMode, GameVariant};
use crate::domain::{HandId, TableId};

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Тип анте.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnteType {
    /// Без анте.
    None,
    /// Классическое анте с каждого игрока (обязательно для стада).
    Classic,
}

/// Стейки стола (SB/BB/ante). В стаде small_blind играет роль bring-in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub ante_type: AnteType,
    pub ante: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips, ante_type: AnteType, ante: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
            ante_type,
            ante,
        }
    }

    /// Стейки без анте – обычный кеш-стол.
    pub fn no_ante(sb: Chips, bb: Chips) -> Self {
        Self::new(sb, bb, AnteType::None, Chips::ZERO)
    }
}

/// Конфиг стола: вариант, режим ставок, сколько мест, стейки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (обычно 2–9).
    pub max_seats: u8,
    pub variant: GameVariant,
    pub betting_mode: BettingMode,
    pub stakes: TableStakes,
}

/// Основное состояние стола.
///
/// Владелец — ровно один `PokerEngine`; компоненты движка получают
/// `&mut Table` только на время одного вызова.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<PlayerAtTable>>,

    /// Общие карты борда (0–5 карт, пусто в стаде).
    pub board: Vec<Card>,

    /// Индекс дилерской кнопки или None, если раздача ещё не начиналась.
    pub dealer_button: Option<SeatIndex>,

    /// ID текущей раздачи (если она идёт).
    pub current_hand_id: Option<HandId>,

    /// Текущая улица раздачи.
    pub street: Street,

    /// Идёт ли сейчас раздача.
    pub hand_in_progress: bool,

    /// Общий размер банка (детализация по сайд-потам – работа engine).
    pub total_pot: Chips,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, name: String, config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        let street = Street::first(config.variant.family());
        Self {
            id,
            name,
            config,
            seats,
            board: Vec::new(),
            dealer_button: None,
            current_hand_id: None,
            street,
            hand_in_progress: false,
            total_pot: Chips::ZERO,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    /// Игрок по месту (read-only).
    pub fn player_at(&self, seat: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(seat as usize).and_then(|s| s.as_ref())
    }

    /// Игрок по месту (mutable).
    pub fn player_at_mut(&mut self, seat: SeatIndex) -> Option<&mut PlayerAtTable> {
        self.seats.get_mut(seat as usize).and_then(|s| s.as_mut())
    }

    /// Сколько игроков ещё в раздаче (Active или AllIn).
    pub fn players_in_hand(&self) -> usize {
        self.seats
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|p| p.is_in_hand())
            .count()
    }
}
