use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::variant::VariantFamily;
use crate::domain::{HandId, PlayerId, TableId};

/// Улица раздачи. Один enum на оба семейства:
/// flop-игры используют Preflop..River, стад – Third..Seventh.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Showdown,
}

impl Street {
    /// Первая улица для семейства.
    pub fn first(family: VariantFamily) -> Street {
        match family {
            VariantFamily::Flop => Street::Preflop,
            VariantFamily::Stud => Street::Third,
        }
    }

    /// Следующая улица. Showdown – терминальное состояние.
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Third => Street::Fourth,
            Street::Fourth => Street::Fifth,
            Street::Fifth => Street::Sixth,
            Street::Sixth => Street::Seventh,
            Street::Seventh => Street::Showdown,
            Street::Showdown => Street::Showdown,
        }
    }

    /// Сколько карт борда открывается при входе на эту улицу (flop-семейство).
    pub fn board_cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }

    /// Целевой размер борда для улицы (flop/turn/river) – нужен rabbit hunt.
    pub fn board_target(self) -> Option<usize> {
        match self {
            Street::Flop => Some(3),
            Street::Turn => Some(4),
            Street::River => Some(5),
            _ => None,
        }
    }
}

/// Ранг руки, упакованный в u32. Заполняется в eval.
/// Формат: [категория:4 бита][5 рангов по 4 бита], больше = сильнее.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank(pub u32);

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub player_id: PlayerId,
    /// Итоговый ранг руки (если дошёл до шоудауна).
    pub rank: Option<HandRank>,
    /// Сколько фишек игрок получил из банка в этой раздаче.
    pub net_chips: Chips,
    /// Является ли игрок победителем (включая сплит).
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи. Удобно для истории/реплеера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub results: Vec<PlayerHandResult>,
}
