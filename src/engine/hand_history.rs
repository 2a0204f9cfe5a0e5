use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { table_id: TableId, hand_id: HandId },

    /// Кнопка/блайнды (flop-игры).
    BlindsPosted {
        dealer: SeatIndex,
        small_blind: Option<(SeatIndex, Chips)>,
        big_blind: Option<(SeatIndex, Chips)>,
        ante: Vec<(SeatIndex, Chips)>,
    },

    /// Bring-in на третьей улице (стад).
    BringInPosted {
        seat: SeatIndex,
        amount: Chips,
        ante: Vec<(SeatIndex, Chips)>,
    },

    /// Игрок получил закрытые карты.
    HoleCardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Игрок получил открытую карту (стад).
    UpCardDealt { seat: SeatIndex, card: Card },

    /// Открыты общие карты на борде.
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Действие игрока.
    PlayerActed {
        player_id: PlayerId,
        seat: SeatIndex,
        action: PlayerActionKind,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        rank_value: u32,
    },

    /// Выплата банка(ов).
    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    /// Хай/лоу сплит одного пота.
    HiLoSplit {
        high_half: Chips,
        low_half: Chips,
        low_qualified: bool,
    },

    /// Борд одного прогона run-it-twice.
    RunBoardDealt {
        run_index: u8,
        board: Vec<Card>,
        pot_share: Chips,
    },

    /// Раздача завершена.
    HandFinished { hand_id: HandId, table_id: TableId },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи – аудиторский след для внешнего хранилища.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }
}
