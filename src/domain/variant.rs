use serde::{Deserialize, Serialize};

/// Вариант игры за столом.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameVariant {
    /// Техасский холдем: 2 карманные карты.
    Holdem,
    /// Омаха: 4 карманные карты, ровно 2 из них в комбинации.
    Omaha,
    /// Омаха хай-лоу (8-or-better): банк делится между хай и квалифицированным лоу.
    OmahaHiLo,
    /// Семикарточный стад: анте + bring-in, открытые/закрытые карты, без борда.
    SevenCardStud,
}

/// Семейство варианта – от него зависит набор улиц и порядок хода.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum VariantFamily {
    /// Игры с общим бордом: preflop → flop → turn → river.
    Flop,
    /// Стад-игры: third → fourth → fifth → sixth → seventh.
    Stud,
}

impl GameVariant {
    pub fn family(self) -> VariantFamily {
        match self {
            GameVariant::Holdem | GameVariant::Omaha | GameVariant::OmahaHiLo => {
                VariantFamily::Flop
            }
            GameVariant::SevenCardStud => VariantFamily::Stud,
        }
    }

    /// Сколько карманных карт раздаётся на префлопе (flop-семейство).
    /// Для стада карты раздаются по улицам, см. game_loop.
    pub fn hole_cards_dealt(self) -> usize {
        match self {
            GameVariant::Holdem => 2,
            GameVariant::Omaha | GameVariant::OmahaHiLo => 4,
            GameVariant::SevenCardStud => 0,
        }
    }

    /// Делится ли банк на хай/лоу половины на шоудауне.
    pub fn is_hi_lo(self) -> bool {
        matches!(self, GameVariant::OmahaHiLo)
    }
}

/// Режим ставок стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BettingMode {
    /// Без лимита: ограничение только min_raise.
    NoLimit,
    /// Пот-лимит: рейз не больше банка плюс сумма колла.
    PotLimit,
}
