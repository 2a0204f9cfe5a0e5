use crate::domain::{PlayerId, SeatIndex};

use thiserror::Error;

/// Ошибки движка покера.
///
/// Валидационные ошибки гарантируют: состояние стола не изменилось.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("В этом месте нет игрока")]
    EmptySeat,

    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(PlayerId),

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Слишком много игроков для этого варианта игры")]
    TooManyPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Недопустимое действие в текущем состоянии раздачи")]
    IllegalAction,

    #[error("Размер рейза слишком мал")]
    RaiseTooSmall,

    #[error("Пот-лимит: рейз больше, чем банк плюс сумма колла")]
    PotLimitExceeded,

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Run-it-twice доступен только при оллыне")]
    RunItTwiceNeedsAllIn,

    #[error("Run-it-twice требует согласия всех оставшихся игроков")]
    RunItTwiceNeedsConsent,

    #[error("Run-it-twice: число прогонов должно быть от 2 до 4")]
    RunItTwiceBadRunCount,

    #[error("Run-it-twice не включён для этой раздачи")]
    RunItTwiceNotEnabled,

    #[error("Run-it-twice: торговля ещё не закончена")]
    RunItTwiceBettingOpen,

    #[error("Rabbit hunt: превью не подготовлено")]
    RabbitPreviewNotPrepared,

    #[error("Rabbit hunt: улица {0:?} не имеет борда")]
    RabbitBadStreet(crate::domain::hand::Street),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
