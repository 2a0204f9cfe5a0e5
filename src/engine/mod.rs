//! Покерный движок: ставки, порядок хода, улицы, сайд-поты, шоудаун,
//! run-it-twice и rabbit hunt.
//!
//! Высокоуровневый объект: `PokerEngine` (facade) – один стол,
//! одна активная раздача, состояние принадлежит движку.
//! Низкоуровневые операции (game_loop):
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `advance_if_needed` – авто-переход улиц/завершение раздачи

pub mod actions;
pub mod betting;
pub mod errors;
pub mod facade;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod rabbit;
pub mod run_it_twice;
pub mod showdown;
pub mod side_pots;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use errors::EngineError;
pub use game_loop::{advance_if_needed, apply_action, start_hand, HandEngine, HandStatus};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use rabbit::RabbitHunt;
pub use run_it_twice::{RunItTwiceState, RunResult};
pub use showdown::HiLoResult;
pub use side_pots::SidePot;

/// RNG интерфейс для engine. Реализации – в infra
/// (SystemRng для живой игры, DeterministicRng для реплея).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
