//! Ядро покерных правил: детерминированная state machine одной раздачи.
//!
//! Что внутри:
//!   - `domain` – карты, колода, фишки, игроки, стол, варианты игры;
//!   - `eval`   – оценка силы рук (холдем, омаха, ace-to-five low);
//!   - `engine` – ставки, порядок хода, улицы, сайд-поты, шоудаун,
//!                run-it-twice и rabbit hunt, фасад `PokerEngine`;
//!   - `infra`  – RNG (живой и детерминированный), commit-reveal схема,
//!                хук персистентности для run-it-twice.
//!
//! Транспорт, базы данных и UI – внешние коллабораторы: они сериализуют
//! вызовы к движку (один стол = один `PokerEngine`, без внутренних локов)
//! и читают состояние через снапшоты.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use engine::facade::{EngineConfig, PokerEngine};
pub use engine::{EngineError, HandStatus, PlayerAction, PlayerActionKind};
