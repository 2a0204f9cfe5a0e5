use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId};

/// Итог одного прогона run-it-twice для внешнего хранилища.
/// Карты сериализуются строками ("Ah", "10s"), чтобы запись
/// читалась без самого движка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunOutcome {
    pub hand_id: HandId,
    /// Номер борда, 1-based.
    pub board_number: u8,
    pub community: Vec<String>,
    pub winners: Vec<PlayerId>,
    pub pot: Chips,
}

impl RunOutcome {
    pub fn new(
        hand_id: HandId,
        board_number: u8,
        board: &[Card],
        winners: Vec<PlayerId>,
        pot: Chips,
    ) -> Self {
        Self {
            hand_id,
            board_number,
            community: board.iter().map(|c| c.to_string()).collect(),
            winners,
            pot,
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("хранилище недоступно: {0}")]
    Unavailable(String),
}

/// Абстракция хранилища результатов run-it-twice.
///
/// Запись fire-and-forget: движок логирует ошибку, но не даёт ей
/// повлиять на раздачу – фишки уже розданы.
pub trait RunItTwicePersistence {
    fn persist_run(&mut self, outcome: &RunOutcome) -> Result<(), PersistenceError>;
}

/// In-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    pub runs: HashMap<HandId, Vec<RunOutcome>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunItTwicePersistence for InMemoryRunStore {
    fn persist_run(&mut self, outcome: &RunOutcome) -> Result<(), PersistenceError> {
        self.runs
            .entry(outcome.hand_id)
            .or_default()
            .push(outcome.clone());
        Ok(())
    }
}
