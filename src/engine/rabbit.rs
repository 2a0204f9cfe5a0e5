//! Rabbit hunt: "а что бы пришло" – превью будущих общих карт после
//! окончания раздачи, без какого-либо влияния на живой стол.
//!
//! Движок готовит превью из снапшота (борд + известные карты), дальше
//! клиент спрашивает улицы в любом порядке. Уже показанные карты
//! кэшируются: повторный запрос той же или более ранней улицы не
//! раздаёт заново и не дублирует карты.

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::hand::Street;
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;
use crate::infra::rng_seed::RngSeed;

pub struct RabbitHunt {
    deck: Deck,
    /// Сколько общих карт уже лежало на борде в момент подготовки.
    base_community: usize,
    /// Карты, показанные превью, в порядке раздачи.
    previewed: Vec<Card>,
}

impl RabbitHunt {
    /// Подготовить превью: исключить все известные карты и
    /// детерминированно перемешать остаток по seed'у.
    ///
    /// `community` – борд на момент конца раздачи, `known` – прочие
    /// известные карты (например, вскрытые карманные).
    pub fn prepare(community: &[Card], known: &[Card], seed: RngSeed) -> Self {
        let mut all_known: Vec<Card> = community.to_vec();
        for card in known {
            if !all_known.contains(card) {
                all_known.push(*card);
            }
        }

        let mut deck = Deck::excluding(&all_known);
        let mut rng = seed.to_rng();
        rng.shuffle(&mut deck.cards);

        Self {
            deck,
            base_community: community.len(),
            previewed: Vec::new(),
        }
    }

    /// Карты превью до целевой улицы включительно.
    ///
    /// Возвращает только недостающие сверх реального борда карты:
    /// если раздача дошла до тёрна, превью ривера – одна карта.
    pub fn preview(&mut self, street: Street) -> Result<Vec<Card>, EngineError> {
        let target = street
            .board_target()
            .ok_or(EngineError::RabbitBadStreet(street))?;

        let shown = self.base_community + self.previewed.len();
        let needed = target.saturating_sub(shown);
        for _ in 0..needed {
            if let Some(card) = self.deck.draw_one() {
                self.previewed.push(card);
            }
        }

        let upto = target
            .saturating_sub(self.base_community)
            .min(self.previewed.len());
        Ok(self.previewed[..upto].to_vec())
    }
}
