//! Модуль оценки силы покерных рук.
//!
//! Основные функции:
//!   - `evaluate_best_hand(cards) -> HandRank` – лучшая 5-карточная рука из 5–7 карт;
//!   - `evaluate_omaha_hand(hole, board)` – строго 2 карманные + 3 борда;
//!   - `evaluate_low_hand` / `evaluate_omaha_low_hand` – ace-to-five 8-or-better.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;
pub mod low;
pub mod omaha;

pub use evaluator::{evaluate_5card_hand, evaluate_best_hand};
pub use hand_rank::{describe_hand, hand_category, HandCategory};
pub use low::{evaluate_low_hand, evaluate_omaha_low_hand, LowRank};
pub use omaha::evaluate_omaha_hand;
