use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Ранг лоу-руки (ace-to-five, 8-or-better).
///
/// Хранит 5 значений рангов (туз = 1) по возрастанию.
/// Сравнение – лексикографическое по возрастающему массиву,
/// МЕНЬШЕ = ЛУЧШЕ. Масти и стриты/флеши не учитываются.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct LowRank(pub [u8; 5]);

/// Проверить 5 карт на квалификацию лоу: все ранги различны и ≤ 8.
fn low_rank_of_five(cards: &[Card; 5]) -> Option<LowRank> {
    let mut values = [0u8; 5];
    for (i, card) in cards.iter().enumerate() {
        let v = card.rank.low_value();
        if v > 8 {
            return None;
        }
        values[i] = v;
    }

    values.sort_unstable();

    // Дубликат ранга = пара, лоу не квалифицируется.
    for w in values.windows(2) {
        if w[0] == w[1] {
            return None;
        }
    }

    Some(LowRank(values))
}

/// Лучший квалифицированный лоу из 5–7 карт (без ограничений по источнику).
/// None, если ни одно 5-карточное подмножество не квалифицируется.
pub fn evaluate_low_hand(cards: &[Card]) -> Option<LowRank> {
    assert!(
        (5..=7).contains(&cards.len()),
        "evaluate_low_hand ожидает от 5 до 7 карт"
    );

    let n = cards.len();
    let mut best: Option<LowRank> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        if let Some(r) = low_rank_of_five(&five) {
                            if best.map_or(true, |best_r| r < best_r) {
                                best = Some(r);
                            }
                        }
                    }
                }
            }
        }
    }

    best
}

/// Лучший квалифицированный лоу для омахи хай-лоу:
/// ровно 2 карманные карты + ровно 3 карты борда, как и для хая.
pub fn evaluate_omaha_low_hand(hole: &[Card], board: &[Card]) -> Option<LowRank> {
    assert_eq!(hole.len(), 4, "омаха лоу: ожидается 4 карманные карты");
    assert!(
        (3..=5).contains(&board.len()),
        "омаха лоу: ожидается борд из 3–5 карт"
    );

    let mut best: Option<LowRank> = None;

    for h1 in 0..3 {
        for h2 in (h1 + 1)..4 {
            for b1 in 0..(board.len() - 2) {
                for b2 in (b1 + 1)..(board.len() - 1) {
                    for b3 in (b2 + 1)..board.len() {
                        let five = [hole[h1], hole[h2], board[b1], board[b2], board[b3]];
                        if let Some(r) = low_rank_of_five(&five) {
                            if best.map_or(true, |best_r| r < best_r) {
                                best = Some(r);
                            }
                        }
                    }
                }
            }
        }
    }

    best
}
