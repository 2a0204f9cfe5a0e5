use crate::domain::card::Card;
use crate::domain::hand::HandRank;

use super::evaluator::evaluate_5card_hand;

/// Оценка омаха-руки: ровно 2 карманные карты + ровно 3 карты борда.
///
/// Перебираем все C(4,2) пары карманных × C(board,3) тройки борда и
/// берём максимум. Откат к свободной 7-карточной оценке запрещён –
/// это изменило бы силу рук (например, 4 одномастные карманные не
/// дают флеша, если на борде меньше 3 карт этой масти).
pub fn evaluate_omaha_hand(hole: &[Card], board: &[Card]) -> HandRank {
    assert_eq!(hole.len(), 4, "омаха: ожидается 4 карманные карты");
    assert!(
        (3..=5).contains(&board.len()),
        "омаха: ожидается борд из 3–5 карт"
    );

    let mut best: Option<HandRank> = None;

    for h1 in 0..3 {
        for h2 in (h1 + 1)..4 {
            for b1 in 0..(board.len() - 2) {
                for b2 in (b1 + 1)..(board.len() - 1) {
                    for b3 in (b2 + 1)..board.len() {
                        let five = [hole[h1], hole[h2], board[b1], board[b2], board[b3]];
                        let r = evaluate_5card_hand(&five);
                        if best.map_or(true, |best_r| r > best_r) {
                            best = Some(r);
                        }
                    }
                }
            }
        }
    }

    best.expect("омаха: должна быть хотя бы одна комбинация 2+3")
}
