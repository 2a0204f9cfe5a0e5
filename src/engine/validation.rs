use crate::domain::chips::Chips;
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::variant::BettingMode;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::{diff_to_call, pot_limit_max_raise, BettingState};
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
/// Ничего не мутирует: либо Ok(()), либо типизированная ошибка.
pub fn validate_action(
    player: &PlayerAtTable,
    action: &PlayerActionKind,
    betting: &BettingState,
    mode: BettingMode,
    pot_total: Chips,
) -> Result<(), EngineError> {
    if matches!(
        player.status,
        PlayerStatus::Folded | PlayerStatus::Busted | PlayerStatus::SittingOut | PlayerStatus::AllIn
    ) {
        return Err(EngineError::IllegalAction);
    }

    let stack = player.stack;
    let to_call = diff_to_call(player, betting);

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if betting.current_bet.0 == player.current_bet.0 {
                Ok(())
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                // Call короче стека = all-in call, обрабатывает game_loop.
                Ok(())
            }
        }

        PlayerActionKind::Bet(amount) => {
            if betting.current_bet.0 > 0 {
                return Err(EngineError::IllegalAction); // bet можно только когда ещё нет ставки
            }
            if amount.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            // Бет сверх стека – имплицитный all-in, вклад обрезается по стеку.
            let effective = if amount.0 >= stack.0 { stack } else { *amount };
            if effective.0 < betting.min_raise.0 && effective.0 < stack.0 {
                // Бет меньше минимума разрешён только как all-in.
                return Err(EngineError::RaiseTooSmall);
            }
            if mode == BettingMode::PotLimit {
                let max_bet = pot_limit_max_raise(pot_total, to_call);
                if effective.0 > max_bet.0 {
                    return Err(EngineError::PotLimitExceeded);
                }
            }
            Ok(())
        }

        PlayerActionKind::Raise(total_bet) => {
            if betting.current_bet.0 == 0 {
                // Когда нет ставки – это bet, а не raise.
                return Err(EngineError::IllegalAction);
            }
            if total_bet.0 <= betting.current_bet.0 {
                return Err(EngineError::IllegalAction);
            }

            // Рейз сверх стека – имплицитный all-in на остаток стека.
            let diff = Chips(total_bet.0 - player.current_bet.0);
            let all_in = diff.0 >= stack.0;
            let effective_bet = if all_in {
                player.current_bet + stack
            } else {
                *total_bet
            };

            if effective_bet.0 > betting.current_bet.0 {
                let raise_size = Chips(effective_bet.0 - betting.current_bet.0);
                if !all_in && raise_size.0 < betting.min_raise.0 {
                    return Err(EngineError::RaiseTooSmall);
                }
                if mode == BettingMode::PotLimit {
                    let max_raise = pot_limit_max_raise(pot_total, to_call);
                    if raise_size.0 > max_raise.0 {
                        return Err(EngineError::PotLimitExceeded);
                    }
                }
            }

            Ok(())
        }

        PlayerActionKind::AllIn => {
            if stack.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            // В пот-лимите all-in сверх лимита тоже запрещён –
            // это обычный рейз, просто на весь стек.
            if mode == BettingMode::PotLimit {
                let new_bet = player.current_bet + stack;
                if new_bet.0 > betting.current_bet.0 {
                    let raise_size = Chips(new_bet.0 - betting.current_bet.0);
                    let max_raise = pot_limit_max_raise(pot_total, to_call);
                    if raise_size.0 > max_raise.0 {
                        return Err(EngineError::PotLimitExceeded);
                    }
                }
            }
            Ok(())
        }
    }
}
