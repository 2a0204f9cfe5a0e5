use std::collections::HashMap;

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, PlayerHandResult, Street};
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::table::{AnteType, Table};
use crate::domain::variant::VariantFamily;
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::{diff_to_call, BettingState};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{
    collect_in_hand_seats_from, find_next_active_player, first_to_act, lowest_up_card_seat,
    next_dealer,
};
use crate::engine::showdown::{
    enforce_conservation, high_winners_on_board, split_among, split_pot_hi_lo, HiLoResult,
};
use crate::engine::side_pots::{compute_side_pots, SidePot};
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    /// Ставки закончились, все оставшиеся в оллыне, а доигровка
    /// придержана под run-it-twice (см. PokerEngine::run_it_twice_now).
    AwaitingRunItTwice,
    Finished(HandSummary),
}

/// Внутреннее состояние раздачи.
pub struct HandEngine {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub deck: Deck,
    pub betting: BettingState,
    pub side_pots: Vec<SidePot>,
    /// Сколько всего фишек внёс каждый seat (для side pots).
    pub contributions: HashMap<SeatIndex, Chips>,
    /// Чей сейчас ход (seat). None во время шоудауна/между раздачами.
    pub current_actor: Option<SeatIndex>,
    /// Итог хай/лоу сплита последнего шоудауна (для аудита).
    pub last_hi_lo: Option<HiLoResult>,
    /// История раздачи.
    pub history: HandHistory,
}

impl HandEngine {
    fn new(table_id: TableId, hand_id: HandId, deck: Deck, betting: BettingState) -> Self {
        Self {
            table_id,
            hand_id,
            deck,
            betting,
            side_pots: Vec::new(),
            contributions: HashMap::new(),
            current_actor: None,
            last_hi_lo: None,
            history: HandHistory::new(),
        }
    }

    /// Общий банк = сумма всех вкладов.
    pub fn pot_total(&self) -> Chips {
        self.contributions
            .values()
            .fold(Chips::ZERO, |acc, c| acc + *c)
    }
}

/// Сброс состояния игроков перед новой раздачей: карты, ставки, флаги.
pub fn reset_player_states(table: &mut Table) {
    for seat_opt in table.seats.iter_mut() {
        if let Some(p) = seat_opt {
            p.current_bet = Chips::ZERO;
            p.has_acted = false;
            p.hole_cards.clear();
            p.up_cards.clear();
            if !matches!(p.status, PlayerStatus::Busted | PlayerStatus::SittingOut) {
                p.status = PlayerStatus::Active;
            }
        }
    }
    table.board.clear();
    table.total_pot = Chips::ZERO;
}

/// Передвинуть кнопку на следующее занятое место.
pub fn rotate_dealer_button(table: &mut Table) -> Option<SeatIndex> {
    let dealer = next_dealer(table)?;
    table.dealer_button = Some(dealer);
    Some(dealer)
}

/// Старт новой раздачи:
/// - сбрасывает состояние игроков;
/// - двигает кнопку;
/// - постит анте + блайнды (flop) или анте + bring-in (стад);
/// - раздаёт стартовые карты;
/// - настраивает BettingState и current_actor.
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    new_hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }

    reset_player_states(table);

    let playable = table
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .filter(|p| p.status == PlayerStatus::Active && !p.stack.is_zero())
        .count();
    if playable < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let family = table.config.variant.family();

    // Стад раздаёт до 7 карт каждому – колода должна вмещать всех.
    if family == VariantFamily::Stud && playable * 7 > 52 {
        return Err(EngineError::TooManyPlayers);
    }

    let table_id = table.id;
    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);

    table.current_hand_id = Some(new_hand_id);
    table.street = Street::first(family);
    table.hand_in_progress = true;

    let dealer_seat = rotate_dealer_button(table).ok_or(EngineError::NotEnoughPlayers)?;

    let mut engine = HandEngine::new(
        table_id,
        new_hand_id,
        deck,
        BettingState::new(
            table.street,
            Chips::ZERO,
            table.config.stakes.big_blind, // min_raise по умолчанию = BB
        ),
    );

    engine.history.push(HandEventKind::HandStarted {
        table_id,
        hand_id: new_hand_id,
    });

    match family {
        VariantFamily::Flop => start_flop_hand(table, &mut engine, dealer_seat),
        VariantFamily::Stud => start_stud_hand(table, &mut engine, dealer_seat),
    }

    Ok(engine)
}

/// Префлоп flop-игры: анте/блайнды, карманные карты, первый ходящий.
fn start_flop_hand(table: &mut Table, engine: &mut HandEngine, dealer_seat: SeatIndex) {
    let stakes = table.config.stakes.clone();
    let occupied = collect_in_hand_seats_from(table, dealer_seat);

    // Хедз-ап: дилер = SB, второй = BB. Иначе SB/BB слева от кнопки.
    let (sb_seat, bb_seat) = if occupied.len() == 2 {
        (occupied[0], occupied[1])
    } else {
        (occupied[1], occupied[2])
    };

    let ante_events = post_antes(table, engine, &occupied, &stakes);

    let mut sb_evt = None;
    if let Some(p) = table.player_at_mut(sb_seat) {
        let paid = take_from_stack(p, stakes.small_blind);
        p.current_bet += paid;
        mark_all_in_if_empty(p);
        add_contribution(engine, sb_seat, paid);
        sb_evt = Some((sb_seat, paid));
    }

    let mut bb_evt = None;
    if let Some(p) = table.player_at_mut(bb_seat) {
        let paid = take_from_stack(p, stakes.big_blind);
        p.current_bet += paid;
        mark_all_in_if_empty(p);
        add_contribution(engine, bb_seat, paid);
        bb_evt = Some((bb_seat, paid));
    }

    engine.betting.current_bet = stakes.big_blind;
    engine.betting.min_raise = stakes.big_blind;
    engine.betting.last_aggressor = Some(bb_seat);

    engine.history.push(HandEventKind::BlindsPosted {
        dealer: dealer_seat,
        small_blind: sb_evt,
        big_blind: bb_evt,
        ante: ante_events,
    });

    table.total_pot = engine.pot_total();

    deal_hole_cards(table, engine, dealer_seat);

    engine.current_actor = first_to_act(table, table.street, &engine.betting);
}

/// Третья улица стада: анте, две закрытые + одна открытая карта,
/// bring-in с младшей открытой карты.
fn start_stud_hand(table: &mut Table, engine: &mut HandEngine, dealer_seat: SeatIndex) {
    let stakes = table.config.stakes.clone();
    let occupied = collect_in_hand_seats_from(table, dealer_seat);

    let ante_events = post_antes(table, engine, &occupied, &stakes);

    // 2 закрытые + 1 открытая каждому, по кругу от дилера.
    for _ in 0..2 {
        for &seat in &occupied {
            if let Some(card) = engine.deck.draw_one() {
                if let Some(p) = table.player_at_mut(seat) {
                    p.hole_cards.push(card);
                    engine.history.push(HandEventKind::HoleCardsDealt {
                        seat,
                        cards: vec![card],
                    });
                }
            }
        }
    }
    for &seat in &occupied {
        if let Some(card) = engine.deck.draw_one() {
            if let Some(p) = table.player_at_mut(seat) {
                p.up_cards.push(card);
                engine.history.push(HandEventKind::UpCardDealt { seat, card });
            }
        }
    }

    // Bring-in: младшая открытая карта, ничья по масти (c<d<h<s).
    // Форсированная ставка размером SB – это и есть первый ход.
    if let Some(bring_in_seat) = lowest_up_card_seat(table) {
        let amount = stakes.small_blind;
        if let Some(p) = table.player_at_mut(bring_in_seat) {
            let paid = take_from_stack(p, amount);
            p.current_bet += paid;
            p.has_acted = true;
            mark_all_in_if_empty(p);
            add_contribution(engine, bring_in_seat, paid);

            engine.betting.current_bet = paid;
            engine.betting.min_raise = stakes.big_blind;
            engine.betting.last_aggressor = Some(bring_in_seat);

            engine.history.push(HandEventKind::BringInPosted {
                seat: bring_in_seat,
                amount: paid,
                ante: ante_events,
            });
        }

        engine.current_actor = find_next_active_player(table, &engine.betting, bring_in_seat);
    }

    table.total_pot = engine.pot_total();
}

/// Анте со всех участников (если настроено).
fn post_antes(
    table: &mut Table,
    engine: &mut HandEngine,
    occupied: &[SeatIndex],
    stakes: &crate::domain::table::TableStakes,
) -> Vec<(SeatIndex, Chips)> {
    let mut events = Vec::new();
    if stakes.ante_type == AnteType::None || stakes.ante.is_zero() {
        return events;
    }

    for &seat in occupied {
        if let Some(p) = table.player_at_mut(seat) {
            let paid = take_from_stack(p, stakes.ante);
            mark_all_in_if_empty(p);
            add_contribution(engine, seat, paid);
            events.push((seat, paid));
        }
    }
    events
}

/// Взять из стека не более amount.
fn take_from_stack(player: &mut PlayerAtTable, amount: Chips) -> Chips {
    let real = if player.stack.0 < amount.0 {
        player.stack
    } else {
        amount
    };
    player.stack -= real;
    real
}

/// Блайнд/анте мог съесть весь стек.
fn mark_all_in_if_empty(player: &mut PlayerAtTable) {
    if player.stack.is_zero() && player.status == PlayerStatus::Active {
        player.status = PlayerStatus::AllIn;
    }
}

/// Обновить общий pot и contributions.
fn add_contribution(engine: &mut HandEngine, seat: SeatIndex, amount: Chips) {
    if amount.is_zero() {
        return;
    }
    *engine.contributions.entry(seat).or_insert(Chips::ZERO) += amount;
}

/// Раздача карманных карт flop-игры: 2 (холдем) или 4 (омаха), по кругу.
fn deal_hole_cards(table: &mut Table, engine: &mut HandEngine, dealer_seat: SeatIndex) {
    let per_player = table.config.variant.hole_cards_dealt();
    let order = collect_in_hand_seats_from(table, dealer_seat);

    for _round in 0..per_player {
        for &seat in &order {
            if let Some(card) = engine.deck.draw_one() {
                if let Some(p) = table.player_at_mut(seat) {
                    p.hole_cards.push(card);
                    engine.history.push(HandEventKind::HoleCardsDealt {
                        seat,
                        cards: vec![card],
                    });
                }
            }
        }
    }
}

/// Применить действие игрока. Возвращает статус раздачи.
///
/// `hold_runout`: если ставки закончились, но в раздаче осталось 2+
/// оллын-игроков, не доигрывать борд автоматически (его раздаст
/// run-it-twice). Без run-it-twice всегда false.
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
    hold_runout: bool,
) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress {
        return Err(EngineError::NoActiveHand);
    }

    let seat_idx = action.seat as usize;
    if seat_idx >= table.seats.len() {
        return Err(EngineError::InvalidSeat(action.seat));
    }

    // Иммутабельная ссылка для проверок – состояние до них не трогаем.
    let player_ref = table.seats[seat_idx]
        .as_ref()
        .ok_or(EngineError::EmptySeat)?;

    if player_ref.player_id != action.player_id {
        return Err(EngineError::PlayerNotAtTable(action.player_id));
    }

    if engine.current_actor != Some(action.seat) {
        return Err(EngineError::NotPlayersTurn(action.player_id));
    }

    validate_action(
        player_ref,
        &action.kind,
        &engine.betting,
        table.config.betting_mode,
        engine.pot_total(),
    )?;

    let to_call = diff_to_call(player_ref, &engine.betting);

    match action.kind {
        PlayerActionKind::Fold => {
            let player = table.seats[seat_idx].as_mut().ok_or(EngineError::EmptySeat)?;
            player.status = PlayerStatus::Folded;
            player.has_acted = true;
            push_acted(engine, table, action);
        }

        PlayerActionKind::Check => {
            let player = table.seats[seat_idx].as_mut().ok_or(EngineError::EmptySeat)?;
            player.has_acted = true;
            push_acted(engine, table, action);
        }

        PlayerActionKind::Call => {
            let player = table.seats[seat_idx].as_mut().ok_or(EngineError::EmptySeat)?;
            // Колл короче стека = all-in call.
            let paid = take_from_stack(player, to_call);
            player.current_bet += paid;
            player.has_acted = true;
            mark_all_in_if_empty(player);
            add_contribution(engine, action.seat, paid);
            push_acted(engine, table, action);
        }

        PlayerActionKind::Bet(amount) => {
            let player = table.seats[seat_idx].as_mut().ok_or(EngineError::EmptySeat)?;
            let paid = take_from_stack(player, amount);
            player.current_bet += paid;
            player.has_acted = true;
            mark_all_in_if_empty(player);
            let new_bet = player.current_bet;
            add_contribution(engine, action.seat, paid);

            // Первый bet улицы: min_raise = размер бета.
            // Короткий all-in бет (обрезанный по стеку) min_raise не трогает.
            if new_bet.0 >= engine.betting.min_raise.0 {
                engine.betting.on_raise(action.seat, new_bet, new_bet);
            } else {
                engine.betting.current_bet = new_bet;
                engine.betting.last_aggressor = Some(action.seat);
            }
            reopen_action_for_others(table, action.seat);
            push_acted(engine, table, action);
        }

        PlayerActionKind::Raise(total_bet) => {
            let current_bet_before = engine.betting.current_bet;
            let player = table.seats[seat_idx].as_mut().ok_or(EngineError::EmptySeat)?;
            let diff = Chips(total_bet.0 - player.current_bet.0);
            let paid = take_from_stack(player, diff);
            player.current_bet += paid;
            player.has_acted = true;
            mark_all_in_if_empty(player);
            let new_bet = player.current_bet;
            add_contribution(engine, action.seat, paid);

            // Рейз, обрезанный по стеку, мог не дотянуть до текущей ставки
            // (all-in call) или до min_raise (неполный all-in рейз).
            if new_bet.0 > current_bet_before.0 {
                let raise_size = Chips(new_bet.0 - current_bet_before.0);
                if raise_size.0 >= engine.betting.min_raise.0 {
                    engine.betting.on_raise(action.seat, new_bet, raise_size);
                } else {
                    engine.betting.current_bet = new_bet;
                    engine.betting.last_aggressor = Some(action.seat);
                }
                reopen_action_for_others(table, action.seat);
            }
            push_acted(engine, table, action);
        }

        PlayerActionKind::AllIn => {
            let current_bet_before = engine.betting.current_bet;
            let player = table.seats[seat_idx].as_mut().ok_or(EngineError::EmptySeat)?;
            let paid = player.stack;
            player.stack = Chips::ZERO;
            player.status = PlayerStatus::AllIn;
            player.current_bet += paid;
            player.has_acted = true;
            let new_bet = player.current_bet;
            add_contribution(engine, action.seat, paid);

            if new_bet.0 > current_bet_before.0 {
                // Превысил текущую ставку – по сути raise.
                let raise_size = Chips(new_bet.0 - current_bet_before.0);
                // Неполный рейз (all-in меньше min_raise) ставку
                // переоткрывает, но min_raise не меняет.
                if raise_size.0 >= engine.betting.min_raise.0 {
                    engine.betting.on_raise(action.seat, new_bet, raise_size);
                } else {
                    engine.betting.current_bet = new_bet;
                    engine.betting.last_aggressor = Some(action.seat);
                }
                reopen_action_for_others(table, action.seat);
            }
            push_acted(engine, table, action);
        }
    }

    table.total_pot = engine.pot_total();

    // Остался один игрок в раздаче – авто-победа без шоудауна.
    if table.players_in_hand() == 1 {
        let summary = finish_hand_without_showdown(table, engine);
        return Ok(HandStatus::Finished(summary));
    }

    // Раунд не закрыт – передаём ход.
    if let Some(next) = find_next_active_player(table, &engine.betting, action.seat) {
        engine.current_actor = Some(next);
        return Ok(HandStatus::Ongoing);
    }

    engine.current_actor = None;
    advance_if_needed(table, engine, hold_runout)
}

/// После рейза остальным активным игрокам снова нужно действовать.
fn reopen_action_for_others(table: &mut Table, raiser: SeatIndex) {
    for (idx, seat_opt) in table.seats.iter_mut().enumerate() {
        if idx == raiser as usize {
            continue;
        }
        if let Some(p) = seat_opt {
            if p.status == PlayerStatus::Active {
                p.has_acted = false;
            }
        }
    }
}

fn push_acted(engine: &mut HandEngine, table: &Table, action: PlayerAction) {
    let (new_stack, pot_after) = match table.player_at(action.seat) {
        Some(p) => (p.stack, engine.pot_total()),
        None => (Chips::ZERO, engine.pot_total()),
    };
    engine.history.push(HandEventKind::PlayerActed {
        player_id: action.player_id,
        seat: action.seat,
        action: action.kind,
        new_stack,
        pot_after,
    });
}

/// Есть ли кому ставить: минимум два не-оллын игрока в раздаче.
fn betting_possible(table: &Table) -> bool {
    table
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .filter(|p| p.status == PlayerStatus::Active)
        .count()
        >= 2
}

/// Переход улиц / шоудаун. Крутится, пока есть что раздавать:
/// если все в оллыне, улицы открываются подряд до шоудауна
/// (кроме hold_runout – тогда доигровку заберёт run-it-twice).
pub fn advance_if_needed(
    table: &mut Table,
    engine: &mut HandEngine,
    hold_runout: bool,
) -> Result<HandStatus, EngineError> {
    loop {
        if table.street == Street::Showdown {
            return Err(EngineError::Internal("advance после шоудауна"));
        }

        let next = table.street.next();
        if next == Street::Showdown {
            let summary = finish_hand_with_showdown(table, engine);
            return Ok(HandStatus::Finished(summary));
        }

        if hold_runout && !betting_possible(table) {
            // Доигровку сделает run-it-twice по своим бордам.
            engine.current_actor = None;
            return Ok(HandStatus::AwaitingRunItTwice);
        }

        deal_street(table, engine, next);
        reset_bets_for_new_street(table, engine, next);

        if engine.current_actor.is_some() {
            return Ok(HandStatus::Ongoing);
        }
        // Никто не может действовать – открываем следующую улицу.
    }
}

/// Открыть карты новой улицы: борд (flop-игры) или по карте каждому (стад).
fn deal_street(table: &mut Table, engine: &mut HandEngine, street: Street) {
    match table.config.variant.family() {
        VariantFamily::Flop => {
            let count = street.board_cards_dealt();
            for _ in 0..count {
                if let Some(card) = engine.deck.draw_one() {
                    table.board.push(card);
                }
            }
            engine.history.push(HandEventKind::BoardDealt {
                street,
                cards: table.board.clone(),
            });
        }
        VariantFamily::Stud => {
            let dealer = table.dealer_button.unwrap_or(0);
            let order = collect_in_hand_seats_from(table, dealer);
            // Седьмая карта закрытая, остальные открытые.
            let face_down = street == Street::Seventh;
            for seat in order {
                if let Some(card) = engine.deck.draw_one() {
                    if let Some(p) = table.player_at_mut(seat) {
                        if face_down {
                            p.hole_cards.push(card);
                            engine.history.push(HandEventKind::HoleCardsDealt {
                                seat,
                                cards: vec![card],
                            });
                        } else {
                            p.up_cards.push(card);
                            engine.history.push(HandEventKind::UpCardDealt { seat, card });
                        }
                    }
                }
            }
        }
    }

    table.street = street;
    engine.history.push(HandEventKind::StreetChanged { street });
}

/// Сбросить ставки раунда и выбрать первого ходящего на новой улице.
fn reset_bets_for_new_street(table: &mut Table, engine: &mut HandEngine, street: Street) {
    for seat_opt in table.seats.iter_mut() {
        if let Some(p) = seat_opt {
            p.current_bet = Chips::ZERO;
            p.has_acted = false;
        }
    }

    engine.betting = BettingState::new(street, Chips::ZERO, table.config.stakes.big_blind);
    engine.current_actor = if betting_possible(table) {
        first_to_act(table, street, &engine.betting)
    } else {
        None
    };
}

/// Завершение раздачи без шоудауна (все сфолдили, остался один).
fn finish_hand_without_showdown(table: &mut Table, engine: &mut HandEngine) -> HandSummary {
    let street_reached = table.street;
    table.street = Street::Showdown;
    table.hand_in_progress = false;

    let winner_seat = table
        .seats
        .iter()
        .enumerate()
        .find_map(|(idx, s)| {
            s.as_ref()
                .filter(|p| p.is_in_hand())
                .map(|_| idx as SeatIndex)
        })
        .expect("должен быть хотя бы один игрок в раздаче");

    let total_pot = engine.pot_total();
    let stacks_before = sum_stacks(table);

    if let Some(winner) = table.player_at_mut(winner_seat) {
        winner.stack += total_pot;
        let player_id = winner.player_id;
        engine.history.push(HandEventKind::PotAwarded {
            seat: winner_seat,
            player_id,
            amount: total_pot,
        });
    }

    enforce_conservation(table, stacks_before, total_pot);

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
    });

    clear_round_bets(table);
    update_busted_statuses_after_hand(table);

    HandSummary {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
        street_reached,
        board: table.board.clone(),
        total_pot,
        results: build_results_single_winner(table, winner_seat, total_pot),
    }
}

/// Завершение раздачи с шоудауном: side pots + (хай или хай/лоу) дележ.
fn finish_hand_with_showdown(table: &mut Table, engine: &mut HandEngine) -> HandSummary {
    table.street = Street::Showdown;
    table.hand_in_progress = false;

    let side_pots = compute_side_pots(&engine.contributions);
    engine.side_pots = side_pots.clone();

    let total_pot = engine.pot_total();
    let stacks_before = sum_stacks(table);
    let board = table.board.clone();
    let hi_lo = table.config.variant.is_hi_lo();

    let mut results_map: HashMap<SeatIndex, PlayerHandResult> = HashMap::new();
    let mut revealed: Vec<SeatIndex> = Vec::new();
    let mut hi_lo_acc: Option<HiLoResult> = None;

    for sp in &side_pots {
        if sp.amount.is_zero() {
            continue;
        }

        let candidates: Vec<SeatIndex> = sp
            .eligible_seats
            .iter()
            .copied()
            .filter(|&s| table.player_at(s).map_or(false, |p| p.is_in_hand()))
            .collect();
        if candidates.is_empty() {
            continue;
        }

        // Вскрытие карт – по одному разу на игрока.
        for &seat in &candidates {
            if revealed.contains(&seat) {
                continue;
            }
            revealed.push(seat);
            if let Some(p) = table.player_at(seat) {
                let rank = crate::engine::showdown::rank_for_seat(table, seat, &board)
                    .map(|r| r.0)
                    .unwrap_or(0);
                engine.history.push(HandEventKind::ShowdownReveal {
                    seat,
                    player_id: p.player_id,
                    hole_cards: p.hole_cards.clone(),
                    rank_value: rank,
                });
            }
        }

        let payouts = if hi_lo {
            let (payouts, result) = split_pot_hi_lo(table, sp, &board);
            if let Some(r) = result {
                engine.history.push(HandEventKind::HiLoSplit {
                    high_half: r.high_half,
                    low_half: r.low_half,
                    low_qualified: !r.low_winners.is_empty(),
                });
                merge_hi_lo(&mut hi_lo_acc, r);
            }
            payouts
        } else {
            let (winners, _) = high_winners_on_board(table, &candidates, &board);
            split_among(sp.amount, &winners)
        };

        for (seat, prize) in payouts {
            if prize.is_zero() {
                continue;
            }
            if let Some(p) = table.player_at_mut(seat) {
                p.stack += prize;
                let player_id = p.player_id;
                engine.history.push(HandEventKind::PotAwarded {
                    seat,
                    player_id,
                    amount: prize,
                });

                let entry = results_map.entry(seat).or_insert(PlayerHandResult {
                    player_id,
                    rank: None,
                    net_chips: Chips::ZERO,
                    is_winner: false,
                });
                entry.net_chips += prize;
                entry.is_winner = true;
            }
        }
    }

    // Ранги всех вскрывшихся – в результаты.
    for &seat in &revealed {
        let rank = crate::engine::showdown::rank_for_seat(table, seat, &board);
        if let Some(p) = table.player_at(seat) {
            let entry = results_map.entry(seat).or_insert(PlayerHandResult {
                player_id: p.player_id,
                rank: None,
                net_chips: Chips::ZERO,
                is_winner: false,
            });
            entry.rank = rank;
        }
    }

    engine.last_hi_lo = hi_lo_acc;

    enforce_conservation(table, stacks_before, total_pot);

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
    });

    clear_round_bets(table);
    update_busted_statuses_after_hand(table);

    let mut results: Vec<PlayerHandResult> = results_map.into_values().collect();
    results.sort_by_key(|r| r.player_id);

    HandSummary {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
        street_reached: Street::Showdown,
        board,
        total_pot,
        results,
    }
}

/// Слить HiLoResult нескольких потов в один агрегат.
fn merge_hi_lo(acc: &mut Option<HiLoResult>, r: HiLoResult) {
    match acc {
        None => *acc = Some(r),
        Some(a) => {
            a.high_half += r.high_half;
            a.low_half += r.low_half;
            for w in r.high_winners {
                if !a.high_winners.contains(&w) {
                    a.high_winners.push(w);
                }
            }
            for w in r.low_winners {
                if !a.low_winners.contains(&w) {
                    a.low_winners.push(w);
                }
            }
        }
    }
}

pub(crate) fn sum_stacks(table: &Table) -> Chips {
    table
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .map(|p| p.stack)
        .fold(Chips::ZERO, |acc, s| acc + s)
}

fn clear_round_bets(table: &mut Table) {
    for seat_opt in table.seats.iter_mut() {
        if let Some(p) = seat_opt {
            p.current_bet = Chips::ZERO;
        }
    }
}

/// Результаты при победителе без шоудауна.
fn build_results_single_winner(
    table: &Table,
    winner_seat: SeatIndex,
    total_pot: Chips,
) -> Vec<PlayerHandResult> {
    let mut res = Vec::new();

    for (idx, seat_opt) in table.seats.iter().enumerate() {
        if let Some(p) = seat_opt.as_ref() {
            let seat = idx as SeatIndex;
            let is_winner = seat == winner_seat;
            res.push(PlayerHandResult {
                player_id: p.player_id,
                rank: None,
                net_chips: if is_winner { total_pot } else { Chips::ZERO },
                is_winner,
            });
        }
    }

    res
}

/// Пометить игроков как Busted, если после раздачи у них стек 0.
pub(crate) fn update_busted_statuses_after_hand(table: &mut Table) {
    for seat_opt in table.seats.iter_mut() {
        if let Some(p) = seat_opt {
            if p.stack.is_zero()
                && !matches!(p.status, PlayerStatus::Busted | PlayerStatus::SittingOut)
            {
                p.status = PlayerStatus::Busted;
            }
        }
    }
}
