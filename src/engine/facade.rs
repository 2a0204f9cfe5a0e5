//! Фасад движка: один стол, одна активная раздача, состояние
//! принадлежит движку. Транспорт сериализует вызовы (никаких локов
//! внутри) и читает состояние через снапшоты.

use std::collections::HashSet;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandSummary, Street};
use crate::domain::player::PlayerAtTable;
use crate::domain::table::Table;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::PlayerAction;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{apply_action, start_hand, HandEngine, HandStatus};
use crate::engine::hand_history::HandHistory;
use crate::engine::rabbit::RabbitHunt;
use crate::engine::run_it_twice::{self, RunItTwiceState, MAX_RUNS, MIN_RUNS};
use crate::engine::showdown::HiLoResult;
use crate::engine::RandomSource;
use crate::infra::persistence::{RunItTwicePersistence, RunOutcome};
use crate::infra::rng_security::{
    generate_rng_security, verify_rng_security, VerificationReport,
};
use crate::infra::rng_seed::RngSeed;

/// Настройки движка, не зависящие от стола.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Run-it-twice требует согласия всех не сфолдивших игроков.
    pub require_rit_unanimous: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            require_rit_unanimous: true,
        }
    }
}

pub struct PokerEngine {
    table: Table,
    config: EngineConfig,
    hand: Option<HandEngine>,
    next_hand_id: HandId,
    rit: RunItTwiceState,
    /// Согласия на run-it-twice, сбрасываются каждую раздачу.
    rit_consents: HashSet<PlayerId>,
    rabbit: Option<RabbitHunt>,
    persistence: Option<Box<dyn RunItTwicePersistence>>,
    last_summary: Option<HandSummary>,
}

impl PokerEngine {
    pub fn new(table: Table, config: EngineConfig) -> Self {
        Self {
            table,
            config,
            hand: None,
            next_hand_id: 1,
            rit: RunItTwiceState::default(),
            rit_consents: HashSet::new(),
            rabbit: None,
            persistence: None,
            last_summary: None,
        }
    }

    /// Подключить хранилище итогов run-it-twice (fire-and-forget).
    pub fn with_persistence(mut self, persistence: Box<dyn RunItTwicePersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    // -------- стол / снапшоты --------

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Снапшот стола для транспорта.
    pub fn state(&self) -> Table {
        self.table.clone()
    }

    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.hand.as_ref().and_then(|h| h.current_actor)
    }

    pub fn pot_total(&self) -> Chips {
        self.hand
            .as_ref()
            .map(|h| h.pot_total())
            .unwrap_or(Chips::ZERO)
    }

    pub fn history(&self) -> Option<&HandHistory> {
        self.hand.as_ref().map(|h| &h.history)
    }

    pub fn last_hi_lo(&self) -> Option<&HiLoResult> {
        self.hand.as_ref().and_then(|h| h.last_hi_lo.as_ref())
    }

    pub fn last_summary(&self) -> Option<&HandSummary> {
        self.last_summary.as_ref()
    }

    pub fn run_it_twice_state(&self) -> &RunItTwiceState {
        &self.rit
    }

    // -------- рассадка --------

    /// Посадить игрока на свободное место (между раздачами).
    pub fn sit_player(
        &mut self,
        seat: SeatIndex,
        player_id: PlayerId,
        stack: Chips,
    ) -> Result<(), EngineError> {
        if self.table.hand_in_progress {
            return Err(EngineError::HandAlreadyInProgress);
        }
        if seat as usize >= self.table.seats.len() {
            return Err(EngineError::InvalidSeat(seat));
        }
        if !self.table.is_seat_empty(seat) {
            return Err(EngineError::IllegalAction);
        }
        self.table.seats[seat as usize] = Some(PlayerAtTable::new(player_id, stack));
        Ok(())
    }

    /// Убрать игрока со стола (между раздачами).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<Chips, EngineError> {
        if self.table.hand_in_progress {
            return Err(EngineError::HandAlreadyInProgress);
        }
        for seat_opt in self.table.seats.iter_mut() {
            if seat_opt.as_ref().map(|p| p.player_id) == Some(player_id) {
                let player = seat_opt.take();
                return Ok(player.map(|p| p.stack).unwrap_or(Chips::ZERO));
            }
        }
        Err(EngineError::PlayerNotAtTable(player_id))
    }

    // -------- ход раздачи --------

    /// Запустить новую раздачу. Сбрасывает run-it-twice и rabbit hunt
    /// предыдущей раздачи.
    pub fn start_new_hand<R: RandomSource>(
        &mut self,
        rng: &mut R,
    ) -> Result<HandId, EngineError> {
        let hand_id = self.next_hand_id;
        let engine = start_hand(&mut self.table, rng, hand_id)?;
        self.next_hand_id += 1;

        self.hand = Some(engine);
        self.rit = RunItTwiceState::default();
        self.rit_consents.clear();
        self.rabbit = None;
        self.last_summary = None;

        tracing::info!(
            table_id = self.table.id,
            hand_id,
            variant = ?self.table.config.variant,
            "начата новая раздача"
        );

        Ok(hand_id)
    }

    /// Применить действие игрока.
    pub fn handle_action(&mut self, action: PlayerAction) -> Result<HandStatus, EngineError> {
        let hand = self.hand.as_mut().ok_or(EngineError::NoActiveHand)?;

        let status = apply_action(&mut self.table, hand, action, self.rit.enabled)?;

        tracing::debug!(
            table_id = self.table.id,
            player_id = action.player_id,
            seat = action.seat,
            action = ?action.kind,
            "действие применено"
        );

        if let HandStatus::Finished(summary) = &status {
            self.last_summary = Some(summary.clone());
        }

        Ok(status)
    }

    // -------- run-it-twice --------

    /// Игрок согласился на run-it-twice в этой раздаче.
    pub fn consent_run_it_twice(&mut self, player_id: PlayerId) -> Result<(), EngineError> {
        if !self.table.hand_in_progress {
            return Err(EngineError::NoActiveHand);
        }
        let seated = self
            .table
            .seats
            .iter()
            .filter_map(|s| s.as_ref())
            .any(|p| p.player_id == player_id && p.is_in_hand());
        if !seated {
            return Err(EngineError::PlayerNotAtTable(player_id));
        }
        self.rit_consents.insert(player_id);
        Ok(())
    }

    /// Включить run-it-twice для текущей раздачи.
    ///
    /// `secret` – 32 криптослучайных байта от транспорта,
    /// `player_entropy`/`timestamp` – внешние входы commit-reveal схемы.
    pub fn enable_run_it_twice(
        &mut self,
        number_of_runs: u8,
        secret: [u8; 32],
        player_entropy: &[u8],
        timestamp: u64,
    ) -> Result<(), EngineError> {
        if !self.table.hand_in_progress {
            return Err(EngineError::NoActiveHand);
        }
        if !(MIN_RUNS..=MAX_RUNS).contains(&number_of_runs) {
            return Err(EngineError::RunItTwiceBadRunCount);
        }

        let has_all_in = self
            .table
            .seats
            .iter()
            .filter_map(|s| s.as_ref())
            .any(|p| p.status == crate::domain::player::PlayerStatus::AllIn);
        if !has_all_in {
            return Err(EngineError::RunItTwiceNeedsAllIn);
        }

        if self.config.require_rit_unanimous {
            let all_consented = self
                .table
                .seats
                .iter()
                .filter_map(|s| s.as_ref())
                .filter(|p| p.is_in_hand())
                .all(|p| self.rit_consents.contains(&p.player_id));
            if !all_consented {
                return Err(EngineError::RunItTwiceNeedsConsent);
            }
        }

        self.rit.enabled = true;
        self.rit.number_of_runs = number_of_runs;
        self.rit.security = Some(generate_rng_security(
            secret,
            player_entropy,
            timestamp,
            number_of_runs,
        ));

        tracing::info!(
            table_id = self.table.id,
            runs = number_of_runs,
            "run-it-twice включён"
        );

        Ok(())
    }

    /// Прогнать все борды run-it-twice и завершить раздачу.
    pub fn run_it_twice_now(&mut self) -> Result<HandStatus, EngineError> {
        if !self.rit.enabled {
            return Err(EngineError::RunItTwiceNotEnabled);
        }
        if !self.table.hand_in_progress {
            return Err(EngineError::NoActiveHand);
        }
        let hand = self.hand.as_mut().ok_or(EngineError::NoActiveHand)?;
        // Борды прогоняются только после закрытия торгов
        // (статус AwaitingRunItTwice у apply_action).
        if hand.current_actor.is_some() {
            return Err(EngineError::RunItTwiceBettingOpen);
        }
        let security = self
            .rit
            .security
            .clone()
            .ok_or(EngineError::Internal("run-it-twice включён без seed'ов"))?;

        let (state, summary) = run_it_twice::execute_runs(
            &mut self.table,
            hand,
            &security,
            self.rit.number_of_runs,
        )?;

        // Персистентность fire-and-forget: ошибка логируется,
        // в синхронный путь раздачи не попадает.
        if let Some(persistence) = self.persistence.as_mut() {
            for run in &state.runs {
                let outcome = RunOutcome::new(
                    hand.hand_id,
                    run.run_index,
                    &run.board,
                    run.winners.clone(),
                    run.pot_share,
                );
                if let Err(err) = persistence.persist_run(&outcome) {
                    tracing::error!(
                        table_id = self.table.id,
                        hand_id = hand.hand_id,
                        run = run.run_index,
                        error = %err,
                        "не удалось сохранить итог прогона run-it-twice"
                    );
                }
            }
        }

        self.rit = state;
        self.last_summary = Some(summary.clone());

        Ok(HandStatus::Finished(summary))
    }

    /// Пересчитать hash chain из proof и сравнить с сохранённым.
    /// Без security-пэйлоада проверять нечего – тривиально ok.
    pub fn verify_run_it_twice_seeds(&self) -> VerificationReport {
        match self.rit.security.as_ref() {
            Some(security) => verify_rng_security(security),
            None => VerificationReport {
                ok: true,
                computed_chain: Vec::new(),
            },
        }
    }

    // -------- rabbit hunt --------

    /// Подготовить rabbit hunt из снапшота завершённой раздачи.
    pub fn prepare_rabbit_preview(
        &mut self,
        community: &[Card],
        known: &[Card],
        seed: RngSeed,
    ) -> Result<(), EngineError> {
        if self.table.hand_in_progress {
            return Err(EngineError::HandAlreadyInProgress);
        }
        self.rabbit = Some(RabbitHunt::prepare(community, known, seed));
        Ok(())
    }

    /// Превью общих карт до указанной улицы.
    pub fn preview_rabbit_hunt(&mut self, street: Street) -> Result<Vec<Card>, EngineError> {
        self.rabbit
            .as_mut()
            .ok_or(EngineError::RabbitPreviewNotPrepared)?
            .preview(street)
    }
}
