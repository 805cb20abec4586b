use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::event::CreateEventRequest;
use crate::dto::stage::{
    AttendanceMark, EntrantEntry, NameCorrection, PerformanceRow, RowRejection, StageOperation,
    StageOutcome, VerificationRequest,
};
use crate::error::{EngineError, Result};
use crate::models::{
    Announcement, AttendanceStatus, CallRoomRow, Entrant, Event, EventSheet, HeatGroup,
    RankedResult, Stage, StageHistoryEntry,
};

use super::championship::{ChampionshipPolicy, FinalizedEvent};
use super::heats::{SeedEntry, build_heats};
use super::ranking::{ScoredEntrant, rank_entries};
use super::strategy::{CategoryStrategy, strategy_for};

/// The full working state of one event: metadata, every stage artifact, and
/// the append-only history log. All stage mutation goes through [`apply`] /
/// [`revert`]; callers serialize operations per event id (one writer per
/// event), which makes each transition safe to retry until the stage number
/// has advanced.
///
/// [`apply`]: EventState::apply
/// [`revert`]: EventState::revert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventState {
    pub event: Event,
    pub call_room: Vec<CallRoomRow>,
    pub sheets: Vec<EventSheet>,
    pub round1: Vec<RankedResult>,
    pub selection: Vec<RankedResult>,
    pub heats: Vec<HeatGroup>,
    pub heat_results: Vec<RankedResult>,
    pub pre_final: Option<HeatGroup>,
    pub final_results: Vec<RankedResult>,
    pub announcement: Option<Announcement>,
    pub history: Vec<StageHistoryEntry>,
}

impl EventState {
    /// Stage 1: constructs the event and records the creation transition.
    pub fn create(request: CreateEventRequest, policy: &ChampionshipPolicy) -> Result<Self> {
        request.validate()?;

        let now = Utc::now().naive_utc();
        let points_eligible = request
            .points_eligible
            .unwrap_or_else(|| policy.is_eligible(&request.name));
        let event = Event {
            event_id: Uuid::new_v4(),
            name: request.name.clone(),
            category: request.category,
            gender: request.gender,
            date: request.date,
            venue: request.venue.clone(),
            stage: Stage::EventCreation,
            locked: false,
            points_eligible,
            created_at: now,
            updated_at: now,
        };

        let mut state = Self {
            event,
            call_room: Vec::new(),
            sheets: Vec::new(),
            round1: Vec::new(),
            selection: Vec::new(),
            heats: Vec::new(),
            heat_results: Vec::new(),
            pre_final: None,
            final_results: Vec::new(),
            announcement: None,
            history: Vec::new(),
        };
        let snapshot = serde_json::to_value(&request).unwrap_or(serde_json::Value::Null);
        state.record(Stage::EventCreation, snapshot, false);
        info!(
            event_id = %state.event.event_id,
            category = state.event.category.as_str(),
            "event created"
        );
        Ok(state)
    }

    /// Runs one stage operation. The operation must target exactly the next
    /// stage; on success the stage advances and a history entry is appended.
    /// On any failure the event stays at its last recorded stage.
    pub fn apply(&mut self, operation: StageOperation) -> Result<StageOutcome> {
        if self.event.locked {
            return Err(EngineError::Locked);
        }
        let expected = self.event.stage.next().ok_or_else(|| {
            EngineError::Precondition("Event is already at its terminal stage".to_string())
        })?;
        let target = operation.stage();
        if target != expected {
            return Err(EngineError::Precondition(format!(
                "Operation targets stage {} ({}) but the event awaits stage {} ({})",
                target.number(),
                target.name(),
                expected.number(),
                expected.name()
            )));
        }

        let snapshot = serde_json::to_value(&operation).unwrap_or(serde_json::Value::Null);
        let strategy = strategy_for(self.event.category);
        let outcome = match operation {
            StageOperation::GenerateCallRoom { participants } => {
                self.generate_call_room(strategy, participants)?
            }
            StageOperation::CompleteCallRoom { marks } => self.complete_call_room(marks)?,
            StageOperation::GenerateSheets => self.generate_sheets(strategy)?,
            StageOperation::ScoreRound1 { rows } => self.score_round1(strategy, &rows)?,
            StageOperation::SelectTop { count } => self.select_top(strategy, count)?,
            StageOperation::GenerateHeats => self.generate_heats(strategy)?,
            StageOperation::ScoreHeats { rows } => self.score_heats(strategy, &rows)?,
            StageOperation::BuildPreFinal => self.build_pre_final(strategy)?,
            StageOperation::ScoreFinal { rows } => self.score_final(strategy, &rows)?,
            StageOperation::Announce => self.announce()?,
            StageOperation::CorrectNames { corrections } => self.correct_names(&corrections)?,
            StageOperation::VerifyAndLock { verification } => self.verify_and_lock(&verification)?,
        };

        self.event.stage = target;
        self.event.updated_at = Utc::now().naive_utc();
        self.record(target, snapshot, false);
        info!(
            event_id = %self.event.event_id,
            stage = target.number(),
            stage_name = target.name(),
            "stage advanced"
        );
        Ok(outcome)
    }

    /// Administrative step back by one stage. Clears the artifact the
    /// reverted stage produced and re-carries that stage's recorded input
    /// snapshot in a new history entry; it does not undo side effects
    /// already taken by dependent stages.
    pub fn revert(&mut self) -> Result<Stage> {
        if self.event.locked {
            return Err(EngineError::Locked);
        }
        let current = self.event.stage;
        let previous = current.prev().ok_or_else(|| {
            EngineError::Precondition("Cannot revert past event creation".to_string())
        })?;

        match current {
            Stage::CallRoomGeneration => self.call_room.clear(),
            Stage::CallRoomCompletion => {
                for row in &mut self.call_room {
                    row.entrant.status = AttendanceStatus::Present;
                }
            }
            Stage::SheetGeneration => self.sheets.clear(),
            Stage::Round1Scoring => self.round1.clear(),
            Stage::TopSelection => self.selection.clear(),
            Stage::HeatsGeneration => self.heats.clear(),
            Stage::HeatsScoring => self.heat_results.clear(),
            Stage::PreFinalSheet => self.pre_final = None,
            Stage::FinalScoring => self.final_results.clear(),
            Stage::FinalAnnouncement => self.announcement = None,
            // Name corrections are already woven through every artifact and
            // stay applied; creation itself cannot be reverted.
            Stage::NameCorrection | Stage::VerifyAndLock | Stage::EventCreation => {}
        }

        let restored = self
            .history
            .iter()
            .rev()
            .find(|entry| entry.stage == previous && !entry.reverted)
            .map(|entry| entry.input.clone())
            .unwrap_or(serde_json::Value::Null);
        self.event.stage = previous;
        self.event.updated_at = Utc::now().naive_utc();
        self.record(previous, restored, true);
        info!(
            event_id = %self.event.event_id,
            stage = previous.number(),
            "stage reverted"
        );
        Ok(previous)
    }

    /// This event's contribution to championship standings, available once
    /// it is locked.
    pub fn finalized(&self) -> Option<FinalizedEvent> {
        if !self.event.locked {
            return None;
        }
        let announcement = self.announcement.as_ref()?;
        Some(FinalizedEvent {
            event_id: self.event.event_id,
            name: self.event.name.clone(),
            gender: self.event.gender,
            points_eligible: self.event.points_eligible,
            results: announcement.results.clone(),
        })
    }

    fn record(&mut self, stage: Stage, input: serde_json::Value, reverted: bool) {
        self.history.push(StageHistoryEntry {
            stage,
            recorded_at: Utc::now().naive_utc(),
            reverted,
            input,
        });
    }

    fn entrant(&self, bib: u32) -> Option<&Entrant> {
        self.call_room
            .iter()
            .find(|row| row.entrant.bib == bib)
            .map(|row| &row.entrant)
    }

    fn generate_call_room(
        &mut self,
        strategy: &dyn CategoryStrategy,
        participants: Vec<EntrantEntry>,
    ) -> Result<StageOutcome> {
        if participants.is_empty() {
            return Err(EngineError::Validation(
                "At least one participant is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for entry in &participants {
            entry.validate()?;
            strategy.validate_entry(entry)?;
            if !seen.insert(entry.bib) {
                return Err(EngineError::Validation(format!(
                    "Duplicate bib {} in the participant list",
                    entry.bib
                )));
            }
        }

        self.call_room = participants
            .into_iter()
            .enumerate()
            .map(|(index, entry)| CallRoomRow {
                sl: index as u32 + 1,
                entrant: Entrant {
                    bib: entry.bib,
                    name: entry.name,
                    affiliation: entry.affiliation,
                    members: entry.members,
                    status: AttendanceStatus::Present,
                },
            })
            .collect();
        Ok(StageOutcome::CallRoom {
            call_room: self.call_room.clone(),
        })
    }

    fn complete_call_room(&mut self, marks: Vec<AttendanceMark>) -> Result<StageOutcome> {
        if self.call_room.is_empty() {
            return Err(EngineError::Precondition(
                "Call room has not been generated".to_string(),
            ));
        }
        // Resolve every bib before mutating anything, so a bad mark leaves
        // the roster untouched.
        for mark in &marks {
            if self.entrant(mark.bib).is_none() {
                return Err(EngineError::NotFound(format!(
                    "Bib {} is not in the call room",
                    mark.bib
                )));
            }
        }
        for mark in &marks {
            for row in &mut self.call_room {
                if row.entrant.bib == mark.bib {
                    row.entrant.status = mark.status;
                }
            }
        }
        Ok(StageOutcome::Attendance {
            call_room: self.call_room.clone(),
            marked: marks.len(),
        })
    }

    fn generate_sheets(&mut self, strategy: &dyn CategoryStrategy) -> Result<StageOutcome> {
        if self.call_room.is_empty() {
            return Err(EngineError::Precondition(
                "Call room has not been generated".to_string(),
            ));
        }
        self.sheets = strategy.sheets(&self.event.name, &self.call_room, self.event.gender);
        Ok(StageOutcome::Sheets {
            sheets: self.sheets.clone(),
        })
    }

    fn score_round1(
        &mut self,
        strategy: &dyn CategoryStrategy,
        rows: &[PerformanceRow],
    ) -> Result<StageOutcome> {
        if self.call_room.is_empty() {
            return Err(EngineError::Precondition(
                "Call room has not been generated".to_string(),
            ));
        }
        let pool: Vec<Entrant> = self
            .call_room
            .iter()
            .map(|row| row.entrant.clone())
            .collect();
        let (results, rejected) = self.score_rows(strategy, rows, &pool)?;
        self.round1 = results.clone();
        Ok(StageOutcome::Scores { results, rejected })
    }

    fn select_top(
        &mut self,
        strategy: &dyn CategoryStrategy,
        count: Option<usize>,
    ) -> Result<StageOutcome> {
        if self.round1.is_empty() {
            return Err(EngineError::Precondition(
                "Round 1 has not been scored".to_string(),
            ));
        }
        let count = match count {
            Some(0) => {
                return Err(EngineError::Validation(
                    "Selection count must be >= 1".to_string(),
                ));
            }
            Some(n) => n,
            None => strategy
                .default_advance_count()
                .unwrap_or(self.round1.len()),
        };
        self.selection = self.round1.iter().take(count).cloned().collect();
        Ok(StageOutcome::Selection {
            selected: self.selection.clone(),
        })
    }

    fn generate_heats(&mut self, strategy: &dyn CategoryStrategy) -> Result<StageOutcome> {
        if self.selection.is_empty() {
            return Err(EngineError::Precondition(
                "Top selection has not been made".to_string(),
            ));
        }
        let entries: Vec<SeedEntry> = self
            .selection
            .iter()
            .map(|result| SeedEntry {
                bib: result.bib,
                name: result.name.clone(),
                affiliation: result.affiliation.clone(),
            })
            .collect();
        self.heats = build_heats(&entries, strategy.heat_size());
        Ok(StageOutcome::Heats {
            heats: self.heats.clone(),
        })
    }

    fn score_heats(
        &mut self,
        strategy: &dyn CategoryStrategy,
        rows: &[PerformanceRow],
    ) -> Result<StageOutcome> {
        if self.heats.is_empty() {
            return Err(EngineError::Precondition(
                "Heats have not been generated".to_string(),
            ));
        }
        let pool: Vec<Entrant> = self
            .heats
            .iter()
            .flat_map(|heat| heat.slots.iter())
            .filter_map(|slot| self.entrant(slot.bib).cloned())
            .collect();
        let (results, rejected) = self.score_rows(strategy, rows, &pool)?;
        self.heat_results = results.clone();
        Ok(StageOutcome::Scores { results, rejected })
    }

    fn build_pre_final(&mut self, strategy: &dyn CategoryStrategy) -> Result<StageOutcome> {
        if self.heat_results.is_empty() {
            return Err(EngineError::Precondition(
                "Heats have not been scored".to_string(),
            ));
        }
        let final_size = strategy
            .default_advance_count()
            .unwrap_or(self.heat_results.len());
        let finalists: Vec<SeedEntry> = self
            .heat_results
            .iter()
            .take(final_size)
            .map(|result| SeedEntry {
                bib: result.bib,
                name: result.name.clone(),
                affiliation: result.affiliation.clone(),
            })
            .collect();
        // A single group: every finalist fits, seats follow heat-result
        // rank, lanes follow the fixed permutation.
        let mut groups = build_heats(&finalists, finalists.len());
        let start_list = groups.pop().ok_or_else(|| {
            EngineError::Precondition("Heat results produced no finalists".to_string())
        })?;
        self.pre_final = Some(start_list.clone());
        Ok(StageOutcome::PreFinal { start_list })
    }

    fn score_final(
        &mut self,
        strategy: &dyn CategoryStrategy,
        rows: &[PerformanceRow],
    ) -> Result<StageOutcome> {
        let Some(start_list) = self.pre_final.as_ref() else {
            return Err(EngineError::Precondition(
                "Pre-final sheet has not been built".to_string(),
            ));
        };
        let pool: Vec<Entrant> = start_list
            .slots
            .iter()
            .filter_map(|slot| self.entrant(slot.bib).cloned())
            .collect();
        let (results, rejected) = self.score_rows(strategy, rows, &pool)?;
        self.final_results = results.clone();
        Ok(StageOutcome::Scores { results, rejected })
    }

    fn announce(&mut self) -> Result<StageOutcome> {
        if self.final_results.is_empty() {
            return Err(EngineError::Precondition(
                "Final has not been scored".to_string(),
            ));
        }
        let announcement = Announcement {
            announced_at: Utc::now().naive_utc(),
            results: self.final_results.clone(),
            podium: self
                .final_results
                .iter()
                .filter(|result| result.points > 0)
                .cloned()
                .collect(),
        };
        self.announcement = Some(announcement.clone());
        Ok(StageOutcome::Announced { announcement })
    }

    fn correct_names(&mut self, corrections: &[NameCorrection]) -> Result<StageOutcome> {
        if self.announcement.is_none() {
            return Err(EngineError::Precondition(
                "Results have not been announced".to_string(),
            ));
        }
        for correction in corrections {
            correction.validate()?;
            if self.entrant(correction.bib).is_none() {
                return Err(EngineError::NotFound(format!(
                    "Bib {} is not entered in this event",
                    correction.bib
                )));
            }
        }
        for correction in corrections {
            self.rename(correction.bib, &correction.name);
        }
        Ok(StageOutcome::Corrected {
            corrected: corrections.len(),
        })
    }

    fn verify_and_lock(&mut self, verification: &VerificationRequest) -> Result<StageOutcome> {
        verification.validate()?;
        if self.announcement.is_none() {
            return Err(EngineError::Precondition(
                "Results have not been announced".to_string(),
            ));
        }
        self.event.locked = true;
        let locked_at = Utc::now().naive_utc();
        info!(event_id = %self.event.event_id, "event verified and locked");
        Ok(StageOutcome::Locked { locked_at })
    }

    fn rename(&mut self, bib: u32, name: &str) {
        for row in &mut self.call_room {
            if row.entrant.bib == bib {
                row.entrant.name = name.to_string();
            }
        }
        for sheet in &mut self.sheets {
            for row in &mut sheet.rows {
                if row.bib == bib {
                    row.name = name.to_string();
                }
            }
        }
        for list in [
            &mut self.round1,
            &mut self.selection,
            &mut self.heat_results,
            &mut self.final_results,
        ] {
            for result in list.iter_mut() {
                if result.bib == bib {
                    result.name = name.to_string();
                }
            }
        }
        for heat in &mut self.heats {
            for slot in &mut heat.slots {
                if slot.bib == bib {
                    slot.name = name.to_string();
                }
            }
        }
        if let Some(group) = &mut self.pre_final {
            for slot in &mut group.slots {
                if slot.bib == bib {
                    slot.name = name.to_string();
                }
            }
        }
        if let Some(announcement) = &mut self.announcement {
            for result in announcement
                .results
                .iter_mut()
                .chain(announcement.podium.iter_mut())
            {
                if result.bib == bib {
                    result.name = name.to_string();
                }
            }
        }
    }

    /// Scores a batch of performance rows against the round's pool. Rows
    /// referencing bibs outside the event abort; rows that fail parsing are
    /// rejected individually and the rest of the batch still applies, unless
    /// every row fails. Pool entrants without a usable row rank below all
    /// valid marks.
    fn score_rows(
        &self,
        strategy: &dyn CategoryStrategy,
        rows: &[PerformanceRow],
        pool: &[Entrant],
    ) -> Result<(Vec<RankedResult>, Vec<RowRejection>)> {
        if rows.is_empty() {
            return Err(EngineError::Validation(
                "At least one performance row is required".to_string(),
            ));
        }
        for row in rows {
            if self.entrant(row.bib).is_none() {
                return Err(EngineError::NotFound(format!(
                    "Bib {} is not entered in this event",
                    row.bib
                )));
            }
        }

        let mut by_bib: HashMap<u32, &PerformanceRow> = HashMap::new();
        let mut rejected: Vec<RowRejection> = Vec::new();
        for row in rows {
            if !pool.iter().any(|entrant| entrant.bib == row.bib) {
                rejected.push(RowRejection {
                    bib: row.bib,
                    reason: "Not competing in this round".to_string(),
                });
                continue;
            }
            if by_bib.contains_key(&row.bib) {
                rejected.push(RowRejection {
                    bib: row.bib,
                    reason: "Duplicate row for this bib".to_string(),
                });
                continue;
            }
            by_bib.insert(row.bib, row);
        }

        let mut scored = Vec::with_capacity(pool.len());
        for entrant in pool {
            let (value, display) = match entrant.status {
                AttendanceStatus::Present => match by_bib.get(&entrant.bib) {
                    Some(row) => match strategy.parse_row(row) {
                        Ok(Some(value)) => (Some(value), strategy.format_value(value)),
                        Ok(None) => (None, strategy.no_mark_label().to_string()),
                        Err(error) => {
                            warn!(bib = entrant.bib, %error, "rejecting performance row");
                            rejected.push(RowRejection {
                                bib: entrant.bib,
                                reason: error.to_string(),
                            });
                            (None, strategy.no_mark_label().to_string())
                        }
                    },
                    None => (None, AttendanceStatus::Present.no_mark_label().to_string()),
                },
                status => (None, status.no_mark_label().to_string()),
            };
            scored.push(ScoredEntrant {
                bib: entrant.bib,
                name: entrant.name.clone(),
                affiliation: entrant.affiliation.clone(),
                value,
                display,
            });
        }

        if rejected.len() >= rows.len() {
            return Err(EngineError::Validation(format!(
                "All {} performance rows failed validation",
                rows.len()
            )));
        }

        Ok((rank_entries(scored, strategy.score_order()), rejected))
    }
}
