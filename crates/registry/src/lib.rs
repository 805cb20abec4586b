pub mod config;
pub mod error;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use engine::dto::{CreateEventRequest, StageOperation, StageOutcome};
use engine::models::ChampionshipStandingRow;
use engine::services::championship::{FinalizedEvent, compute_standings};
use engine::{EventState, Gender};

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};

/// In-process event store and dispatch surface for the external HTTP layer.
///
/// Stage operations on one event are serialized through that event's mutex
/// (a transition reads the current stage and writes the next one, so two
/// writers would silently skip or duplicate a stage); operations on
/// different events run in parallel. The standings rebuild takes a snapshot
/// of the event handles and locks each one only long enough to copy its
/// finalized results.
pub struct EventRegistry {
    config: RegistryConfig,
    events: RwLock<HashMap<Uuid, Arc<Mutex<EventState>>>>,
}

impl EventRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Stage 1: creates an event from a JSON payload and registers it.
    pub fn create_event(&self, payload: Value) -> Value {
        match self.try_create(payload) {
            Ok(response) => response,
            Err(error) => error.to_response(),
        }
    }

    /// Stages 2-13: runs one stage operation on a registered event.
    pub fn dispatch(&self, event_id: Uuid, payload: Value) -> Value {
        match self.try_dispatch(event_id, payload) {
            Ok(response) => response,
            Err(error) => error.to_response(),
        }
    }

    /// Administrative revert to the previous stage.
    pub fn revert_event(&self, event_id: Uuid) -> Value {
        match self.try_revert(event_id) {
            Ok(response) => response,
            Err(error) => error.to_response(),
        }
    }

    pub fn get_event(&self, event_id: Uuid) -> Value {
        match self.handle(event_id) {
            Ok(handle) => {
                let state = lock_state(&handle);
                json!({
                    "success": true,
                    "stage": state.event.stage.number(),
                    "stage_name": state.event.stage.name(),
                    "event": state.event,
                    "history": state.history,
                })
            }
            Err(error) => error.to_response(),
        }
    }

    /// Full championship standings rebuild over every locked,
    /// points-eligible event, optionally scoped to one gender.
    pub fn standings(&self, gender: Option<Gender>) -> Vec<ChampionshipStandingRow> {
        let snapshot: Vec<Arc<Mutex<EventState>>> =
            read_events(&self.events).values().cloned().collect();
        let finalized: Vec<FinalizedEvent> = snapshot
            .iter()
            .filter_map(|handle| lock_state(handle).finalized())
            .filter(|event| gender.is_none_or(|g| event.gender == g))
            .collect();
        compute_standings(&finalized)
    }

    pub fn standings_response(&self, gender: Option<Gender>) -> Value {
        json!({
            "success": true,
            "standings": self.standings(gender),
        })
    }

    fn try_create(&self, payload: Value) -> Result<Value> {
        let request: CreateEventRequest = serde_json::from_value(payload)?;
        let state = EventState::create(request, &self.config.championship)?;
        let event = state.event.clone();
        write_events(&self.events).insert(event.event_id, Arc::new(Mutex::new(state)));
        info!(event_id = %event.event_id, name = %event.name, "event registered");
        Ok(json!({
            "success": true,
            "stage": event.stage.number(),
            "stage_name": event.stage.name(),
            "event": event,
        }))
    }

    fn try_dispatch(&self, event_id: Uuid, payload: Value) -> Result<Value> {
        let operation: StageOperation = serde_json::from_value(payload)?;
        let handle = self.handle(event_id)?;
        let mut state = lock_state(&handle);
        let outcome = state.apply(operation)?;
        Ok(envelope(
            state.event.stage.number(),
            state.event.stage.name(),
            &outcome,
        ))
    }

    fn try_revert(&self, event_id: Uuid) -> Result<Value> {
        let handle = self.handle(event_id)?;
        let mut state = lock_state(&handle);
        let stage = state.revert()?;
        Ok(json!({
            "success": true,
            "stage": stage.number(),
            "stage_name": stage.name(),
            "reverted": true,
        }))
    }

    fn handle(&self, event_id: Uuid) -> Result<Arc<Mutex<EventState>>> {
        read_events(&self.events)
            .get(&event_id)
            .cloned()
            .ok_or(RegistryError::UnknownEvent(event_id))
    }
}

/// Flattens a stage outcome into the response envelope.
fn envelope(stage: u8, stage_name: &str, outcome: &StageOutcome) -> Value {
    let mut body = match serde_json::to_value(outcome) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            let mut map = serde_json::Map::new();
            map.insert("data".to_string(), other);
            map
        }
        Err(_) => serde_json::Map::new(),
    };
    body.insert("success".to_string(), json!(true));
    body.insert("stage".to_string(), json!(stage));
    body.insert("stage_name".to_string(), json!(stage_name));
    Value::Object(body)
}

// A poisoned lock still holds a consistent event: a failed operation never
// advances the stage, so recover the guard instead of propagating the panic.
fn lock_state(handle: &Mutex<EventState>) -> MutexGuard<'_, EventState> {
    match handle.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn read_events(
    events: &RwLock<HashMap<Uuid, Arc<Mutex<EventState>>>>,
) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Arc<Mutex<EventState>>>> {
    match events.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_events(
    events: &RwLock<HashMap<Uuid, Arc<Mutex<EventState>>>>,
) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Arc<Mutex<EventState>>>> {
    match events.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
