pub mod dto;
pub mod error;
pub mod models;
pub mod services;

pub use error::{EngineError, Result};
pub use models::{Event, EventCategory, Gender, Stage};
pub use services::championship::{ChampionshipPolicy, FinalizedEvent, compute_standings};
pub use services::lifecycle::EventState;
