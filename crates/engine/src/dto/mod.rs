pub mod event;
pub mod stage;

pub use event::CreateEventRequest;
pub use stage::{
    AttendanceMark, EntrantEntry, NameCorrection, PerformanceRow, RowRejection, StageOperation,
    StageOutcome, VerificationRequest,
};
