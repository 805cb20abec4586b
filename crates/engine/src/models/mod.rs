pub mod entrant;
pub mod event;
pub mod heat;
pub mod history;
pub mod result;
pub mod sheet;
pub mod standings;

pub use entrant::{AttendanceStatus, CallRoomRow, Entrant};
pub use event::{Event, EventCategory, Gender, Stage};
pub use heat::{HeatGroup, HeatSlot};
pub use history::StageHistoryEntry;
pub use result::{Announcement, RankedResult};
pub use sheet::{EventSheet, SheetRow};
pub use standings::ChampionshipStandingRow;
