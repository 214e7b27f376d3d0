//! Domain models: events, planning items, recurrence rules, and the
//! timezone-aware time helpers the schedule editor is built on.

pub mod event;
pub mod planning;
pub mod recurrence;
pub mod time;

pub use event::*;
pub use planning::*;
pub use recurrence::*;
pub use time::*;
