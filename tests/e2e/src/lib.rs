//! Lapse end-to-end test support
//!
//! - `fixtures`: the published FSRS-4.5 reference configuration and trace
//! - `harness`: an in-memory caller that owns card storage and a clock

pub mod harness;

pub use fixtures::*;
pub use harness::ReviewCalendar;
