//! Shared crate-wide constants.

use std::time::Duration;

/// Duration of the entrance transition when a window is shown animated.
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(250);

/// Duration of the exit transition when a window is dismissed animated.
///
/// Slightly shorter than the entrance so an interrupted entrance settles
/// quickly when the user backs out immediately.
pub const EXIT_DURATION: Duration = Duration::from_millis(200);

/// Rows a formsheet travels while sliding in from (and back toward) the
/// bottom edge of the parent surface.
///
/// Units: terminal rows. Increasing this makes the entrance read as a
/// longer swipe; the transition duration is unaffected.
pub const SLIDE_ROWS: u16 = 6;

/// Minimum formsheet width enforced when the parent surface has room for
/// it. Below this the sheet chrome becomes unreadable.
pub const MIN_SHEET_WIDTH: u16 = 24;

/// Minimum formsheet height enforced when the parent surface has room
/// for it.
pub const MIN_SHEET_HEIGHT: u16 = 5;
