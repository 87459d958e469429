pub mod manager;
pub mod overlay;
pub mod stack;
pub mod transition;

use std::cell::RefCell;
use std::rc::Weak;
use std::time::Duration;

use ratatui::prelude::Rect;

use crate::constants::{
    ENTRANCE_DURATION, EXIT_DURATION, MIN_SHEET_HEIGHT, MIN_SHEET_WIDTH, SLIDE_ROWS,
};

pub use manager::{OverlayManager, OverlayRegistry};
pub use overlay::OverlayWindow;
pub use stack::OverlayStack;
pub use transition::{Transition, TransitionKind};

/// Identifier of an overlay window within one manager's registry.
///
/// Ids are allocated by the registry, not from a process-wide counter, so
/// independent managers can coexist (one per scene, several per test).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Lifecycle state of an overlay window.
///
/// The only legal path is
/// `Created → Appearing → Visible → Dismissing → Dismissed`; an unanimated
/// show or dismiss collapses the corresponding animated edge into a single
/// synchronous step. `Dismissed` is terminal — a window is single-use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    Created,
    Appearing,
    Visible,
    Dismissing,
    Dismissed,
}

impl PresentationState {
    /// Whether the window currently occupies the screen in any form.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            PresentationState::Appearing
                | PresentationState::Visible
                | PresentationState::Dismissing
        )
    }

    /// Whether the window may receive input and become key.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            PresentationState::Appearing | PresentationState::Visible
        )
    }
}

/// Host controller a window is presented over.
///
/// The overlay core only reads the parent's screen rectangle (to size the
/// sheet) and signals it when the last overlay above it goes away. Windows
/// hold the parent through a `Weak` reference and must never extend its
/// lifetime; if the parent is torn down first, focus restoration becomes a
/// no-op.
pub trait ParentSurface {
    /// Region of the terminal this controller occupies.
    fn screen(&self) -> Rect;

    /// Called when the final overlay presented above this surface has been
    /// dismissed and input routing falls back to the host.
    fn focus_restored(&mut self) {}
}

/// Non-owning handle to the parent controller.
pub type ParentHandle = Weak<RefCell<dyn ParentSurface>>;

/// How a window's sheet is placed within the parent's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormsheetFrame {
    /// Cover the parent's screen entirely.
    Full,
    /// A bounded sheet of the given size, centered. Clamped to the screen
    /// when the terminal is smaller than the preferred size.
    Centered { width: u16, height: u16 },
    /// A centered sheet sized as a percentage (0..=100) of the screen.
    Percent { width: u16, height: u16 },
}

impl FormsheetFrame {
    /// Resolve the sheet rectangle against the parent screen.
    ///
    /// Never returns a rectangle outside `bounds`. Preferred minimums are
    /// only enforced when the screen actually has room for them, so tiny
    /// terminals degrade instead of drawing out of bounds.
    pub fn resolve(&self, bounds: Rect) -> Rect {
        match *self {
            FormsheetFrame::Full => bounds,
            FormsheetFrame::Centered { width, height } => {
                sized_and_centered(bounds, width, height)
            }
            FormsheetFrame::Percent { width, height } => {
                let w = (bounds.width as u32).saturating_mul(width.min(100) as u32) / 100;
                let h = (bounds.height as u32).saturating_mul(height.min(100) as u32) / 100;
                sized_and_centered(bounds, w as u16, h as u16)
            }
        }
    }
}

fn sized_and_centered(bounds: Rect, width: u16, height: u16) -> Rect {
    let mut width = bounds.width.min(width).max(1);
    let mut height = bounds.height.min(height).max(1);
    if bounds.width >= MIN_SHEET_WIDTH {
        width = width.max(MIN_SHEET_WIDTH);
    }
    if bounds.height >= MIN_SHEET_HEIGHT {
        height = height.max(MIN_SHEET_HEIGHT);
    }
    let x = bounds
        .x
        .saturating_add(bounds.width.saturating_sub(width) / 2);
    let y = bounds
        .y
        .saturating_add(bounds.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Presentation tuning for one overlay window.
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    /// Entrance transition length for animated shows.
    pub entrance: Duration,
    /// Exit transition length for animated dismissals.
    pub exit: Duration,
    /// Rows the sheet slides while appearing/disappearing.
    pub slide_rows: u16,
    /// Dim the host content underneath while the window is on screen.
    pub dim_backdrop: bool,
    /// Dismiss the window when it is key and receives `Esc`.
    pub dismiss_on_escape: bool,
    /// Dismiss the window on a pointer press outside its sheet.
    pub dismiss_on_backdrop: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            entrance: ENTRANCE_DURATION,
            exit: EXIT_DURATION,
            slide_rows: SLIDE_ROWS,
            dim_backdrop: true,
            dismiss_on_escape: true,
            dismiss_on_backdrop: true,
        }
    }
}

pub(crate) fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_frame_clamps_to_small_bounds() {
        let frame = FormsheetFrame::Centered {
            width: 60,
            height: 12,
        };
        let tiny = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 3,
        };
        let rect = frame.resolve(tiny);
        assert!(rect.width <= tiny.width);
        assert!(rect.height <= tiny.height);
        assert!(rect.width >= 1 && rect.height >= 1);
    }

    #[test]
    fn centered_frame_enforces_minimums_when_room() {
        let frame = FormsheetFrame::Centered {
            width: 10,
            height: 2,
        };
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let rect = frame.resolve(bounds);
        assert!(rect.width >= MIN_SHEET_WIDTH);
        assert!(rect.height >= MIN_SHEET_HEIGHT);
    }

    #[test]
    fn percent_frame_scales_with_bounds() {
        let frame = FormsheetFrame::Percent {
            width: 50,
            height: 50,
        };
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let rect = frame.resolve(bounds);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 12);
        // centered within the bounds
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 6);
    }

    #[test]
    fn full_frame_covers_bounds() {
        let bounds = Rect {
            x: 2,
            y: 1,
            width: 40,
            height: 12,
        };
        assert_eq!(FormsheetFrame::Full.resolve(bounds), bounds);
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect {
            x: 2,
            y: 2,
            width: 4,
            height: 2,
        };
        assert!(rect_contains(rect, 2, 2));
        assert!(rect_contains(rect, 5, 3));
        assert!(!rect_contains(rect, 6, 3));
        assert!(!rect_contains(rect, 2, 4));
    }
}
