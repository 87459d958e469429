use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod formsheet;

pub use formsheet::FormsheetPanel;

/// Context passed to `Component` trait methods describing UI state.
///
/// Carries the focus and overlay flags so the trait stays stable and
/// components never grow ad-hoc boolean parameters.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    overlay: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            overlay: false,
        }
    }

    /// Whether the component is focused (for overlay content: whether its
    /// window is key).
    pub const fn focused(&self) -> bool {
        self.focused
    }

    /// Whether the component is being rendered inside an overlay window.
    pub const fn overlay(&self) -> bool {
        self.overlay
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Content attach point for overlay windows.
///
/// An overlay window owns exactly one `Component`, places it at the
/// resolved sheet rect, and forwards layout changes and input to it. The
/// window never inspects the component beyond this trait.
pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
