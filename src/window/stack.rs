//! Presenter-side ownership of overlay windows.
//!
//! The registry tracks overlays; it never owns them. `OverlayStack` is the
//! owner most host applications want: it creates windows against its
//! manager, routes input to the key window, ticks in-flight transitions
//! from the UI loop, composites active windows bottom to top after the
//! host draw, and drops windows the moment they reach `Dismissed`.

use std::time::Instant;

use crossterm::event::Event;

use crate::components::Component;
use crate::ui::UiFrame;

use super::{
    FormsheetFrame, OverlayConfig, OverlayId, OverlayManager, OverlayWindow, ParentHandle,
    PresentationState,
};

#[derive(Default)]
pub struct OverlayStack {
    manager: OverlayManager,
    windows: Vec<OverlayWindow>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stack over an externally created manager, e.g. one shared
    /// with code that only needs the read-only registry queries.
    pub fn with_manager(manager: OverlayManager) -> Self {
        Self {
            manager,
            windows: Vec::new(),
        }
    }

    pub fn manager(&self) -> &OverlayManager {
        &self.manager
    }

    /// Create a window over `parent` and show it immediately.
    pub fn present(
        &mut self,
        parent: ParentHandle,
        content: Box<dyn Component>,
        frame: FormsheetFrame,
        config: OverlayConfig,
        animated: bool,
    ) -> OverlayId {
        let mut window =
            OverlayWindow::with_config(self.manager.registry(), parent, content, frame, config);
        window.show(animated);
        let id = window.id();
        self.windows.push(window);
        id
    }

    pub fn window(&self, id: OverlayId) -> Option<&OverlayWindow> {
        self.windows.iter().find(|window| window.id() == id)
    }

    pub fn window_mut(&mut self, id: OverlayId) -> Option<&mut OverlayWindow> {
        self.windows.iter_mut().find(|window| window.id() == id)
    }

    /// Dismiss the current key window, if any.
    pub fn dismiss_key(&mut self, animated: bool) {
        if let Some(id) = self.manager.key_window()
            && let Some(window) = self.window_mut(id)
        {
            window.dismiss(animated);
        }
        self.prune();
    }

    pub fn dismiss(&mut self, id: OverlayId, animated: bool) {
        if let Some(window) = self.window_mut(id) {
            window.dismiss(animated);
        }
        self.prune();
    }

    /// Route an event to the key window. Returns true when an overlay
    /// consumed it; false means no overlay is interactive and the host
    /// should handle the event itself.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let Some(id) = self.manager.key_window() else {
            return false;
        };
        let consumed = self
            .window_mut(id)
            .map(|window| window.handle_event(event))
            .unwrap_or(false);
        self.prune();
        consumed
    }

    /// Advance every in-flight transition and drop finished windows.
    pub fn tick_at(&mut self, now: Instant) {
        for window in &mut self.windows {
            window.tick_at(now);
        }
        self.prune();
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Composite all active windows in stacking order, bottom to top.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.render_at(frame, Instant::now());
    }

    pub fn render_at(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        for id in self.manager.stacking_order() {
            if let Some(window) = self.window_mut(id) {
                window.render_at(frame, now);
            }
        }
    }

    /// Whether any overlay is currently on screen.
    pub fn has_active(&self) -> bool {
        !self.manager.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    // Dismissed windows hold no content and are no longer registered;
    // nothing can reference them again, so drop them eagerly.
    fn prune(&mut self) {
        self.windows
            .retain(|window| window.state() != PresentationState::Dismissed);
    }
}
