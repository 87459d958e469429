//! The overlay window: one floating formsheet surface and its lifecycle
//! state machine.

use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};
use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Clear;

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

use super::{
    FormsheetFrame, OverlayConfig, OverlayId, OverlayRegistry, ParentHandle, PresentationState,
    Transition, TransitionKind, rect_contains,
};

/// A single overlay presentation surface.
///
/// An `OverlayWindow` owns exactly one content component, is tracked (not
/// owned) by the registry it was created against, and holds a non-owning
/// back-reference to the parent controller it overlays. Show and dismiss
/// are fire-and-forget: they return immediately and animated edges complete
/// on a later [`tick_at`](Self::tick_at) from the UI loop.
///
/// Windows are single-use. After `Dismissed` the instance holds no content
/// and is only good for dropping; presenting again means creating a new
/// window.
pub struct OverlayWindow {
    id: OverlayId,
    manager: Rc<dyn OverlayRegistry>,
    parent: ParentHandle,
    content: Option<Box<dyn Component>>,
    frame: FormsheetFrame,
    config: OverlayConfig,
    state: PresentationState,
    animated: bool,
    transition: Option<Transition>,
    generation: u64,
    // Sheet rect from the most recent render, used for backdrop hit tests.
    sheet_rect: Option<Rect>,
}

impl OverlayWindow {
    /// Create a window in the `Created` state.
    ///
    /// Construction allocates an id but performs no registration and no
    /// animation; both happen in [`show`](Self::show).
    pub fn new(
        manager: Rc<dyn OverlayRegistry>,
        parent: ParentHandle,
        content: Box<dyn Component>,
        frame: FormsheetFrame,
    ) -> Self {
        Self::with_config(manager, parent, content, frame, OverlayConfig::default())
    }

    pub fn with_config(
        manager: Rc<dyn OverlayRegistry>,
        parent: ParentHandle,
        content: Box<dyn Component>,
        frame: FormsheetFrame,
        config: OverlayConfig,
    ) -> Self {
        let id = manager.allocate_id();
        Self {
            id,
            manager,
            parent,
            content: Some(content),
            frame,
            config,
            state: PresentationState::Created,
            animated: false,
            transition: None,
            generation: 0,
            sheet_rect: None,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Whether the most recent show/dismiss used animation.
    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Whether this window is currently the key (input-receiving) surface.
    pub fn is_key(&self) -> bool {
        self.manager.key_window() == Some(self.id)
    }

    /// Whether the content component is still held. True from `Created`
    /// through `Dismissing`; the content is released on entering
    /// `Dismissed`.
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Present the window above the parent surface.
    ///
    /// Registers with the manager (entering the stacking order topmost and
    /// becoming key) and transitions `Created → Appearing`. With
    /// `animated`, the entrance runs for the configured duration and
    /// `Appearing → Visible` completes on a later tick; without, the
    /// window is `Visible` when this returns.
    ///
    /// Calling `show` while already Appearing or Visible is a no-op.
    /// Calling it on a dismissing or dismissed window is a programming
    /// error: it fails fast in debug builds and is ignored in release.
    pub fn show(&mut self, animated: bool) {
        match self.state {
            PresentationState::Created => {}
            PresentationState::Appearing | PresentationState::Visible => {
                tracing::debug!(id = self.id.get(), "show ignored; already presented");
                return;
            }
            PresentationState::Dismissing | PresentationState::Dismissed => {
                debug_assert!(
                    false,
                    "overlay windows are single-use; create a new one instead of re-showing"
                );
                tracing::warn!(
                    id = self.id.get(),
                    state = ?self.state,
                    "show called on a retired window"
                );
                return;
            }
        }
        self.animated = animated;
        if animated {
            self.state = PresentationState::Appearing;
            self.manager.register(self.id, self.state);
            self.start_transition(TransitionKind::Entrance);
            tracing::debug!(id = self.id.get(), "overlay appearing");
        } else {
            self.state = PresentationState::Visible;
            self.manager.register(self.id, self.state);
            tracing::debug!(id = self.id.get(), "overlay visible");
        }
    }

    /// Remove the window from the screen.
    ///
    /// Transitions `Appearing|Visible → Dismissing`. A dismiss issued
    /// while the entrance is still in flight supersedes it — the window
    /// goes straight into the exit transition and never reaches Visible.
    /// Completion deregisters the window, releases the content, hands
    /// focus to the next key window (or back to the parent when none
    /// remain), and enters the terminal `Dismissed` state. With
    /// `animated == false` all of that happens before this returns.
    ///
    /// Dismissing a window that is Created, Dismissing, or Dismissed is a
    /// no-op.
    pub fn dismiss(&mut self, animated: bool) {
        match self.state {
            PresentationState::Appearing | PresentationState::Visible => {}
            PresentationState::Created => {
                tracing::debug!(id = self.id.get(), "dismiss before show ignored");
                return;
            }
            PresentationState::Dismissing | PresentationState::Dismissed => {
                tracing::debug!(id = self.id.get(), "dismiss ignored; already dismissing");
                return;
            }
        }
        self.animated = animated;
        self.state = PresentationState::Dismissing;
        self.manager.update_state(self.id, self.state);
        if animated {
            self.start_transition(TransitionKind::Exit);
            tracing::debug!(id = self.id.get(), "overlay dismissing");
        } else {
            // Invalidate any in-flight entrance before finishing.
            self.generation = self.generation.wrapping_add(1);
            self.transition = None;
            self.finish_dismiss();
        }
    }

    /// Advance an in-flight transition to `now`.
    ///
    /// The UI loop calls this on every idle tick. Completing an entrance
    /// yields `Visible`; completing an exit finishes the dismissal. Stale
    /// transitions whose token no longer matches the current generation
    /// are discarded without effect.
    pub fn tick_at(&mut self, now: Instant) {
        let Some(transition) = self.transition else {
            return;
        };
        if transition.token() != self.generation {
            self.transition = None;
            return;
        }
        if !transition.is_done(now) {
            return;
        }
        self.transition = None;
        match (transition.kind(), self.state) {
            (TransitionKind::Entrance, PresentationState::Appearing) => {
                self.state = PresentationState::Visible;
                self.manager.update_state(self.id, self.state);
                tracing::debug!(id = self.id.get(), "overlay visible");
            }
            (TransitionKind::Exit, PresentationState::Dismissing) => {
                self.finish_dismiss();
            }
            _ => {
                // Token matching makes a kind/state mismatch unreachable;
                // tolerate it anyway rather than corrupting the lifecycle.
                tracing::warn!(id = self.id.get(), state = ?self.state, "stale transition dropped");
            }
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Route an input event to this window.
    ///
    /// While the window is interactive every event is consumed — that is
    /// what makes the presentation modal: nothing leaks through to the
    /// parent controller or to overlays lower in the stack. `Esc` and
    /// presses outside the sheet dismiss the window when the config allows
    /// it; everything else is offered to the content component.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.state.is_interactive() {
            return false;
        }
        if self.config.dismiss_on_escape
            && let Event::Key(key) = event
            && key.code == KeyCode::Esc
            && key.kind == KeyEventKind::Press
        {
            self.dismiss(self.animated);
            return true;
        }
        if self.config.dismiss_on_backdrop
            && let Event::Mouse(mouse) = event
            && matches!(mouse.kind, MouseEventKind::Down(_))
            && self
                .sheet_rect
                .is_some_and(|rect| !rect_contains(rect, mouse.column, mouse.row))
        {
            self.dismiss(self.animated);
            return true;
        }
        let focused = self.is_key();
        let ctx = ComponentContext::new(focused).with_overlay(true);
        if let Some(content) = self.content.as_mut() {
            let _ = content.handle_event(event, &ctx);
        }
        true
    }

    /// Draw the window: backdrop dim over the parent screen, then the
    /// sheet at its resolved rect, offset by the in-flight transition.
    ///
    /// Rendering is a pure function of lifecycle state and transition
    /// progress; it never advances the state machine.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.render_at(frame, Instant::now());
    }

    pub fn render_at(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        if !self.state.is_active() {
            return;
        }
        let bounds = self.parent_screen().unwrap_or(frame.area());
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        if self.config.dim_backdrop {
            dim_area(frame, bounds);
        }
        let progress = self
            .transition
            .map(|transition| transition.progress(now))
            .unwrap_or(1.0);
        let rect = self.slid_rect(self.frame.resolve(bounds), bounds, progress);
        self.sheet_rect = Some(rect);
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        frame.render_widget(Clear, rect);
        let focused = self.is_key();
        let ctx = ComponentContext::new(focused).with_overlay(true);
        if let Some(content) = self.content.as_mut() {
            content.resize(rect, &ctx);
            content.render(frame, rect, &ctx);
        }
    }

    fn parent_screen(&self) -> Option<Rect> {
        self.parent
            .upgrade()
            .map(|parent| parent.borrow().screen())
    }

    fn slid_rect(&self, rect: Rect, bounds: Rect, progress: f32) -> Rect {
        let hidden = (1.0 - progress).clamp(0.0, 1.0);
        let offset = (hidden * self.config.slide_rows as f32).round() as u16;
        if offset == 0 {
            return rect;
        }
        let max_y = bounds.y.saturating_add(bounds.height);
        let y = rect.y.saturating_add(offset).min(max_y);
        let height = rect.height.min(max_y.saturating_sub(y));
        Rect {
            x: rect.x,
            y,
            width: rect.width,
            height,
        }
    }

    fn start_transition(&mut self, kind: TransitionKind) {
        let duration = match kind {
            TransitionKind::Entrance => self.config.entrance,
            TransitionKind::Exit => self.config.exit,
        };
        // A new transition supersedes whatever was in flight.
        self.generation = self.generation.wrapping_add(1);
        self.transition = Some(Transition::new(kind, duration, self.generation));
    }

    fn finish_dismiss(&mut self) {
        self.manager.deregister(self.id);
        if self.manager.key_window().is_none()
            && let Some(parent) = self.parent.upgrade()
        {
            parent.borrow_mut().focus_restored();
        }
        self.content = None;
        self.sheet_rect = None;
        self.state = PresentationState::Dismissed;
        tracing::debug!(id = self.id.get(), "overlay dismissed");
    }
}

fn dim_area(frame: &mut UiFrame<'_>, area: Rect) {
    let area = area.intersection(frame.area());
    let dim = Style::default().add_modifier(Modifier::DIM);
    let buffer = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_style(dim);
            }
        }
    }
}
