use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use ratatui::prelude::Rect;

use overlay_wm::components::{Component, ComponentContext};
use overlay_wm::ui::UiFrame;
use overlay_wm::window::{
    FormsheetFrame, OverlayConfig, OverlayManager, OverlayWindow, ParentHandle, ParentSurface,
    PresentationState,
};

struct Host {
    area: Rect,
}

impl ParentSurface for Host {
    fn screen(&self) -> Rect {
        self.area
    }
}

struct StubContent;

impl Component for StubContent {
    fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}
}

fn parent() -> (Rc<RefCell<Host>>, ParentHandle) {
    let host = Rc::new(RefCell::new(Host {
        area: Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        },
    }));
    let surface: Rc<RefCell<dyn ParentSurface>> = host.clone();
    let handle = Rc::downgrade(&surface);
    (host, handle)
}

// A long entrance against a short exit makes the interruption ordering
// observable: an instant past the exit deadline is still well before the
// entrance deadline.
fn config() -> OverlayConfig {
    OverlayConfig {
        entrance: Duration::from_secs(3600),
        exit: Duration::from_secs(60),
        ..OverlayConfig::default()
    }
}

fn window(manager: &OverlayManager, handle: ParentHandle) -> OverlayWindow {
    OverlayWindow::with_config(
        manager.registry(),
        handle,
        Box::new(StubContent),
        FormsheetFrame::Full,
        config(),
    )
}

#[test]
fn dismiss_during_entrance_skips_visible() {
    let manager = OverlayManager::new();
    let (_host, handle) = parent();
    let mut w = window(&manager, handle);

    w.show(true);
    assert_eq!(w.state(), PresentationState::Appearing);

    // Interrupt the entrance mid-flight.
    w.dismiss(true);
    assert_eq!(w.state(), PresentationState::Dismissing);

    // Past the exit deadline but far before the entrance deadline: only
    // the exit may complete.
    w.tick_at(Instant::now() + Duration::from_secs(61));
    assert_eq!(w.state(), PresentationState::Dismissed);
    assert!(manager.is_empty());
}

#[test]
fn superseded_entrance_never_completes() {
    let manager = OverlayManager::new();
    let (_host, handle) = parent();
    let mut w = window(&manager, handle);

    w.show(true);
    w.dismiss(true);

    // Even an instant past the original entrance deadline must not
    // resurrect the window: the entrance was cancelled, the exit already
    // completed.
    w.tick_at(Instant::now() + Duration::from_secs(3601));
    assert_eq!(w.state(), PresentationState::Dismissed);
    w.tick_at(Instant::now() + Duration::from_secs(7200));
    assert_eq!(w.state(), PresentationState::Dismissed);
}

#[test]
fn unanimated_dismiss_interrupts_entrance_synchronously() {
    let manager = OverlayManager::new();
    let (_host, handle) = parent();
    let mut w = window(&manager, handle);

    w.show(true);
    assert_eq!(w.state(), PresentationState::Appearing);
    w.dismiss(false);
    assert_eq!(w.state(), PresentationState::Dismissed);
    assert!(manager.is_empty());

    // A tick at the old entrance deadline is inert.
    w.tick_at(Instant::now() + Duration::from_secs(3601));
    assert_eq!(w.state(), PresentationState::Dismissed);
}

#[test]
fn interrupted_window_was_key_until_dismissing() {
    let manager = OverlayManager::new();
    let (_host, handle) = parent();
    let mut w = window(&manager, handle);

    w.show(true);
    assert!(w.is_key(), "appearing window is key");
    w.dismiss(true);
    assert!(!w.is_key(), "dismissing window gives up key status");
}
