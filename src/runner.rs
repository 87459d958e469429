use std::io;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::Terminal;
use ratatui::backend::Backend;
use thiserror::Error;

use crate::event_loop::{ControlFlow, EventLoop};
use crate::ui::UiFrame;
use crate::window::OverlayStack;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// A host application that presents overlays.
///
/// The runner owns the routing policy: quit checks first, then the overlay
/// stack (which intercepts all input while any overlay is key), and only
/// events no overlay consumed reach the host itself.
pub trait OverlayApp {
    fn overlays(&mut self) -> &mut OverlayStack;

    /// Draw the host surface. Called before the overlay composite, so the
    /// overlays always end up on top.
    fn render_host(&mut self, frame: &mut UiFrame<'_>);

    /// Handle an event that no overlay intercepted. Returns true when
    /// consumed.
    fn handle_host_event(&mut self, event: &Event) -> bool;

    /// Whether the app should exit. Invoked with `None` on idle ticks.
    fn should_quit(&mut self, event: Option<&Event>) -> bool;
}

/// Drive an [`OverlayApp`] until it asks to quit.
///
/// Each idle tick advances in-flight overlay transitions before redrawing,
/// which is what completes Appearing → Visible and Dismissing → Dismissed
/// for animated presentations.
pub fn run_app<B, D, A>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    app: &mut A,
    poll_interval: Duration,
) -> Result<(), RunnerError>
where
    B: Backend,
    D: crate::drivers::InputDriver,
    A: OverlayApp,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.run(|_driver, event| {
        match event {
            Some(evt) => {
                if app.should_quit(Some(&evt)) {
                    return Ok(ControlFlow::Quit);
                }
                if app.overlays().handle_event(&evt) {
                    return Ok(ControlFlow::Continue);
                }
                let _ = app.handle_host_event(&evt);
            }
            None => {
                if app.should_quit(None) {
                    return Ok(ControlFlow::Quit);
                }
                app.overlays().tick();
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        app.render_host(&mut ui);
                        app.overlays().render(&mut ui);
                    })
                    .map_err(|e| io::Error::other(e.to_string()))?;
            }
        }
        Ok(ControlFlow::Continue)
    })?;

    Ok(())
}
