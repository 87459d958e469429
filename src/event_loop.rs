use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The centralized event loop that drives the single UI thread.
///
/// Everything in this crate is single-threaded and UI-affine: input
/// dispatch, lifecycle transitions, and animation completion all run here.
/// The loop polls the input driver with a fixed interval; when the poll
/// times out the handler is invoked with `None`, and those idle ticks are
/// what advance in-flight overlay transitions and redraw the screen.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    /// Run the loop, taking control of the current thread.
    ///
    /// The handler is called with `Some(event)` for each input event and
    /// with `None` once per poll interval when no input arrived. After an
    /// event arrives the queue is drained with zero-timeout polls so a
    /// burst (mouse drags, key repeat) cannot outpace the render cadence.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Scripted {
        events: Vec<Event>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(self.events.remove(0))
        }
    }

    #[test]
    fn idle_tick_precedes_events_and_quit_stops() {
        let driver = Scripted {
            events: vec![
                Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
                Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            ],
        };
        let mut seen = Vec::new();
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(1));
        event_loop
            .run(|_driver, event| {
                match event {
                    None => seen.push('.'),
                    Some(Event::Key(key)) => {
                        if let KeyCode::Char(c) = key.code {
                            seen.push(c);
                            if c == 'q' {
                                return Ok(ControlFlow::Quit);
                            }
                        }
                    }
                    Some(_) => {}
                }
                Ok(ControlFlow::Continue)
            })
            .unwrap();
        // One idle tick fires before the queued events are drained.
        assert_eq!(seen, vec!['.', 'a', 'q']);
    }
}
