pub mod console;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

pub use console::ConsoleDriver;

/// Source of input events for the UI loop.
///
/// Abstracting the event source keeps the runner testable: tests feed
/// scripted events through a fake driver while the demo uses the
/// crossterm-backed [`ConsoleDriver`].
pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}
