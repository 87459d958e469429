use std::io;

use tracing::Level;

/// Initialize the tracing subscriber.
///
/// The alternate screen owns stdout while the UI runs, so log output goes
/// to stderr where it can be redirected (`2>overlay.log`) without tearing
/// the frame. Safe to call multiple times; subsequent calls are no-ops for
/// the global subscriber.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
