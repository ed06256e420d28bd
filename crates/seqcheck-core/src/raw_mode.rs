//! Scoped raw-mode control of the controlling terminal.
//!
//! Feedback capture only works when the terminal does not echo injected
//! bytes back unprocessed and does not hold them in a line buffer, so the
//! harness clears `ECHO` and `ICANON` for the duration of the run.
//!
//! # Invariants
//!
//! 1. The original line-discipline attributes are captured before any
//!    mutation.
//! 2. Restoration fires on every exit path: normal return and panic via
//!    `Drop`, SIGINT/SIGTERM via a signal-watcher thread. A crash never
//!    leaves the invoking shell un-echoing.
//! 3. Restoration is idempotent: the first restore wins, later ones are
//!    no-ops.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rustix::termios::{self, LocalModes, OptionalActions, Termios};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::debug;

/// Errors establishing or tearing down the terminal session.
#[derive(Debug)]
pub enum SessionError {
    /// The controlling input or output is not a terminal device. Fatal for
    /// the whole run: capture depends on a live device feeding output back
    /// into input, so there is no fallback mode.
    NotATerminal,
    /// Line-discipline manipulation failed.
    Io(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotATerminal => {
                write!(
                    f,
                    "controlling input/output is not a terminal device; \
                     run from an interactive terminal, not a pipe or redirection"
                )
            }
            Self::Io(err) => write!(f, "terminal line-discipline error: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotATerminal => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// First `begin` returns true; every later call returns false.
#[derive(Debug, Default)]
struct RestoreOnce(AtomicBool);

impl RestoreOnce {
    fn begin(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }
}

/// Original attributes plus the once-guard, shared with the signal watcher.
#[derive(Debug)]
struct SavedMode {
    original: Termios,
    once: RestoreOnce,
}

impl SavedMode {
    fn restore(&self) {
        if !self.once.begin() {
            return;
        }
        // Nothing useful can be done if the device is already gone.
        let _ = termios::tcsetattr(
            rustix::stdio::stdin(),
            OptionalActions::Now,
            &self.original,
        );
        debug!("restored original terminal attributes");
    }
}

/// Token for an acquired raw-no-echo terminal mode.
///
/// Dropping the guard restores the original attributes; [`restore`] does the
/// same earlier. Either way the restore happens exactly once.
///
/// [`restore`]: RawModeGuard::restore
#[derive(Debug)]
pub struct RawModeGuard {
    saved: Arc<SavedMode>,
}

impl RawModeGuard {
    /// Capture the current line discipline of the controlling input, then
    /// clear echo and canonical buffering, applying immediately (no
    /// pending-input flush).
    ///
    /// # Errors
    ///
    /// [`SessionError::NotATerminal`] when stdin or stdout is not a tty;
    /// [`SessionError::Io`] when reading or applying attributes fails.
    pub fn acquire() -> Result<Self, SessionError> {
        let stdin = rustix::stdio::stdin();
        if !termios::isatty(stdin) || !termios::isatty(rustix::stdio::stdout()) {
            return Err(SessionError::NotATerminal);
        }

        let original = termios::tcgetattr(stdin).map_err(io::Error::from)?;
        let mut raw = original.clone();
        raw.local_modes &= !(LocalModes::ECHO | LocalModes::ICANON);
        termios::tcsetattr(stdin, OptionalActions::Now, &raw).map_err(io::Error::from)?;
        debug!("entered raw no-echo mode");

        let saved = Arc::new(SavedMode {
            original,
            once: RestoreOnce::default(),
        });
        Self::watch_signals(Arc::clone(&saved))?;
        Ok(Self { saved })
    }

    /// Restore original attributes when the operator interrupts the run.
    /// The watcher only restores line discipline and exits; it never touches
    /// the device data path.
    fn watch_signals(saved: Arc<SavedMode>) -> Result<(), SessionError> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(SessionError::Io)?;
        thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                saved.restore();
                std::process::exit(128 + signal);
            }
        });
        Ok(())
    }

    /// Restore the original attributes now. Calling this more than once, or
    /// letting the guard drop afterwards, is a no-op.
    pub fn restore(&self) {
        self.saved.restore();
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.saved.restore();
    }
}
