//! Terminal session handles.
//!
//! `TerminalSession` is the one seam between the conformance engine and the
//! device: everything the harness writes (injection frames, the report) and
//! everything it reads (feedback, pagination keypresses) goes through this
//! trait. The real implementation talks to the controlling terminal; the
//! scripted implementation is an in-memory bidirectional fake for
//! deterministic tests.

use std::collections::VecDeque;
use std::io;

/// Bidirectional byte-stream capability over one terminal device.
///
/// The device is exclusively owned for the run; implementations are not
/// expected to be shareable or thread-safe.
pub trait TerminalSession {
    /// Write bytes to the terminal and flush them out.
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// One blocking read of the terminal's feedback channel.
    ///
    /// Message boundaries are owned by the terminal's reply protocol, not by
    /// the harness; the call returns whatever the device yields in a single
    /// read. `Ok` with an empty buffer means the device produced nothing,
    /// which callers must treat as a distinguishable outcome rather than an
    /// error.
    fn read_feedback(&mut self) -> io::Result<Vec<u8>>;

    /// Block until the operator presses a key (pagination acknowledgment).
    fn wait_ack(&mut self) -> io::Result<()>;
}

/// Largest feedback chunk accepted in one read. Recorded transcripts for an
/// 80x25 screen fit comfortably; the terminal's reply protocol governs the
/// actual size.
#[cfg(unix)]
const FEEDBACK_BUF: usize = 64 * 1024;

/// Session over the process's controlling terminal (stdin/stdout).
///
/// Reads and writes go straight to the device file descriptors so the
/// single-blocking-read contract of [`TerminalSession::read_feedback`] is
/// not blurred by userspace buffering.
#[cfg(unix)]
#[derive(Debug, Default)]
pub struct TtySession;

#[cfg(unix)]
impl TtySession {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl TerminalSession for TtySession {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        let fd = rustix::stdio::stdout();
        let mut rest = bytes;
        while !rest.is_empty() {
            let n = rustix::io::write(fd, rest).map_err(io::Error::from)?;
            if n == 0 {
                return Err(io::ErrorKind::WriteZero.into());
            }
            rest = &rest[n..];
        }
        Ok(())
    }

    fn read_feedback(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; FEEDBACK_BUF];
        let n = rustix::io::read(rustix::stdio::stdin(), &mut buf[..]).map_err(io::Error::from)?;
        buf.truncate(n);
        Ok(buf)
    }

    fn wait_ack(&mut self) -> io::Result<()> {
        let mut byte = [0u8; 1];
        rustix::io::read(rustix::stdio::stdin(), &mut byte[..]).map_err(io::Error::from)?;
        Ok(())
    }
}

/// In-memory fake session: queued feedback chunks on the read side,
/// captured frames on the write side.
#[derive(Debug, Default)]
pub struct ScriptedSession {
    feedback: VecDeque<io::Result<Vec<u8>>>,
    sent: Vec<Vec<u8>>,
    acks: usize,
}

impl ScriptedSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one feedback chunk; chunks are yielded in push order, one per
    /// `read_feedback` call. Push an empty chunk to script a silent device.
    pub fn push_feedback(&mut self, bytes: impl Into<Vec<u8>>) {
        self.feedback.push_back(Ok(bytes.into()));
    }

    /// Queue an I/O error for the next `read_feedback` call.
    pub fn push_feedback_error(&mut self, err: io::Error) {
        self.feedback.push_back(Err(err));
    }

    /// Every frame passed to `send`, in order.
    #[must_use]
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// All sent bytes concatenated, for substring assertions.
    #[must_use]
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.sent.concat()
    }

    /// Number of pagination acknowledgments consumed.
    #[must_use]
    pub fn acks(&self) -> usize {
        self.acks
    }
}

impl TerminalSession for ScriptedSession {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    fn read_feedback(&mut self) -> io::Result<Vec<u8>> {
        // An exhausted script behaves like a silent device.
        self.feedback.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn wait_ack(&mut self) -> io::Result<()> {
        self.acks += 1;
        Ok(())
    }
}
