#![forbid(unsafe_code)]

//! Core: terminal device lifecycle and wire protocol for the conformance
//! harness.
//!
//! # Role in seqcheck
//! `seqcheck-core` is the device layer. It owns raw-mode setup/teardown on
//! the controlling terminal, the byte-stream session handle the harness
//! drives, and the escape-sequence vocabulary spoken to the emulator under
//! test.
//!
//! # Primary responsibilities
//! - **RawModeGuard**: scoped no-echo/no-canonical line discipline with
//!   restoration on drop, panic, and SIGINT/SIGTERM.
//! - **TerminalSession**: the capability trait for sending bytes to and
//!   collecting feedback from a terminal; real tty and scripted fake.
//! - **wire**: reset, title, and feedback-request sequences.
//!
//! # How it fits in the system
//! The harness (`seqcheck-harness`) injects fixtures and collects feedback
//! exclusively through a `TerminalSession`, so its engine never touches a
//! process-global device and can run against a scripted session in tests.

#[cfg(unix)]
pub mod raw_mode;
pub mod session;
pub mod wire;

#[cfg(unix)]
pub use raw_mode::{RawModeGuard, SessionError};
#[cfg(unix)]
pub use session::TtySession;
pub use session::{ScriptedSession, TerminalSession};
