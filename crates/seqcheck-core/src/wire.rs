//! Escape sequences exchanged with the emulator under test.
//!
//! One shared definition so the harness and any cooperating emulator agree
//! on the injection framing: every case is `RESET`, then a title carrying
//! the case name, then the fixture bytes verbatim, then `FEEDBACK_REQUEST`.

/// Clear the screen and home the cursor before each case, so output from a
/// previous case cannot leak into the next capture.
pub const RESET: &[u8] = b"\x1b[2J\x1b[H";

/// Completion marker: asks the terminal to reflect what it rendered back on
/// the input channel. The reply framing is owned by the terminal under test.
pub const FEEDBACK_REQUEST: &[u8] = b"\x1b]777;reflect\x1b\\";

/// OSC 0 title-set sequence carrying the case name. Diagnostic aid only;
/// nothing machine-checks the title.
#[must_use]
pub fn title(name: &str) -> Vec<u8> {
    let mut seq = Vec::with_capacity(name.len() + 5);
    seq.extend_from_slice(b"\x1b]0;");
    seq.extend_from_slice(name.as_bytes());
    seq.push(0x07);
    seq
}
