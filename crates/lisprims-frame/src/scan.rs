//! Locating frames inside a raw transmission.
//!
//! Scanning never fails. It harvests every complete `STX .. ETX cc` span in
//! order and stops at the first point where a frame cannot be completed,
//! reporting how many bytes were consumed so a streaming caller can keep the
//! unconsumed tail for the next read.

use std::ops::Range;

use crate::markers::{control_name, CHECKSUM_LEN, CRLF, ENQ, EOT, ETX, STX};

/// Variant-dependent scanning behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Consume a CR LF pair directly following a frame's checksum.
    pub skip_line_terminator: bool,
    /// Skip a leading ENQ (and its CR LF) and stop at EOT.
    pub session_markers: bool,
}

/// Frames found in a buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Byte ranges of each complete frame, in stream order.
    pub frames: Vec<Range<usize>>,
    /// Bytes that can be discarded from the front of the buffer.
    pub consumed: usize,
    /// An EOT session-end marker was reached (and consumed).
    pub session_ended: bool,
}

impl ScanOutcome {
    /// Borrow each frame as a slice of the scanned buffer.
    pub fn slices<'a>(&'a self, raw: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.frames.iter().map(move |range| &raw[range.clone()])
    }
}

/// Scan `raw` for consecutive frames.
pub fn scan_frames(raw: &[u8], options: ScanOptions) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    let mut pos = 0usize;

    if options.session_markers && raw.first() == Some(&ENQ) {
        pos = 1;
        if raw[pos..].starts_with(CRLF) {
            pos += CRLF.len();
        }
        outcome.consumed = pos;
    }

    while pos < raw.len() {
        let next = raw[pos..]
            .iter()
            .position(|b| *b == STX || (options.session_markers && *b == EOT));
        let start = match next {
            Some(offset) => pos + offset,
            None => break,
        };

        if raw[start] == EOT {
            tracing::trace!(offset = start, marker = control_name(EOT), "session end");
            outcome.session_ended = true;
            outcome.consumed = start + 1;
            break;
        }

        let etx = match raw[start + 1..].iter().position(|b| *b == ETX) {
            Some(offset) => start + 1 + offset,
            None => break,
        };
        let end = etx + 1 + CHECKSUM_LEN;
        if end > raw.len() {
            break;
        }

        outcome.frames.push(start..end);
        pos = end;
        if options.skip_line_terminator && raw[pos..].starts_with(CRLF) {
            pos += CRLF.len();
        }
        outcome.consumed = pos;
    }

    outcome
}
