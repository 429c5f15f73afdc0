//! Streaming line scanner.
//!
//! IMAP responses are CRLF-terminated lines, but a CRLF inside a line is not
//! necessarily the end of it: a line ending in `{N}` announces a literal of
//! `N` raw bytes that belong to the same logical line, and the CRLF search
//! must resume after them. The scanner owns a growing buffer fed by the
//! transport and hands out one fully-framed line at a time.
//!
//! The caller drives the loop: `feed` → `get` → parse → `consume(line_len)`.
//! Incomplete-line and incomplete-literal errors just mean "feed more".

use bytes::{Buf, BytesMut};

use crate::error::{ScanError, ScanResult};

/// Frames CRLF-terminated, literal-aware response lines out of a byte
/// stream.
///
/// The view returned by [`get`](Self::get) borrows the internal buffer, so
/// it must be dropped (or copied) before the next `feed`/`consume`; the
/// borrow checker enforces this.
#[derive(Debug, Default)]
pub struct Scanner {
    buf: BytesMut,
    /// Offset where the next CRLF search resumes. Bytes before it have
    /// already been examined.
    start_find: usize,
    /// Literal bytes still to skip before the CRLF search may resume.
    /// Nonzero only mid-scan of a line whose literal has not fully arrived.
    literal_left: usize,
}

impl Scanner {
    /// Creates an empty scanner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes currently buffered.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Appends bytes to the buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends a clamped prefix of `bytes`: `n` beyond the length means all
    /// of it, and a negative `n` means all but the last `|n|` bytes (clamped
    /// to zero).
    pub fn feed_limited(&mut self, bytes: &[u8], n: isize) {
        let take = if n < 0 {
            bytes.len().saturating_sub(n.unsigned_abs())
        } else {
            bytes.len().min(n.unsigned_abs())
        };
        self.buf.extend_from_slice(&bytes[..take]);
    }

    /// Returns the earliest complete line, including its terminating CRLF
    /// and any interior literals.
    ///
    /// Without an intervening `feed` or `consume`, repeated calls return the
    /// same line; `start_find` parks at the line's final CRLF so the re-scan
    /// is cheap.
    ///
    /// # Errors
    ///
    /// [`ScanError::IncompleteLine`] / [`ScanError::IncompleteLiteral`] when
    /// more bytes are needed (benign; `start_find` advances to the furthest
    /// safe resume point so already-examined bytes are not re-scanned), and
    /// [`ScanError::LiteralOverflow`] when a literal length does not fit the
    /// host size (fatal).
    pub fn get(&mut self) -> ScanResult<&[u8]> {
        loop {
            if self.literal_left > 0 {
                let available = self.buf.len() - self.start_find;
                if available < self.literal_left {
                    self.start_find += available;
                    self.literal_left -= available;
                    return Err(ScanError::IncompleteLiteral {
                        missing: self.literal_left,
                    });
                }
                self.start_find += self.literal_left;
                self.literal_left = 0;
            }

            let Some(found) = find_crlf(&self.buf[self.start_find..]) else {
                // The last unexamined byte may be the CR of a split CRLF;
                // keep it in the search window. Never step back past
                // `start_find` itself, which would re-read literal content.
                if self.start_find < self.buf.len() {
                    self.start_find = self.buf.len() - 1;
                }
                return Err(ScanError::IncompleteLine);
            };
            let crlf = self.start_find + found;

            if let Some(length) = literal_length(&self.buf[..crlf])? {
                tracing::trace!(length, "literal announced, skipping");
                self.literal_left = length;
                self.start_find = crlf + 2;
                continue;
            }

            self.start_find = crlf;
            tracing::trace!(line_len = crlf + 2, "framed response line");
            return Ok(&self.buf[..crlf + 2]);
        }
    }

    /// Drops the leading `n` bytes and compacts the buffer. Resets the
    /// scan state, so the next [`get`](Self::get) starts fresh at byte `n`
    /// of the original stream.
    ///
    /// # Errors
    ///
    /// [`ScanError::ConsumeOverflow`] if `n` exceeds the buffered length.
    pub fn consume(&mut self, n: usize) -> ScanResult<()> {
        if n > self.buf.len() {
            return Err(ScanError::ConsumeOverflow {
                requested: n,
                buffered: self.buf.len(),
            });
        }
        self.buf.advance(n);
        self.start_find = 0;
        self.literal_left = 0;
        Ok(())
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// If `line` (the bytes before a CRLF) ends in a `{N}` literal announcement,
/// returns `N`. A bare `{}`, digits with no brace, or a brace-less `}` are
/// not literals.
fn literal_length(line: &[u8]) -> ScanResult<Option<usize>> {
    let Some((&b'}', head)) = line.split_last() else {
        return Ok(None);
    };
    let digits_start = head
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |i| i + 1);
    if digits_start == 0 || head[digits_start - 1] != b'{' || digits_start == head.len() {
        return Ok(None);
    }

    let mut length: usize = 0;
    for &digit in &head[digits_start..] {
        length = length
            .checked_mul(10)
            .and_then(|n| n.checked_add(usize::from(digit - b'0')))
            .ok_or(ScanError::LiteralOverflow)?;
    }
    Ok(Some(length))
}
