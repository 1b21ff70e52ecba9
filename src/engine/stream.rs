//! Lazy, single-pass line streams

use std::fmt;
use std::iter::Fuse;

/// Forward-only sequence of output lines.
///
/// Each line is produced when the caller asks for it, so a long pull or a
/// followed log prints as it arrives. Once exhausted the stream stays
/// empty; it cannot be cloned or restarted.
pub struct LineStream {
    inner: Fuse<Box<dyn Iterator<Item = String>>>,
}

impl LineStream {
    pub fn new<I>(lines: I) -> Self
    where
        I: Iterator<Item = String> + 'static,
    {
        let boxed: Box<dyn Iterator<Item = String>> = Box::new(lines);
        Self {
            inner: boxed.fuse(),
        }
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self::new(lines.into_iter())
    }
}

impl Iterator for LineStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next()
    }
}

impl fmt::Debug for LineStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LineStream")
    }
}

/// Accumulates bytes and hands back complete lines
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut lines = Vec::new();
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            lines.push(decode_line(&line[..end]));
        }
        lines
    }

    /// Whatever is left after the last newline
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    Unknown,
    Multiplexed,
    Raw,
}

/// Strips the 8-byte stdout/stderr frame headers the engine puts on
/// non-TTY attach, log and exec streams. Streams that don't start with a
/// frame header pass through untouched.
#[derive(Debug)]
pub struct Demuxer {
    buffer: Vec<u8>,
    framing: Framing,
}

const HEADER_LEN: usize = 8;

impl Default for Demuxer {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            framing: Framing::Unknown,
        }
    }
}

impl Demuxer {
    /// Feed raw bytes, get back the payload decoded so far
    pub fn push(&mut self, bytes: &[u8]) -> Vec<u8> {
        if self.framing == Framing::Raw {
            return bytes.to_vec();
        }
        self.buffer.extend_from_slice(bytes);

        if self.framing == Framing::Unknown {
            if self.buffer.len() < HEADER_LEN && could_be_header(&self.buffer) {
                return Vec::new();
            }
            if looks_like_header(&self.buffer) {
                self.framing = Framing::Multiplexed;
            } else {
                self.framing = Framing::Raw;
                return std::mem::take(&mut self.buffer);
            }
        }

        let mut payload = Vec::new();
        while self.buffer.len() >= HEADER_LEN {
            let size = u32::from_be_bytes([
                self.buffer[4],
                self.buffer[5],
                self.buffer[6],
                self.buffer[7],
            ]) as usize;
            if self.buffer.len() < HEADER_LEN + size {
                break;
            }
            payload.extend_from_slice(&self.buffer[HEADER_LEN..HEADER_LEN + size]);
            self.buffer.drain(..HEADER_LEN + size);
        }
        payload
    }

    /// Bytes left over when the stream ends
    pub fn finish(&mut self) -> Vec<u8> {
        match self.framing {
            // a truncated frame is dropped
            Framing::Multiplexed => {
                self.buffer.clear();
                Vec::new()
            }
            _ => std::mem::take(&mut self.buffer),
        }
    }
}

fn could_be_header(bytes: &[u8]) -> bool {
    bytes.iter().enumerate().all(|(i, b)| match i {
        0 => *b <= 2,
        1..=3 => *b == 0,
        _ => true,
    })
}

fn looks_like_header(bytes: &[u8]) -> bool {
    bytes.len() >= HEADER_LEN && could_be_header(&bytes[..4])
}
