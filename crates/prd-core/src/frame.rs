//! Incremental parser for the `data: <payload>` line protocol.
//!
//! The parser is stateless: callers thread `remainder` (the trailing
//! partial line) from one call into the next. A line is only emitted once
//! its terminating `\n` has been seen; on end of stream the remainder is
//! flushed once through the same rule.

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Result of one extraction step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Decoded content fragments, in order
    pub fragments: Vec<String>,
    /// Trailing partial line to prepend to the next chunk
    pub remainder: String,
    /// The end-of-stream sentinel was seen; later input can be ignored
    pub done: bool,
}

/// What a single complete line means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Content(String),
    Done,
    Skip,
}

/// Extract complete frames from `remainder + incoming`.
pub fn extract_frames(remainder: &str, incoming: &str) -> Extracted {
    let mut buffer = String::with_capacity(remainder.len() + incoming.len());
    buffer.push_str(remainder);
    buffer.push_str(incoming);

    let mut out = Extracted::default();
    let mut lines: Vec<&str> = buffer.split('\n').collect();
    // split always yields at least one item; the last one is unterminated
    let tail = lines.pop().unwrap_or_default();

    for line in lines {
        match parse_line(line) {
            Frame::Content(text) => out.fragments.push(text),
            Frame::Done => {
                out.done = true;
                return out;
            }
            Frame::Skip => {}
        }
    }

    out.remainder = tail.to_string();
    out
}

/// Flush a final unterminated line at end of stream.
pub fn flush_remainder(remainder: &str) -> Option<String> {
    match parse_line(remainder) {
        Frame::Content(text) => Some(text),
        Frame::Done | Frame::Skip => None,
    }
}

/// Classify one complete line (without its `\n`).
pub fn parse_line(line: &str) -> Frame {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Frame::Skip;
    };
    if payload.is_empty() {
        return Frame::Skip;
    }
    if payload == DONE_SENTINEL {
        return Frame::Done;
    }
    Frame::Content(unescape_payload(payload))
}

/// Turn the two-character `\n` escape back into a newline.
pub fn unescape_payload(payload: &str) -> String {
    payload.replace("\\n", "\n")
}

/// Incremental UTF-8 decoder.
///
/// Holds back an incomplete multi-byte sequence at the end of a chunk until
/// the next chunk completes it. Invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut out = String::new();

        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    // valid_up_to always lands on a char boundary
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                        None => {
                            self.pending.drain(..valid);
                            return out;
                        }
                    }
                }
            }
        }
    }

    /// Decode whatever is still held back at end of stream.
    pub fn finish(&mut self) -> String {
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        rest
    }
}
