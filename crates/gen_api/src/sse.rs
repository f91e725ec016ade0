use crate::frames::Frame;

/// Incremental parser for newline-delimited `data: <json>` streams.
///
/// The transport delivers text in arbitrary-sized chunks, so a payload line
/// is not guaranteed to terminate within one chunk. The parser buffers raw
/// bytes and drains them only at `\n` boundaries; the unterminated tail of
/// the latest chunk is carried over and prepended to the next one. Because
/// `\n` is a single byte, a multi-byte UTF-8 sequence split across chunks
/// stays buffered intact until its line completes.
#[derive(Debug, Default)]
pub struct FrameStreamParser {
    buffer: Vec<u8>,
}

impl FrameStreamParser {
    /// Feed arbitrary bytes into the parser and drain complete frames.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Frame> {
        self.buffer.extend_from_slice(bytes);
        let mut frames = Vec::new();

        while let Some(newline) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(frame) = parse_line(&line[..line.len() - 1]) {
                frames.push(frame);
            }
        }

        frames
    }

    /// Drain a trailing unterminated line at end-of-stream.
    pub fn finish(&mut self) -> Vec<Frame> {
        let tail = std::mem::take(&mut self.buffer);
        parse_line(&tail).into_iter().collect()
    }

    /// Parse a complete stream in one shot, including a trailing line.
    pub fn parse_frames(input: &str) -> Vec<Frame> {
        let mut parser = Self::default();
        let mut frames = parser.feed(input.as_bytes());
        frames.extend(parser.finish());
        frames
    }

    #[must_use]
    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.is_empty()
    }
}

fn parse_line(line: &[u8]) -> Option<Frame> {
    let text = String::from_utf8_lossy(line);
    let payload = text.trim_end_matches('\r').strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }

    match Frame::from_payload(payload) {
        Some(frame) => Some(frame),
        None => {
            // Noise, not a protocol failure.
            tracing::debug!(payload = %payload, "dropping malformed frame payload");
            None
        }
    }
}
