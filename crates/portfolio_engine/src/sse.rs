use encoding_rs::{CoderResult, Decoder, UTF_8};
use engine_logging::{engine_debug, engine_trace};

/// Prefix of a frame that carries a payload.
pub const DATA_PREFIX: &str = "data: ";
/// Blank line closing every frame.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Incremental server-sent-event decoder for one response body.
///
/// Bytes are decoded as one continuous UTF-8 text, so a character split
/// across two network chunks comes out whole. Complete frames are cut out of
/// the buffer before [`SseDecoder::decode`] returns; only an unterminated
/// tail is ever kept between calls.
pub struct SseDecoder {
    text: Decoder,
    buffer: String,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self {
            text: UTF_8.new_decoder_with_bom_removal(),
            buffer: String::new(),
        }
    }

    /// Feed one chunk and return the payloads of every frame it completed, in order.
    pub fn decode(&mut self, chunk: &[u8]) -> Vec<String> {
        self.push_text(chunk, false);
        self.take_frames()
    }

    /// Text received but not yet closed by a blank line.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// End of stream. An unterminated trailing frame is dropped; returns its length in bytes.
    pub fn finish(mut self) -> usize {
        self.push_text(&[], true);
        let discarded = self.buffer.len();
        if discarded > 0 {
            engine_debug!("discarding {} bytes of unterminated frame at end of stream", discarded);
        }
        discarded
    }

    fn push_text(&mut self, mut src: &[u8], last: bool) {
        loop {
            let needed = self
                .text
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len().saturating_mul(3));
            self.buffer.reserve(needed);
            // Malformed sequences become U+FFFD, as a browser TextDecoder does.
            let (result, read, _replaced) = self.text.decode_to_string(src, &mut self.buffer, last);
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
    }

    fn take_frames(&mut self) -> Vec<String> {
        let mut payloads = Vec::new();
        while let Some(idx) = self.buffer.find(FRAME_DELIMITER) {
            let rest = self.buffer.split_off(idx + FRAME_DELIMITER.len());
            let mut frame = std::mem::replace(&mut self.buffer, rest);
            frame.truncate(idx);
            match frame.strip_prefix(DATA_PREFIX) {
                Some(payload) => payloads.push(payload.to_string()),
                None => engine_trace!("dropping non-data frame of {} bytes", frame.len()),
            }
        }
        payloads
    }
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::new()
    }
}
