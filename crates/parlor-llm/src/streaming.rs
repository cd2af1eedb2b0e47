use anyhow::Result;
use futures::{Stream, StreamExt};
use reqwest::Response;

use crate::backend::TextStream;

/// Incremental UTF-8 decoder.
///
/// The transport chunks the response body at arbitrary byte offsets, so a
/// multi-byte character can straddle two reads. The decoder keeps the
/// incomplete trailing sequence as pending state between calls and emits it
/// with the next chunk; invalid sequences are replaced with U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next byte chunk, returning all complete characters seen so
    /// far. May return an empty string when the chunk ends mid-character.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    out.push_str(std::str::from_utf8(&self.pending[..valid_up_to]).unwrap());

                    match e.error_len() {
                        // Incomplete trailing sequence: keep it for the next
                        // chunk.
                        None => {
                            self.pending.drain(..valid_up_to);
                            return out;
                        }
                        // Invalid sequence: replace and keep scanning.
                        Some(len) => {
                            out.push('\u{FFFD}');
                            self.pending.drain(..valid_up_to + len);
                        }
                    }
                }
            }
        }
    }

    /// Flush at end of stream. A dangling incomplete sequence becomes a
    /// single replacement character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            '\u{FFFD}'.to_string()
        }
    }
}

/// Turn a byte-chunk stream into a text-chunk stream, decoding incrementally
/// and preserving arrival order. Chunks that decode to no complete character
/// are not emitted.
pub fn decode_byte_stream<S>(bytes: S) -> TextStream
where
    S: Stream<Item = Result<Vec<u8>>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(bytes);
        let mut decoder = Utf8ChunkDecoder::new();

        while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(chunk) => {
                    let text = decoder.decode(&chunk);
                    if !text.is_empty() {
                        yield Ok(text);
                    }
                }
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {}", e));
                    return;
                }
            }
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            yield Ok(tail);
        }
    })
}

/// Decode a chunked HTTP response body into text chunks.
pub fn text_chunk_stream(response: Response) -> TextStream {
    let bytes = response
        .bytes_stream()
        .map(|result| result.map(|b| b.to_vec()).map_err(anyhow::Error::from));

    decode_byte_stream(bytes)
}
