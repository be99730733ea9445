//! Streaming UTF-8 decoding.
//!
//! Network chunk boundaries fall anywhere, including in the middle of a
//! multi-byte character, so chunks cannot be decoded independently. The
//! decoder carries the incomplete trailing sequence (at most 3 bytes)
//! over to the next chunk and replaces genuinely invalid bytes with
//! U+FFFD, matching the behavior of an incremental text decoder.

/// Incremental UTF-8 decoder that carries partial sequences across chunks.
#[derive(Debug, Default)]
pub struct StreamingUtf8Decoder {
    pending: Vec<u8>,
}

impl StreamingUtf8Decoder {
    /// Create a decoder with no carried bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, returning the text it completes.
    ///
    /// An incomplete trailing sequence is held back and prepended to the
    /// next chunk; invalid bytes become U+FFFD.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let joined;
        let mut rest: &[u8] = if self.pending.is_empty() {
            chunk
        } else {
            let mut bytes = std::mem::take(&mut self.pending);
            bytes.extend_from_slice(chunk);
            joined = bytes;
            &joined
        };

        let mut out = String::new();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(
                        std::str::from_utf8(valid).expect("valid_up_to yields well-formed UTF-8"),
                    );

                    match err.error_len() {
                        // Incomplete sequence at the end of the chunk:
                        // carry it to the next decode call.
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                        // Invalid bytes: replace and keep going.
                        Some(len) => {
                            out.push('\u{FFFD}');
                            rest = &after[len..];
                        }
                    }
                }
            }
        }
        out
    }

    /// Finish decoding at end of stream.
    ///
    /// A sequence left incomplete when the stream ends can never be
    /// completed, so it decodes to a single U+FFFD.
    pub fn finish(self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            "\u{FFFD}".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        let mut decoder = StreamingUtf8Decoder::new();
        assert_eq!(decoder.decode(b"hello"), "hello");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_two_byte_char_split_across_chunks() {
        // "é" = 0xC3 0xA9
        let mut decoder = StreamingUtf8Decoder::new();
        assert_eq!(decoder.decode(&[0x68, 0xC3]), "h");
        assert_eq!(decoder.decode(&[0xA9, 0x21]), "\u{e9}!");
    }

    #[test]
    fn test_four_byte_char_split_three_ways() {
        // U+1F34E (red apple) = F0 9F 8D 8E
        let bytes = "\u{1F34E}".as_bytes();
        let mut decoder = StreamingUtf8Decoder::new();
        let mut out = String::new();
        out.push_str(&decoder.decode(&bytes[..1]));
        out.push_str(&decoder.decode(&bytes[1..3]));
        out.push_str(&decoder.decode(&bytes[3..]));
        assert_eq!(out, "\u{1F34E}");
    }

    #[test]
    fn test_every_split_point_of_mixed_text() {
        let text = "vitam\u{ed}n D \u{1F34E} dos\u{e1}hne";
        let bytes = text.as_bytes();
        for split in 0..=bytes.len() {
            let mut decoder = StreamingUtf8Decoder::new();
            let mut out = decoder.decode(&bytes[..split]);
            out.push_str(&decoder.decode(&bytes[split..]));
            out.push_str(&decoder.finish());
            assert_eq!(out, text, "split at byte {split}");
        }
    }

    #[test]
    fn test_invalid_byte_becomes_replacement_char() {
        let mut decoder = StreamingUtf8Decoder::new();
        assert_eq!(decoder.decode(&[0x61, 0xFF, 0x62]), "a\u{FFFD}b");
    }

    #[test]
    fn test_truncated_sequence_at_eof() {
        let mut decoder = StreamingUtf8Decoder::new();
        assert_eq!(decoder.decode(&[0xE2, 0x82]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }
}
