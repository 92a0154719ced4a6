//! Line-based codec for tokio.
//!
//! Splits the byte stream on `\n`, dropping a trailing `\r`. A line that is
//! not valid UTF-8 is decoded lossily. A line longer than the limit is
//! skipped up to its newline. Neither ends the stream.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

use crate::error::{ProtocolError, Result};

/// Longest line accepted from the server, excluding the terminator.
pub const MAX_IRC_LINE_LEN: usize = 8191;

/// Newline-framed codec for server lines.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    max_len: usize,
    /// Set while skipping the rest of an over-long line.
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::with_max_len(MAX_IRC_LINE_LEN)
    }
}

impl LineCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

fn decode_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    match std::str::from_utf8(line) {
        Ok(text) => text.to_string(),
        Err(e) => {
            debug!("line is not valid UTF-8 past byte {}, decoding lossily", e.valid_up_to());
            String::from_utf8_lossy(line).into_owned()
        }
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        loop {
            let read_to = src.len().min(self.max_len.saturating_add(1));
            let newline = src[self.next_index..read_to]
                .iter()
                .position(|b| *b == b'\n');

            match (self.discarding, newline) {
                (true, Some(offset)) => {
                    src.advance(self.next_index + offset + 1);
                    self.next_index = 0;
                    self.discarding = false;
                }
                (true, None) => {
                    src.advance(read_to);
                    self.next_index = 0;
                    if src.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let line = src.split_to(self.next_index + offset + 1);
                    self.next_index = 0;
                    return Ok(Some(decode_line(&line[..line.len() - 1])));
                }
                (false, None) if src.len() > self.max_len => {
                    warn!("skipping line longer than {} bytes", self.max_len);
                    self.discarding = true;
                }
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if src.is_empty() || self.discarding {
            src.clear();
            return Ok(None);
        }
        let line = src.split_to(src.len());
        Ok(Some(decode_line(&line)))
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    /// Writes `line` followed by CRLF.
    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<()> {
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :test".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"test\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :test".to_string()));
    }

    #[test]
    fn test_decode_latin1_is_lossy() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b":a!b@c PRIVMSG #x :caf\xe9\r\nPING :x\r\n"[..]);

        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some(":a!b@c PRIVMSG #x :caf\u{fffd}".to_string())
        );
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :x".to_string()));
    }

    #[test]
    fn test_decode_skips_too_long() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\nPING :x\n");

        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :x".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_skips_too_long_across_reads() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too");
        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b" long, really\nPING :x\n");
        assert_eq!(codec.decode(&mut buf).unwrap(), Some("PING :x".to_string()));
    }

    #[test]
    fn test_decode_eof_flushes_unterminated() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("ERROR :bye");
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some("ERROR :bye".to_string()));
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_encode() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode("PONG :test".to_string(), &mut buf).unwrap();
        assert_eq!(&buf[..], b"PONG :test\r\n");
    }
}
