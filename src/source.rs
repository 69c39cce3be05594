use std::io::{self, Read};

/// Bytes requested from the underlying source per refill.
pub const CHUNK_SIZE: usize = 1000;

/// A forward-only chunked text source feeding the sentence segmenter.
///
/// `read_chunk` appends at most one chunk of text to `buf` and returns the
/// number of bytes appended; `Ok(0)` signals end of stream. Every appended
/// chunk is complete UTF-8.
pub trait TextSource {
    fn read_chunk(&mut self, buf: &mut String) -> io::Result<usize>;
}

/// Cursor over in-memory text.
#[derive(Debug)]
pub struct StrSource<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl TextSource for StrSource<'_> {
    fn read_chunk(&mut self, buf: &mut String) -> io::Result<usize> {
        if self.pos >= self.text.len() {
            return Ok(0);
        }
        let mut end = (self.pos + CHUNK_SIZE).min(self.text.len());
        // Back off to a char boundary so the chunk stays valid UTF-8.
        while !self.text.is_char_boundary(end) {
            end -= 1;
        }
        let chunk = &self.text[self.pos..end];
        buf.push_str(chunk);
        self.pos = end;
        Ok(chunk.len())
    }
}

/// Byte-stream source over any reader.
///
/// A multi-byte UTF-8 sequence split across two reads is held back and
/// completed on the next refill, so callers only ever see whole characters.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    carry: Vec<u8>,
    done: bool,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            carry: Vec::new(),
            done: false,
        }
    }
}

impl<R: Read> TextSource for ReaderSource<R> {
    fn read_chunk(&mut self, buf: &mut String) -> io::Result<usize> {
        if self.done && self.carry.is_empty() {
            return Ok(0);
        }
        let mut bytes = std::mem::take(&mut self.carry);
        loop {
            let start = bytes.len();
            bytes.resize(start + CHUNK_SIZE, 0);
            let read = if self.done {
                0
            } else {
                self.inner.read(&mut bytes[start..])?
            };
            bytes.truncate(start + read);
            if read == 0 {
                self.done = true;
                if bytes.is_empty() {
                    return Ok(0);
                }
            }
            match std::str::from_utf8(&bytes) {
                Ok(chunk) => {
                    buf.push_str(chunk);
                    return Ok(bytes.len());
                }
                Err(err) => {
                    // A truncated sequence at the very end may still be
                    // completed by the next read; anything else is fatal.
                    if err.error_len().is_some() || self.done {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            "text source is not valid UTF-8",
                        ));
                    }
                    let valid = err.valid_up_to();
                    if valid > 0 {
                        self.carry = bytes.split_off(valid);
                        let chunk = std::str::from_utf8(&bytes).map_err(|_| {
                            io::Error::new(io::ErrorKind::InvalidData, "text source is not valid UTF-8")
                        })?;
                        buf.push_str(chunk);
                        return Ok(valid);
                    }
                    // Only a partial sequence buffered so far; keep reading.
                }
            }
        }
    }
}
