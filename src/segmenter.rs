use anyhow::{Context, Result};
use regex_automata::{
    dfa::{dense::DFA, Automaton},
    Input,
};
use tracing::debug;

use crate::source::{StrSource, TextSource};

/// Sentence delimiter: terminal punctuation plus any immediately following
/// spaces. The matched span, trailing spaces included, belongs to the
/// emitted sentence.
const DELIMITER_PATTERN: &str = r"[.!?] *";

/// Incremental sentence reader over a chunked text source.
///
/// Buffers not-yet-emitted characters, refills from the source one chunk at
/// a time, and hands out sentences in document order. The sequence is
/// finite, forward-only and single-consumer; an exhausted source is never
/// read again.
pub struct SentenceReader<S> {
    source: S,
    buffer: String,
    delimiter: DFA<Vec<u32>>,
    exhausted: bool,
}

impl<S: TextSource> SentenceReader<S> {
    pub fn new(source: S) -> Result<Self> {
        let delimiter =
            DFA::new(DELIMITER_PATTERN).context("failed to compile sentence delimiter DFA")?;
        Ok(Self {
            source,
            buffer: String::new(),
            delimiter,
            exhausted: false,
        })
    }

    /// Next sentence in document order, or `None` once the source is drained
    /// and the buffer is empty.
    pub fn next_sentence(&mut self) -> Result<Option<String>> {
        if let Some(sentence) = self.extract_delimited()? {
            return Ok(Some(sentence));
        }
        while !self.exhausted {
            let appended = self
                .source
                .read_chunk(&mut self.buffer)
                .context("failed to read from text source")?;
            if appended == 0 {
                self.exhausted = true;
                break;
            }
            if let Some(sentence) = self.extract_delimited()? {
                return Ok(Some(sentence));
            }
        }
        // Source drained: remaining buffered text is the final sentence,
        // even without terminal punctuation.
        if self.buffer.is_empty() {
            return Ok(None);
        }
        let tail = strip_line_breaks(&self.buffer);
        self.buffer.clear();
        if tail.is_empty() {
            Ok(None)
        } else {
            debug!("Emitting final unterminated fragment ({} bytes)", tail.len());
            Ok(Some(tail))
        }
    }

    /// Extract the first complete delimited sentence from the buffer, if any.
    /// The matched span is removed from the buffer so later calls start past it.
    fn extract_delimited(&mut self) -> Result<Option<String>> {
        let input = Input::new(self.buffer.as_bytes());
        let half = self
            .delimiter
            .try_search_fwd(&input)
            .context("sentence delimiter search failed")?;
        let Some(half) = half else {
            return Ok(None);
        };
        // The DFA reports the end of the leftmost match, after the terminal
        // punctuation and all trailing spaces. All matched bytes are ASCII,
        // so the offset sits on a char boundary.
        let end = half.offset();
        let sentence = strip_line_breaks(&self.buffer[..end]);
        self.buffer.drain(..end);
        Ok(Some(sentence))
    }
}

/// Split in-memory text into its full ordered sentence sequence.
pub fn split_into_sentences(text: &str) -> Result<Vec<String>> {
    let mut reader = SentenceReader::new(StrSource::new(text))?;
    let mut sentences = Vec::new();
    while let Some(sentence) = reader.next_sentence()? {
        sentences.push(sentence);
    }
    Ok(sentences)
}

fn strip_line_breaks(span: &str) -> String {
    span.chars().filter(|&c| c != '\n' && c != '\r').collect()
}
