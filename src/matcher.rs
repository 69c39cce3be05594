/// Characters accepted after a word occurrence. An occurrence is bounded
/// when it is preceded by at least one space and followed by one of these,
/// so it never matches inside a longer token.
const TRAILING_BOUNDS: [char; 3] = [' ', ':', ';'];

/// Case-insensitive literal matcher for bounded occurrences of one word.
///
/// The target is matched as plain text via an explicit char scan, so
/// pattern metacharacters in user input carry no special meaning.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    word: Vec<char>,
}

impl WordMatcher {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_lowercase().chars().collect(),
        }
    }

    /// Count of non-overlapping bounded occurrences of the word in the
    /// sentence. Adjacent occurrences may share a boundary space.
    pub fn count_matches(&self, sentence: &str) -> usize {
        if self.word.is_empty() {
            return 0;
        }
        let hay: Vec<char> = sentence.to_lowercase().chars().collect();
        let len = self.word.len();
        let mut count = 0;
        // Start at 1: an occurrence needs a preceding space, and the char
        // after the word must exist, so the scan stops short of the end.
        let mut i = 1;
        while i + len < hay.len() {
            if hay[i - 1] == ' '
                && hay[i..i + len] == self.word[..]
                && TRAILING_BOUNDS.contains(&hay[i + len])
            {
                count += 1;
                i += len;
            } else {
                i += 1;
            }
        }
        count
    }
}
