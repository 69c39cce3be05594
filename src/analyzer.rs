use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::fs_manager;
use crate::matcher::WordMatcher;
use crate::segmenter::SentenceReader;
use crate::source::StrSource;

/// One report entry: a sentence containing the target word at least once.
/// Zero-count sentences are never recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceCount {
    pub sentence: String,
    pub count: usize,
}

/// Outcome of one analysis run over a single source.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub word: String,
    pub source: String,
    /// Sum of all recorded per-sentence counts.
    pub total: usize,
    /// Matched sentences in document order of first appearance.
    pub entries: Vec<SentenceCount>,
    /// All sentences the segmenter produced, matched or not.
    pub sentences_seen: usize,
    pub chars_processed: usize,
}

impl Analysis {
    /// Render the human-readable report: a header line, then one line per
    /// matched sentence.
    pub fn render_report(&self) -> String {
        let mut report = format!(
            "The word {} has been found {} time(s) in the file: {}:\n",
            self.word, self.total, self.source
        );
        for entry in &self.entries {
            report.push_str(&format!(
                "{} time(s) in the sentence: {}\n",
                entry.count, entry.sentence
            ));
        }
        report
    }
}

/// Analyze in-memory text for bounded occurrences of `word`.
///
/// Segments the text to completion in document order, counts matches per
/// sentence, and aggregates. `source_label` only appears in the report
/// header; the text may come from anywhere.
pub fn analyze_text(text: &str, word: &str, source_label: &str) -> Result<Analysis> {
    let matcher = WordMatcher::new(word);
    let mut reader = SentenceReader::new(StrSource::new(text))?;

    let mut entries: Vec<SentenceCount> = Vec::new();
    let mut total = 0;
    let mut sentences_seen = 0;
    while let Some(sentence) = reader.next_sentence()? {
        sentences_seen += 1;
        let count = matcher.count_matches(&sentence);
        if count == 0 {
            continue;
        }
        total += count;
        // Identical sentence texts share one entry; their counts add up so
        // the header total stays the true occurrence count.
        match entries.iter().position(|e| e.sentence == sentence) {
            Some(idx) => entries[idx].count += count,
            None => entries.push(SentenceCount { sentence, count }),
        }
    }

    debug!(
        sentences_seen,
        matched = entries.len(),
        total,
        "analysis pass complete"
    );

    Ok(Analysis {
        word: word.to_string(),
        source: source_label.to_string(),
        total,
        entries,
        sentences_seen,
        chars_processed: text.chars().count(),
    })
}

/// Analyze a file on disk. A read failure aborts the whole run with an
/// error; no partial report is produced.
pub async fn analyze_file(path: impl AsRef<Path>, word: &str) -> Result<Analysis> {
    let path = path.as_ref();
    let text = fs_manager::read_all_text_async(path).await?;
    info!("Loaded {} ({} bytes)", path.display(), text.len());
    analyze_text(&text, word, &path.display().to_string())
}

/// Per-run statistics for machine-readable output.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    pub path: String,
    pub word: String,
    pub chars_processed: u64,
    pub sentences_seen: u64,
    pub sentences_matched: u64,
    pub occurrences: u64,
    pub processing_time_ms: u64,
}

impl RunStats {
    pub fn from_analysis(analysis: &Analysis, processing_time_ms: u64) -> Self {
        Self {
            path: analysis.source.clone(),
            word: analysis.word.clone(),
            chars_processed: analysis.chars_processed as u64,
            sentences_seen: analysis.sentences_seen as u64,
            sentences_matched: analysis.entries.len() as u64,
            occurrences: analysis.total as u64,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP_DOC: &str = "Hash table based implementation of the Map interface. \
        This implementation provides all of the optional map operations, and permits null values and the null key. \
        The HashMap class is roughly equivalent to Hashtable, except that it is unsynchronized and permits nulls.\
        This class makes no guarantees as to the order of the map; in particular, it does not guarantee that the order will remain constant over time.";

    #[test]
    fn test_filtering_keeps_and_drops_expected_sentences() {
        let analysis = analyze_text(MAP_DOC, "map", "Map.txt").unwrap();
        assert_eq!(analysis.sentences_seen, 4);
        // Sentences 1, 2 and 4 carry bounded occurrences; the HashMap /
        // Hashtable sentence does not.
        assert_eq!(analysis.entries.len(), 3);
        assert!(analysis.entries[0].sentence.starts_with("Hash table based"));
        assert_eq!(analysis.entries[0].count, 1);
        assert!(analysis.entries[1].sentence.starts_with("This implementation"));
        assert!(analysis.entries[1].count >= 1);
        assert!(analysis
            .entries
            .iter()
            .all(|e| !e.sentence.contains("HashMap")));
        assert_eq!(analysis.total, 3);
    }

    #[test]
    fn test_report_format() {
        let analysis = analyze_text("The Map interface is a map here. No match line.", "map", "File.txt").unwrap();
        let report = analysis.render_report();
        let mut lines = report.lines();
        assert_eq!(
            lines.next(),
            Some("The word map has been found 2 time(s) in the file: File.txt:")
        );
        assert_eq!(
            lines.next(),
            Some("2 time(s) in the sentence: The Map interface is a map here. ")
        );
        assert_eq!(lines.next(), None);
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_empty_input_reports_zero() {
        let analysis = analyze_text("", "map", "empty.txt").unwrap();
        assert_eq!(analysis.total, 0);
        assert!(analysis.entries.is_empty());
        assert_eq!(
            analysis.render_report(),
            "The word map has been found 0 time(s) in the file: empty.txt:\n"
        );
    }

    #[test]
    fn test_duplicate_sentences_collapse_with_summed_counts() {
        let text = "The map is here. The map is here. ";
        let analysis = analyze_text(text, "map", "dup.txt").unwrap();
        assert_eq!(analysis.sentences_seen, 2);
        assert_eq!(analysis.entries.len(), 1);
        assert_eq!(analysis.entries[0].count, 2);
        assert_eq!(analysis.total, 2);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let first = analyze_text(MAP_DOC, "map", "Map.txt").unwrap();
        let second = analyze_text(MAP_DOC, "map", "Map.txt").unwrap();
        assert_eq!(first.render_report(), second.render_report());
    }

    #[test]
    fn test_run_stats_mirror_analysis() {
        let analysis = analyze_text(MAP_DOC, "map", "Map.txt").unwrap();
        let stats = RunStats::from_analysis(&analysis, 7);
        assert_eq!(stats.word, "map");
        assert_eq!(stats.occurrences, 3);
        assert_eq!(stats.sentences_seen, 4);
        assert_eq!(stats.sentences_matched, 3);
        assert_eq!(stats.processing_time_ms, 7);
    }
}
