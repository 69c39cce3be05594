pub mod analyzer;
pub mod fs_manager;
pub mod matcher;
pub mod segmenter;
pub mod source;

// Re-export main types for convenient access
pub use analyzer::{analyze_file, analyze_text, Analysis, RunStats, SentenceCount};
pub use fs_manager::EntryKind;
pub use matcher::WordMatcher;
pub use segmenter::{split_into_sentences, SentenceReader};
pub use source::{ReaderSource, StrSource, TextSource, CHUNK_SIZE};
