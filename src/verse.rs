//! Core verse data types shared by the loader, writer, and CLI.
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Verse numbers are encoded as two zero-padded digits in file names.
pub const MAX_VERSE_COUNT: u32 = 99;

/// One loaded verse: its index within the chapter and the parsed JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub verse_number: u32,
    pub data: Value,
}

/// Ordered verses for a single chapter, ascending by `verse_number`.
///
/// Serializes as a bare JSON array so renderers can iterate it directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerseCollection {
    verses: Vec<VerseRecord>,
}

impl VerseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; callers push in ascending verse order.
    pub(crate) fn push(&mut self, record: VerseRecord) {
        debug_assert!(self
            .verses
            .last()
            .is_none_or(|last| last.verse_number < record.verse_number));
        self.verses.push(record);
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn verse_numbers(&self) -> Vec<u32> {
        self.verses.iter().map(|record| record.verse_number).collect()
    }
}

/// Identifies a chapter and how many verse slots it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRef {
    pub book: String,
    pub chapter: u32,
    pub verse_count: u32,
}

impl ChapterRef {
    pub fn new(book: impl Into<String>, chapter: u32, verse_count: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse_count,
        }
    }

    /// Reject shapes that cannot map onto the on-disk layout.
    pub fn validate(&self) -> Result<()> {
        validate_book_name(&self.book)?;
        if self.chapter == 0 {
            return Err(anyhow!("chapter must be at least 1"));
        }
        if self.verse_count == 0 || self.verse_count > MAX_VERSE_COUNT {
            return Err(anyhow!(
                "verse_count must be between 1 and {MAX_VERSE_COUNT} (got {})",
                self.verse_count
            ));
        }
        Ok(())
    }

    /// Verse indices in load order.
    pub fn verse_numbers(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.verse_count
    }
}

impl fmt::Display for ChapterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.book, self.chapter)
    }
}

/// Book names become directory names, so they must be a single path segment.
pub fn validate_book_name(book: &str) -> Result<()> {
    let trimmed = book.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("book must not be empty"));
    }
    if trimmed.contains('/') || trimmed.contains('\\') || trimmed == "." || trimmed == ".." {
        return Err(anyhow!("book must be a single path segment (got {book:?})"));
    }
    Ok(())
}
