//! Typed paths into the verse data tree.
//!
//! Layout: `<data_root>/<OT|NT>/<Book>/<CC>/<VV>.json`, chapter and verse
//! zero-padded to two digits.
use crate::verse::ChapterRef;
use std::path::PathBuf;

const NEW_TESTAMENT_BOOKS: &[&str] = &[
    "matthew",
    "mark",
    "luke",
    "john",
    "acts",
    "romans",
    "1corinthians",
    "2corinthians",
    "galatians",
    "ephesians",
    "philippians",
    "colossians",
    "1thessalonians",
    "2thessalonians",
    "1timothy",
    "2timothy",
    "titus",
    "philemon",
    "hebrews",
    "james",
    "1peter",
    "2peter",
    "1john",
    "2john",
    "3john",
    "jude",
    "revelation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    OldTestament,
    NewTestament,
}

impl Testament {
    pub fn dir_name(self) -> &'static str {
        match self {
            Testament::OldTestament => "OT",
            Testament::NewTestament => "NT",
        }
    }
}

/// Route a book to its testament; anything not in the NT list is OT.
///
/// Matching ignores case and whitespace so "1 John" and "1john" agree.
pub fn testament_for_book(book: &str) -> Testament {
    let normalized: String = book
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if NEW_TESTAMENT_BOOKS.contains(&normalized.as_str()) {
        Testament::NewTestament
    } else {
        Testament::OldTestament
    }
}

pub fn verse_file_name(verse: u32) -> String {
    format!("{verse:02}.json")
}

fn chapter_dir_name(chapter: u32) -> String {
    format!("{chapter:02}")
}

/// Path helper rooted at the data root.
#[derive(Debug, Clone)]
pub struct VerseLayout {
    data_root: PathBuf,
}

impl VerseLayout {
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }

    /// Return the `<OT|NT>/<Book>/<CC>` directory for a chapter.
    pub fn chapter_dir(&self, book: &str, chapter: u32) -> PathBuf {
        let book = book.trim();
        self.data_root
            .join(testament_for_book(book).dir_name())
            .join(book)
            .join(chapter_dir_name(chapter))
    }

    /// Return the `<CC>/<VV>.json` path for a single verse.
    pub fn verse_path(&self, book: &str, chapter: u32, verse: u32) -> PathBuf {
        self.chapter_dir(book, chapter).join(verse_file_name(verse))
    }

    pub fn chapter_dir_for(&self, chapter: &ChapterRef) -> PathBuf {
        self.chapter_dir(&chapter.book, chapter.chapter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verse_file_names_are_zero_padded() {
        assert_eq!(verse_file_name(1), "01.json");
        assert_eq!(verse_file_name(10), "10.json");
        assert_eq!(verse_file_name(48), "48.json");
    }

    #[test]
    fn testament_routing_handles_numbered_and_cased_books() {
        assert_eq!(testament_for_book("Acts"), Testament::NewTestament);
        assert_eq!(testament_for_book("1 John"), Testament::NewTestament);
        assert_eq!(testament_for_book(" 2corinthians "), Testament::NewTestament);
        assert_eq!(testament_for_book("Genesis"), Testament::OldTestament);
        assert_eq!(testament_for_book("1 Kings"), Testament::OldTestament);
    }

    #[test]
    fn chapter_dir_follows_layout() {
        let layout = VerseLayout::new(PathBuf::from("/data"));
        assert_eq!(
            layout.chapter_dir("Acts", 10),
            PathBuf::from("/data/NT/Acts/10")
        );
        assert_eq!(
            layout.verse_path("Genesis", 1, 3),
            PathBuf::from("/data/OT/Genesis/01/03.json")
        );
    }

    #[test]
    fn chapter_dir_for_matches_chapter_dir() {
        let layout = VerseLayout::new(PathBuf::from("root"));
        let chapter = ChapterRef::new("Acts", 10, 48);
        assert_eq!(layout.chapter_dir_for(&chapter), layout.chapter_dir("Acts", 10));
    }
}
