//! Best-effort chapter loading.
//!
//! A chapter load never fails: a missing directory yields an empty result,
//! missing verse files are skipped silently, and unreadable or malformed
//! files are reported through [`Diagnostics`] and skipped.
use crate::diagnostics::Diagnostics;
use crate::layout::{verse_file_name, VerseLayout};
use crate::verse::{ChapterRef, VerseCollection, VerseRecord};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Conditions the loader recovers from; `Display` is the warning text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadIssue {
    #[error("{chapter} data directory not found: {}", dir.display())]
    MissingDirectory { chapter: String, dir: PathBuf },
    #[error("verse {verse} not present")]
    MissingVerseFile { verse: u32 },
    #[error("Error reading verse {verse}: {reason}")]
    MalformedVerseFile { verse: u32, reason: String },
}

impl LoadIssue {
    /// Cause text for status reports, without the verse prefix.
    fn into_reason(self) -> String {
        match self {
            LoadIssue::MalformedVerseFile { reason, .. } => reason,
            other => other.to_string(),
        }
    }
}

/// Outcome of probing a single verse slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerseStatus {
    Loaded {
        #[serde(skip)]
        data: Value,
    },
    Missing,
    Malformed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanEntry {
    pub verse_number: u32,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: VerseStatus,
}

/// Per-verse view of one chapter directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterScan {
    pub chapter: ChapterRef,
    pub dir: PathBuf,
    pub dir_exists: bool,
    pub entries: Vec<ScanEntry>,
}

impl ChapterScan {
    pub fn loaded_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.status, VerseStatus::Loaded { .. }))
            .count()
    }

    /// Verse slots with no file; every slot when the directory is absent.
    pub fn missing_verses(&self) -> Vec<u32> {
        if !self.dir_exists {
            return self.chapter.verse_numbers().collect();
        }
        self.entries
            .iter()
            .filter(|entry| matches!(entry.status, VerseStatus::Missing))
            .map(|entry| entry.verse_number)
            .collect()
    }

    /// Verse slots whose file exists but could not be read or parsed.
    pub fn issues(&self) -> Vec<LoadIssue> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.status {
                VerseStatus::Malformed { reason } => Some(LoadIssue::MalformedVerseFile {
                    verse: entry.verse_number,
                    reason: reason.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Keep only loaded verses, preserving ascending verse order.
    pub fn into_collection(self) -> VerseCollection {
        let mut verses = VerseCollection::new();
        for entry in self.entries {
            if let VerseStatus::Loaded { data } = entry.status {
                verses.push(VerseRecord {
                    verse_number: entry.verse_number,
                    data,
                });
            }
        }
        verses
    }
}

/// Probe every verse slot of a chapter and classify it.
///
/// Emits the same diagnostics as [`load_chapter`].
pub fn scan_chapter(
    layout: &VerseLayout,
    chapter: &ChapterRef,
    diagnostics: &dyn Diagnostics,
) -> ChapterScan {
    let dir = layout.chapter_dir_for(chapter);
    if !dir.exists() {
        let issue = LoadIssue::MissingDirectory {
            chapter: chapter.to_string(),
            dir: dir.clone(),
        };
        diagnostics.warn(&issue.to_string());
        return ChapterScan {
            chapter: chapter.clone(),
            dir,
            dir_exists: false,
            entries: Vec::new(),
        };
    }

    let mut entries = Vec::with_capacity(chapter.verse_count as usize);
    for verse in chapter.verse_numbers() {
        let path = dir.join(verse_file_name(verse));
        let status = match read_verse(&path, verse) {
            Ok(data) => VerseStatus::Loaded { data },
            Err(LoadIssue::MissingVerseFile { .. }) => VerseStatus::Missing,
            Err(issue) => {
                diagnostics.warn(&issue.to_string());
                VerseStatus::Malformed {
                    reason: issue.into_reason(),
                }
            }
        };
        entries.push(ScanEntry {
            verse_number: verse,
            path,
            status,
        });
    }

    let scan = ChapterScan {
        chapter: chapter.clone(),
        dir,
        dir_exists: true,
        entries,
    };
    diagnostics.info(&format!(
        "Loaded {} verses for {}",
        scan.loaded_count(),
        chapter
    ));
    scan
}

/// Load every present, well-formed verse of a chapter in ascending order.
pub fn load_chapter(
    layout: &VerseLayout,
    chapter: &ChapterRef,
    diagnostics: &dyn Diagnostics,
) -> VerseCollection {
    scan_chapter(layout, chapter, diagnostics).into_collection()
}

fn read_verse(path: &Path, verse: u32) -> Result<Value, LoadIssue> {
    if !path.exists() {
        return Err(LoadIssue::MissingVerseFile { verse });
    }
    let malformed = |reason: String| LoadIssue::MalformedVerseFile { verse, reason };
    let text = fs::read_to_string(path).map_err(|err| malformed(err.to_string()))?;
    serde_json::from_str(&text).map_err(|err| malformed(err.to_string()))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
