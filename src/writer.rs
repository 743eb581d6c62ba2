//! Atomic verse writes into the data layout.
//!
//! Each verse is staged in a temp file next to its destination and renamed
//! into place, so a reader never observes a partially written verse.
use crate::layout::VerseLayout;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write one verse and confirm the file parses back to the same value.
pub fn write_verse(
    layout: &VerseLayout,
    book: &str,
    chapter: u32,
    verse: u32,
    value: &Value,
) -> Result<PathBuf> {
    crate::verse::validate_book_name(book)?;
    if chapter == 0 || verse == 0 || verse > crate::verse::MAX_VERSE_COUNT {
        return Err(anyhow!("invalid verse reference {book} {chapter}:{verse}"));
    }
    let path = layout.verse_path(book, chapter, verse);
    let mut text = serde_json::to_string_pretty(value).context("serialize verse JSON")?;
    text.push('\n');
    publish_checked(&path, text.as_bytes(), |staged| {
        verify_written(staged, &path, value)
    })?;
    tracing::info!(path = %path.display(), verse, "wrote verse");
    Ok(path)
}

/// Stage `bytes` in the destination directory, then rename over `path`.
///
/// The temp file is removed if any step before the rename fails.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    publish_checked(path, bytes, |_| Ok(()))
}

/// Like [`atomic_write`], but runs `check` on the staged file first; a failed
/// check leaves `path` untouched.
fn publish_checked<F>(path: &Path, bytes: &[u8], check: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut staged = tempfile::Builder::new()
        .prefix(".verse-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("stage temp file in {}", parent.display()))?;
    staged
        .write_all(bytes)
        .with_context(|| format!("write staged {}", path.display()))?;
    staged
        .as_file()
        .sync_all()
        .with_context(|| format!("sync staged {}", path.display()))?;
    check(staged.path())?;
    staged
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", path.display()))?;
    Ok(())
}

fn verify_written(staged: &Path, dest: &Path, expected: &Value) -> Result<()> {
    let bytes = fs::read(staged).with_context(|| format!("read back staged {}", dest.display()))?;
    let written: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse staged {}", dest.display()))?;
    if &written != expected {
        return Err(anyhow!(
            "verification failed: {} does not match the written value",
            dest.display()
        ));
    }
    Ok(())
}
