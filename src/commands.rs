use crate::cli::{ChapterArgs, InitArgs, LoadArgs, PathArgs, StatusArgs, WriteArgs};
use crate::config::{default_config, resolve_config, write_config, ResolvedConfig};
use crate::diagnostics::TracingDiagnostics;
use crate::layout::VerseLayout;
use crate::loader::{load_chapter, scan_chapter, ChapterScan, LoadIssue};
use crate::verse::MAX_VERSE_COUNT;
use crate::writer::{atomic_write, write_verse};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

fn resolve(args: &ChapterArgs) -> Result<(ResolvedConfig, VerseLayout)> {
    let cwd = std::env::current_dir().context("resolve current directory")?;
    let resolved = resolve_config(args.config.as_deref(), &cwd, args.overrides())?;
    let layout = VerseLayout::new(resolved.data_root.clone());
    Ok((resolved, layout))
}

pub fn run_load(args: LoadArgs) -> Result<()> {
    let (resolved, layout) = resolve(&args.chapter)?;
    let chapter = resolved.config.chapter_ref();
    let verses = load_chapter(&layout, &chapter, &TracingDiagnostics);
    tracing::debug!(verses = ?verses.verse_numbers(), "loaded verse numbers");

    let mut json = if args.compact {
        serde_json::to_string(&verses)
    } else {
        serde_json::to_string_pretty(&verses)
    }
    .context("serialize verse collection")?;
    json.push('\n');

    match &args.out {
        Some(out) => {
            atomic_write(out, json.as_bytes())?;
            tracing::info!(path = %out.display(), count = verses.len(), "wrote verse collection");
        }
        None => print!("{json}"),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct MalformedVerse {
    verse_number: u32,
    reason: String,
}

#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    book: &'a str,
    chapter: u32,
    verse_count: u32,
    dir: &'a Path,
    dir_exists: bool,
    loaded: usize,
    missing: Vec<u32>,
    malformed: Vec<MalformedVerse>,
}

impl<'a> StatusReport<'a> {
    fn from_scan(scan: &'a ChapterScan) -> Self {
        let malformed = scan
            .issues()
            .into_iter()
            .filter_map(|issue| match issue {
                LoadIssue::MalformedVerseFile { verse, reason } => Some(MalformedVerse {
                    verse_number: verse,
                    reason,
                }),
                _ => None,
            })
            .collect();
        Self {
            book: &scan.chapter.book,
            chapter: scan.chapter.chapter,
            verse_count: scan.chapter.verse_count,
            dir: &scan.dir,
            dir_exists: scan.dir_exists,
            loaded: scan.loaded_count(),
            missing: scan.missing_verses(),
            malformed,
        }
    }
}

pub fn run_status(args: StatusArgs) -> Result<()> {
    let (resolved, layout) = resolve(&args.chapter)?;
    let chapter = resolved.config.chapter_ref();
    let scan = scan_chapter(&layout, &chapter, &TracingDiagnostics);
    let report = StatusReport::from_scan(&scan);

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize status")?;
        println!("{text}");
    } else {
        println!("chapter: {chapter}");
        println!("dir: {}", report.dir.display());
        if !report.dir_exists {
            println!("directory missing");
        }
        println!("loaded: {}/{}", report.loaded, report.verse_count);
        println!("missing: {}", format_verse_list(&report.missing));
        for entry in &report.malformed {
            println!("malformed: verse {} ({})", entry.verse_number, entry.reason);
        }
    }

    if args.strict && !report.malformed.is_empty() {
        return Err(anyhow!(
            "{} malformed verse file(s) in {chapter}",
            report.malformed.len()
        ));
    }
    Ok(())
}

fn format_verse_list(verses: &[u32]) -> String {
    if verses.is_empty() {
        return "none".to_string();
    }
    verses
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run_write(args: WriteArgs) -> Result<()> {
    let (resolved, layout) = resolve(&args.chapter)?;
    let chapter = resolved.config.chapter_ref();
    if args.verse == 0 || args.verse > chapter.verse_count {
        return Err(anyhow!(
            "verse {} is outside {chapter} (verse_count {})",
            args.verse,
            chapter.verse_count
        ));
    }
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read input {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("read stdin")?,
    };
    let value: Value = serde_json::from_str(&text).context("parse input JSON")?;
    let path = write_verse(&layout, &chapter.book, chapter.chapter, args.verse, &value)?;
    println!("{}", path.display());
    Ok(())
}

pub fn run_path(args: PathArgs) -> Result<()> {
    let (resolved, layout) = resolve(&args.chapter)?;
    let config = &resolved.config;
    let path: PathBuf = match args.verse {
        Some(verse) if verse == 0 || verse > MAX_VERSE_COUNT => {
            return Err(anyhow!(
                "verse must be between 1 and {MAX_VERSE_COUNT} (got {verse})"
            ));
        }
        Some(verse) => layout.verse_path(&config.book, config.chapter, verse),
        None => layout.chapter_dir(&config.book, config.chapter),
    };
    println!("{}", path.display());
    Ok(())
}

pub fn run_init(args: InitArgs) -> Result<()> {
    if args.config.is_file() && !args.force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            args.config.display()
        ));
    }
    write_config(&args.config, &default_config())?;
    tracing::info!(path = %args.config.display(), "wrote default config");
    Ok(())
}
