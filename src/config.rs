//! Chapter configuration helpers.
//!
//! `verses.json` names the data root and the chapter shape to load; CLI flags
//! override individual fields.
use crate::verse::ChapterRef;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "verses.json";

const DEFAULT_DATA_ROOT: &str = "data";
const DEFAULT_BOOK: &str = "Acts";
const DEFAULT_CHAPTER: u32 = 10;
const DEFAULT_VERSE_COUNT: u32 = 48;

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_data_root() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_ROOT)
}

fn default_book() -> String {
    DEFAULT_BOOK.to_string()
}

fn default_chapter() -> u32 {
    DEFAULT_CHAPTER
}

fn default_verse_count() -> u32 {
    DEFAULT_VERSE_COUNT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersesConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Relative roots resolve against the config file's directory.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    #[serde(default = "default_book")]
    pub book: String,
    #[serde(default = "default_chapter")]
    pub chapter: u32,
    #[serde(default = "default_verse_count")]
    pub verse_count: u32,
}

/// Per-invocation overrides taken from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_root: Option<PathBuf>,
    pub book: Option<String>,
    pub chapter: Option<u32>,
    pub verse_count: Option<u32>,
}

/// Build the default config: Acts 10 with 48 verses under `data/`.
pub fn default_config() -> VersesConfig {
    VersesConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        data_root: default_data_root(),
        book: default_book(),
        chapter: DEFAULT_CHAPTER,
        verse_count: DEFAULT_VERSE_COUNT,
    }
}

pub fn load_config(path: &Path) -> Result<VersesConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: VersesConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(config)
}

pub fn write_config(path: &Path, config: &VersesConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize config")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn validate_config(config: &VersesConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.data_root.as_os_str().is_empty() {
        return Err(anyhow!("data_root must not be empty"));
    }
    config.chapter_ref().validate()
}

impl VersesConfig {
    pub fn chapter_ref(&self) -> ChapterRef {
        ChapterRef::new(self.book.trim(), self.chapter, self.verse_count)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(data_root) = overrides.data_root {
            self.data_root = data_root;
        }
        if let Some(book) = overrides.book {
            self.book = book;
        }
        if let Some(chapter) = overrides.chapter {
            self.chapter = chapter;
        }
        if let Some(verse_count) = overrides.verse_count {
            self.verse_count = verse_count;
        }
    }

    /// Anchor a relative `data_root` at `base`; absolute roots are kept.
    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        if self.data_root.is_absolute() {
            self.data_root.clone()
        } else {
            base.join(&self.data_root)
        }
    }
}

/// A validated config plus the directory relative paths resolve against.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: VersesConfig,
    pub data_root: PathBuf,
}

/// Load the explicit config, or `verses.json` in `cwd` if present, or defaults.
///
/// Flag overrides apply after loading; a `--data-root` flag resolves against
/// `cwd` rather than the config file.
pub fn resolve_config(
    explicit: Option<&Path>,
    cwd: &Path,
    overrides: ConfigOverrides,
) -> Result<ResolvedConfig> {
    let candidate = match explicit {
        Some(path) => Some(cwd.join(path)),
        None => Some(cwd.join(DEFAULT_CONFIG_FILE)).filter(|path| path.is_file()),
    };
    let (mut config, anchor) = match candidate {
        Some(path) => {
            let config = load_config(&path)?;
            let anchor = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf());
            tracing::debug!(path = %path.display(), "loaded config");
            (config, anchor)
        }
        None => (default_config(), cwd.to_path_buf()),
    };

    let anchor = if overrides.data_root.is_some() {
        cwd.to_path_buf()
    } else {
        anchor
    };
    config.apply_overrides(overrides);
    validate_config(&config)?;
    let data_root = config.resolve_data_root(&anchor);
    Ok(ResolvedConfig { config, data_root })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
