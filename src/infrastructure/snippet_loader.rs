use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::api::dto::Snippet;
use crate::domain::language::SupportedLanguage;

/// A snippet read from disk, tagged with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedSnippet {
    pub path: String,
    pub snippet: Snippet,
}

pub struct SnippetLoader {
    /// Applied to every file instead of extension inference.
    language: Option<SupportedLanguage>,
}

impl SnippetLoader {
    pub fn new(language: Option<SupportedLanguage>) -> Self {
        Self { language }
    }

    /// Load a single file. Fails when it cannot be read or its language is unknown.
    pub fn load_file(&self, path: &Path) -> Result<LoadedSnippet> {
        let language = self
            .language
            .or_else(|| SupportedLanguage::from_path(path))
            .with_context(|| {
                format!("Cannot infer language of {}; pass --language", path.display())
            })?;
        let code = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        Ok(LoadedSnippet {
            path: path.display().to_string(),
            snippet: Snippet { code, language },
        })
    }

    /// Recursively load every file under `dir` whose language is known.
    /// Results are sorted by path.
    pub fn load_folder(&self, dir: &Path) -> Result<Vec<LoadedSnippet>> {
        let mut out = Vec::new();
        self.collect_recursive(dir, &mut out)?;
        out.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(out)
    }

    fn collect_recursive(&self, dir: &Path, out: &mut Vec<LoadedSnippet>) -> Result<()> {
        if dir.ends_with("target") || dir.ends_with(".git") || dir.ends_with("node_modules") {
            return Ok(());
        }

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                self.collect_recursive(&path, out)?;
            } else if SupportedLanguage::from_path(&path).is_some() {
                match self.load_file(&path) {
                    Ok(loaded) => out.push(loaded),
                    Err(e) => warn!(path = %path.display(), error = %e, "skipping file"),
                }
            }
        }
        Ok(())
    }
}
