//! Example discovery: directory scans and manifest files.

use crate::models::ExampleSource;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to scan {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Examples directory not found: {0:?}")]
    MissingDirectory(PathBuf),

    #[error("Invalid manifest {path:?}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Enumerates the closed set of examples for one build
pub trait ExampleProvider {
    fn examples(&self) -> Result<Vec<ExampleSource>, ProviderError>;
}

static CATEGORY_REGEX: OnceLock<Regex> = OnceLock::new();

fn category_regex() -> &'static Regex {
    CATEGORY_REGEX.get_or_init(|| {
        Regex::new(r"(?m)^\s*#\s*category\s*:\s*(.+?)\s*$").expect("category pattern is valid")
    })
}

/// Read the `# category: <label>` comment from an example's source, if any
pub fn parse_category(source: &str) -> Option<String> {
    category_regex()
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|s| !s.is_empty())
}

/// Scans a directory tree for Python example scripts
pub struct DirectoryProvider {
    root: PathBuf,
    default_category: String,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>, default_category: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_category: default_category.into(),
        }
    }

    fn is_example(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);

        // Skip __pycache__, hidden dirs and private modules
        let hidden = rel.components().any(|c| {
            let s = c.as_os_str().to_string_lossy();
            s.starts_with('.') || s.starts_with('_')
        });

        !hidden && path.extension().and_then(|e| e.to_str()) == Some("py")
    }

    fn walk_error(&self, source: walkdir::Error) -> ProviderError {
        ProviderError::Walk {
            path: source.path().unwrap_or(&self.root).to_path_buf(),
            source,
        }
    }
}

impl ExampleProvider for DirectoryProvider {
    fn examples(&self) -> Result<Vec<ExampleSource>, ProviderError> {
        if !self.root.is_dir() {
            return Err(ProviderError::MissingDirectory(self.root.clone()));
        }

        let mut examples = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|source| self.walk_error(source))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.is_example(path) {
                tracing::debug!("Skipping {}", path.display());
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping non UTF-8 file name {}", path.display());
                continue;
            };

            let source = fs::read_to_string(path).map_err(|source| ProviderError::Io {
                path: path.to_path_buf(),
                source,
            })?;

            examples.push(ExampleSource {
                name: name.to_string(),
                category: parse_category(&source)
                    .unwrap_or_else(|| self.default_category.clone()),
                filename: path.to_path_buf(),
            });
        }

        tracing::info!(
            "Found {} examples in {}",
            examples.len(),
            self.root.display()
        );

        Ok(examples)
    }
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    category: String,
    filename: PathBuf,
}

/// Reads examples from a YAML manifest listing `{name, category, filename}`
pub struct ManifestProvider {
    path: PathBuf,
}

impl ManifestProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExampleProvider for ManifestProvider {
    fn examples(&self) -> Result<Vec<ExampleSource>, ProviderError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| ProviderError::Io {
            path: self.path.clone(),
            source,
        })?;

        let entries: Vec<ManifestEntry> = if contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_yaml::from_str(&contents).map_err(|source| ProviderError::Manifest {
                path: self.path.clone(),
                source,
            })?
        };

        let base = self.path.parent().unwrap_or_else(|| Path::new(""));

        Ok(entries
            .into_iter()
            .map(|entry| ExampleSource {
                filename: if entry.filename.is_absolute() {
                    entry.filename
                } else {
                    base.join(entry.filename)
                },
                name: entry.name,
                category: entry.category,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_category() {
        let src = "\"\"\"Doc\"\"\"\n# category: bar charts\nimport altair as alt\n";
        assert_eq!(parse_category(src), Some("bar charts".to_string()));
        assert_eq!(parse_category("#category:Maps  \n"), Some("Maps".to_string()));
        assert_eq!(parse_category("x = 1\n"), None);
    }

    #[test]
    fn test_directory_scan() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("bar.py"), "\"\"\"Bar\"\"\"\n# category: X\n").unwrap();
        fs::write(root.join("foo.py"), "\"\"\"Foo\"\"\"\n").unwrap();
        fs::write(root.join("__init__.py"), "").unwrap();
        fs::write(root.join("notes.txt"), "not an example").unwrap();
        fs::create_dir_all(root.join("__pycache__")).unwrap();
        fs::write(root.join("__pycache__").join("cached.py"), "").unwrap();

        let provider = DirectoryProvider::new(root, "Other");
        let mut examples = provider.examples().unwrap();
        examples.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].name, "bar");
        assert_eq!(examples[0].category, "X");
        assert_eq!(examples[0].filename, root.join("bar.py"));
        assert_eq!(examples[1].name, "foo");
        assert_eq!(examples[1].category, "Other");
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_aborts_scan() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("bar.py"), "\"\"\"Bar\"\"\"\n").unwrap();
        std::os::unix::fs::symlink(root.join("gone.py"), root.join("dangling.py")).unwrap();

        let provider = DirectoryProvider::new(root, "Other");
        match provider.examples() {
            Err(ProviderError::Walk { path, .. }) => assert_eq!(path, root.join("dangling.py")),
            other => panic!("expected a scan error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_examples_are_followed() {
        let dir = tempdir().unwrap();
        let shared = dir.path().join("shared");
        let root = dir.path().join("examples");
        fs::create_dir_all(&shared).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(shared.join("foo.py"), "\"\"\"Foo\"\"\"\n").unwrap();
        std::os::unix::fs::symlink(&shared, root.join("linked")).unwrap();

        let examples = DirectoryProvider::new(&root, "Other").examples().unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].filename, root.join("linked").join("foo.py"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let provider = DirectoryProvider::new(dir.path().join("nope"), "Other");
        assert!(matches!(
            provider.examples(),
            Err(ProviderError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_manifest_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("examples.yml");
        fs::write(
            &manifest,
            r#"
- name: foo
  category: Y
  filename: scripts/foo.py
- name: bar
  category: X
  filename: /abs/bar.py
"#,
        )
        .unwrap();

        let examples = ManifestProvider::new(&manifest).examples().unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].name, "foo");
        assert_eq!(examples[0].filename, dir.path().join("scripts/foo.py"));
        assert_eq!(examples[1].filename, PathBuf::from("/abs/bar.py"));
    }

    #[test]
    fn test_empty_manifest() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("examples.yml");
        fs::write(&manifest, "").unwrap();
        assert!(ManifestProvider::new(&manifest).examples().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_manifest() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("examples.yml");
        fs::write(&manifest, "- name: foo\n").unwrap();
        assert!(matches!(
            ManifestProvider::new(&manifest).examples(),
            Err(ProviderError::Manifest { .. })
        ));
    }
}
