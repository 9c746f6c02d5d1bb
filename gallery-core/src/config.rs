//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the gallery.yml schema.
///
/// Every key is optional; a missing file section falls back to the
/// documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source root of the documentation host
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default)]
    pub examples: ExamplesConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Where examples come from and how their code is post-processed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesConfig {
    #[serde(default = "default_examples_dir")]
    pub dir: PathBuf,

    /// Optional YAML manifest; takes precedence over scanning `dir`
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    #[serde(default = "default_category")]
    pub default_category: String,

    /// Statement appended to every code body
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,
}

fn default_examples_dir() -> PathBuf {
    PathBuf::from("examples")
}

fn default_category() -> String {
    String::from("Other Examples")
}

pub(crate) fn default_marker() -> String {
    String::from("chart")
}

/// What to do when two examples share a name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Log a warning; the later page overwrites the earlier one
    #[default]
    Warn,
    /// Abort the build
    Error,
}

/// Settings the host registers for the gallery pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Target subdirectory under the source root
    #[serde(default = "default_gallery_dir")]
    pub dir: PathBuf,

    /// Cross-reference label of the index page
    #[serde(rename = "ref", default = "default_gallery_ref")]
    pub reference: String,

    #[serde(default = "default_gallery_title")]
    pub title: String,

    #[serde(default)]
    pub intro: Option<String>,

    /// Name of the directive that executes the example code
    #[serde(default = "default_directive")]
    pub directive: String,

    #[serde(default = "default_true")]
    pub code_below: bool,

    /// Extension of generated pages
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_image_dir")]
    pub image_dir: String,
}

fn default_gallery_dir() -> PathBuf {
    PathBuf::from("gallery")
}

fn default_gallery_ref() -> String {
    String::from("example-gallery")
}

fn default_gallery_title() -> String {
    String::from("Example Gallery")
}

fn default_directive() -> String {
    String::from("plot")
}

fn default_extension() -> String {
    String::from("rst")
}

fn default_image_dir() -> String {
    String::from("/_images")
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        Self {
            dir: default_examples_dir(),
            manifest: None,
            default_category: default_category(),
            marker: default_marker(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            dir: default_gallery_dir(),
            reference: default_gallery_ref(),
            title: default_gallery_title(),
            intro: None,
            directive: default_directive(),
            code_below: true,
            extension: default_extension(),
            image_dir: default_image_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            examples: ExamplesConfig::default(),
            gallery: GalleryConfig::default(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text. An empty document yields the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Absolute host source root, resolved relative to the config file
    pub fn source_root(&self) -> PathBuf {
        self.resolve_path(&self.source_dir)
    }

    /// Directory the gallery pages are written into
    pub fn target_dir(&self) -> PathBuf {
        self.source_root().join(&self.gallery.dir)
    }

    /// Directory scanned for example scripts
    pub fn examples_dir(&self) -> PathBuf {
        self.resolve_path(&self.examples.dir)
    }

    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.examples.manifest.as_ref().map(|p| self.resolve_path(p))
    }

    /// Resolve a path relative to the config file location, falling back to
    /// the working directory when there is no config file
    fn resolve_path(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_ref().and_then(|p| p.parent()) {
            parent.join(path)
        } else {
            path.to_path_buf()
        };
        std::path::absolute(&joined).unwrap_or(joined)
    }

    /// Get a config value using a dotted path (e.g., "gallery.title")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["source_dir"] => Some(self.source_dir.display().to_string()),
            ["gallery", "dir"] => Some(self.gallery.dir.display().to_string()),
            ["gallery", "ref"] => Some(self.gallery.reference.clone()),
            ["gallery", "title"] => Some(self.gallery.title.clone()),
            ["gallery", "intro"] => self.gallery.intro.clone(),
            ["gallery", "directive"] => Some(self.gallery.directive.clone()),
            ["gallery", "code_below"] => Some(self.gallery.code_below.to_string()),
            ["gallery", "extension"] => Some(self.gallery.extension.clone()),
            ["examples", "dir"] => Some(self.examples.dir.display().to_string()),
            ["examples", "marker"] => Some(self.examples.marker.clone()),
            _ => None,
        }
    }
}
