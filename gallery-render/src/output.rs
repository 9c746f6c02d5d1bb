//! Writing rendered gallery pages to disk.

use crate::templates::PageRenderer;
use gallery_core::ExampleRecord;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Files produced by one gallery build
#[derive(Debug, Clone, Default)]
pub struct GalleryReport {
    pub target_dir: PathBuf,
    pub index: PathBuf,
    /// One entry per example, in sort order
    pub pages: Vec<PathBuf>,
}

/// Writes the index and example pages into a target directory
pub struct GalleryWriter {
    target_dir: PathBuf,
    extension: String,
}

impl GalleryWriter {
    pub fn new(target_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            target_dir: target_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Render and write every page. Existing files are overwritten.
    pub fn write(
        &self,
        renderer: &PageRenderer,
        title: &str,
        gallery_ref: &str,
        records: &[ExampleRecord],
    ) -> Result<GalleryReport, RenderError> {
        fs::create_dir_all(&self.target_dir).map_err(|source| RenderError::Io {
            path: self.target_dir.clone(),
            source,
        })?;

        let index = self
            .target_dir
            .join(format!("index.{}", self.extension));
        write_page(&index, renderer.render_index(title, records, gallery_ref)?)?;

        let mut pages = Vec::with_capacity(records.len());
        for record in records {
            let path = self
                .target_dir
                .join(record.output_file_name(&self.extension));
            write_page(&path, renderer.render_example(record)?)?;
            tracing::debug!("Rendered: {}", record.name);
            pages.push(path);
        }

        tracing::info!(
            "Wrote gallery index and {} example pages to {}",
            pages.len(),
            self.target_dir.display()
        );

        Ok(GalleryReport {
            target_dir: self.target_dir.clone(),
            index,
            pages,
        })
    }
}

/// Write a page ending in exactly one newline
fn write_page(path: &Path, text: String) -> Result<(), RenderError> {
    let mut text = text.trim_end_matches('\n').to_string();
    text.push('\n');
    fs::write(path, text).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
