//! Build command implementation.
//!
//! The CLI plays the documentation host: it loads configuration, lets the
//! gallery register its assets, then fires the build-init callback once.

use anyhow::{Context, Result};
use gallery_core::{
    link, BuildContext, Config, DirectoryProvider, ExampleCollector, ExampleProvider,
    ExampleRecord, ExtraFields, ManifestProvider, PythonSplitter,
};
use gallery_render::{GalleryReport, GalleryWriter, PageRenderer};
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;

// Embed static assets (CSS) at compile time so they're available after cargo install
static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../static");

/// Stylesheet registered for every gallery page
pub const STYLESHEET: &str = "gallery.css";

/// Directory under the source root receiving registered stylesheets
const STATIC_DIR: &str = "_static";

/// Generate the gallery from a configuration file
pub fn build_gallery(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let mut ctx = BuildContext::new(config);
    setup(&mut ctx);
    let report = on_builder_inited(&mut ctx)?;
    copy_stylesheets(&ctx)?;

    println!(
        "✓ Generated {} example pages in {:?}",
        report.pages.len(),
        report.target_dir
    );
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent
pub fn load_config(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        tracing::warn!(
            "Config file {:?} not found; using defaults",
            config_path
        );
        return Ok(Config::default());
    }

    tracing::info!("Loading config from {:?}", config_path);
    Config::from_file(config_path).context("Failed to load configuration")
}

/// Register the gallery's assets with the host
pub fn setup(ctx: &mut BuildContext) {
    ctx.add_stylesheet(STYLESHEET);
}

/// Build-init callback: collect, link and render every example
pub fn on_builder_inited(ctx: &mut BuildContext) -> Result<GalleryReport> {
    ctx.begin_build()?;

    let config = ctx.config();
    tracing::info!("Building gallery: {}", config.gallery.title);

    let records = collect_examples(config, &ctx.extra_fields())?;

    let writer = GalleryWriter::new(config.target_dir(), config.gallery.extension.as_str());
    let report = writer
        .write(
            &PageRenderer::from_config(&config.gallery),
            &config.gallery.title,
            &config.gallery.reference,
            &records,
        )
        .context("Failed to write gallery pages")?;

    Ok(report)
}

/// Collect examples in name order with navigation links attached
pub fn collect_examples(config: &Config, extra: &ExtraFields) -> Result<Vec<ExampleRecord>> {
    let provider: Box<dyn ExampleProvider> = match config.manifest_path() {
        Some(manifest) => {
            tracing::debug!("Reading examples from manifest {:?}", manifest);
            Box::new(ManifestProvider::new(manifest))
        }
        None => Box::new(DirectoryProvider::new(
            config.examples_dir(),
            config.examples.default_category.as_str(),
        )),
    };
    let splitter = PythonSplitter::new();

    let mut records = ExampleCollector::new(provider.as_ref(), &splitter)
        .with_marker(config.examples.marker.as_str())
        .with_duplicate_policy(config.examples.on_duplicate)
        .collect(extra)
        .context("Failed to collect examples")?;

    link(&mut records);

    Ok(records)
}

/// Copy registered stylesheets from the embedded bundle into the source tree
fn copy_stylesheets(ctx: &BuildContext) -> Result<()> {
    let static_dir = ctx.source_root().join(STATIC_DIR);

    for name in ctx.stylesheets() {
        let Some(file) = STATIC_ASSETS.get_file(name) else {
            tracing::warn!("Stylesheet {} is not bundled; skipping", name);
            continue;
        };

        fs::create_dir_all(&static_dir)
            .with_context(|| format!("Failed to create {:?}", static_dir))?;
        let dest = static_dir.join(name);
        fs::write(&dest, file.contents())
            .with_context(|| format!("Failed to write {:?}", dest))?;
        tracing::debug!("Copied stylesheet {}", name);
    }

    Ok(())
}
