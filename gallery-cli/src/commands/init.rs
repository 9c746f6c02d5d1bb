//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../gallery.yml.example");

/// Initialize a new gallery project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_examples(root)?;

    println!("✓ gallery initialized in {:?}", root);
    println!("  - Edit gallery.yml to customize the gallery");
    println!("  - Add example scripts to examples/ and run `gallery build`");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("gallery.yml");
    if config_path.exists() {
        println!("gallery.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_examples(root: &Path) -> Result<()> {
    let examples = root.join("examples");
    let docs = root.join("docs");

    for dir in [&examples, &docs] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let sample = examples.join("simple_bar_chart.py");
    if !sample.exists() {
        fs::write(&sample, sample_example())
            .with_context(|| format!("Failed to write {:?}", sample))?;
        println!("Created {:?}", sample);
    }

    Ok(())
}

fn sample_example() -> &'static str {
    r#""""
Simple Bar Chart
----------------
This example shows a basic bar chart.
"""
# category: bar charts
import altair as alt
import pandas as pd

source = pd.DataFrame({
    'a': ['A', 'B', 'C', 'D', 'E'],
    'b': [28, 55, 43, 91, 81],
})

chart = alt.Chart(source).mark_bar().encode(
    x='a',
    y='b',
)
"#
}
