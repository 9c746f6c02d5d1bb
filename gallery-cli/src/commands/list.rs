//! List command implementation.

use super::build::{collect_examples, load_config};
use anyhow::Result;
use gallery_core::{BuildContext, ExampleRecord};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    category: &'a str,
    filename: String,
    starting_line: usize,
    prev_ref: Option<&'a str>,
    next_ref: Option<&'a str>,
}

impl<'a> From<&'a ExampleRecord> for ListEntry<'a> {
    fn from(record: &'a ExampleRecord) -> Self {
        Self {
            name: &record.name,
            category: &record.category,
            filename: record.filename.display().to_string(),
            starting_line: record.starting_line,
            prev_ref: record.prev_ref.as_deref(),
            next_ref: record.next_ref.as_deref(),
        }
    }
}

/// Print the collected examples in gallery order without writing pages
pub fn list_examples(config_path: &Path, json: bool) -> Result<()> {
    let ctx = BuildContext::new(load_config(config_path)?);
    let records = collect_examples(ctx.config(), &ctx.extra_fields())?;
    let entries: Vec<ListEntry<'_>> = records.iter().map(ListEntry::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No examples found");
        return Ok(());
    }

    for entry in &entries {
        println!("{} [{}] {}", entry.name, entry.category, entry.filename);
        if let Some(prev) = entry.prev_ref {
            println!("  prev: {}", prev);
        }
        if let Some(next) = entry.next_ref {
            println!("  next: {}", next);
        }
    }

    Ok(())
}
