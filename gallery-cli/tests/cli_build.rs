use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_example(root: &Path, name: &str, category: &str) {
    let examples = root.join("examples");
    fs::create_dir_all(&examples).unwrap();
    fs::write(
        examples.join(format!("{}.py", name)),
        format!(
            "\"\"\"The {name} example.\"\"\"\n# category: {category}\nimport altair as alt\nchart = alt.Chart('{name}')\n"
        ),
    )
    .unwrap();
}

fn write_config(root: &Path) {
    fs::write(
        root.join("gallery.yml"),
        r#"
source_dir: docs
examples:
  dir: examples
gallery:
  title: Example Gallery
"#,
    )
    .unwrap();
}

#[allow(deprecated)]
fn gallery(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gallery").unwrap();
    cmd.current_dir(root);
    cmd
}

#[test]
fn build_writes_index_and_example_pages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_config(dir.path());
    write_example(dir.path(), "foo", "Y");
    write_example(dir.path(), "bar", "X");

    gallery(dir.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 example pages"));

    let target = dir.path().join("docs").join("gallery");
    let mut files: Vec<String> = fs::read_dir(&target)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().to_string()))
        .collect::<Result<_, _>>()?;
    files.sort();
    assert_eq!(files, vec!["bar.rst", "foo.rst", "index.rst"]);

    let bar = fs::read_to_string(target.join("bar.rst"))?;
    assert!(!bar.contains("< :ref:"));
    assert!(bar.contains(":ref:`gallery_foo` >"));

    let foo = fs::read_to_string(target.join("foo.rst"))?;
    assert!(foo.contains("< :ref:`gallery_bar`"));
    assert!(!foo.contains("` >"));

    let index = fs::read_to_string(target.join("index.rst"))?;
    let x = index.find("* :ref:`gallery-category-X`").unwrap();
    let y = index.find("* :ref:`gallery-category-Y`").unwrap();
    assert!(x < y);

    assert!(dir.path().join("docs/_static/gallery.css").exists());
    Ok(())
}

#[test]
fn build_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_config(dir.path());
    write_example(dir.path(), "a", "X");
    write_example(dir.path(), "b", "X");

    let read_all = |root: &Path| -> Vec<Vec<u8>> {
        ["index.rst", "a.rst", "b.rst"]
            .iter()
            .map(|f| fs::read(root.join("docs/gallery").join(f)).unwrap())
            .collect()
    };

    gallery(dir.path()).arg("build").assert().success();
    let first = read_all(dir.path());
    gallery(dir.path()).arg("build").assert().success();
    let second = read_all(dir.path());

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn build_with_no_examples_writes_index_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_config(dir.path());
    fs::create_dir_all(dir.path().join("examples"))?;

    gallery(dir.path()).arg("build").assert().success();

    let target = dir.path().join("docs").join("gallery");
    let files: Vec<_> = fs::read_dir(&target)?.collect();
    assert_eq!(files.len(), 1);
    let index = fs::read_to_string(target.join("index.rst"))?;
    assert!(!index.contains("gallery-category-"));
    Ok(())
}

#[test]
fn build_fails_on_example_without_docstring() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_config(dir.path());
    fs::create_dir_all(dir.path().join("examples"))?;
    fs::write(dir.path().join("examples/nodoc.py"), "x = 1\n")?;

    gallery(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("docstring"));
    Ok(())
}

#[test]
fn list_json_reports_neighbours() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_config(dir.path());
    write_example(dir.path(), "foo", "Y");
    write_example(dir.path(), "bar", "X");

    let assert = gallery(dir.path())
        .args(["list", "--json"])
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone())?;
    let entries: Value = serde_json::from_str(&output)?;
    let entries = entries.as_array().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "bar");
    assert_eq!(entries[0]["category"], "X");
    assert!(entries[0]["prev_ref"].is_null());
    assert_eq!(entries[0]["next_ref"], "gallery_foo");
    assert_eq!(entries[1]["prev_ref"], "gallery_bar");
    assert_eq!(entries[1]["starting_line"], 2);

    // Listing never writes pages
    assert!(!dir.path().join("docs").join("gallery").exists());
    Ok(())
}
