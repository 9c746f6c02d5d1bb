//! Askama template definitions.

use askama::Template;
use gallery_core::{config::GalleryConfig, ExampleRecord};

/// Prefix of every category's cross-reference label
pub const CATEGORY_REF_PREFIX: &str = "gallery-category-";

/// Columns of indentation applied to code inside the directive block
const CODE_INDENT: usize = 4;

/// One category on the index page with its members in sort order
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub name: &'a str,
    pub reference: String,
    /// Heading underline
    pub rule: String,
    pub examples: Vec<&'a ExampleRecord>,
}

/// Gallery index page template
#[derive(Template)]
#[template(path = "index.rst", escape = "none")]
pub struct IndexTemplate<'a> {
    pub gallery_ref: &'a str,
    pub title: &'a str,
    pub title_rule: String,
    pub intro: Option<&'a str>,
    pub image_dir: &'a str,
    pub groups: Vec<CategoryGroup<'a>>,
    pub examples: &'a [ExampleRecord],
}

/// Single example page template
#[derive(Template)]
#[template(path = "example.rst", escape = "none")]
pub struct ExampleTemplate<'a> {
    pub reference: String,
    pub gallery_ref: &'a str,
    pub prev_ref: Option<&'a str>,
    pub next_ref: Option<&'a str>,
    pub docstring: &'a str,
    pub directive: &'a str,
    pub code_below: bool,
    /// Code already indented for the directive body
    pub code: String,
}

/// Renders gallery pages with the page-level settings of one build
#[derive(Debug, Clone)]
pub struct PageRenderer {
    directive: String,
    intro: Option<String>,
    image_dir: String,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

impl PageRenderer {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            directive: config.directive.clone(),
            intro: config.intro.clone(),
            image_dir: config.image_dir.clone(),
        }
    }

    /// Render the index page for examples already sorted by name
    pub fn render_index(
        &self,
        title: &str,
        examples: &[ExampleRecord],
        gallery_ref: &str,
    ) -> Result<String, askama::Error> {
        IndexTemplate {
            gallery_ref,
            title,
            title_rule: underline(title, '-'),
            intro: self.intro.as_deref(),
            image_dir: &self.image_dir,
            groups: group_by_category(examples),
            examples,
        }
        .render()
    }

    pub fn render_example(&self, record: &ExampleRecord) -> Result<String, askama::Error> {
        ExampleTemplate {
            reference: record.reference(),
            gallery_ref: &record.extra.gallery_ref,
            prev_ref: record.prev_ref.as_deref(),
            next_ref: record.next_ref.as_deref(),
            docstring: &record.docstring,
            directive: &self.directive,
            code_below: record.extra.code_below,
            code: indent_block(&record.code, CODE_INDENT),
        }
        .render()
    }
}

/// Group examples by category in first-seen order.
///
/// A category appears once even when its members are not contiguous.
pub fn group_by_category(examples: &[ExampleRecord]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

    for example in examples {
        match groups.iter_mut().find(|g| g.name == example.category) {
            Some(group) => group.examples.push(example),
            None => groups.push(CategoryGroup {
                name: &example.category,
                reference: format!("{}{}", CATEGORY_REF_PREFIX, example.category),
                rule: underline(&example.category, '~'),
                examples: vec![example],
            }),
        }
    }

    groups
}

/// Heading underline as long as the heading
fn underline(text: &str, ch: char) -> String {
    std::iter::repeat(ch).take(text.chars().count()).collect()
}

/// Indent every non-empty line by `width` spaces
pub fn indent_block(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
