//! Splitting example scripts into docstring and code.
//!
//! The Python splitter uses tree-sitter to locate the module docstring: the
//! first statement of the module when it is a string literal. Everything on
//! the lines after the docstring is the example's code.

use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;
use std::sync::Mutex;
use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not find docstring in file {0:?}. A docstring is required for examples")]
    MissingDocstring(PathBuf),
}

/// An example file separated into its descriptive text and executable body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitSource {
    pub docstring: String,
    pub code: String,
    /// 1-based line where `code` begins
    pub starting_line: usize,
}

/// Separates an example file's descriptive text from its executable body
pub trait Splitter {
    fn split(&self, path: &Path) -> Result<SplitSource, SplitError>;
}

/// Python docstring splitter using tree-sitter for parsing
pub struct PythonSplitter {
    parser: Mutex<Parser>,
}

impl PythonSplitter {
    pub fn new() -> Self {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("Failed to set Python language for parser");
        Self {
            parser: Mutex::new(parser),
        }
    }

    fn parse(&self, source: &str) -> Result<Tree, String> {
        let mut parser = self
            .parser
            .lock()
            .map_err(|e| format!("Failed to acquire parser lock: {}", e))?;
        parser
            .parse(source, None)
            .ok_or_else(|| "Failed to parse source".to_string())
    }

    /// Split already loaded source text; `path` is only used in errors
    pub fn split_source(&self, path: &Path, source: &str) -> Result<SplitSource, SplitError> {
        let source = source.replace("\r\n", "\n");
        let tree = self.parse(&source).map_err(|message| SplitError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(SplitError::Parse {
                path: path.to_path_buf(),
                message: format!("syntax error near line {}", first_error_line(root)),
            });
        }

        let Some(statement) = first_statement(root) else {
            return Err(SplitError::MissingDocstring(path.to_path_buf()));
        };
        let docstring =
            docstring_of(statement, source.as_bytes()).map_err(|message| SplitError::Parse {
                path: path.to_path_buf(),
                message: format!(
                    "{} in docstring at line {}",
                    message,
                    statement.start_position().row + 1
                ),
            })?;
        let Some(docstring) = docstring else {
            return Err(SplitError::MissingDocstring(path.to_path_buf()));
        };
        if docstring.is_empty() {
            return Err(SplitError::MissingDocstring(path.to_path_buf()));
        }

        // Code is everything after the docstring's last line
        let end_row = statement.end_position().row;
        let code = source
            .splitn(end_row + 2, '\n')
            .nth(end_row + 1)
            .unwrap_or_default()
            .to_string();

        Ok(SplitSource {
            docstring,
            code,
            starting_line: end_row + 2,
        })
    }
}

impl Default for PythonSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Splitter for PythonSplitter {
    fn split(&self, path: &Path) -> Result<SplitSource, SplitError> {
        let source = std::fs::read_to_string(path).map_err(|source| SplitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.split_source(path, &source)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn first_statement(root: Node) -> Option<Node> {
    let mut cursor = root.walk();
    let first = root
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    first
}

fn first_error_line(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_line(child);
        }
    }
    node.start_position().row + 1
}

/// The string value of a docstring statement, if the statement is one.
/// Errors carry the message for a malformed escape sequence.
fn docstring_of(statement: Node, source: &[u8]) -> Result<Option<String>, String> {
    if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
        return Ok(None);
    }
    let Some(expr) = statement.named_child(0) else {
        return Ok(None);
    };
    match expr.kind() {
        "string" => literal_value(expr, source),
        "concatenated_string" => {
            let mut cursor = expr.walk();
            let mut value = String::new();
            for part in expr.named_children(&mut cursor) {
                if part.kind() != "string" {
                    continue;
                }
                match literal_value(part, source)? {
                    Some(text) => value.push_str(&text),
                    None => return Ok(None),
                }
            }
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

fn literal_value(node: Node, source: &[u8]) -> Result<Option<String>, String> {
    match node_text(node, source) {
        Some(text) => string_value(text),
        None => Ok(None),
    }
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> Option<&'a str> {
    std::str::from_utf8(&source[node.byte_range()]).ok()
}

/// Evaluate a Python string literal. Byte and f-strings are not docstrings.
fn string_value(literal: &str) -> Result<Option<String>, String> {
    let Some(prefix_len) = literal
        .find(|c: char| c == '"' || c == '\'')
        .filter(|&i| i <= 2)
    else {
        return Ok(None);
    };
    let prefix = literal[..prefix_len].to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return Ok(None);
    }
    let raw = prefix.contains('r');

    let body = &literal[prefix_len..];
    let Some(inner) = ["\"\"\"", "'''", "\"", "'"].iter().find_map(|quote| {
        body.strip_prefix(*quote)
            .and_then(|rest| rest.strip_suffix(*quote))
    }) else {
        return Ok(None);
    };

    if raw {
        Ok(Some(inner.to_string()))
    } else {
        unescape(inner).map(Some)
    }
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => out.push(octal_escape(escape, &mut chars)?),
            'x' => out.push(hex_escape(&mut chars, 'x', 2)?),
            'u' => out.push(hex_escape(&mut chars, 'u', 4)?),
            'U' => out.push(hex_escape(&mut chars, 'U', 8)?),
            'N' => return Err("named \\N{...} escapes are not supported".to_string()),
            // Unknown escapes stay verbatim, as in Python
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    Ok(out)
}

/// Up to three octal digits, the first already consumed
fn octal_escape(first: char, chars: &mut Peekable<Chars>) -> Result<char, String> {
    let mut value = first.to_digit(8).unwrap_or_default();
    for _ in 0..2 {
        let Some(digit) = chars.peek().and_then(|d| d.to_digit(8)) else {
            break;
        };
        value = value * 8 + digit;
        chars.next();
    }
    char::from_u32(value).ok_or_else(|| format!("invalid octal escape \\{:o}", value))
}

/// Exactly `digits` hex digits naming a code point
fn hex_escape(chars: &mut Peekable<Chars>, kind: char, digits: usize) -> Result<char, String> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or_else(|| format!("truncated \\{} escape", kind))?;
        value = value * 16 + digit;
    }
    char::from_u32(value)
        .ok_or_else(|| format!("illegal code point {:#x} in \\{} escape", value, kind))
}
