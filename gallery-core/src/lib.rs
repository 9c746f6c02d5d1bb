//! # gallery-core
//!
//! Core library for the example gallery generator.
//!
//! This crate discovers example scripts, splits them into docstring and
//! code, orders them and links neighbouring examples together.

pub mod collector;
pub mod config;
pub mod context;
pub mod models;
pub mod navigation;
pub mod provider;
pub mod splitter;

pub use collector::{CollectError, ExampleCollector};
pub use config::{Config, DuplicatePolicy};
pub use context::{BuildContext, ContextError};
pub use models::{reference, ExampleRecord, ExampleSource, ExtraFields};
pub use navigation::link;
pub use provider::{DirectoryProvider, ExampleProvider, ManifestProvider, ProviderError};
pub use splitter::{PythonSplitter, SplitError, SplitSource, Splitter};
