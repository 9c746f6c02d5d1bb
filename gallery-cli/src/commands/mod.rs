//! CLI command implementations.

pub mod build;
pub mod init;
pub mod list;

pub use build::build_gallery;
pub use init::init_project;
pub use list::list_examples;
