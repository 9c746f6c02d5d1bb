//! Build context handed to the gallery by its documentation host.

use crate::config::Config;
use crate::models::ExtraFields;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContextError {
    #[error("The gallery has already been generated for this build")]
    AlreadyRan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Pending,
    Ran,
}

/// Configuration, source root and registered assets for one build
#[derive(Debug)]
pub struct BuildContext {
    config: Config,
    stylesheets: Vec<String>,
    state: RunState,
}

impl BuildContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stylesheets: Vec::new(),
            state: RunState::Pending,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Absolute host source root
    pub fn source_root(&self) -> PathBuf {
        self.config.source_root()
    }

    /// Register a stylesheet the host must ship with every page
    pub fn add_stylesheet(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.stylesheets.contains(&name) {
            self.stylesheets.push(name);
        }
    }

    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// Fields merged into every example record of this build
    pub fn extra_fields(&self) -> ExtraFields {
        ExtraFields {
            gallery_ref: self.config.gallery.reference.clone(),
            code_below: self.config.gallery.code_below,
        }
    }

    /// Mark the build-init callback as started. Only the first call succeeds.
    pub fn begin_build(&mut self) -> Result<(), ContextError> {
        match self.state {
            RunState::Pending => {
                self.state = RunState::Ran;
                Ok(())
            }
            RunState::Ran => Err(ContextError::AlreadyRan),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_once() {
        let mut ctx = BuildContext::new(Config::default());
        assert_eq!(ctx.begin_build(), Ok(()));
        assert_eq!(ctx.begin_build(), Err(ContextError::AlreadyRan));
    }

    #[test]
    fn test_stylesheets_deduplicated() {
        let mut ctx = BuildContext::new(Config::default());
        ctx.add_stylesheet("gallery.css");
        ctx.add_stylesheet("gallery.css");
        assert_eq!(ctx.stylesheets(), ["gallery.css".to_string()]);
    }

    #[test]
    fn test_extra_fields_from_config() {
        let mut config = Config::default();
        config.gallery.reference = "charts".into();
        config.gallery.code_below = false;

        let extra = BuildContext::new(config).extra_fields();
        assert_eq!(extra.gallery_ref, "charts");
        assert!(!extra.code_below);
    }
}
