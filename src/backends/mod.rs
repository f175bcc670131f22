pub mod css;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::ThemeMode;
use crate::theme::ThemeTokenSet;

/// Everything a backend needs to render one output file.
#[derive(Debug, Clone)]
pub struct ThemeDocument {
    /// One token set per emitted polarity, light first.
    pub themes: Vec<ThemeTokenSet>,
    /// Image each polarity was generated from.
    pub sources: Vec<(ThemeMode, PathBuf)>,
    pub blur: bool,
}

/// Serializes token sets into a target format.
pub trait ThemeBackend {
    fn name(&self) -> &str;

    fn serialize(&self, document: &ThemeDocument) -> String;

    fn write_to(&self, document: &ThemeDocument, path: &Path) -> Result<()> {
        std::fs::write(path, self.serialize(document))
            .with_context(|| format!("failed to write theme to {}", path.display()))
    }
}
