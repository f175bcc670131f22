pub mod assign;
pub mod classify;
pub mod contrast;
pub mod extract;

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ThemeMode;
use crate::config::ThemeConfig;
use assign::{assign_roles, RolePalette};

/// Extract an image's dominant colors and assign them to roles.
pub fn palette_for_image(
    path: &Path,
    mode: ThemeMode,
    config: &ThemeConfig,
) -> Result<RolePalette> {
    let colors = extract::dominant_colors(path, config)?;
    assign_roles(&colors, mode, config)
        .with_context(|| format!("failed to build palette from {}", path.display()))
}
