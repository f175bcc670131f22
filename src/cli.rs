use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::{ThemeConfig, DEFAULT_COLOR_COUNT, DEFAULT_TARGET_CONTRAST};

/// Generate accessible Bootstrap light/dark color themes from images.
#[derive(Parser, Debug)]
#[command(name = "swatchkit", version, about)]
pub struct Args {
    /// Image for the light theme (also used for the dark theme unless a
    /// `<stem>-dark.<ext>` sibling or --dark-image exists)
    pub image: PathBuf,

    /// Image for the dark theme
    #[arg(long)]
    pub dark_image: Option<PathBuf>,

    /// Emit only one theme
    #[arg(long, value_enum)]
    pub only: Option<ThemeMode>,

    /// Write CSS to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of colors to extract from each image
    #[arg(short = 'c', long = "colors", default_value_t = DEFAULT_COLOR_COUNT)]
    pub colors: usize,

    /// Minimum contrast ratio for text on backgrounds
    #[arg(long, default_value_t = DEFAULT_TARGET_CONTRAST)]
    pub min_contrast: f64,

    /// Skip the Gaussian blur before extraction
    #[arg(long)]
    pub no_blur: bool,

    /// Custom property prefix (`--<prefix>-primary`)
    #[arg(long, default_value = "bs")]
    pub prefix: String,

    /// Shift button backgrounds until their text meets --min-contrast
    #[arg(long)]
    pub accessible_buttons: bool,

    /// Saturation points added to roles synthesized from the primary hue
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub saturation_boost: f64,

    /// Highest saturation a synthesized role may reach after --saturation-boost
    #[arg(long, default_value_t = 100.0)]
    pub saturation_cap: f64,

    /// Open an interactive terminal preview instead of emitting CSS
    #[arg(long, conflicts_with = "output")]
    pub preview: bool,
}

impl Args {
    pub fn theme_config(&self) -> ThemeConfig {
        ThemeConfig {
            target_contrast: self.min_contrast,
            color_count: self.colors,
            blur: !self.no_blur,
            fallback_saturation_boost: self.saturation_boost,
            fallback_saturation_cap: self.saturation_cap,
            accessible_buttons: self.accessible_buttons,
        }
    }

    /// Image for the dark theme: `--dark-image`, else an existing
    /// `<stem>-dark.<ext>` next to the light image, else the light image.
    pub fn resolve_dark_image(&self) -> PathBuf {
        if let Some(path) = &self.dark_image {
            return path.clone();
        }
        dark_sibling(&self.image)
            .filter(|p| p.exists())
            .unwrap_or_else(|| self.image.clone())
    }

    /// Polarities to emit, light first.
    pub fn modes(&self) -> Vec<ThemeMode> {
        match self.only {
            Some(mode) => vec![mode],
            None => vec![ThemeMode::Light, ThemeMode::Dark],
        }
    }
}

fn dark_sibling(image: &Path) -> Option<PathBuf> {
    let stem = image.file_stem()?.to_str()?;
    let name = match image.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}-dark.{ext}"),
        None => format!("{stem}-dark"),
    };
    Some(image.with_file_name(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("swatchkit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_theme_config() {
        let args = parse(&["site.jpg"]);
        assert_eq!(args.theme_config(), ThemeConfig::default());
        assert_eq!(args.prefix, "bs");
        assert_eq!(args.modes(), vec![ThemeMode::Light, ThemeMode::Dark]);
    }

    #[test]
    fn flags_flow_into_config() {
        let args = parse(&[
            "site.jpg",
            "-c",
            "8",
            "--min-contrast",
            "4.5",
            "--no-blur",
            "--accessible-buttons",
            "--saturation-boost",
            "20",
            "--saturation-cap",
            "80",
            "--only",
            "dark",
        ]);
        let config = args.theme_config();
        assert_eq!(config.color_count, 8);
        assert_eq!(config.target_contrast, 4.5);
        assert!(!config.blur);
        assert!(config.accessible_buttons);
        assert_eq!(config.fallback_saturation_boost, 20.0);
        assert_eq!(config.fallback_saturation_cap, 80.0);
        assert_eq!(args.modes(), vec![ThemeMode::Dark]);
    }

    #[test]
    fn negative_saturation_boost_parses() {
        let args = parse(&["site.jpg", "--saturation-boost", "-10"]);
        assert_eq!(args.saturation_boost, -10.0);
    }

    #[test]
    fn preview_conflicts_with_output() {
        let result = Args::try_parse_from(["swatchkit", "a.png", "--preview", "-o", "out.css"]);
        assert!(result.is_err());
    }

    #[test]
    fn dark_sibling_keeps_extension() {
        assert_eq!(
            dark_sibling(Path::new("img/site.jpg")),
            Some(PathBuf::from("img/site-dark.jpg"))
        );
        assert_eq!(
            dark_sibling(Path::new("banner")),
            Some(PathBuf::from("banner-dark"))
        );
    }

    #[test]
    fn dark_image_resolution_order() {
        let dir = std::env::temp_dir().join("swatchkit-test-dark-sibling");
        std::fs::create_dir_all(&dir).unwrap();
        let light = dir.join("hero.png");
        let sibling = dir.join("hero-dark.png");
        let _ = std::fs::remove_file(&sibling);

        let args = parse(&[light.to_str().unwrap()]);
        assert_eq!(args.resolve_dark_image(), light);

        std::fs::write(&sibling, b"").unwrap();
        assert_eq!(args.resolve_dark_image(), sibling);

        let explicit = parse(&[light.to_str().unwrap(), "--dark-image", "other.png"]);
        assert_eq!(explicit.resolve_dark_image(), PathBuf::from("other.png"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn mode_helpers() {
        assert!(ThemeMode::Dark.is_dark());
        assert!(!ThemeMode::Light.is_dark());
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.to_string(), "dark");
    }
}
