use crate::error::{Result, ThemeError};

/// WCAG AAA threshold for normal text.
pub const DEFAULT_TARGET_CONTRAST: f64 = 7.0;

/// Number of colors requested from the extractor.
pub const DEFAULT_COLOR_COUNT: usize = 6;

/// Gaussian blur sigma applied before extraction.
pub const BLUR_SIGMA: f32 = 8.0;

/// Knobs consumed by the color pipeline. Polarity is passed separately since
/// one configuration drives both the light and the dark theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    /// Minimum contrast for text/background pairs.
    pub target_contrast: f64,
    /// Number of dominant colors to extract.
    pub color_count: usize,
    /// Blur the image before extraction so fine texture doesn't dominate.
    pub blur: bool,
    /// Saturation points added to hue-rotated fallback colors.
    pub fallback_saturation_boost: f64,
    /// Upper bound on a fallback color's saturation after the boost.
    pub fallback_saturation_cap: f64,
    /// Run button backgrounds through the accessible-button search.
    pub accessible_buttons: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            target_contrast: DEFAULT_TARGET_CONTRAST,
            color_count: DEFAULT_COLOR_COUNT,
            blur: true,
            fallback_saturation_boost: 0.0,
            fallback_saturation_cap: 100.0,
            accessible_buttons: false,
        }
    }
}

impl ThemeConfig {
    /// Reject settings the pipeline cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(1.0..=21.0).contains(&self.target_contrast) {
            return Err(ThemeError::InvalidInput(format!(
                "target contrast {} outside [1, 21]",
                self.target_contrast
            )));
        }
        if self.color_count == 0 || self.color_count > 255 {
            return Err(ThemeError::InvalidInput(format!(
                "color count {} outside [1, 255]",
                self.color_count
            )));
        }
        if !(-100.0..=100.0).contains(&self.fallback_saturation_boost) {
            return Err(ThemeError::InvalidInput(format!(
                "saturation boost {} outside [-100, 100]",
                self.fallback_saturation_boost
            )));
        }
        if !(0.0..=100.0).contains(&self.fallback_saturation_cap) {
            return Err(ThemeError::InvalidInput(format!(
                "saturation cap {} outside [0, 100]",
                self.fallback_saturation_cap
            )));
        }
        Ok(())
    }
}
