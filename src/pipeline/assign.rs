use crate::cli::ThemeMode;
use crate::color::Color;
use crate::config::ThemeConfig;
use crate::error::{Result, ThemeError};
use crate::pipeline::classify::{classify, HueCategory};
use crate::pipeline::contrast::readable_text_on;

/// `light` role when no colors are available.
pub const FALLBACK_LIGHT: Color = Color::new(248, 249, 250);

/// `dark` role when no colors are available.
pub const FALLBACK_DARK: Color = Color::new(33, 37, 41);

/// Semantic color roles, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Danger,
    Light,
    Dark,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Primary,
        Role::Secondary,
        Role::Success,
        Role::Info,
        Role::Warning,
        Role::Danger,
        Role::Light,
        Role::Dark,
    ];

    /// Roles that get a searched text-emphasis color.
    pub const ACCENTS: [Role; 6] = [
        Role::Primary,
        Role::Secondary,
        Role::Success,
        Role::Info,
        Role::Warning,
        Role::Danger,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Success => "success",
            Role::Info => "info",
            Role::Warning => "warning",
            Role::Danger => "danger",
            Role::Light => "light",
            Role::Dark => "dark",
        }
    }

    /// Capitalized name, for comments and labels.
    pub fn title(self) -> &'static str {
        match self {
            Role::Primary => "Primary",
            Role::Secondary => "Secondary",
            Role::Success => "Success",
            Role::Info => "Info",
            Role::Warning => "Warning",
            Role::Danger => "Danger",
            Role::Light => "Light",
            Role::Dark => "Dark",
        }
    }
}

/// A hue-matched role: which categories satisfy it, in priority order, and
/// the hue used to synthesize it from `primary` when none match.
struct HueRole {
    categories: &'static [HueCategory],
    fallback_hue: f64,
}

const SUCCESS: HueRole = HueRole {
    categories: &[HueCategory::Green],
    fallback_hue: 120.0,
};
const WARNING: HueRole = HueRole {
    categories: &[HueCategory::Yellow, HueCategory::Orange],
    fallback_hue: 45.0,
};
const DANGER: HueRole = HueRole {
    categories: &[HueCategory::Red],
    fallback_hue: 0.0,
};
const INFO: HueRole = HueRole {
    categories: &[HueCategory::Cyan, HueCategory::Blue],
    fallback_hue: 195.0,
};

/// Every semantic color a theme is built from. All fields are always set.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePalette {
    pub mode: ThemeMode,
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub danger: Color,
    pub light: Color,
    pub dark: Color,
    pub body_bg: Color,
    pub body_color: Color,
}

impl RolePalette {
    pub fn get(&self, role: Role) -> Color {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Success => self.success,
            Role::Info => self.info,
            Role::Warning => self.warning,
            Role::Danger => self.danger,
            Role::Light => self.light,
            Role::Dark => self.dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }
}

/// Map extracted colors (dominant first) to semantic roles.
///
/// Roles whose hue family is missing from `colors` are synthesized by rotating
/// `primary`'s hue. Fails only on an empty list.
pub fn assign_roles(
    colors: &[Color],
    mode: ThemeMode,
    config: &ThemeConfig,
) -> Result<RolePalette> {
    if colors.is_empty() {
        return Err(ThemeError::InvalidInput(
            "cannot assign roles from an empty color list".to_string(),
        ));
    }

    let mut by_saturation = colors.to_vec();
    by_saturation.sort_by(|a, b| b.to_hsl().saturation().total_cmp(&a.to_hsl().saturation()));
    let primary = by_saturation[0];
    let secondary = by_saturation[by_saturation.len() - 1];

    let resolve = |role: &HueRole, name: &str| {
        find_by_hue(colors, role.categories).unwrap_or_else(|| {
            let synthesized = rotate_hue(primary, role.fallback_hue, config);
            tracing::debug!(
                role = name,
                color = %synthesized,
                "no matching hue, synthesized from primary"
            );
            synthesized
        })
    };
    let success = resolve(&SUCCESS, "success");
    let warning = resolve(&WARNING, "warning");
    let danger = resolve(&DANGER, "danger");
    let info = resolve(&INFO, "info");

    let (dark, light) = luminance_extremes(colors);
    let body_bg = if mode.is_dark() { dark } else { light };
    let body_color = readable_text_on(body_bg, config.target_contrast, mode.is_dark());

    tracing::debug!(
        ?mode,
        primary = %primary,
        secondary = %secondary,
        body_bg = %body_bg,
        body_color = %body_color,
        "assigned roles"
    );

    Ok(RolePalette {
        mode,
        primary,
        secondary,
        success,
        info,
        warning,
        danger,
        light,
        dark,
        body_bg,
        body_color,
    })
}

/// First color (in extraction order) in the first matching category.
/// Earlier categories take priority over earlier colors.
fn find_by_hue(colors: &[Color], categories: &[HueCategory]) -> Option<Color> {
    categories
        .iter()
        .find_map(|&category| colors.iter().copied().find(|&c| classify(c) == category))
}

/// Move `base` to `hue`, keeping lightness. Saturation gets the configured
/// boost and is then capped, so a cap below the base saturation lowers it.
fn rotate_hue(base: Color, hue: f64, config: &ThemeConfig) -> Color {
    let hsl = base.to_hsl();
    let saturation = (hsl.saturation() + config.fallback_saturation_boost)
        .min(config.fallback_saturation_cap);
    Color::from_hsl(hsl.with_hue(hue).with_saturation(saturation))
}

/// Darkest and lightest colors by relative luminance. On ties the darkest is
/// the earliest and the lightest is the latest in `colors`.
fn luminance_extremes(colors: &[Color]) -> (Color, Color) {
    let mut by_luminance = colors.to_vec();
    by_luminance.sort_by(|a, b| a.relative_luminance().total_cmp(&b.relative_luminance()));
    match (by_luminance.first(), by_luminance.last()) {
        (Some(&dark), Some(&light)) => (dark, light),
        _ => (FALLBACK_DARK, FALLBACK_LIGHT),
    }
}
