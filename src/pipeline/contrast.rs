//! WCAG contrast search.
//!
//! All searches walk HSL lightness in fixed steps with hue and saturation held
//! constant. They are bounded (at most 50 candidates) and never fail: when the
//! target is out of reach they settle for the best extreme available.

use crate::color::Color;

/// Lightness step, in percentage points, between search candidates.
pub const SEARCH_STEP: f64 = 2.0;

/// Accessible button backgrounds are never darkened below this lightness.
pub const BUTTON_LIGHTNESS_FLOOR: f64 = 5.0;

/// Accessible button backgrounds are never lightened above this lightness.
pub const BUTTON_LIGHTNESS_CEILING: f64 = 95.0;

/// Lightness used when neither text color can reach the target.
pub const BUTTON_FALLBACK_LIGHTNESS: f64 = 20.0;

/// Pick black or white, whichever contrasts more with `background`.
///
/// Pure black/white is the best any text color can do, so when neither meets
/// `target_ratio` the higher-contrast one is still returned.
pub fn ensure_readable_color(background: Color, target_ratio: f64) -> Color {
    let on_white = Color::contrast_ratio(&background, &Color::WHITE);
    let on_black = Color::contrast_ratio(&background, &Color::BLACK);
    let best = if on_white >= on_black {
        Color::WHITE
    } else {
        Color::BLACK
    };
    if on_white.max(on_black) < target_ratio {
        tracing::debug!(
            background = %background,
            target_ratio,
            best = %best,
            "neither black nor white reaches target contrast"
        );
    }
    best
}

/// Walk `base`'s lightness toward white or black until the candidate reaches
/// `target_ratio` against `base` itself.
///
/// Returns white (lighter) or black (darker) if the walk exhausts.
pub fn find_contrast_color(base: Color, target_ratio: f64, search_toward_lighter: bool) -> Color {
    let hsl = base.to_hsl();
    let mut lightness = hsl.lightness();
    if search_toward_lighter {
        while lightness < 100.0 {
            let candidate = Color::from_hsl(hsl.with_lightness(lightness));
            if Color::contrast_ratio(&candidate, &base) >= target_ratio {
                return candidate;
            }
            lightness += SEARCH_STEP;
        }
        Color::WHITE
    } else {
        while lightness > 0.0 {
            let candidate = Color::from_hsl(hsl.with_lightness(lightness));
            if Color::contrast_ratio(&candidate, &base) >= target_ratio {
                return candidate;
            }
            lightness -= SEARCH_STEP;
        }
        Color::BLACK
    }
}

/// Text color for `background` in a theme of the given polarity.
///
/// Tries a tinted color first (lighter on dark themes, darker on light
/// themes) and drops to plain black/white when the tinted search cannot reach
/// the target.
pub fn readable_text_on(background: Color, target_ratio: f64, is_dark: bool) -> Color {
    let tinted = find_contrast_color(background, target_ratio, is_dark);
    if Color::contrast_ratio(&tinted, &background) >= target_ratio {
        tinted
    } else {
        ensure_readable_color(background, target_ratio)
    }
}

/// Shift `base` until either white or black text on it reaches
/// `target_ratio`. Returns `(background, text)`.
///
/// White text is always tried first, darkening down to
/// [`BUTTON_LIGHTNESS_FLOOR`]; then black text, lightening up to
/// [`BUTTON_LIGHTNESS_CEILING`]. If both fail the background is pinned at
/// [`BUTTON_FALLBACK_LIGHTNESS`] with white text.
pub fn synthesize_accessible_button_colors(base: Color, target_ratio: f64) -> (Color, Color) {
    let hsl = base.to_hsl();

    let mut lightness = hsl.lightness();
    while lightness > BUTTON_LIGHTNESS_FLOOR {
        let candidate = Color::from_hsl(hsl.with_lightness(lightness));
        if Color::contrast_ratio(&candidate, &Color::WHITE) >= target_ratio {
            return (candidate, Color::WHITE);
        }
        lightness -= SEARCH_STEP;
    }

    let mut lightness = hsl.lightness();
    while lightness < BUTTON_LIGHTNESS_CEILING {
        let candidate = Color::from_hsl(hsl.with_lightness(lightness));
        if Color::contrast_ratio(&candidate, &Color::BLACK) >= target_ratio {
            return (candidate, Color::BLACK);
        }
        lightness += SEARCH_STEP;
    }

    tracing::debug!(
        base = %base,
        target_ratio,
        "button search exhausted, using fallback lightness"
    );
    (
        Color::from_hsl(hsl.with_lightness(BUTTON_FALLBACK_LIGHTNESS)),
        Color::WHITE,
    )
}
