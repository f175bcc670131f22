use palette::{FromColor, IntoColor, Lab, Srgb};

use crate::error::{Result, ThemeError};

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

/// Per-channel drift allowed for `c.darken(x).lighten(x)` when `x <= 15` and
/// the darkened lightness stays at or above 20. Typical drift is 1-2; strongly
/// saturated colors reach 3.
pub const ROUND_TRIP_TOLERANCE: u8 = 5;

/// An opaque 8-bit sRGB color. Equality is exact channel equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`, in either case.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| ThemeError::InvalidColor(format!("'{hex}': {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Serialize as a comma-separated decimal triple, `r, g, b`.
    pub fn to_channels(self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// CIELAB (D65), used only by extraction.
    pub fn to_lab(self) -> Lab {
        self.to_srgb_u8().into_format::<f32>().into_color()
    }

    pub fn from_lab(lab: Lab) -> Self {
        let srgb: Srgb<f32> = Srgb::from_color(lab);
        Self {
            r: (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
            g: (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
            b: (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    /// Convert to HSL (hue in degrees, saturation and lightness in percent).
    ///
    /// Achromatic colors report hue 0 and saturation 0. This and
    /// [`Color::from_hsl`] use the classic m1/m2 HLS formulation in `f64`, so
    /// truncated channels agree exactly with other HLS-based theme tools.
    pub fn to_hsl(self) -> HslColor {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| f64::from(c) / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        if max == min {
            return HslColor::clamped(0.0, 0.0, lightness * 100.0);
        }

        let range = max - min;
        let saturation = if lightness <= 0.5 {
            range / (max + min)
        } else {
            range / (2.0 - max - min)
        };
        let (rc, gc, bc) = ((max - r) / range, (max - g) / range, (max - b) / range);
        let sector = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        HslColor::clamped(
            (sector / 6.0).rem_euclid(1.0) * 360.0,
            saturation * 100.0,
            lightness * 100.0,
        )
    }

    /// Create from HSL.
    ///
    /// Channels are truncated rather than rounded, so `from_hsl(c.to_hsl())`
    /// may land one step below `c` on some channels.
    pub fn from_hsl(hsl: HslColor) -> Self {
        let hue = hsl.hue / 360.0;
        let saturation = hsl.saturation / 100.0;
        let lightness = hsl.lightness / 100.0;

        let (r, g, b) = if saturation == 0.0 {
            (lightness, lightness, lightness)
        } else {
            let m2 = if lightness <= 0.5 {
                lightness * (1.0 + saturation)
            } else {
                lightness + saturation - lightness * saturation
            };
            let m1 = 2.0 * lightness - m2;
            (
                hue_to_channel(m1, m2, hue + ONE_THIRD),
                hue_to_channel(m1, m2, hue),
                hue_to_channel(m1, m2, hue - ONE_THIRD),
            )
        };
        let truncate = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Self {
            r: truncate(r),
            g: truncate(g),
            b: truncate(b),
        }
    }

    /// WCAG 2.0 relative luminance in [0, 1]: 0 for black, exactly 1 for white.
    pub fn relative_luminance(self) -> f64 {
        fn linearize(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG contrast ratio, in [1, 21]. Symmetric in its arguments.
    pub fn contrast_ratio(c1: &Color, c2: &Color) -> f64 {
        let (a, b) = (c1.relative_luminance(), c2.relative_luminance());
        (a.max(b) + 0.05) / (a.min(b) + 0.05)
    }

    /// Raise HSL lightness by `amount` percentage points, clamped at 100.
    pub fn lighten(self, amount: f64) -> Color {
        let hsl = self.to_hsl();
        Color::from_hsl(hsl.with_lightness(hsl.lightness + amount))
    }

    /// Lower HSL lightness by `amount` percentage points, clamped at 0.
    pub fn darken(self, amount: f64) -> Color {
        let hsl = self.to_hsl();
        Color::from_hsl(hsl.with_lightness(hsl.lightness - amount))
    }

    /// Shift HSL saturation by `amount` points. Negative values desaturate.
    /// Saturation is clamped to [0, 100].
    pub fn saturate(self, amount: f64) -> Color {
        let hsl = self.to_hsl();
        Color::from_hsl(hsl.with_saturation(hsl.saturation + amount))
    }

    pub fn desaturate(self, amount: f64) -> Color {
        self.saturate(-amount)
    }
}

/// One channel of the HLS to RGB piecewise ramp, `hue` in turns.
fn hue_to_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

impl TryFrom<[i32; 3]> for Color {
    type Error = ThemeError;

    fn try_from(channels: [i32; 3]) -> Result<Self> {
        let channel = |v: i32| {
            u8::try_from(v).map_err(|_| {
                ThemeError::InvalidColor(format!("channel {v} outside 0..=255"))
            })
        };
        Ok(Self {
            r: channel(channels[0])?,
            g: channel(channels[1])?,
            b: channel(channels[2])?,
        })
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color in HSL space: hue in [0, 360), saturation and lightness in [0, 100].
///
/// This is a lossy view of [`Color`]; see [`Color::from_hsl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl HslColor {
    /// Build a caller-supplied HSL value, rejecting anything out of range.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Result<Self> {
        if !(0.0..360.0).contains(&hue) {
            return Err(ThemeError::InvalidColor(format!(
                "hue {hue} outside [0, 360)"
            )));
        }
        if !(0.0..=100.0).contains(&saturation) {
            return Err(ThemeError::InvalidColor(format!(
                "saturation {saturation} outside [0, 100]"
            )));
        }
        if !(0.0..=100.0).contains(&lightness) {
            return Err(ThemeError::InvalidColor(format!(
                "lightness {lightness} outside [0, 100]"
            )));
        }
        Ok(Self {
            hue,
            saturation,
            lightness,
        })
    }

    /// Build from computed components: hue wraps, saturation and lightness clamp.
    pub(crate) fn clamped(hue: f64, saturation: f64, lightness: f64) -> Self {
        let not_nan = |v: f64| if v.is_nan() { 0.0 } else { v };
        let hue = if hue.is_finite() { hue.rem_euclid(360.0) } else { 0.0 };
        Self {
            // rem_euclid can round up to exactly 360 for tiny negative inputs
            hue: if hue >= 360.0 { 0.0 } else { hue },
            saturation: not_nan(saturation).clamp(0.0, 100.0),
            lightness: not_nan(lightness).clamp(0.0, 100.0),
        }
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn with_hue(self, hue: f64) -> Self {
        Self::clamped(hue, self.saturation, self.lightness)
    }

    pub fn with_saturation(self, saturation: f64) -> Self {
        Self::clamped(self.hue, saturation, self.lightness)
    }

    pub fn with_lightness(self, lightness: f64) -> Self {
        Self::clamped(self.hue, self.saturation, lightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BLACK: Color = Color::BLACK;
    const WHITE: Color = Color::WHITE;

    fn assert_within(expected: Color, actual: Color, tolerance: u8) {
        let drift = expected
            .r
            .abs_diff(actual.r)
            .max(expected.g.abs_diff(actual.g))
            .max(expected.b.abs_diff(actual.b));
        assert!(
            drift <= tolerance,
            "{expected} drifted to {actual} ({drift} > {tolerance})"
        );
    }

    #[test]
    fn parses_hex_forms() {
        for input in ["#ff8800", "#FF8800", "ff8800", "Ff8800"] {
            assert_eq!(Color::from_hex(input).unwrap(), Color::new(255, 136, 0), "{input}");
        }
        assert_eq!(Color::new(170, 187, 204).to_hex(), "#aabbcc");
    }

    #[test]
    fn rejects_malformed_hex() {
        for input in ["#fff", "", "#ff88001", "#gggggg", "ff 800"] {
            assert!(
                matches!(Color::from_hex(input), Err(ThemeError::InvalidColor(_))),
                "{input}"
            );
        }
        // multi-byte input must not panic on slicing
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn channels_out_of_range_are_rejected() {
        assert_eq!(
            Color::try_from([12, 34, 56]).unwrap(),
            Color::new(12, 34, 56)
        );
        assert!(matches!(
            Color::try_from([256, 0, 0]),
            Err(ThemeError::InvalidColor(_))
        ));
        assert!(Color::try_from([0, -1, 0]).is_err());
    }

    #[test]
    fn channels_formatting() {
        assert_eq!(Color::new(33, 37, 41).to_channels(), "33, 37, 41");
    }

    #[test]
    fn hsl_rejects_out_of_range_components() {
        assert!(HslColor::new(360.0, 50.0, 50.0).is_err());
        assert!(HslColor::new(-1.0, 50.0, 50.0).is_err());
        assert!(HslColor::new(10.0, 100.5, 50.0).is_err());
        assert!(HslColor::new(10.0, 50.0, -0.1).is_err());
        assert!(HslColor::new(f64::NAN, 50.0, 50.0).is_err());
        assert!(HslColor::new(359.9, 100.0, 0.0).is_ok());
    }

    #[test]
    fn hsl_of_primaries() {
        let red = Color::new(255, 0, 0).to_hsl();
        assert!(red.hue().abs() < 1e-9);
        assert!((red.saturation() - 100.0).abs() < 1e-9);
        assert!((red.lightness() - 50.0).abs() < 1e-9);

        let blue = Color::new(0, 0, 255).to_hsl();
        assert!((blue.hue() - 240.0).abs() < 1e-9);

        let gray = Color::new(128, 128, 128).to_hsl();
        assert_eq!(gray.saturation(), 0.0);
        assert_eq!(gray.hue(), 0.0);
    }

    #[test]
    fn hsl_round_trip_within_one_step() {
        let colors = [
            Color::new(200, 100, 50),
            Color::new(0, 255, 0),
            Color::new(128, 128, 128),
            Color::new(30, 180, 60),
            BLACK,
            WHITE,
        ];
        for original in colors {
            let recovered = Color::from_hsl(original.to_hsl());
            assert_within(original, recovered, 1);
        }
    }

    #[test]
    fn from_hsl_truncates_channels() {
        // hsl(0, 100%, 25%) is r = 127.5 exactly; truncation gives 127
        let hsl = HslColor::new(0.0, 100.0, 25.0).unwrap();
        assert_eq!(Color::from_hsl(hsl), Color::new(127, 0, 0));
    }

    #[test]
    fn hue_rotation_matches_hls_reference() {
        // Reference triples from the m1/m2 HLS formulation with truncation.
        let cases = [
            ((165, 77, 202), 120.0, (77, 201, 77)),
            ((40, 120, 220), 120.0, (39, 220, 39)),
            ((40, 120, 220), 45.0, (220, 175, 39)),
            ((200, 30, 30), 195.0, (30, 157, 200)),
            ((230, 120, 20), 0.0, (230, 20, 20)),
            ((30, 180, 60), 45.0, (180, 142, 29)),
        ];
        for ((r, g, b), hue, (er, eg, eb)) in cases {
            let rotated = Color::from_hsl(Color::new(r, g, b).to_hsl().with_hue(hue));
            assert_eq!(rotated, Color::new(er, eg, eb), "({r}, {g}, {b}) to {hue}");
        }
    }

    #[test]
    fn lightness_steps_match_hls_reference() {
        assert_eq!(Color::new(40, 120, 220).lighten(8.0), Color::new(75, 142, 225));
        assert_eq!(Color::new(40, 120, 220).darken(12.0), Color::new(27, 91, 170));
        assert_eq!(Color::new(200, 30, 30).lighten(8.0), Color::new(223, 47, 47));
        assert_eq!(Color::new(230, 120, 20).darken(12.0), Color::new(173, 90, 15));
        assert_eq!(Color::new(30, 180, 60).lighten(8.0), Color::new(35, 214, 71));
    }

    #[test]
    fn lab_conversion_is_near_lossless() {
        for c in [Color::new(200, 100, 50), Color::new(0, 255, 0), BLACK, WHITE] {
            assert_within(c, Color::from_lab(c.to_lab()), 1);
        }
    }

    #[test]
    fn contrast_ratio_bounds() {
        assert!((Color::contrast_ratio(&BLACK, &WHITE) - 21.0).abs() < 1e-9);
        assert_eq!(Color::contrast_ratio(&WHITE, &WHITE), 1.0);
    }

    proptest! {
        #[test]
        fn contrast_ratio_ignores_argument_order(
            a in any::<(u8, u8, u8)>(),
            b in any::<(u8, u8, u8)>(),
        ) {
            let (a, b) = (Color::new(a.0, a.1, a.2), Color::new(b.0, b.1, b.2));
            let ratio = Color::contrast_ratio(&a, &b);
            prop_assert_eq!(ratio, Color::contrast_ratio(&b, &a));
            prop_assert!((1.0..=21.0 + 1e-9).contains(&ratio));
        }

        #[test]
        fn contrast_with_itself_is_one(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let c = Color::new(r, g, b);
            prop_assert_eq!(Color::contrast_ratio(&c, &c), 1.0);
        }
    }

    #[test]
    fn gray_119_sits_just_above_aa_against_black() {
        let ratio = Color::contrast_ratio(&Color::new(119, 119, 119), &BLACK);
        assert!((4.5..5.0).contains(&ratio), "got {ratio}");
    }

    #[test]
    fn relative_luminance_extremes_are_exact() {
        assert_eq!(BLACK.relative_luminance(), 0.0);
        assert_eq!(WHITE.relative_luminance(), 1.0);
    }

    #[test]
    fn lighten_increases_luminance() {
        let dark = Color::new(50, 50, 50);
        let lighter = dark.lighten(20.0);
        assert!(lighter.relative_luminance() > dark.relative_luminance());
    }

    #[test]
    fn lighten_and_darken_clamp() {
        assert_eq!(WHITE.lighten(50.0), WHITE);
        assert_eq!(BLACK.darken(50.0), BLACK);
        // m2 at lightness 100 lands a hair under 1.0, so one channel truncates
        // to 254
        assert_eq!(Color::new(10, 80, 160).lighten(100.0), Color::new(255, 255, 254));
        assert_eq!(Color::new(10, 80, 160).darken(100.0), BLACK);
    }

    #[test]
    fn lighten_after_darken_is_within_tolerance() {
        // Each step re-enters through truncating HSL, so exact recovery is not
        // expected.
        let colors = [
            Color::new(200, 30, 30),
            Color::new(30, 180, 60),
            Color::new(240, 200, 40),
            Color::new(40, 120, 220),
            Color::new(128, 128, 128),
        ];
        for c in colors {
            for amount in [5.0, 10.0, 15.0] {
                assert_within(c, c.darken(amount).lighten(amount), ROUND_TRIP_TOLERANCE);
            }
        }
    }

    #[test]
    fn saturate_and_desaturate() {
        let muted = Color::new(150, 110, 110);
        let vivid = muted.saturate(30.0);
        assert!(vivid.to_hsl().saturation() > muted.to_hsl().saturation());

        let gray = muted.desaturate(100.0);
        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
    }

    #[test]
    fn saturate_preserves_approximate_hue() {
        let color = Color::new(200, 50, 50);
        let adjusted = color.desaturate(20.0);
        let diff = (color.to_hsl().hue() - adjusted.to_hsl().hue()).abs();
        assert!(diff < 2.0 || diff > 358.0, "hue drifted by {diff}");
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Color::new(171, 205, 239).to_string(), "#abcdef");
    }
}
