use crate::color::Color;

/// Colors below this HSL saturation carry no usable hue.
pub const NEUTRAL_SATURATION: f64 = 15.0;

/// Coarse hue family of a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HueCategory {
    Neutral,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
}

/// Exclusive upper bound of each hue bucket, in degrees. Hues at or above the
/// last bound wrap around to red.
const HUE_BUCKETS: [(f64, HueCategory); 8] = [
    (15.0, HueCategory::Red),
    (45.0, HueCategory::Orange),
    (75.0, HueCategory::Yellow),
    (150.0, HueCategory::Green),
    (195.0, HueCategory::Cyan),
    (255.0, HueCategory::Blue),
    (285.0, HueCategory::Purple),
    (345.0, HueCategory::Pink),
];

impl HueCategory {
    /// Bucket a hue (degrees) and saturation (percent).
    pub fn from_hue_saturation(hue: f64, saturation: f64) -> Self {
        if saturation < NEUTRAL_SATURATION {
            return Self::Neutral;
        }
        HUE_BUCKETS
            .iter()
            .find(|(upper, _)| hue < *upper)
            .map_or(Self::Red, |&(_, category)| category)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}

impl std::fmt::Display for HueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a color by its HSL hue.
pub fn classify(color: Color) -> HueCategory {
    let hsl = color.to_hsl();
    HueCategory::from_hue_saturation(hsl.hue(), hsl.saturation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use HueCategory::*;

    #[test]
    fn low_saturation_is_neutral() {
        assert_eq!(HueCategory::from_hue_saturation(0.0, 14.99), Neutral);
        assert_eq!(HueCategory::from_hue_saturation(120.0, 15.0), Green);
        assert_eq!(classify(Color::new(128, 128, 128)), Neutral);
        assert_eq!(classify(Color::WHITE), Neutral);
        assert_eq!(classify(Color::BLACK), Neutral);
    }

    #[test]
    fn bucket_boundaries_are_half_open() {
        let cases = [
            (0.0, Red),
            (14.9, Red),
            (15.0, Orange),
            (44.9, Orange),
            (45.0, Yellow),
            (74.9, Yellow),
            (75.0, Green),
            (149.9, Green),
            (150.0, Cyan),
            (194.9, Cyan),
            (195.0, Blue),
            (254.9, Blue),
            (255.0, Purple),
            (284.9, Purple),
            (285.0, Pink),
            (344.9, Pink),
            (345.0, Red),
            (359.9, Red),
        ];
        for (hue, expected) in cases {
            assert_eq!(
                HueCategory::from_hue_saturation(hue, 50.0),
                expected,
                "hue {hue}"
            );
        }
    }

    #[test]
    fn classifies_saturated_colors() {
        assert_eq!(classify(Color::new(200, 30, 30)), Red);
        assert_eq!(classify(Color::new(230, 120, 20)), Orange);
        assert_eq!(classify(Color::new(240, 200, 40)), Yellow);
        assert_eq!(classify(Color::new(30, 180, 60)), Green);
        assert_eq!(classify(Color::new(30, 190, 200)), Cyan);
        assert_eq!(classify(Color::new(40, 120, 220)), Blue);
        assert_eq!(classify(Color::new(130, 40, 210)), Purple);
        assert_eq!(classify(Color::new(220, 40, 150)), Pink);
    }

    #[test]
    fn display_uses_lowercase_name() {
        assert_eq!(Cyan.to_string(), "cyan");
    }
}
