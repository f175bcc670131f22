//! Derivation of the full design-token set from a role palette.
//!
//! Tokens are named without the serializer's prefix (`primary-rgb`, not
//! `--bs-primary-rgb`) and grouped in emission order.

use crate::cli::ThemeMode;
use crate::color::Color;
use crate::config::ThemeConfig;
use crate::pipeline::assign::{Role, RolePalette};
use crate::pipeline::contrast::{find_contrast_color, synthesize_accessible_button_colors};

const BG_SUBTLE_STEP: f64 = 70.0;
const BORDER_SUBTLE_STEP: f64 = 50.0;
const BORDER_STEP: f64 = 15.0;
const MUTED_STEP: f64 = 30.0;
const LINK_HOVER_STEP: f64 = 10.0;

const BUTTON_HOVER_STEP: f64 = 8.0;
const BUTTON_ACTIVE_STEP: f64 = 12.0;
const BUTTON_BORDER_STEP: f64 = 15.0;
const BUTTON_STATE_BORDER_STEP: f64 = 5.0;
const BUTTON_FOCUS_STEP: f64 = 30.0;

/// Button backgrounds darker than this get white text.
const BUTTON_TEXT_LUMINANCE_THRESHOLD: f64 = 0.5;

/// A rendered token value.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// `#rrggbb`
    Hex(Color),
    /// `r, g, b`, for use inside `rgba(var(...), alpha)`.
    Channels(Color),
    /// Anything else, emitted verbatim (`rgba(...)`, `transparent`).
    Literal(String),
}

impl TokenValue {
    /// The color behind this value, if it has one.
    pub fn color(&self) -> Option<Color> {
        match self {
            TokenValue::Hex(c) | TokenValue::Channels(c) => Some(*c),
            TokenValue::Literal(_) => None,
        }
    }
}

impl std::fmt::Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Hex(c) => write!(f, "{}", c.to_hex()),
            TokenValue::Channels(c) => f.write_str(&c.to_channels()),
            TokenValue::Literal(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub name: String,
    pub value: TokenValue,
}

/// A titled run of tokens, emitted together.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGroup {
    pub title: String,
    /// Heading shared by consecutive subgroups (the per-role button groups).
    pub section: Option<&'static str>,
    pub tokens: Vec<Token>,
}

impl TokenGroup {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            section: None,
            tokens: Vec::new(),
        }
    }

    fn hex(&mut self, name: impl Into<String>, color: Color) -> &mut Self {
        self.push(name, TokenValue::Hex(color))
    }

    fn channels(&mut self, name: impl Into<String>, color: Color) -> &mut Self {
        self.push(name, TokenValue::Channels(color))
    }

    /// `name` as hex plus `name-rgb` as channels.
    fn hex_and_rgb(&mut self, name: &str, color: Color) -> &mut Self {
        self.hex(name, color).channels(format!("{name}-rgb"), color)
    }

    fn literal(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.push(name, TokenValue::Literal(value.into()))
    }

    fn push(&mut self, name: impl Into<String>, value: TokenValue) -> &mut Self {
        self.tokens.push(Token {
            name: name.into(),
            value,
        });
        self
    }
}

/// Colors for one button variant across its interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStates {
    pub text: Color,
    pub base: Color,
    pub border: Color,
    pub hover: Color,
    pub hover_border: Color,
    pub active: Color,
    pub active_border: Color,
    pub focus: Color,
}

impl ButtonStates {
    /// Derive states for a button whose background is `base`.
    ///
    /// Text is white on backgrounds below 0.5 luminance and black otherwise;
    /// one text color serves every state. Hover and active move away from the
    /// text color: darker under white text, lighter under black text.
    pub fn derive(base: Color) -> Self {
        let text = if base.relative_luminance() < BUTTON_TEXT_LUMINANCE_THRESHOLD {
            Color::WHITE
        } else {
            Color::BLACK
        };
        Self::with_text(base, text)
    }

    /// Like [`ButtonStates::derive`], but first moves `base` until its text
    /// reaches `target_ratio`.
    pub fn accessible(base: Color, target_ratio: f64) -> Self {
        let (base, text) = synthesize_accessible_button_colors(base, target_ratio);
        Self::with_text(base, text)
    }

    /// States as the emitted theme has them: accessible when
    /// `config.accessible_buttons` is set, derived otherwise.
    pub fn for_config(base: Color, config: &ThemeConfig) -> Self {
        if config.accessible_buttons {
            Self::accessible(base, config.target_contrast)
        } else {
            Self::derive(base)
        }
    }

    fn with_text(base: Color, text: Color) -> Self {
        let step = |amount: f64| {
            if text == Color::WHITE {
                base.darken(amount)
            } else {
                base.lighten(amount)
            }
        };
        let hover = step(BUTTON_HOVER_STEP);
        let active = step(BUTTON_ACTIVE_STEP);
        Self {
            text,
            base,
            border: base.darken(BUTTON_BORDER_STEP),
            hover,
            hover_border: hover.darken(BUTTON_STATE_BORDER_STEP),
            active,
            active_border: active.darken(BUTTON_STATE_BORDER_STEP),
            focus: base.lighten(BUTTON_FOCUS_STEP),
        }
    }
}

/// Fixed neutrals that don't derive from the image.
struct Neutrals {
    light_text_emphasis: Color,
    dark_text_emphasis: Color,
    secondary_color: &'static str,
    secondary_color_rgb: Color,
    secondary_bg: Color,
    tertiary_color: &'static str,
    tertiary_color_rgb: Color,
    tertiary_bg: Color,
    border_translucent: &'static str,
}

const LIGHT_NEUTRALS: Neutrals = Neutrals {
    light_text_emphasis: Color::new(73, 80, 87),
    dark_text_emphasis: Color::new(73, 80, 87),
    secondary_color: "rgba(33, 37, 41, 0.75)",
    secondary_color_rgb: Color::new(33, 37, 41),
    secondary_bg: Color::new(233, 236, 239),
    tertiary_color: "rgba(33, 37, 41, 0.5)",
    tertiary_color_rgb: Color::new(33, 37, 41),
    tertiary_bg: Color::new(248, 249, 250),
    border_translucent: "rgba(0, 0, 0, 0.175)",
};

const DARK_NEUTRALS: Neutrals = Neutrals {
    light_text_emphasis: Color::new(248, 249, 250),
    dark_text_emphasis: Color::new(222, 226, 230),
    secondary_color: "rgba(222, 226, 230, 0.75)",
    secondary_color_rgb: Color::new(222, 226, 230),
    secondary_bg: Color::new(52, 58, 64),
    tertiary_color: "rgba(222, 226, 230, 0.5)",
    tertiary_color_rgb: Color::new(222, 226, 230),
    tertiary_bg: Color::new(43, 48, 53),
    border_translucent: "rgba(255, 255, 255, 0.15)",
};

/// Every token of one theme, grouped and ordered for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeTokenSet {
    pub mode: ThemeMode,
    pub groups: Vec<TokenGroup>,
}

impl ThemeTokenSet {
    /// Derive all tokens from a finished palette.
    pub fn build(palette: &RolePalette, config: &ThemeConfig) -> Self {
        let is_dark = palette.is_dark();
        let neutrals = if is_dark { &DARK_NEUTRALS } else { &LIGHT_NEUTRALS };
        // Subtle variants fade toward the page background.
        let toward_bg = |c: Color, amount: f64| {
            if is_dark {
                c.darken(amount)
            } else {
                c.lighten(amount)
            }
        };
        // Hover/border variants move away from the page background.
        let away_from_bg = |c: Color, amount: f64| {
            if is_dark {
                c.lighten(amount)
            } else {
                c.darken(amount)
            }
        };

        let mut groups = Vec::new();

        let mut theme = TokenGroup::new("THEME COLORS");
        for role in Role::ALL {
            theme.hex_and_rgb(role.name(), palette.get(role));
        }
        theme
            .hex_and_rgb("white", Color::WHITE)
            .hex_and_rgb("black", Color::BLACK);
        groups.push(theme);

        let mut emphasis = TokenGroup::new("TEXT EMPHASIS");
        for role in Role::ACCENTS {
            let text = find_contrast_color(palette.get(role), config.target_contrast, is_dark);
            emphasis.hex(format!("{}-text-emphasis", role.name()), text);
        }
        emphasis
            .hex("light-text-emphasis", neutrals.light_text_emphasis)
            .hex("dark-text-emphasis", neutrals.dark_text_emphasis);
        groups.push(emphasis);

        let mut bg_subtle = TokenGroup::new("BACKGROUND SUBTLE");
        let mut border_subtle = TokenGroup::new("BORDER SUBTLE");
        for role in Role::ALL {
            let color = palette.get(role);
            bg_subtle.hex(
                format!("{}-bg-subtle", role.name()),
                toward_bg(color, BG_SUBTLE_STEP),
            );
            border_subtle.hex(
                format!("{}-border-subtle", role.name()),
                toward_bg(color, BORDER_SUBTLE_STEP),
            );
        }
        groups.push(bg_subtle);
        groups.push(border_subtle);

        let mut body = TokenGroup::new("BODY");
        body.hex_and_rgb("body-bg", palette.body_bg)
            .hex_and_rgb("body-color", palette.body_color);
        groups.push(body);

        let mut emphasis_color = TokenGroup::new("EMPHASIS");
        let (strong, muted) = if is_dark {
            (Color::WHITE, palette.dark.lighten(MUTED_STEP))
        } else {
            (Color::BLACK, palette.light.darken(MUTED_STEP))
        };
        emphasis_color
            .hex_and_rgb("emphasis-color", strong)
            .hex("muted-color", muted);
        groups.push(emphasis_color);

        let mut secondary = TokenGroup::new("SECONDARY");
        secondary
            .literal("secondary-color", neutrals.secondary_color)
            .channels("secondary-color-rgb", neutrals.secondary_color_rgb)
            .hex_and_rgb("secondary-bg", neutrals.secondary_bg);
        groups.push(secondary);

        let mut tertiary = TokenGroup::new("TERTIARY");
        tertiary
            .literal("tertiary-color", neutrals.tertiary_color)
            .channels("tertiary-color-rgb", neutrals.tertiary_color_rgb)
            .hex_and_rgb("tertiary-bg", neutrals.tertiary_bg);
        groups.push(tertiary);

        let mut links = TokenGroup::new("LINKS");
        links
            .hex_and_rgb("link-color", palette.primary)
            .hex_and_rgb(
                "link-hover-color",
                away_from_bg(palette.primary, LINK_HOVER_STEP),
            );
        groups.push(links);

        let mut borders = TokenGroup::new("BORDERS");
        let border = if is_dark {
            palette.dark.lighten(BORDER_STEP)
        } else {
            palette.light.darken(BORDER_STEP)
        };
        borders
            .hex("border-color", border)
            .literal("border-color-translucent", neutrals.border_translucent);
        groups.push(borders);

        for role in Role::ALL {
            let states = ButtonStates::for_config(palette.get(role), config);
            groups.push(button_group(role, &states));
        }

        let mut forms = TokenGroup::new("FORM VALIDATION");
        forms
            .hex("form-valid-color", palette.success)
            .hex("form-valid-border-color", palette.success)
            .hex("form-invalid-color", palette.danger)
            .hex("form-invalid-border-color", palette.danger);
        groups.push(forms);

        let mut code = TokenGroup::new("CODE & HIGHLIGHT");
        code.hex("code-color", palette.danger)
            .hex("highlight-color", palette.body_color)
            .hex("highlight-bg", palette.warning);
        groups.push(code);

        Self {
            mode: palette.mode,
            groups,
        }
    }

    /// All tokens in emission order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.groups.iter().flat_map(|g| g.tokens.iter())
    }

    /// Look up a token by its unprefixed name.
    pub fn get(&self, name: &str) -> Option<&TokenValue> {
        self.tokens().find(|t| t.name == name).map(|t| &t.value)
    }

    /// Look up a token's color by its unprefixed name.
    pub fn color(&self, name: &str) -> Option<Color> {
        self.get(name).and_then(TokenValue::color)
    }
}

fn button_group(role: Role, s: &ButtonStates) -> TokenGroup {
    let mut group = TokenGroup::new(format!("{} Button", role.title()));
    group.section = Some("BUTTONS");
    let btn = format!("btn-{}", role.name());
    let outline = format!("btn-outline-{}", role.name());

    group
        .hex(format!("{btn}-color"), s.text)
        .hex(format!("{btn}-bg"), s.base)
        .hex(format!("{btn}-border-color"), s.border)
        .hex(format!("{btn}-hover-color"), s.text)
        .hex(format!("{btn}-hover-bg"), s.hover)
        .hex(format!("{btn}-hover-border-color"), s.hover_border)
        .hex(format!("{btn}-active-color"), s.text)
        .hex(format!("{btn}-active-bg"), s.active)
        .hex(format!("{btn}-active-border-color"), s.active_border)
        .hex(format!("{btn}-disabled-color"), s.text)
        .hex(format!("{btn}-disabled-bg"), s.base)
        .hex(format!("{btn}-disabled-border-color"), s.border)
        .channels(format!("{btn}-focus-shadow-rgb"), s.focus);

    group
        .hex(format!("{outline}-color"), s.base)
        .hex(format!("{outline}-border-color"), s.base)
        .hex(format!("{outline}-hover-color"), s.text)
        .hex(format!("{outline}-hover-bg"), s.base)
        .hex(format!("{outline}-hover-border-color"), s.base)
        .hex(format!("{outline}-active-color"), s.text)
        .hex(format!("{outline}-active-bg"), s.base)
        .hex(format!("{outline}-active-border-color"), s.base)
        .hex(format!("{outline}-disabled-color"), s.base)
        .literal(format!("{outline}-disabled-bg"), "transparent")
        .hex(format!("{outline}-disabled-border-color"), s.base);

    group
}
