use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::config::ThemeConfig;
use crate::pipeline::assign::{Role, RolePalette};
use crate::pipeline::contrast::find_contrast_color;
use crate::theme::ButtonStates;

const SWATCH_WIDTH: usize = 11;

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Role swatches with their button text, the body text sample, and details
/// for the selected role.
/// Buttons follow the same config as the emitted CSS, so
/// `--accessible-buttons` shows the shifted backgrounds.
pub struct PaletteWidget<'a> {
    palette: &'a RolePalette,
    selected: Option<Role>,
    config: &'a ThemeConfig,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(palette: &'a RolePalette, selected: Option<Role>, config: &'a ThemeConfig) -> Self {
        Self {
            palette,
            selected,
            config,
        }
    }
}

/// One swatch per role in its button background, labelled in the button text
/// color.
fn build_swatch_row(
    palette: &RolePalette,
    selected: Option<Role>,
    config: &ThemeConfig,
) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for role in Role::ALL {
        let states = ButtonStates::for_config(palette.get(role), config);
        let mut style = Style::default()
            .bg(to_color(states.base))
            .fg(to_color(states.text));
        if selected == Some(role) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(
            format!("{:^width$}", role.name(), width = SWATCH_WIDTH),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_hex_row(palette: &RolePalette, selected: Option<Role>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for role in Role::ALL {
        let style = if selected == Some(role) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{:^width$}", palette.get(role).to_hex(), width = SWATCH_WIDTH),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_body_sample(palette: &RolePalette) -> Line<'static> {
    let ratio = AppColor::contrast_ratio(&palette.body_bg, &palette.body_color);
    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            "  The quick brown fox jumps over the lazy dog  ",
            Style::default()
                .bg(to_color(palette.body_bg))
                .fg(to_color(palette.body_color)),
        ),
        Span::raw(format!(
            "  body {} on {}  contrast {ratio:.1}:1",
            palette.body_color, palette.body_bg
        )),
    ])
}

fn build_role_detail(
    palette: &RolePalette,
    role: Role,
    config: &ThemeConfig,
) -> Vec<Line<'static>> {
    let base = palette.get(role);
    let states = ButtonStates::for_config(base, config);
    let button_ratio = AppColor::contrast_ratio(&states.base, &states.text);
    let emphasis = find_contrast_color(base, config.target_contrast, palette.is_dark());
    let emphasis_ratio = AppColor::contrast_ratio(&base, &emphasis);

    vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("  {}  ", role.title()),
                Style::default()
                    .bg(to_color(states.base))
                    .fg(to_color(states.text)),
            ),
            Span::raw(format!(
                "  button {}  text {}  contrast {button_ratio:.1}:1",
                states.base, states.text
            )),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("  {}  ", role.title()),
                Style::default().bg(to_color(base)).fg(to_color(emphasis)),
            ),
            Span::raw(format!(
                "  emphasis {emphasis}  contrast {emphasis_ratio:.1}:1"
            )),
        ]),
    ]
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!("Palette ({})", self.palette.mode);
        let block = Block::bordered().title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from("  Roles"),
            build_swatch_row(self.palette, self.selected, self.config),
            build_hex_row(self.palette, self.selected),
            Line::from(""),
            Line::from("  Body"),
            build_body_sample(self.palette),
        ];

        if let Some(role) = self.selected {
            lines.push(Line::from(""));
            lines.extend(build_role_detail(self.palette, role, self.config));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ThemeMode;
    use crate::config::ThemeConfig;
    use crate::pipeline::assign::assign_roles;

    fn palette(mode: ThemeMode) -> RolePalette {
        let colors = [
            AppColor::new(200, 30, 30),
            AppColor::new(30, 180, 60),
            AppColor::new(240, 200, 40),
            AppColor::new(40, 120, 220),
        ];
        assign_roles(&colors, mode, &ThemeConfig::default()).unwrap()
    }

    fn render_to_text(widget: PaletteWidget<'_>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn renders_every_role_name_and_hex() {
        let palette = palette(ThemeMode::Light);
        let config = ThemeConfig::default();
        let text = render_to_text(PaletteWidget::new(&palette, None, &config), 120, 14).join("\n");
        assert!(text.contains("Palette (light)"));
        for role in Role::ALL {
            assert!(text.contains(role.name()), "missing {}", role.name());
            assert!(text.contains(&palette.get(role).to_hex()));
        }
        assert!(text.contains("contrast"));
        assert!(!text.contains("emphasis"));
    }

    #[test]
    fn selected_role_shows_detail() {
        let palette = palette(ThemeMode::Dark);
        let config = ThemeConfig::default();
        let widget = PaletteWidget::new(&palette, Some(Role::Danger), &config);
        let text = render_to_text(widget, 120, 14).join("\n");
        assert!(text.contains("Palette (dark)"));
        assert!(text.contains("Danger"));
        assert!(text.contains("button #"));
        assert!(text.contains("emphasis #"));
    }

    fn first_swatch(palette: &RolePalette, config: &ThemeConfig) -> (Color, Color) {
        let area = Rect::new(0, 0, 120, 14);
        let mut buf = Buffer::empty(area);
        PaletteWidget::new(palette, None, config).render(area, &mut buf);

        // Inside the border: row 1 is "Roles", row 2 the swatches. The first
        // swatch starts after the two-space indent.
        let cell = &buf[(3, 2)];
        (cell.bg, cell.fg)
    }

    #[test]
    fn swatch_uses_role_colors() {
        let palette = palette(ThemeMode::Light);
        let (bg, fg) = first_swatch(&palette, &ThemeConfig::default());
        assert_eq!(bg, to_color(palette.primary));
        assert_eq!(fg, to_color(ButtonStates::derive(palette.primary).text));
    }

    #[test]
    fn accessible_swatch_matches_emitted_button() {
        let palette = palette(ThemeMode::Light);
        let config = ThemeConfig {
            accessible_buttons: true,
            ..ThemeConfig::default()
        };
        let states = ButtonStates::accessible(palette.primary, config.target_contrast);
        let (bg, fg) = first_swatch(&palette, &config);
        assert_eq!(bg, to_color(states.base));
        assert_eq!(fg, to_color(states.text));
        assert!(AppColor::contrast_ratio(&states.base, &states.text) >= 7.0);
    }
}
