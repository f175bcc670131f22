use crate::cli::ThemeMode;
use crate::theme::ThemeTokenSet;

use super::{ThemeBackend, ThemeDocument};

pub const BEGIN_MARKER: &str = "/* BEGIN GENERATED COLORS */";
pub const END_MARKER: &str = "/* END GENERATED COLORS */";

const RULE: &str = "============================================================";
const INDENT: &str = "    ";

/// Bootstrap 5 CSS custom properties. Light tokens go under `:root`, dark
/// tokens under `[data-bs-theme="dark"]`.
pub struct CssBackend {
    prefix: String,
}

impl CssBackend {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn selector(mode: ThemeMode) -> &'static str {
        match mode {
            ThemeMode::Light => ":root",
            ThemeMode::Dark => "[data-bs-theme=\"dark\"]",
        }
    }

    fn header(&self, document: &ThemeDocument, out: &mut Vec<String>) {
        out.push(format!("/* {RULE}"));
        out.push("   GENERATED COLOR VARIABLES - Bootstrap 5 Theme".to_string());
        for (mode, path) in &document.sources {
            let label = match mode {
                ThemeMode::Light => "Light",
                ThemeMode::Dark => "Dark",
            };
            out.push(format!("   {label} image: {}", path.display()));
        }
        out.push(format!("   Blur applied: {}", document.blur));
        out.push(format!("   {RULE} */"));
    }

    fn theme_block(&self, theme: &ThemeTokenSet, out: &mut Vec<String>) {
        let label = match theme.mode {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        };
        out.push(format!("/* {label} Mode Colors */"));
        out.push(format!("{} {{", Self::selector(theme.mode)));

        let mut section = None;
        for (i, group) in theme.groups.iter().enumerate() {
            if i > 0 {
                out.push(String::new());
            }
            match group.section {
                Some(heading) => {
                    if section != Some(heading) {
                        out.push(format!("{INDENT}/* === {heading} === */"));
                        out.push(String::new());
                    }
                    out.push(format!("{INDENT}/* {} */", group.title));
                }
                None => out.push(format!("{INDENT}/* === {} === */", group.title)),
            }
            section = group.section;

            for token in &group.tokens {
                out.push(format!(
                    "{INDENT}--{}-{}: {};",
                    self.prefix, token.name, token.value
                ));
            }
        }
        out.push("}".to_string());
    }
}

impl Default for CssBackend {
    fn default() -> Self {
        Self::new("bs")
    }
}

impl ThemeBackend for CssBackend {
    fn name(&self) -> &str {
        "Bootstrap CSS"
    }

    fn serialize(&self, document: &ThemeDocument) -> String {
        let mut lines = Vec::new();
        self.header(document, &mut lines);
        lines.push(String::new());
        lines.push(BEGIN_MARKER.to_string());
        for theme in &document.themes {
            lines.push(String::new());
            self.theme_block(theme, &mut lines);
        }
        lines.push(String::new());
        lines.push(END_MARKER.to_string());

        let mut css = lines.join("\n");
        css.push('\n');
        css
    }
}
