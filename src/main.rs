use anyhow::{Context, Result};
use clap::Parser;

use swatchkit::backends::css::CssBackend;
use swatchkit::backends::{ThemeBackend, ThemeDocument};
use swatchkit::cli::{Args, ThemeMode};
use swatchkit::pipeline::palette_for_image;
use swatchkit::theme::ThemeTokenSet;
use swatchkit::tui::{self, TuiApp};

fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = args.theme_config();
    config.validate().context("invalid configuration")?;

    let dark_image = args.resolve_dark_image();
    let source_for = |mode: ThemeMode| match mode {
        ThemeMode::Light => args.image.clone(),
        ThemeMode::Dark => dark_image.clone(),
    };

    if args.preview {
        let light = palette_for_image(&source_for(ThemeMode::Light), ThemeMode::Light, &config)?;
        let dark = palette_for_image(&source_for(ThemeMode::Dark), ThemeMode::Dark, &config)?;
        let mode = args.only.unwrap_or(ThemeMode::Light);
        return tui::run(TuiApp::new(light, dark, mode, config));
    }

    let mut themes = Vec::new();
    let mut sources = Vec::new();
    for mode in args.modes() {
        let source = source_for(mode);
        let palette = palette_for_image(&source, mode, &config)?;
        themes.push(ThemeTokenSet::build(&palette, &config));
        sources.push((mode, source));
    }
    let document = ThemeDocument {
        themes,
        sources,
        blur: config.blur,
    };

    let backend = CssBackend::new(args.prefix.as_str());
    match &args.output {
        Some(path) => {
            backend.write_to(&document, path)?;
            tracing::info!(backend = backend.name(), path = %path.display(), "written to");
        }
        None => print!("{}", backend.serialize(&document)),
    }

    Ok(())
}
