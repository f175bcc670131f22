use std::path::Path;

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use kmeans_colors::get_kmeans_hamerly;
use palette::{IntoColor, Lab, Srgb};

use crate::color::Color;
use crate::config::{ThemeConfig, BLUR_SIGMA};

/// A k-means centroid and the share of pixels assigned to it.
#[derive(Debug, Clone)]
pub struct ExtractedColor {
    pub color: Color,
    pub weight: f32,
}

/// Images are downscaled to fit this square before analysis.
const ANALYSIS_SIZE: u32 = 256;
const KMEANS_MAX_ITER: usize = 20;
const KMEANS_CONVERGENCE: f32 = 5.0;
const KMEANS_SEED: u64 = 42;
/// Centroids closer than this (CIE76 ΔE) are merged.
const MERGE_DELTA_E: f32 = 5.0;

fn open_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    image::open(path).with_context(|| {
        format!(
            "unsupported or corrupt image: {} (try PNG, JPEG or WebP)",
            path.display()
        )
    })
}

fn fit_for_analysis(img: DynamicImage) -> DynamicImage {
    if img.width() <= ANALYSIS_SIZE && img.height() <= ANALYSIS_SIZE {
        return img;
    }
    img.resize(ANALYSIS_SIZE, ANALYSIS_SIZE, FilterType::Lanczos3)
}

/// Decode `path`, shrink it to at most 256x256 keeping its aspect ratio,
/// optionally blur it, and return its pixels in CIELAB.
pub fn load_and_prepare(path: &Path, blur: bool) -> Result<Vec<Lab>> {
    let mut img = fit_for_analysis(open_image(path)?);
    if blur {
        img = img.blur(BLUR_SIGMA);
    }
    Ok(img
        .to_rgb8()
        .pixels()
        .map(|px| {
            let [r, g, b] = px.0;
            Srgb::new(r, g, b).into_format::<f32>().into_color()
        })
        .collect())
}

/// Cluster `pixels` into at most `k` colors, heaviest first.
///
/// Empty clusters are dropped and near-identical centroids merged, so the
/// result may hold fewer than `k` colors.
pub fn extract_colors(pixels: &[Lab], k: usize) -> Vec<ExtractedColor> {
    let k = k.min(pixels.len()).min(usize::from(u8::MAX));
    if k == 0 {
        return Vec::new();
    }
    let clusters = get_kmeans_hamerly(
        k,
        KMEANS_MAX_ITER,
        KMEANS_CONVERGENCE,
        false,
        pixels,
        KMEANS_SEED,
    );

    let mut members = vec![0usize; clusters.centroids.len()];
    for &index in &clusters.indices {
        members[usize::from(index)] += 1;
    }

    let total = pixels.len() as f32;
    let weighted = clusters
        .centroids
        .iter()
        .zip(members)
        .filter(|&(_, count)| count > 0)
        .map(|(centroid, count)| ExtractedColor {
            color: Color::from_lab(*centroid),
            weight: count as f32 / total,
        });

    let mut colors = merge_near_duplicates(weighted);
    colors.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    colors
}

/// Extract the dominant colors of the image at `path`, most dominant first.
pub fn dominant_colors(path: &Path, config: &ThemeConfig) -> Result<Vec<Color>> {
    tracing::info!(image = %path.display(), blur = config.blur, "analyzing");
    let pixels = load_and_prepare(path, config.blur)?;
    let colors: Vec<Color> = extract_colors(&pixels, config.color_count)
        .into_iter()
        .map(|extracted| extracted.color)
        .collect();
    tracing::debug!(
        count = colors.len(),
        colors = %colors.iter().map(|c| c.to_hex()).collect::<Vec<_>>().join(" "),
        "extracted palette"
    );
    Ok(colors)
}

fn delta_e(a: Lab, b: Lab) -> f32 {
    ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
}

/// Fold each color into the first kept color within [`MERGE_DELTA_E`],
/// adding its weight there; otherwise keep it.
fn merge_near_duplicates(colors: impl IntoIterator<Item = ExtractedColor>) -> Vec<ExtractedColor> {
    let mut kept: Vec<(Lab, ExtractedColor)> = Vec::new();
    for color in colors {
        let lab = color.color.to_lab();
        match kept.iter_mut().find(|(k, _)| delta_e(*k, lab) < MERGE_DELTA_E) {
            Some((_, existing)) => existing.weight += color.weight,
            None => kept.push((lab, color)),
        }
    }
    kept.into_iter().map(|(_, color)| color).collect()
}
