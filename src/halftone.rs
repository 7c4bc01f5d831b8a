use std::time::Instant;

use anyhow::bail;
use log::debug;

use crate::image::{Color, Point, Raster, Size};

use self::geometry::Dot;

pub mod background;
pub mod draw;
pub mod enhance;
pub mod geometry;
pub mod sampler;

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum SamplingPolicy {
    /// Single pixel at the cell center.
    Center,
    /// Arithmetic mean over the cell.
    Mean,
    /// Per-channel median over the cell.
    Median,
    /// Per-channel median ignoring near-black/near-white pixels,
    /// falling back to the mean when every pixel is an extreme.
    MedianExcludingExtremes,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum GeometryPolicy {
    /// Darker cells get larger dots, up to half the cell pitch.
    Brightness,
    /// Dot size follows the RGB distance to the background color.
    Contrast,
    /// Fixed-size dots; only color varies (Ben-Day).
    Uniform,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum Shape {
    Circle,
    Diamond,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum BackgroundPolicy {
    Constant,
    CornerMean,
    BorderMedian,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    pub color: Color,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enhancement {
    pub saturation: f32,
    pub value: f32,
}

#[derive(Clone, Debug)]
pub struct HalftoneOptions {
    /// Grid pitch in source pixels.
    pub cell_size: i32,
    /// Output upscaling factor; canvas is source size times this.
    pub scale: i32,
    pub sampling: SamplingPolicy,
    /// (low, high) channel thresholds for MedianExcludingExtremes.
    pub extreme_thresholds: (u8, u8),
    pub geometry: GeometryPolicy,
    /// Contrast exponent applied to normalized luminance before inversion.
    pub gamma: f32,
    /// Radius multiplier; above 1.0 dots deliberately overlap.
    pub dot_scale: f32,
    /// Radius bounds for Contrast/Uniform geometry, in source pixels.
    pub min_radius: f32,
    pub max_radius: f32,
    /// Dots smaller than this (canvas units) are not drawn at all.
    pub min_visible_radius: f32,
    /// Cells closer to the background than this RGB distance are skipped.
    pub min_contrast: f32,
    /// Divisor normalizing RGB distance for Contrast geometry.
    pub contrast_divisor: f32,
    pub shape: Shape,
    pub outline: Option<Outline>,
    pub background: BackgroundPolicy,
    /// Canvas fill (and contrast reference) for BackgroundPolicy::Constant.
    pub background_color: Color,
    pub enhancement: Option<Enhancement>,
}

// Maximum Euclidean distance between two RGB triples, sqrt(3 * 255^2).
pub const MAX_RGB_DISTANCE: f32 = 441.673;

impl Default for HalftoneOptions {
    fn default() -> Self {
        HalftoneOptions {
            cell_size: 10,
            scale: 5,
            sampling: SamplingPolicy::MedianExcludingExtremes,
            extreme_thresholds: (20, 235),
            geometry: GeometryPolicy::Brightness,
            gamma: 1.5,
            dot_scale: 1.5,
            min_radius: 1.0,
            max_radius: 5.0,
            min_visible_radius: 1.0,
            min_contrast: 24.0,
            contrast_divisor: MAX_RGB_DISTANCE,
            shape: Shape::Circle,
            outline: None,
            background: BackgroundPolicy::Constant,
            background_color: Color::WHITE,
            enhancement: None,
        }
    }
}

impl HalftoneOptions {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.cell_size <= 0 {
            bail!("invalid cell size {}", self.cell_size);
        }
        if self.scale < 1 {
            bail!("invalid scale {}", self.scale);
        }
        if self.gamma <= 0.0 {
            bail!("invalid gamma {}", self.gamma);
        }
        if self.dot_scale <= 0.0 {
            bail!("invalid dot scale {}", self.dot_scale);
        }
        if self.min_radius < 0.0 || self.min_radius > self.max_radius {
            bail!(
                "invalid radius bounds {}..{}",
                self.min_radius,
                self.max_radius
            );
        }
        if self.min_visible_radius < 0.0 {
            bail!("invalid minimum visible radius {}", self.min_visible_radius);
        }
        if self.contrast_divisor <= 0.0 {
            bail!("invalid contrast divisor {}", self.contrast_divisor);
        }
        if self.extreme_thresholds.0 >= self.extreme_thresholds.1 {
            bail!(
                "invalid extreme thresholds ({}, {})",
                self.extreme_thresholds.0,
                self.extreme_thresholds.1
            );
        }
        if let Some(outline) = self.outline {
            if outline.width <= 0.0 {
                bail!("invalid outline width {}", outline.width);
            }
        }
        if let Some(enhancement) = self.enhancement {
            if enhancement.saturation < 0.0 || enhancement.value < 0.0 {
                bail!(
                    "invalid enhancement factors ({}, {})",
                    enhancement.saturation,
                    enhancement.value
                );
            }
        }
        Ok(())
    }
}

/// Run the full pipeline: compute the background color, pre-fill the
/// canvas, then traverse cells row-major, reducing each to one color and
/// one dot. Later dots occlude earlier ones where they overlap.
pub fn render(src: &Raster, options: &HalftoneOptions) -> anyhow::Result<Raster> {
    options.validate()?;
    let t_start = Instant::now();

    let background = background::compute(src, options.background, options.background_color);
    let canvas_size: Size = (
        src.width() * options.scale,
        src.height() * options.scale,
    )
        .into();
    let mut canvas = Raster::filled(canvas_size, background);

    let mut origins = Vec::new();
    for y in (0..src.height()).step_by(options.cell_size as usize) {
        for x in (0..src.width()).step_by(options.cell_size as usize) {
            origins.push(Point { x, y });
        }
    }

    #[cfg(feature = "rayon")]
    let dots: Vec<Option<Dot>> = {
        use rayon::prelude::*;
        origins
            .par_iter()
            .map(|&origin| plan_cell(src, origin, options, background))
            .collect()
    };
    #[cfg(not(feature = "rayon"))]
    let dots: Vec<Option<Dot>> = origins
        .iter()
        .map(|&origin| plan_cell(src, origin, options, background))
        .collect();
    let t_planned = Instant::now();

    let mut drawn = 0usize;
    for dot in dots.iter().flatten() {
        draw::draw_dot(&mut canvas, dot);
        drawn += 1;
    }

    debug!(
        "Rendered {} dots over {} cells onto {}x{} canvas. Cost: plan: {:?}, draw: {:?}",
        drawn,
        origins.len(),
        canvas.width(),
        canvas.height(),
        t_planned - t_start,
        t_planned.elapsed()
    );
    Ok(canvas)
}

// One cell: clip to the image, reduce to a color, map to a dot. The dot
// center stays at the nominal cell center even for clipped edge cells, so
// edge dots may be cut off by the canvas border.
fn plan_cell(
    src: &Raster,
    origin: Point,
    options: &HalftoneOptions,
    background: Color,
) -> Option<Dot> {
    let cell: Size = (
        options.cell_size.min(src.width() - origin.x),
        options.cell_size.min(src.height() - origin.y),
    )
        .into();
    if cell.width <= 0 || cell.height <= 0 {
        return None;
    }

    let mut color = sampler::sample(
        src,
        origin,
        cell,
        options.sampling,
        options.extreme_thresholds,
    );
    if let Some(enhancement) = options.enhancement {
        color = enhance::enhance(color, enhancement.saturation, enhancement.value);
    }

    let scale = options.scale as f32;
    let half_cell = options.cell_size as f32 / 2.0;
    let center = (
        (origin.x as f32 + half_cell) * scale,
        (origin.y as f32 + half_cell) * scale,
    );
    geometry::plan(color, center, options, background)
}
