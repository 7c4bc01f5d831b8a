use crate::image::Color;

use super::{GeometryPolicy, HalftoneOptions, Outline, Shape};

/// The renderable unit: one dot per surviving cell, in canvas coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Dot {
    pub shape: Shape,
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub fill: Color,
    pub outline: Option<Outline>,
}

/// Perceptual luminance, normalized to [0, 1].
pub fn luminance(color: Color) -> f32 {
    (0.299 * color.r as f32 + 0.587 * color.g as f32 + 0.114 * color.b as f32) / 255.0
}

pub fn rgb_distance(a: Color, b: Color) -> f32 {
    let dr = a.r as f32 - b.r as f32;
    let dg = a.g as f32 - b.g as f32;
    let db = a.b as f32 - b.b as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

// Gamma applies to the normalized luminance before inversion, so a high
// exponent shrinks light dots much faster than dark ones.
pub fn brightness_radius(color: Color, gamma: f32, max_radius: f32, dot_scale: f32) -> f32 {
    let adjusted = luminance(color).powf(gamma);
    (1.0 - adjusted) * max_radius * dot_scale
}

// Distance to the background, normalized and lerped into the configured
// radius bounds; None when the cell is close enough to count as background.
pub fn contrast_radius(color: Color, background: Color, options: &HalftoneOptions) -> Option<f32> {
    let distance = rgb_distance(color, background);
    if distance < options.min_contrast {
        return None;
    }
    let t = (distance / options.contrast_divisor).clamp(0.0, 1.0);
    Some(options.min_radius + t * (options.max_radius - options.min_radius))
}

pub(super) fn plan(
    color: Color,
    center: (f32, f32),
    options: &HalftoneOptions,
    background: Color,
) -> Option<Dot> {
    let scale = options.scale as f32;
    let radius = match options.geometry {
        GeometryPolicy::Brightness => {
            let max_radius = options.cell_size as f32 / 2.0 * scale;
            brightness_radius(color, options.gamma, max_radius, options.dot_scale)
        }
        GeometryPolicy::Contrast => contrast_radius(color, background, options)? * scale,
        GeometryPolicy::Uniform => options.max_radius * scale,
    };
    if radius < options.min_visible_radius {
        return None;
    }
    Some(Dot {
        shape: options.shape,
        cx: center.0,
        cy: center.1,
        radius,
        fill: color,
        outline: options.outline,
    })
}
