use crate::halftone::{
    BackgroundPolicy, Enhancement, GeometryPolicy, HalftoneOptions, Outline, SamplingPolicy,
};
use crate::image::Color;

/// The named looks the tool ships with. Each preset is just a full
/// `HalftoneOptions`; individual CLI flags override single fields.
#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum Preset {
    /// Large overlapping dots, size driven by brightness.
    Bold,
    /// Uniform-size evenly spaced dots, classic comic-print style.
    Benday,
    /// Outlined dots sized by contrast against the detected background.
    Bubble,
    /// Median-sampled dots with a saturation/value boost.
    Vibrant,
}

impl Default for Preset {
    fn default() -> Self {
        Preset::Bold
    }
}

impl Preset {
    pub fn options(&self) -> HalftoneOptions {
        match self {
            Preset::Bold => HalftoneOptions {
                cell_size: 10,
                scale: 5,
                sampling: SamplingPolicy::MedianExcludingExtremes,
                geometry: GeometryPolicy::Brightness,
                gamma: 1.5,
                dot_scale: 1.5,
                ..HalftoneOptions::default()
            },
            Preset::Benday => HalftoneOptions {
                cell_size: 8,
                scale: 4,
                sampling: SamplingPolicy::Center,
                geometry: GeometryPolicy::Uniform,
                max_radius: 3.0,
                min_visible_radius: 0.5,
                ..HalftoneOptions::default()
            },
            Preset::Bubble => HalftoneOptions {
                cell_size: 12,
                scale: 4,
                sampling: SamplingPolicy::Mean,
                geometry: GeometryPolicy::Contrast,
                min_radius: 1.5,
                max_radius: 5.5,
                min_contrast: 24.0,
                min_visible_radius: 0.5,
                background: BackgroundPolicy::BorderMedian,
                outline: Some(Outline {
                    color: Color::new(32, 32, 32),
                    width: 1.5,
                }),
                ..HalftoneOptions::default()
            },
            Preset::Vibrant => HalftoneOptions {
                cell_size: 8,
                scale: 5,
                sampling: SamplingPolicy::Median,
                geometry: GeometryPolicy::Brightness,
                gamma: 1.2,
                dot_scale: 1.2,
                enhancement: Some(Enhancement {
                    saturation: 1.4,
                    value: 1.15,
                }),
                ..HalftoneOptions::default()
            },
        }
    }
}
