use std::path::PathBuf;

use clap::Parser;
use log::info;

use dotscreen::halftone::{
    self, BackgroundPolicy, Enhancement, GeometryPolicy, HalftoneOptions, Outline,
    SamplingPolicy, Shape,
};
use dotscreen::image::{convert, Color};
use dotscreen::preset::Preset;

#[derive(Parser, Debug)]
#[command(about = "Render a raster image as a grid of halftone dots")]
struct Args {
    input: PathBuf,
    output: PathBuf,

    #[arg(short, long, value_enum, default_value = "bold")]
    preset: Preset,

    #[arg(long)]
    cell_size: Option<i32>,

    #[arg(long)]
    scale: Option<i32>,

    #[arg(long, value_enum)]
    sampling: Option<SamplingPolicy>,

    #[arg(long, value_enum)]
    geometry: Option<GeometryPolicy>,

    #[arg(long, value_enum)]
    shape: Option<Shape>,

    #[arg(long)]
    gamma: Option<f32>,

    #[arg(long)]
    dot_scale: Option<f32>,

    #[arg(long)]
    min_radius: Option<f32>,

    #[arg(long)]
    max_radius: Option<f32>,

    #[arg(long)]
    min_visible_radius: Option<f32>,

    #[arg(long)]
    min_contrast: Option<f32>,

    #[arg(long)]
    contrast_divisor: Option<f32>,

    #[arg(long)]
    extreme_low: Option<u8>,

    #[arg(long)]
    extreme_high: Option<u8>,

    #[arg(long, value_enum)]
    background: Option<BackgroundPolicy>,

    #[arg(long)]
    background_color: Option<Color>,

    #[arg(long)]
    outline_color: Option<Color>,

    #[arg(long, default_value_t = 1.5)]
    outline_width: f32,

    #[arg(long, default_value_t = false)]
    enhance: bool,

    #[arg(long, default_value_t = false)]
    no_enhance: bool,

    #[arg(long)]
    saturation_boost: Option<f32>,

    #[arg(long)]
    value_boost: Option<f32>,
}

impl Args {
    fn options(&self) -> HalftoneOptions {
        let mut options = self.preset.options();
        if let Some(cell_size) = self.cell_size {
            options.cell_size = cell_size;
        }
        if let Some(scale) = self.scale {
            options.scale = scale;
        }
        if let Some(sampling) = self.sampling {
            options.sampling = sampling;
        }
        if let Some(geometry) = self.geometry {
            options.geometry = geometry;
        }
        if let Some(shape) = self.shape {
            options.shape = shape;
        }
        if let Some(gamma) = self.gamma {
            options.gamma = gamma;
        }
        if let Some(dot_scale) = self.dot_scale {
            options.dot_scale = dot_scale;
        }
        if let Some(min_radius) = self.min_radius {
            options.min_radius = min_radius;
        }
        if let Some(max_radius) = self.max_radius {
            options.max_radius = max_radius;
        }
        if let Some(min_visible_radius) = self.min_visible_radius {
            options.min_visible_radius = min_visible_radius;
        }
        if let Some(min_contrast) = self.min_contrast {
            options.min_contrast = min_contrast;
        }
        if let Some(contrast_divisor) = self.contrast_divisor {
            options.contrast_divisor = contrast_divisor;
        }
        if let Some(extreme_low) = self.extreme_low {
            options.extreme_thresholds.0 = extreme_low;
        }
        if let Some(extreme_high) = self.extreme_high {
            options.extreme_thresholds.1 = extreme_high;
        }
        if let Some(background) = self.background {
            options.background = background;
        }
        if let Some(background_color) = self.background_color {
            options.background_color = background_color;
            if self.background.is_none() {
                options.background = BackgroundPolicy::Constant;
            }
        }
        if let Some(outline_color) = self.outline_color {
            options.outline = Some(Outline {
                color: outline_color,
                width: self.outline_width,
            });
        }
        if self.enhance || self.saturation_boost.is_some() || self.value_boost.is_some() {
            let base = options.enhancement.unwrap_or(Enhancement {
                saturation: 1.0,
                value: 1.0,
            });
            options.enhancement = Some(Enhancement {
                saturation: self.saturation_boost.unwrap_or(base.saturation),
                value: self.value_boost.unwrap_or(base.value),
            });
        }
        if self.no_enhance {
            options.enhancement = None;
        }
        options
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();
    let args = Args::parse();
    let options = args.options();

    let src = convert::load(&args.input)?;
    info!(
        "Loaded {:?}: {}x{}, cell size {}, scale {}",
        args.input,
        src.width(),
        src.height(),
        options.cell_size,
        options.scale
    );

    let canvas = halftone::render(&src, &options)?;

    convert::save(&canvas, &args.output)?;
    info!(
        "Saved {:?}: {}x{}",
        args.output,
        canvas.width(),
        canvas.height()
    );
    Ok(())
}
