use crate::image::{Color, Raster};

use super::BackgroundPolicy;

/// Canvas fill color (and contrast reference), computed once per image
/// before the cell traversal. Pure function of the source pixels; does not
/// depend on the grid.
pub fn compute(src: &Raster, policy: BackgroundPolicy, constant: Color) -> Color {
    match policy {
        BackgroundPolicy::Constant => constant,
        BackgroundPolicy::CornerMean => corner_mean(src),
        BackgroundPolicy::BorderMedian => border_median(src),
    }
}

fn corner_mean(src: &Raster) -> Color {
    let (w, h) = (src.width() - 1, src.height() - 1);
    let corners = [
        src.pixel((0, 0).into()),
        src.pixel((w, 0).into()),
        src.pixel((0, h).into()),
        src.pixel((w, h).into()),
    ];
    let mut sums = [0u32; 3];
    for px in corners {
        sums[0] += px.r as u32;
        sums[1] += px.g as u32;
        sums[2] += px.b as u32;
    }
    Color::new((sums[0] / 4) as u8, (sums[1] / 4) as u8, (sums[2] / 4) as u8)
}

// Top and bottom rows in full, side columns without their end pixels, so
// no border pixel is counted twice.
fn border_median(src: &Raster) -> Color {
    let mut border = Vec::with_capacity(2 * (src.width() + src.height()) as usize);
    for x in 0..src.width() {
        border.push(src.pixel((x, 0).into()));
        if src.height() > 1 {
            border.push(src.pixel((x, src.height() - 1).into()));
        }
    }
    for y in 1..src.height() - 1 {
        border.push(src.pixel((0, y).into()));
        if src.width() > 1 {
            border.push(src.pixel((src.width() - 1, y).into()));
        }
    }

    let mut rs: Vec<u8> = border.iter().map(|px| px.r).collect();
    let mut gs: Vec<u8> = border.iter().map(|px| px.g).collect();
    let mut bs: Vec<u8> = border.iter().map(|px| px.b).collect();
    Color::new(
        channel_median(&mut rs),
        channel_median(&mut gs),
        channel_median(&mut bs),
    )
}

fn channel_median(values: &mut [u8]) -> u8 {
    values.sort_unstable();
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        ((values[n / 2 - 1] as u16 + values[n / 2] as u16) / 2) as u8
    }
}
