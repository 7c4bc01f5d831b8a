use crate::image::{Color, Point, Raster, Size};

use super::SamplingPolicy;

/// Reduce a cell of the source raster to one representative color.
/// Deterministic for a given cell, valid down to 1x1 cells.
pub fn sample(
    src: &Raster,
    origin: Point,
    cell: Size,
    policy: SamplingPolicy,
    extreme_thresholds: (u8, u8),
) -> Color {
    match policy {
        SamplingPolicy::Center => center(src, origin, cell),
        SamplingPolicy::Mean => mean(src, origin, cell),
        SamplingPolicy::Median => median(src, origin, cell),
        SamplingPolicy::MedianExcludingExtremes => {
            median_excluding_extremes(src, origin, cell, extreme_thresholds)
        }
    }
}

fn pixels<'a>(
    src: &'a Raster,
    origin: Point,
    cell: Size,
) -> impl Iterator<Item = Color> + 'a {
    (0..cell.height).flat_map(move |dy| {
        (0..cell.width).map(move |dx| src.pixel((origin.x + dx, origin.y + dy).into()))
    })
}

fn center(src: &Raster, origin: Point, cell: Size) -> Color {
    src.pixel(
        (
            origin.x + cell.width / 2,
            origin.y + cell.height / 2,
        )
            .into(),
    )
}

fn mean(src: &Raster, origin: Point, cell: Size) -> Color {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for px in pixels(src, origin, cell) {
        sums[0] += px.r as u64;
        sums[1] += px.g as u64;
        sums[2] += px.b as u64;
        count += 1;
    }
    Color::new(
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
    )
}

fn median(src: &Raster, origin: Point, cell: Size) -> Color {
    median_of(pixels(src, origin, cell).collect())
}

// Extremes would drag the median toward black/white and wash out the one
// color the cell actually carries; drop them, and fall back to the plain
// mean when the whole cell is extremes.
fn median_excluding_extremes(
    src: &Raster,
    origin: Point,
    cell: Size,
    (low, high): (u8, u8),
) -> Color {
    let filtered: Vec<Color> = pixels(src, origin, cell)
        .filter(|px| {
            let near_black = px.r <= low && px.g <= low && px.b <= low;
            let near_white = px.r >= high && px.g >= high && px.b >= high;
            !near_black && !near_white
        })
        .collect();
    if filtered.is_empty() {
        mean(src, origin, cell)
    } else {
        median_of(filtered)
    }
}

fn median_of(population: Vec<Color>) -> Color {
    let mut rs: Vec<u8> = population.iter().map(|px| px.r).collect();
    let mut gs: Vec<u8> = population.iter().map(|px| px.g).collect();
    let mut bs: Vec<u8> = population.iter().map(|px| px.b).collect();
    Color::new(
        channel_median(&mut rs),
        channel_median(&mut gs),
        channel_median(&mut bs),
    )
}

// Even-sized populations average the two middle values.
fn channel_median(values: &mut [u8]) -> u8 {
    values.sort_unstable();
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        ((values[n / 2 - 1] as u16 + values[n / 2] as u16) / 2) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: (u8, u8) = (20, 235);

    fn raster_of(colors: &[&[Color]]) -> Raster {
        let mut raster = Raster::new((colors[0].len() as i32, colors.len() as i32).into());
        for (y, row) in colors.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                raster.set_pixel((x as i32, y as i32).into(), color);
            }
        }
        raster
    }

    #[test]
    fn test_center_picks_middle_pixel() {
        let src = raster_of(&[
            &[Color::BLACK, Color::WHITE, Color::BLACK],
            &[Color::WHITE, Color::new(9, 9, 9), Color::WHITE],
            &[Color::BLACK, Color::WHITE, Color::BLACK],
        ]);
        let sampled = sample(
            &src,
            (0, 0).into(),
            (3, 3).into(),
            SamplingPolicy::Center,
            THRESHOLDS,
        );
        assert_eq!(sampled, Color::new(9, 9, 9));
    }

    #[test]
    fn test_mean_averages_channels() {
        let src = raster_of(&[
            &[Color::new(0, 10, 100), Color::new(100, 30, 100)],
            &[Color::new(200, 50, 100), Color::new(100, 30, 100)],
        ]);
        let sampled = sample(
            &src,
            (0, 0).into(),
            (2, 2).into(),
            SamplingPolicy::Mean,
            THRESHOLDS,
        );
        assert_eq!(sampled, Color::new(100, 30, 100));
    }

    #[test]
    fn test_median_resists_outliers() {
        // One white outlier cannot drag the median the way it drags the mean.
        let red = Color::new(200, 40, 40);
        let src = raster_of(&[
            &[red, red, red],
            &[red, Color::WHITE, red],
            &[red, red, red],
        ]);
        let sampled = sample(
            &src,
            (0, 0).into(),
            (3, 3).into(),
            SamplingPolicy::Median,
            THRESHOLDS,
        );
        assert_eq!(sampled, red);
    }

    #[test]
    fn test_extremes_are_excluded() {
        let blue = Color::new(30, 60, 220);
        let src = raster_of(&[
            &[Color::WHITE, Color::BLACK, Color::WHITE],
            &[Color::BLACK, blue, Color::BLACK],
            &[Color::WHITE, Color::BLACK, Color::WHITE],
        ]);
        let sampled = sample(
            &src,
            (0, 0).into(),
            (3, 3).into(),
            SamplingPolicy::MedianExcludingExtremes,
            THRESHOLDS,
        );
        assert_eq!(sampled, blue);
    }

    #[test]
    fn test_all_extremes_fall_back_to_mean() {
        // A pure black/white cell must produce exactly what the mean
        // sampler produces.
        let src = raster_of(&[
            &[Color::BLACK, Color::WHITE],
            &[Color::WHITE, Color::BLACK],
        ]);
        let fallback = sample(
            &src,
            (0, 0).into(),
            (2, 2).into(),
            SamplingPolicy::MedianExcludingExtremes,
            THRESHOLDS,
        );
        let mean = sample(
            &src,
            (0, 0).into(),
            (2, 2).into(),
            SamplingPolicy::Mean,
            THRESHOLDS,
        );
        assert_eq!(fallback, mean);
    }

    #[test]
    fn test_one_pixel_cell() {
        let only = Color::new(12, 34, 56);
        let src = raster_of(&[&[only]]);
        for policy in [
            SamplingPolicy::Center,
            SamplingPolicy::Mean,
            SamplingPolicy::Median,
            SamplingPolicy::MedianExcludingExtremes,
        ] {
            assert_eq!(
                sample(&src, (0, 0).into(), (1, 1).into(), policy, THRESHOLDS),
                only
            );
        }
    }
}
