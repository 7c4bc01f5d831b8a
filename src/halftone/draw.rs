use crate::image::Raster;

use super::geometry::Dot;
use super::Shape;

/// Paint one dot onto the canvas: an opaque fill of the shape interior,
/// with the outermost `width` units restroked in the outline color when an
/// outline is configured. Pixels are tested at their centers against the
/// shape's distance function, clipped to the canvas.
pub fn draw_dot(canvas: &mut Raster, dot: &Dot) {
    let x0 = ((dot.cx - dot.radius).floor() as i32).max(0);
    let x1 = ((dot.cx + dot.radius).ceil() as i32).min(canvas.width() - 1);
    let y0 = ((dot.cy - dot.radius).floor() as i32).max(0);
    let y1 = ((dot.cy + dot.radius).ceil() as i32).min(canvas.height() - 1);

    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f32 + 0.5 - dot.cx;
            let dy = py as f32 + 0.5 - dot.cy;
            let distance = match dot.shape {
                Shape::Circle => (dx * dx + dy * dy).sqrt(),
                Shape::Diamond => dx.abs() + dy.abs(),
            };
            if distance > dot.radius {
                continue;
            }
            let color = match dot.outline {
                Some(outline) if distance > dot.radius - outline.width => outline.color,
                _ => dot.fill,
            };
            canvas.set_pixel((px, py).into(), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::halftone::Outline;
    use crate::image::Color;

    fn dot(shape: Shape, radius: f32, outline: Option<Outline>) -> Dot {
        Dot {
            shape,
            cx: 5.0,
            cy: 5.0,
            radius,
            fill: Color::BLACK,
            outline,
        }
    }

    #[test]
    fn test_circle_fill_and_clip() {
        let mut canvas = Raster::filled((10, 10).into(), Color::WHITE);
        draw_dot(&mut canvas, &dot(Shape::Circle, 3.0, None));
        assert_eq!(canvas.pixel((5, 5).into()), Color::BLACK);
        assert_eq!(canvas.pixel((5, 2).into()), Color::BLACK);
        // Corners of the bounding box lie outside the disc.
        assert_eq!(canvas.pixel((2, 2).into()), Color::WHITE);
        assert_eq!(canvas.pixel((0, 0).into()), Color::WHITE);
    }

    #[test]
    fn test_dot_clipped_at_canvas_edge() {
        let mut canvas = Raster::filled((4, 4).into(), Color::WHITE);
        let clipped = Dot {
            shape: Shape::Circle,
            cx: 4.0,
            cy: 2.0,
            radius: 2.0,
            fill: Color::BLACK,
            outline: None,
        };
        draw_dot(&mut canvas, &clipped);
        assert_eq!(canvas.pixel((3, 2).into()), Color::BLACK);
        assert_eq!(canvas.pixel((0, 2).into()), Color::WHITE);
    }

    #[test]
    fn test_diamond_is_tighter_than_circle() {
        let mut circle_canvas = Raster::filled((10, 10).into(), Color::WHITE);
        let mut diamond_canvas = Raster::filled((10, 10).into(), Color::WHITE);
        draw_dot(&mut circle_canvas, &dot(Shape::Circle, 3.0, None));
        draw_dot(&mut diamond_canvas, &dot(Shape::Diamond, 3.0, None));
        // On-axis extent is identical...
        assert_eq!(diamond_canvas.pixel((5, 2).into()), Color::BLACK);
        assert_eq!(circle_canvas.pixel((5, 2).into()), Color::BLACK);
        // ...but near the diagonal only the circle reaches.
        assert_eq!(circle_canvas.pixel((2, 3).into()), Color::BLACK);
        assert_eq!(diamond_canvas.pixel((2, 3).into()), Color::WHITE);
    }

    #[test]
    fn test_outline_strokes_boundary_after_fill() {
        let outline = Outline {
            color: Color::new(200, 0, 0),
            width: 1.0,
        };
        let mut canvas = Raster::filled((12, 12).into(), Color::WHITE);
        let mut big = dot(Shape::Circle, 4.0, Some(outline));
        big.cx = 6.0;
        big.cy = 6.0;
        draw_dot(&mut canvas, &big);
        // Interior keeps the fill, the rim carries the outline.
        assert_eq!(canvas.pixel((6, 6).into()), Color::BLACK);
        assert_eq!(canvas.pixel((6, 2).into()), Color::new(200, 0, 0));
        assert_eq!(canvas.pixel((6, 1).into()), Color::WHITE);
    }

    #[test]
    fn test_later_dots_occlude_earlier() {
        let mut canvas = Raster::filled((10, 10).into(), Color::WHITE);
        draw_dot(&mut canvas, &dot(Shape::Circle, 3.0, None));
        let mut red = dot(Shape::Circle, 3.0, None);
        red.fill = Color::new(255, 0, 0);
        red.cx = 7.0;
        draw_dot(&mut canvas, &red);
        // Overlap region takes the later color.
        assert_eq!(canvas.pixel((5, 5).into()), Color::new(255, 0, 0));
        assert_eq!(canvas.pixel((3, 5).into()), Color::BLACK);
    }
}
