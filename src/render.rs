//! # Region Rendering
//!
//! Turns encoded digits and the date label into `embedded-graphics`
//! primitives. All drawing for a region goes through a view clipped to that
//! region's rectangle, so redrawing one region can never disturb another.
//!
//! ## Dot placement
//! For bit `i` of column `c` (bit 0 nearest the bottom):
//!
//! ```text
//! x = offset + radius + c * (2 * radius + spacing)
//! y = region_bottom - radius * (3 * i + 2)
//! ```
//!
//! Each dot is a `2 * radius` circle around that point: filled for a set bit,
//! a one pixel outline for a clear bit. Dots are stacked three radii apart,
//! which leaves one radius of air between them.

use crate::digit::BitPattern;
use crate::layout::ColumnLayout;
use crate::ClockError;
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use thiserror::Error;

/// Failure while redrawing a region.
#[derive(Error, Debug)]
pub enum RenderError<E> {
    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("draw target error: {0:?}")]
    Draw(E),
}

/// Foreground/background pair for a monochrome panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub foreground: BinaryColor,
    pub background: BinaryColor,
}

impl Palette {
    /// White dots on black, or the reverse when `invert` is set.
    pub fn new(invert: bool) -> Self {
        if invert {
            Self {
                foreground: BinaryColor::Off,
                background: BinaryColor::On,
            }
        } else {
            Self::default()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: BinaryColor::On,
            background: BinaryColor::Off,
        }
    }
}

/// One dot of a digit column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dot {
    pub center: Point,
    pub filled: bool,
}

impl Dot {
    /// The circle covering this dot for the given radius.
    pub fn circle(&self, radius: u32) -> Circle {
        let r = radius as i32;
        Circle::new(self.center - Point::new(r, r), 2 * radius)
    }
}

/// The dots for one column, bottom dot first.
pub fn digit_dots<'a>(
    layout: &'a ColumnLayout,
    region: &'a Rectangle,
    column_index: u32,
    pattern: &'a BitPattern,
) -> impl Iterator<Item = Dot> + 'a {
    let r = layout.radius as i32;
    let x = layout.column_center_x(column_index);
    let region_bottom = region.top_left.y + region.size.height as i32;

    pattern.iter().enumerate().map(move |(i, filled)| Dot {
        center: Point::new(x, region_bottom - r * (3 * i as i32 + 2)),
        filled,
    })
}

/// Fill `region` with the background color.
pub fn clear_region<D>(target: &mut D, region: &Rectangle, palette: Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clipped(region).fill_solid(region, palette.background)
}

/// Draw one digit column inside `region`.
pub fn draw_digit<D>(
    target: &mut D,
    layout: &ColumnLayout,
    region: &Rectangle,
    column_index: u32,
    pattern: &BitPattern,
    palette: Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut clipped = target.clipped(region);
    let filled = PrimitiveStyle::with_fill(palette.foreground);
    let hollow = PrimitiveStyleBuilder::new()
        .stroke_color(palette.foreground)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    for dot in digit_dots(layout, region, column_index, pattern) {
        let style = if dot.filled { filled } else { hollow };
        dot.circle(layout.radius)
            .into_styled(style)
            .draw(&mut clipped)?;
    }
    Ok(())
}

/// Draw the date label centered in the date band, and the connectivity
/// indicator in its top-left corner.
pub fn draw_date_band<D>(
    target: &mut D,
    region: &Rectangle,
    label: &str,
    indicator: &str,
    palette: Palette,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut clipped = target.clipped(region);

    let label_style = MonoTextStyle::new(&FONT_10X20, palette.foreground);
    let centered = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(label, region.center(), label_style, centered).draw(&mut clipped)?;

    if !indicator.is_empty() {
        let indicator_style = MonoTextStyle::new(&FONT_6X10, palette.foreground);
        Text::with_baseline(
            indicator,
            region.top_left + Point::new(2, 2),
            indicator_style,
            Baseline::Top,
        )
        .draw(&mut clipped)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digit::encode;
    use crate::framebuffer::FrameBuffer;

    fn region() -> Rectangle {
        Rectangle::new(Point::new(9, 40), Size::new(38, 128))
    }

    #[test]
    fn test_dot_positions() {
        let layout = ColumnLayout::compute(144, 6, 8);
        let pattern = encode(5, 4).unwrap();
        let dots: Vec<Dot> = digit_dots(&layout, &region(), 1, &pattern).collect();

        // x = 9 + 8 + 1 * 22, y = 168 - 8 * (3i + 2)
        assert_eq!(
            dots,
            vec![
                Dot { center: Point::new(39, 152), filled: true },
                Dot { center: Point::new(39, 128), filled: false },
                Dot { center: Point::new(39, 104), filled: true },
                Dot { center: Point::new(39, 80), filled: false },
            ]
        );
    }

    #[test]
    fn test_dot_circles_tile_the_unit() {
        let layout = ColumnLayout::compute(144, 6, 8);
        let pattern = encode(1, 2).unwrap();
        let bounds = region();

        for column in 0..2 {
            for dot in digit_dots(&layout, &bounds, column, &pattern) {
                let circle = dot.circle(layout.radius).bounding_box();
                assert_eq!(circle.intersection(&bounds), circle, "{dot:?} escapes its region");
            }
        }
    }

    #[test]
    fn test_filled_and_hollow_dots() {
        let layout = ColumnLayout::compute(144, 6, 8);
        let bounds = region();
        let mut fb = FrameBuffer::new(144, 168);

        draw_digit(&mut fb, &layout, &bounds, 0, &encode(1, 2).unwrap(), Palette::default())
            .unwrap();

        let dots: Vec<Dot> = digit_dots(&layout, &bounds, 0, &encode(1, 2).unwrap()).collect();
        assert_eq!(fb.pixel(dots[0].center), Some(BinaryColor::On));
        assert_eq!(fb.pixel(dots[1].center), Some(BinaryColor::Off));

        let filled = Palette::default();
        let mut single = FrameBuffer::new(144, 168);
        dots[0]
            .circle(8)
            .into_styled(PrimitiveStyle::with_fill(filled.foreground))
            .draw(&mut single)
            .unwrap();
        assert!(fb.count_on() > single.count_on(), "outline adds pixels");
        assert!(fb.count_on() < 2 * single.count_on(), "outline is not filled");
    }

    #[test]
    fn test_drawing_stays_inside_region() {
        let layout = ColumnLayout::compute(144, 6, 8);
        let bounds = region();
        let mut fb = FrameBuffer::new(144, 168);
        fb.fill(BinaryColor::On);
        let before = fb.clone();

        clear_region(&mut fb, &bounds, Palette::default()).unwrap();
        draw_digit(&mut fb, &layout, &bounds, 0, &encode(2, 2).unwrap(), Palette::default())
            .unwrap();
        draw_digit(&mut fb, &layout, &bounds, 1, &encode(9, 4).unwrap(), Palette::default())
            .unwrap();

        for point in before.changed_pixels(&fb) {
            assert!(bounds.contains(point), "{point:?} outside {bounds:?}");
        }
    }

    #[test]
    fn test_inverted_palette() {
        let palette = Palette::new(true);
        assert_eq!(palette.foreground, BinaryColor::Off);
        assert_eq!(palette.background, BinaryColor::On);
        assert_eq!(Palette::new(false), Palette::default());
    }

    #[test]
    fn test_date_band_draws_text() {
        let band = Rectangle::new(Point::zero(), Size::new(144, 40));
        let mut fb = FrameBuffer::new(144, 168);
        draw_date_band(&mut fb, &band, "Wed Mar 05", "", Palette::default()).unwrap();

        let on = fb.count_on();
        assert!(on > 0, "label should draw pixels");

        let mut with_indicator = FrameBuffer::new(144, 168);
        draw_date_band(&mut with_indicator, &band, "Wed Mar 05", "BT", Palette::default())
            .unwrap();
        assert!(with_indicator.count_on() > on);

        for point in FrameBuffer::new(144, 168).changed_pixels(&with_indicator) {
            assert!(band.contains(point));
        }
    }
}
