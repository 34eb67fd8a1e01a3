//! In-memory monochrome display buffer.
//!
//! Rows of packed bytes, one bit per pixel, most significant bit leftmost: the
//! same layout monochrome panel controllers expect. Implements
//! `embedded-graphics`'s `DrawTarget`, so the face can render into it exactly
//! as it would into a real panel driver.

use core::convert::Infallible;
use embedded_graphics::{
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::*,
    Pixel,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    /// A buffer with every pixel off.
    pub fn new(width: u32, height: u32) -> Self {
        let bytes_per_row = width.div_ceil(8);
        Self {
            width,
            height,
            bytes: vec![0x00; (bytes_per_row * height) as usize],
        }
    }

    pub fn fill(&mut self, color: BinaryColor) {
        self.bytes.fill(0x00);
        if color.is_on() {
            for y in 0..self.height {
                for x in 0..self.width {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        if x >= self.width || y >= self.height {
            return;
        }

        let (index, mask) = self.locate(x, y);
        if color.is_on() {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
    }

    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }

        let (index, mask) = self.locate(x, y);
        Some(BinaryColor::from(self.bytes[index] & mask != 0))
    }

    /// Number of pixels switched on.
    pub fn count_on(&self) -> u32 {
        // Padding bits at the end of each row are never set by set_pixel
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Every pixel that differs between `self` and `other`.
    ///
    /// Both buffers must have the same dimensions.
    pub fn changed_pixels(&self, other: &FrameBuffer) -> Vec<Point> {
        debug_assert_eq!(self.size(), other.size());

        let mut changed = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let point = Point::new(x, y);
                if self.pixel(point) != other.pixel(point) {
                    changed.push(point);
                }
            }
        }
        changed
    }

    /// Render as text, two characters per pixel so circles keep their aspect.
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let on = self.pixel(Point::new(x, y)) == Some(BinaryColor::On);
                out.push_str(if on { "██" } else { "  " });
            }
            out.push('\n');
        }
        out
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        let bytes_per_row = self.width.div_ceil(8);
        let index = (y * bytes_per_row + x / 8) as usize;
        (index, 0x80 >> (x % 8))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }
}
