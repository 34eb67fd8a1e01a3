//! # Column Layout
//!
//! Positions the dot columns across the display width. The columns are spread
//! evenly: the leftover width after placing every dot is split into
//! `column_count + 1` equal gaps, and whatever the integer division leaves
//! over is split between the two outer margins.
//!
//! ```text
//!  offset  2r  spacing  2r  spacing  2r  ...  2r  offset
//! |------|(o)|-------|(o)|-------|(o)| ... |(o)|------|
//! ```
//!
//! The arithmetic is integer-exact (truncating division) because the result
//! decides which pixel every dot lands on.
//!
//! ## Narrow displays
//! If the display is narrower than `2 * radius * column_count` the raw formula
//! produces a negative spacing. [`ColumnLayout::compute`] clamps spacing and
//! offset to zero, logs a warning and records the clamp; the dots then overlap
//! the right edge but the render loop keeps running.
//! [`ColumnLayout::try_compute`] reports the same situation as an error.

use crate::region::Region;
use crate::ClockError;
use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};
use log::{debug, warn};

/// Largest dot radius a layout accepts. Bigger values are clamped to it.
pub const MAX_RADIUS: u32 = 255;

/// Derived horizontal geometry of the dot columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    /// X of the left edge of the first column
    pub offset: i32,
    /// Gap between adjacent columns
    pub spacing: i32,
    /// Dot radius
    pub radius: u32,
    pub column_count: u32,
    clamped: bool,
}

impl ColumnLayout {
    /// Lay out `column_count` columns of `radius` dots across `display_width`.
    ///
    /// A radius above [`MAX_RADIUS`] is clamped to it.
    ///
    /// # Panics
    /// Panics if `column_count` or `radius` is zero.
    pub fn compute(display_width: i32, column_count: u32, radius: u32) -> Self {
        assert!(
            column_count > 0 && radius > 0,
            "column layout needs at least one column and a non-zero radius"
        );

        let requested_radius = radius;
        let radius = radius.min(MAX_RADIUS);

        let width = i64::from(display_width);
        let cols = i64::from(column_count);
        let r = i64::from(radius);

        let raw_spacing = (width - 2 * cols * r) / (cols + 1);
        let spacing = raw_spacing.max(0);
        let raw_offset = (width - spacing * (cols - 1) - 2 * cols * r) / 2;
        let offset = raw_offset.max(0);
        let clamped = raw_spacing < 0 || raw_offset < 0 || requested_radius != radius;

        debug!(
            "display width = {}, col_spacing = {}, col_offset = {}",
            display_width, spacing, offset
        );
        if clamped {
            warn!(
                "layout clamped for display width {}, {} columns of radius {}: radius -> {}, spacing {} -> {}, offset {} -> {}",
                display_width, column_count, requested_radius, radius, raw_spacing, spacing, raw_offset, offset
            );
        }

        // both are non-negative and bounded by the display width
        Self {
            offset: i32::try_from(offset).unwrap_or(i32::MAX),
            spacing: i32::try_from(spacing).unwrap_or(i32::MAX),
            radius,
            column_count,
            clamped,
        }
    }

    /// Like [`compute`](Self::compute), but reports bad geometry instead of
    /// clamping it.
    pub fn try_compute(
        display_width: i32,
        column_count: u32,
        radius: u32,
    ) -> Result<Self, ClockError> {
        if column_count == 0 || radius == 0 || radius > MAX_RADIUS {
            return Err(ClockError::InvalidGeometry {
                column_count,
                radius,
            });
        }
        if i64::from(display_width) < 2 * i64::from(column_count) * i64::from(radius) {
            return Err(ClockError::DisplayTooNarrow {
                width: display_width,
                column_count,
                radius,
            });
        }
        Ok(Self::compute(display_width, column_count, radius))
    }

    /// True when the raw formula went negative and was clamped to zero.
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }

    /// Distance between the centers of adjacent columns.
    pub fn pitch(&self) -> i32 {
        2 * self.radius as i32 + self.spacing
    }

    /// X of the center of column `column_index`.
    pub fn column_center_x(&self, column_index: u32) -> i32 {
        self.offset + self.radius as i32 + column_index as i32 * self.pitch()
    }

    /// Rightmost extent of the last column, measured from x = 0.
    pub fn footprint_width(&self) -> i32 {
        let cols = self.column_count as i32;
        self.offset + (cols - 1) * self.pitch() + 2 * self.radius as i32
    }

    /// Width of a two-column unit (tens + ones of one field).
    pub fn unit_width(&self) -> i32 {
        4 * self.radius as i32 + self.spacing
    }

    /// Distance between the left edges of adjacent units.
    pub fn unit_offset(&self) -> i32 {
        self.unit_width() + self.spacing
    }
}

/// Everything needed to place the regions on one attached display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceGeometry {
    pub layout: ColumnLayout,
    pub size: Size,
    /// Height of the date band across the top of the display
    pub date_height: u32,
}

impl FaceGeometry {
    pub fn new(size: Size, column_count: u32, radius: u32, date_height: u32) -> Self {
        Self {
            layout: ColumnLayout::compute(size.width as i32, column_count, radius),
            size,
            date_height,
        }
    }

    /// Rectangle owned by `region`. Digit regions hang below the date band and
    /// span the rest of the display height.
    pub fn region_bounds(&self, region: Region) -> Rectangle {
        match region.unit_index() {
            None => Rectangle::new(
                Point::zero(),
                Size::new(self.size.width, self.date_height.min(self.size.height)),
            ),
            Some(unit) => {
                let x = self.layout.offset + unit as i32 * self.layout.unit_offset();
                let top = self.date_height.min(self.size.height);
                Rectangle::new(
                    Point::new(x, top as i32),
                    Size::new(
                        self.layout.unit_width().max(0) as u32,
                        self.size.height - top,
                    ),
                )
            }
        }
    }
}
