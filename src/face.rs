//! # Clock Face Controller
//!
//! [`ClockFace`] owns everything the face needs between ticks: the latest
//! [`TimeSample`], the column geometry of the attached display, the current
//! date label and the connectivity indicator. The host feeds it events and
//! asks it to draw; nothing else holds face state.
//!
//! ## Invalidation cascade
//! Each tick is checked against the *new* time, finest unit first:
//!
//! 1. seconds shown: Seconds is dirty; stop unless `second == 0`
//! 2. Minutes is dirty; stop unless `minute == 0`
//! 3. Hours is dirty; stop unless `hour == 0`
//! 4. Date is dirty and the label is re-formatted
//!
//! So the hours unit is redrawn at most once an hour and the date is
//! re-formatted at most once a day.
//!
//! A late tick can skip the `:00` that would have cascaded. Each step
//! therefore also continues when its field differs from the previous sample,
//! so the first tick after a gap redraws every unit whose value moved.
//!
//! Attaching to a display, or resuming after the display was hidden, marks
//! every region dirty regardless of the time.

use crate::config::{Config, FaceConfig, TickGranularity};
use crate::connectivity::{Alert, ConnectivityIndicator};
use crate::date::{format_date, DateLabel};
use crate::digit::{encode, DigitCell, DigitPosition};
use crate::layout::{ColumnLayout, FaceGeometry};
use crate::region::{DirtySet, Region};
use crate::render::{self, Palette, RenderError};
use crate::TimeSample;
use embedded_graphics::{geometry::Size, pixelcolor::BinaryColor, prelude::DrawTarget};
use log::{debug, info, warn};
use std::mem;

pub struct ClockFace {
    face: FaceConfig,
    palette: Palette,
    date_height: u32,
    now: TimeSample,
    geometry: Option<FaceGeometry>,
    date_label: DateLabel,
    connectivity: ConnectivityIndicator,
}

impl ClockFace {
    /// A face showing `now`, not yet attached to a display.
    pub fn new(config: &Config, now: TimeSample) -> Self {
        Self {
            face: config.face.clone(),
            palette: config.face.palette(),
            date_height: config.display.date_height,
            now,
            geometry: None,
            date_label: format_date(&now),
            connectivity: ConnectivityIndicator::new(true, config.face.disconnect_notification),
        }
    }

    pub fn now(&self) -> &TimeSample {
        &self.now
    }

    pub fn granularity(&self) -> TickGranularity {
        self.face.granularity()
    }

    pub fn geometry(&self) -> Option<&FaceGeometry> {
        self.geometry.as_ref()
    }

    pub fn layout(&self) -> Option<&ColumnLayout> {
        self.geometry.as_ref().map(|g| &g.layout)
    }

    pub fn date_label(&self) -> &str {
        self.date_label.as_str()
    }

    pub fn indicator(&self) -> &'static str {
        self.connectivity.text()
    }

    /// Every region this face draws. Without seconds there is no seconds unit.
    pub fn all_regions(&self) -> DirtySet {
        let mut all = DirtySet::all();
        if self.granularity() == TickGranularity::Minute {
            all.remove(Region::Seconds);
        }
        all
    }

    /// A drawing surface of `size` became available (or was resized).
    ///
    /// Recomputes the column layout and returns every region as dirty.
    pub fn attach(&mut self, size: Size) -> DirtySet {
        let geometry = FaceGeometry::new(
            size,
            self.face.column_count(),
            self.face.radius(),
            self.date_height,
        );
        info!(
            "attached {}x{} display: col_offset = {}, col_spacing = {}",
            size.width, size.height, geometry.layout.offset, geometry.layout.spacing
        );
        self.geometry = Some(geometry);
        self.resume()
    }

    /// The surface went away; rendering is a no-op until the next attach.
    pub fn detach(&mut self) {
        self.geometry = None;
    }

    /// The display became visible again. Everything may be stale.
    pub fn resume(&mut self) -> DirtySet {
        self.date_label = format_date(&self.now);
        self.all_regions()
    }

    /// Take the new time sample and return the regions it invalidated.
    pub fn tick(&mut self, sample: TimeSample) -> DirtySet {
        debug_assert!(sample.is_valid(), "malformed tick: {sample:?}");
        let previous = mem::replace(&mut self.now, sample);

        let new_day = (sample.month, sample.day) != (previous.month, previous.day);
        let new_hour = new_day || sample.hour != previous.hour;
        let new_minute = new_hour || sample.minute != previous.minute;

        let mut dirty = DirtySet::empty();

        if self.granularity() == TickGranularity::Second {
            dirty.insert(Region::Seconds);
            if sample.second != 0 && !new_minute {
                return dirty;
            }
        }

        dirty.insert(Region::Minutes);
        if sample.minute != 0 && !new_hour {
            return dirty;
        }

        dirty.insert(Region::Hours);
        if sample.hour != 0 && !new_day {
            return dirty;
        }

        dirty.insert(Region::Date);
        self.date_label = format_date(&sample);
        info!("day rolled over: {}", self.date_label);
        dirty
    }

    /// The phone connection changed. Returns the regions to redraw and the
    /// alert to play, if any.
    pub fn connectivity_changed(&mut self, connected: bool) -> (DirtySet, Option<Alert>) {
        let update = self.connectivity.update(connected);
        let mut dirty = DirtySet::empty();
        if update.changed {
            dirty.insert(Region::Date);
        }
        (dirty, update.alert)
    }

    /// Redraw every region in `dirty`, seconds first and date last.
    pub fn render<D>(&self, target: &mut D, dirty: DirtySet) -> Result<(), RenderError<D::Error>>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for region in dirty.iter() {
            self.render_region(target, region)?;
        }
        Ok(())
    }

    /// Redraw a single region from the current state.
    pub fn render_region<D>(&self, target: &mut D, region: Region) -> Result<(), RenderError<D::Error>>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let Some(geometry) = self.geometry.as_ref() else {
            warn!("render of {:?} before attach; skipped", region);
            return Ok(());
        };
        if !self.all_regions().contains(region) {
            return Ok(());
        }

        debug!("update {:?}", region);
        let bounds = geometry.region_bounds(region);
        render::clear_region(target, &bounds, self.palette).map_err(RenderError::Draw)?;

        let (tens, ones, field) = match region {
            Region::Hours => (DigitPosition::HourTens, DigitPosition::HourOnes, self.now.hour),
            Region::Minutes => (
                DigitPosition::MinuteTens,
                DigitPosition::MinuteOnes,
                self.now.minute,
            ),
            Region::Seconds => (
                DigitPosition::SecondTens,
                DigitPosition::SecondOnes,
                self.now.second,
            ),
            Region::Date => {
                return render::draw_date_band(
                    target,
                    &bounds,
                    self.date_label.as_str(),
                    self.connectivity.text(),
                    self.palette,
                )
                .map_err(RenderError::Draw);
            }
        };

        let first_column = region.unit_index().unwrap_or(0) * 2;
        for (column, (position, value)) in
            (first_column..).zip(DigitPosition::split(tens, ones, field))
        {
            let cell = DigitCell::new(column, position, value);
            let pattern = encode(cell.value, cell.bit_width)?;
            render::draw_digit(
                target,
                &geometry.layout,
                &bounds,
                cell.column_index,
                &pattern,
                self.palette,
            )
            .map_err(RenderError::Draw)?;
        }
        Ok(())
    }
}
