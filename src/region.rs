//! Display regions and the per-tick dirty set.

use core::fmt;

/// One independently redrawn area of the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Hours,
    Minutes,
    Seconds,
    Date,
}

impl Region {
    /// Regions in redraw order.
    pub const RENDER_ORDER: [Region; 4] =
        [Region::Seconds, Region::Minutes, Region::Hours, Region::Date];

    /// Left-to-right index of the two-column unit, `None` for the date band.
    pub const fn unit_index(self) -> Option<u32> {
        match self {
            Region::Hours => Some(0),
            Region::Minutes => Some(1),
            Region::Seconds => Some(2),
            Region::Date => None,
        }
    }

    const fn mask(self) -> u8 {
        match self {
            Region::Seconds => 1 << 0,
            Region::Minutes => 1 << 1,
            Region::Hours => 1 << 2,
            Region::Date => 1 << 3,
        }
    }
}

/// Regions whose content is stale. Built per tick, consumed by one render.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtySet(u8);

impl DirtySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b1111)
    }

    pub fn insert(&mut self, region: Region) {
        self.0 |= region.mask();
    }

    pub fn remove(&mut self, region: Region) {
        self.0 &= !region.mask();
    }

    pub fn contains(&self, region: Region) -> bool {
        self.0 & region.mask() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Dirty regions in redraw order: seconds, minutes, hours, date.
    pub fn iter(&self) -> impl Iterator<Item = Region> + '_ {
        Region::RENDER_ORDER
            .into_iter()
            .filter(move |region| self.contains(*region))
    }
}

impl FromIterator<Region> for DirtySet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        let mut set = DirtySet::empty();
        for region in iter {
            set.insert(region);
        }
        set
    }
}

impl fmt::Debug for DirtySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
