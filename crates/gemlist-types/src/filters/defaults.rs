//! Default range bounds per catalog kind.
//!
//! Multi-select and text facets always default to empty; only the numeric
//! spans differ between kinds.

use crate::{RangeBounds, Subtype};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondRanges {
    pub carat_weight: RangeBounds,
    pub price: RangeBounds,
    pub table: RangeBounds,
    pub depth: RangeBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GemstoneRanges {
    pub carat_weight: RangeBounds,
    pub price: RangeBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchRanges {
    pub price: RangeBounds,
    pub case_size: RangeBounds,
    pub year: RangeBounds,
}

const PERCENT: RangeBounds = RangeBounds::new(0.0, 100.0);

pub fn diamond_ranges(subtype: Subtype) -> DiamondRanges {
    match subtype {
        Subtype::Single => DiamondRanges {
            carat_weight: RangeBounds::new(0.1, 50.0),
            price: RangeBounds::new(0.0, 1_000_000.0),
            table: PERCENT,
            depth: PERCENT,
        },
        Subtype::Melee => DiamondRanges {
            carat_weight: RangeBounds::new(0.001, 0.3),
            price: RangeBounds::new(0.0, 10_000.0),
            table: PERCENT,
            depth: PERCENT,
        },
    }
}

pub fn gemstone_ranges(subtype: Subtype) -> GemstoneRanges {
    match subtype {
        Subtype::Single => GemstoneRanges {
            carat_weight: RangeBounds::new(0.1, 100.0),
            price: RangeBounds::new(0.0, 500_000.0),
        },
        Subtype::Melee => GemstoneRanges {
            carat_weight: RangeBounds::new(0.001, 1.0),
            price: RangeBounds::new(0.0, 5_000.0),
        },
    }
}

pub fn watch_ranges() -> WatchRanges {
    WatchRanges {
        price: RangeBounds::new(0.0, 2_000_000.0),
        case_size: RangeBounds::new(20.0, 60.0),
        year: RangeBounds::new(1900.0, 2030.0),
    }
}
