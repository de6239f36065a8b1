//! Cantoneira (perimeter corner trim) allocation.
//!
//! Walls longer than a bar consume whole bars first; what is left of them
//! joins the short walls. Short pieces are packed longest first, each bar
//! taking one piece plus at most one more piece from its offcut.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{float_cmp, require_positive, CalcConfig, EPS};
use crate::error::{CalcError, Result};
use crate::model::{Orientation, Room, TrimBar, WallSegment};

/// Trim bars needed for a set of walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimAllocation {
    /// Stock bar length.
    pub bar_length: f64,
    /// Bars in allocation order.
    pub bars: Vec<TrimBar>,
}

impl TrimAllocation {
    /// Bars to buy.
    pub fn total_bars(&self) -> usize {
        self.bars.len()
    }

    /// Bars carrying a single piece.
    pub fn whole_bars(&self) -> usize {
        self.bars.iter().filter(|b| !b.is_split()).count()
    }

    /// Bars cut into two reused pieces.
    pub fn split_bars(&self) -> usize {
        self.bars.iter().filter(|b| b.is_split()).count()
    }

    /// Sum of all offcuts.
    pub fn total_offcut(&self) -> f64 {
        self.bars.iter().map(TrimBar::offcut).sum()
    }

    /// Total trim length placed on walls.
    pub fn total_used(&self) -> f64 {
        self.bars.iter().map(TrimBar::used).sum()
    }
}

impl std::fmt::Display for TrimAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bars ({} whole, {} split)",
            self.total_bars(),
            self.whole_bars(),
            self.split_bars()
        )
    }
}

/// Four walls per room: width, length, width, length.
pub fn perimeter_segments(rooms: &[Room]) -> Vec<WallSegment> {
    rooms
        .iter()
        .enumerate()
        .flat_map(|(idx, room)| {
            [
                WallSegment::new(room.width, idx, Orientation::Width),
                WallSegment::new(room.length, idx, Orientation::Length),
                WallSegment::new(room.width, idx, Orientation::Width),
                WallSegment::new(room.length, idx, Orientation::Length),
            ]
        })
        .collect()
}

/// Start a bar with its first segment.
fn open_bar(bar_length: f64, segment: WallSegment) -> Result<TrimBar> {
    let mut bar = TrimBar::new(bar_length);
    if !bar.add(segment) {
        return Err(CalcError::InvalidDimension {
            field: "segment length".to_string(),
            value: segment.length,
        });
    }
    Ok(bar)
}

/// Pack wall segments onto stock bars.
pub fn allocate_trim(segments: &[WallSegment], config: &CalcConfig) -> Result<TrimAllocation> {
    let bar_length = require_positive("trim_bar_length", config.trim_bar_length)?;
    for segment in segments {
        require_positive("segment length", segment.length)?;
    }

    let mut bars = Vec::new();
    let mut short = Vec::with_capacity(segments.len());

    for segment in segments {
        if segment.length <= bar_length + EPS {
            short.push(*segment);
            continue;
        }

        let whole = float_cmp::floor_div(segment.length, bar_length);
        for _ in 0..whole {
            bars.push(open_bar(
                bar_length,
                WallSegment {
                    length: bar_length,
                    ..*segment
                },
            )?);
        }

        let rest = segment.length - whole as f64 * bar_length;
        debug!(
            length = segment.length,
            whole,
            rest,
            "Long wall split into whole bars"
        );
        if rest > config.tolerance {
            short.push(segment.remainder_of(rest));
        }
    }

    short.sort_by(|a, b| b.length.total_cmp(&a.length));

    let mut placed = vec![false; short.len()];
    for head in 0..short.len() {
        if placed[head] {
            continue;
        }
        placed[head] = true;
        let mut bar = open_bar(bar_length, short[head])?;

        let second =
            (head + 1..short.len()).find(|&idx| !placed[idx] && bar.can_fit(&short[idx]));
        if let Some(idx) = second {
            placed[idx] = bar.add(short[idx]);
        }
        bars.push(bar);
    }

    let allocation = TrimAllocation { bar_length, bars };
    info!(
        "Trim: {} for {:.2}m of wall, offcut {:.2}m",
        allocation,
        allocation.total_used(),
        allocation.total_offcut()
    );
    Ok(allocation)
}

/// Allocate trim for the perimeters of the given rooms.
pub fn allocate_room_trim(rooms: &[Room], config: &CalcConfig) -> Result<TrimAllocation> {
    allocate_trim(&perimeter_segments(rooms), config)
}
