//! Wall segments and the trim bars they are packed onto.

use serde::{Deserialize, Serialize};

use crate::config::EPS;

/// Which pair of walls a segment comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Wall running along the room width.
    #[default]
    Width,
    /// Wall running along the room length.
    Length,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Width => write!(f, "width"),
            Orientation::Length => write!(f, "length"),
        }
    }
}

/// A stretch of wall that needs trim.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WallSegment {
    /// Segment length.
    pub length: f64,
    /// Index of the room the wall belongs to.
    pub room: usize,
    /// Width wall or length wall.
    pub orientation: Orientation,
    /// Leftover of a wall longer than a bar.
    pub remainder: bool,
}

impl WallSegment {
    /// Create a segment for a room wall.
    pub fn new(length: f64, room: usize, orientation: Orientation) -> Self {
        Self {
            length,
            room,
            orientation,
            remainder: false,
        }
    }

    /// Same wall, different length, flagged as a remainder.
    pub fn remainder_of(&self, length: f64) -> Self {
        Self {
            length,
            remainder: true,
            ..*self
        }
    }
}

/// Maximum number of segments a single bar may carry.
pub const MAX_SEGMENTS_PER_BAR: usize = 2;

/// A stock trim bar with the segments cut from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimBar {
    /// Stock length.
    pub length: f64,
    /// Segments cut from this bar, at most two.
    pub segments: Vec<WallSegment>,
}

impl TrimBar {
    /// Create an empty bar.
    pub fn new(length: f64) -> Self {
        Self {
            length,
            segments: Vec::with_capacity(MAX_SEGMENTS_PER_BAR),
        }
    }

    /// Total length assigned to the bar.
    pub fn used(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }

    /// Length left over after all assigned cuts.
    pub fn offcut(&self) -> f64 {
        (self.length - self.used()).max(0.0)
    }

    /// Whether the segment can still be cut from this bar.
    pub fn can_fit(&self, segment: &WallSegment) -> bool {
        self.segments.len() < MAX_SEGMENTS_PER_BAR && segment.length <= self.offcut() + EPS
    }

    /// Assign a segment; returns `false` and leaves the bar untouched if it does not fit.
    pub fn add(&mut self, segment: WallSegment) -> bool {
        if !self.can_fit(&segment) {
            return false;
        }
        self.segments.push(segment);
        true
    }

    /// Whether two segments share this bar.
    pub fn is_split(&self) -> bool {
        self.segments.len() == MAX_SEGMENTS_PER_BAR
    }
}
