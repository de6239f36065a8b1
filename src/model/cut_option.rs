//! Cut options produced by the sheet cut optimizer.

use serde::{Deserialize, Serialize};

use crate::config::EPS;

/// Qualitative ranking of a cut option, best last so `Ord` follows quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viability {
    Poor,
    Acceptable,
    Good,
    Optimal,
}

impl std::fmt::Display for Viability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Viability::Poor => write!(f, "poor"),
            Viability::Acceptable => write!(f, "acceptable"),
            Viability::Good => write!(f, "good"),
            Viability::Optimal => write!(f, "optimal"),
        }
    }
}

/// Piece heights stacked bottom to top to reach a target height.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillPattern {
    /// Height the pieces should add up to.
    pub target: f64,
    /// Piece heights, bottom first.
    pub pieces: Vec<f64>,
}

impl FillPattern {
    /// Create an empty pattern for the given target.
    pub fn new(target: f64) -> Self {
        Self {
            target,
            pieces: Vec::new(),
        }
    }

    /// Append a piece on top.
    pub fn push(&mut self, height: f64) {
        self.pieces.push(height);
    }

    /// Sum of all piece heights.
    pub fn total(&self) -> f64 {
        self.pieces.iter().sum()
    }

    /// Heights of the joints between consecutive pieces.
    pub fn joints(&self) -> Vec<f64> {
        let mut joints = Vec::with_capacity(self.pieces.len().saturating_sub(1));
        let mut acc = 0.0;
        for piece in self.pieces.iter().take(self.pieces.len().saturating_sub(1)) {
            acc += piece;
            joints.push(acc);
        }
        joints
    }

    /// Whether the pieces reach the target within `tolerance`.
    pub fn is_within(&self, tolerance: f64) -> bool {
        (self.total() - self.target).abs() <= tolerance + EPS
    }

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check if the pattern has no pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// One candidate way of dividing a donor sheet to stagger alternate courses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutOption {
    /// Number of equal pieces the donor sheet is divided into.
    pub divisions: usize,
    /// Height of each donor piece.
    pub piece_height: f64,
    /// Top piece of the even course, if one is needed.
    pub recut_height: Option<f64>,
    /// Odd courses: whole sheets first.
    pub odd_pattern: FillPattern,
    /// Even courses: a donor piece first, shifting every joint.
    pub even_pattern: FillPattern,
    /// How the donor sheet is divided.
    pub donor_pattern: FillPattern,
    /// Sheets opened by one odd course (whole sheets plus its top piece).
    pub odd_sheets: usize,
    /// Sheets opened by one even course, excluding the donor.
    pub even_sheets: usize,
    /// Whether both top pieces come out of one shared sheet.
    pub shared_top: bool,
    /// Sheets consumed per odd+even column pair.
    pub sheets_per_pair: f64,
    /// Discarded sheet height per column pair, in metres.
    pub waste: f64,
    /// Share of consumed material that ends up on the wall (%).
    pub utilization: f64,
    /// Smallest vertical distance between joints of adjacent courses.
    pub offset: f64,
    /// Whether the offset satisfies the minimum joint distance.
    pub feasible: bool,
    /// Qualitative rank.
    pub viability: Viability,
}

impl CutOption {
    /// Whether the donor sheet is used whole, i.e. courses are not staggered.
    pub fn is_whole_sheet(&self) -> bool {
        self.divisions == 1
    }
}
