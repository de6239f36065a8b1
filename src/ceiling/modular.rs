//! Modular ceiling tile and T-profile estimation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ceiling::trim::{allocate_room_trim, TrimAllocation};
use crate::config::{float_cmp, require_positive, CalcConfig, EPS};
use crate::error::{CalcError, Result};
use crate::model::{CeilingPanel, Room};

/// T-profile pieces by length class, and the stock bars they come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileTally {
    /// Full-length profiles, including remainders longer than half a profile.
    pub full: usize,
    /// Remainders up to half a profile.
    pub half: usize,
    /// Remainders up to a quarter of a profile.
    pub quarter: usize,
    /// Stock profiles to buy; halves and quarters share bars.
    pub bars: usize,
}

impl ProfileTally {
    /// Build a tally and derive the bar count.
    pub fn new(full: usize, half: usize, quarter: usize) -> Self {
        Self {
            full,
            half,
            quarter,
            bars: full + (2 * half + quarter).div_ceil(4),
        }
    }

    /// Pool two tallies; offcuts are shared across both.
    pub fn combine(&self, other: &ProfileTally) -> ProfileTally {
        ProfileTally::new(
            self.full + other.full,
            self.half + other.half,
            self.quarter + other.quarter,
        )
    }

    /// Tally the profiles covering `count` grid lines of `length` each.
    fn for_lines(count: usize, length: f64, profile: f64, tolerance: f64) -> ProfileTally {
        let mut full = 0;
        let mut half = 0;
        let mut quarter = 0;

        if count == 0 {
            return ProfileTally::default();
        }

        let whole = float_cmp::floor_div(length, profile);
        let rest = length - whole as f64 * profile;
        full += whole * count;

        if rest > tolerance {
            if rest <= profile / 4.0 + EPS {
                quarter += count;
            } else if rest <= profile / 2.0 + EPS {
                half += count;
            } else {
                full += count;
            }
        }

        ProfileTally::new(full, half, quarter)
    }
}

/// Tiles and profiles for one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingEstimate {
    pub room: Room,
    pub panel: CeilingPanel,
    /// Tiles laid uncut.
    pub whole_panels: usize,
    /// Edge strips along the width edge (narrower than a tile).
    pub width_strips: usize,
    /// Edge strips along the length edge (shorter than a tile).
    pub length_strips: usize,
    /// Whether a corner piece is needed.
    pub corner: bool,
    /// Tiles cut to produce every edge piece, reusing offcuts across rows.
    pub panels_for_cuts: usize,
    /// Tiles to buy.
    pub total_panels: usize,
    /// T-profiles for the interior grid.
    pub profiles: ProfileTally,
}

impl CeilingEstimate {
    /// Number of cut pieces laid.
    pub fn cut_pieces(&self) -> usize {
        self.width_strips + self.length_strips + usize::from(self.corner)
    }
}

/// Estimate tiles and T-profiles for one room.
pub fn calculate_ceiling(
    room: &Room,
    panel: CeilingPanel,
    config: &CalcConfig,
) -> Result<CeilingEstimate> {
    let width = require_positive("room width", room.width)?;
    let length = require_positive("room length", room.length)?;
    let profile = require_positive("profile_length", config.profile_length)?;
    let tol = config.tolerance;

    let pw = panel.module_width();
    let pl = panel.module_length();

    let cols = float_cmp::floor_div(width, pw);
    let rows = float_cmp::floor_div(length, pl);
    let rest_x = width - cols as f64 * pw;
    let rest_y = length - rows as f64 * pl;
    let has_x = rest_x > tol;
    let has_y = rest_y > tol;

    let width_strips = if has_x { rows } else { 0 };
    let length_strips = if has_y { cols } else { 0 };
    let corner = has_x && has_y;

    let mut panels_for_cuts = usize::from(corner);
    if width_strips > 0 {
        let per_panel = float_cmp::floor_div(pw, rest_x).max(1);
        panels_for_cuts += width_strips.div_ceil(per_panel);
    }
    if length_strips > 0 {
        let per_panel = float_cmp::floor_div(pl, rest_y).max(1);
        panels_for_cuts += length_strips.div_ceil(per_panel);
    }

    let whole_panels = cols * rows;
    let total_panels = whole_panels + panels_for_cuts;

    let lines_along = float_cmp::ceil_div(width, pw).saturating_sub(1);
    let lines_across = float_cmp::ceil_div(length, pl).saturating_sub(1);
    let profiles = ProfileTally::for_lines(lines_along, length, profile, tol)
        .combine(&ProfileTally::for_lines(lines_across, width, profile, tol));

    debug!(
        cols,
        rows,
        rest_x,
        rest_y,
        lines_along,
        lines_across,
        "Ceiling grid"
    );

    Ok(CeilingEstimate {
        room: room.clone(),
        panel,
        whole_panels,
        width_strips,
        length_strips,
        corner,
        panels_for_cuts,
        total_panels,
        profiles,
    })
}

/// Ceiling estimate for several rooms sharing one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeilingSummary {
    pub panel: CeilingPanel,
    pub rooms: Vec<CeilingEstimate>,
    pub total_panels: usize,
    /// Profiles pooled over all rooms.
    pub profiles: ProfileTally,
    /// Perimeter trim for all rooms.
    pub trim: TrimAllocation,
}

/// Estimate tiles, profiles and perimeter trim for a set of rooms.
pub fn calculate_ceilings(
    rooms: &[Room],
    panel: CeilingPanel,
    config: &CalcConfig,
) -> Result<CeilingSummary> {
    if rooms.is_empty() {
        return Err(CalcError::EmptyInput {
            what: "ceiling needs at least one room".to_string(),
        });
    }

    let estimates = rooms
        .iter()
        .map(|room| calculate_ceiling(room, panel, config))
        .collect::<Result<Vec<_>>>()?;

    let total_panels = estimates.iter().map(|e| e.total_panels).sum();
    let profiles = estimates
        .iter()
        .fold(ProfileTally::default(), |acc, e| acc.combine(&e.profiles));
    let trim = allocate_room_trim(rooms, config)?;

    info!(
        "Ceiling {}: {} room(s), {} tiles, {} profile bars, {}",
        panel,
        estimates.len(),
        total_panels,
        profiles.bars,
        trim
    );

    Ok(CeilingSummary {
        panel,
        rooms: estimates,
        total_panels,
        profiles,
        trim,
    })
}
