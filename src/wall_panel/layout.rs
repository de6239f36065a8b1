//! Wall panel layout and fixing estimation.
//!
//! Panels are laid in courses from the bottom of the wall, left to right.
//! Each piece is tried upright, then rotated 90 degrees; when neither fits
//! whole it is cut to the space left, in whichever orientation covers more.
//! The first piece of a course sets the course height. Cut pieces come from
//! offcuts of earlier cuts when one is large enough.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{require_positive, CalcConfig, EPS};
use crate::error::Result;
use crate::model::{PanelSpec, WallPanelSize};

/// One panel or panel piece on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Long side laid horizontally.
    pub rotated: bool,
    /// Cut down from a whole panel.
    pub cut: bool,
    /// Taken from an offcut instead of a fresh panel.
    pub from_offcut: bool,
}

impl Placement {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Panel layout for one wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallPanelLayout {
    pub wall_width: f64,
    pub wall_height: f64,
    pub size: WallPanelSize,
    pub placements: Vec<Placement>,
    /// Panels to buy.
    pub panels: usize,
    /// Wall area covered by placements.
    pub covered_area: f64,
    /// Covered area over purchased panel area (%).
    pub utilization: f64,
    pub supports: u32,
    pub fasteners: u32,
    /// Total panel weight in kilograms.
    pub weight: f64,
}

/// Leftover rectangle available for later cut pieces.
#[derive(Debug, Clone, Copy)]
struct Offcut {
    width: f64,
    height: f64,
}

impl Offcut {
    /// Guillotine leftovers after taking `width` x `height` from a `stock_w` x `stock_h` rectangle.
    fn leftovers(
        stock_w: f64,
        stock_h: f64,
        width: f64,
        height: f64,
        tolerance: f64,
    ) -> Vec<Offcut> {
        [
            Offcut {
                width: stock_w - width,
                height: stock_h,
            },
            Offcut {
                width,
                height: stock_h - height,
            },
        ]
        .into_iter()
        .filter(|o| o.width > tolerance && o.height > tolerance)
        .collect()
    }
}

/// Take a `width` x `height` piece from the first offcut that holds it, in either orientation.
fn take_from_offcuts(offcuts: &mut Vec<Offcut>, width: f64, height: f64, tolerance: f64) -> bool {
    let found = offcuts.iter().enumerate().find_map(|(idx, o)| {
        if width <= o.width + EPS && height <= o.height + EPS {
            Some((idx, o.width, o.height))
        } else if width <= o.height + EPS && height <= o.width + EPS {
            Some((idx, o.height, o.width))
        } else {
            None
        }
    });

    match found {
        Some((idx, stock_w, stock_h)) => {
            offcuts.swap_remove(idx);
            offcuts.extend(Offcut::leftovers(stock_w, stock_h, width, height, tolerance));
            true
        }
        None => false,
    }
}

/// Choose the piece for the space left: (width, height, rotated, cut).
fn choose_piece(
    spec: &PanelSpec,
    avail_w: f64,
    avail_h: f64,
    course_h: Option<f64>,
) -> (f64, f64, bool, bool) {
    let (pw, ph) = (spec.width, spec.length);

    if pw <= avail_w + EPS && ph <= avail_h + EPS {
        return (pw, ph, false, false);
    }
    if ph <= avail_w + EPS && pw <= avail_h + EPS {
        return (ph, pw, true, false);
    }

    let upright = (pw.min(avail_w), ph.min(avail_h));
    let rotated = (ph.min(avail_w), pw.min(avail_h));
    // Later pieces in a course must reach the course height.
    let rotated_allowed = course_h.map_or(true, |h| rotated.1 >= h - EPS);

    if rotated_allowed && rotated.0 * rotated.1 > upright.0 * upright.1 + EPS {
        (rotated.0, rotated.1, true, true)
    } else {
        (upright.0, upright.1, false, true)
    }
}

/// Lay panels of the given size over a wall.
pub fn layout_wall(
    width: f64,
    height: f64,
    size: WallPanelSize,
    config: &CalcConfig,
) -> Result<WallPanelLayout> {
    let wall_width = require_positive("wall width", width)?;
    let wall_height = require_positive("wall height", height)?;
    let spec = size.spec();
    let tol = config.tolerance;

    let mut placements = Vec::new();
    let mut offcuts: Vec<Offcut> = Vec::new();
    let mut panels = 0usize;

    let mut y = 0.0;
    while wall_height - y > tol {
        let mut x = 0.0;
        let mut course_h: Option<f64> = None;

        while wall_width - x > tol {
            let avail_w = wall_width - x;
            let avail_h = course_h.unwrap_or(wall_height - y);
            let (w, h, rotated, cut) = choose_piece(spec, avail_w, avail_h, course_h);

            let from_offcut = cut && take_from_offcuts(&mut offcuts, w, h, tol);
            if !from_offcut {
                panels += 1;
                if cut {
                    let (stock_w, stock_h) = if rotated {
                        (spec.length, spec.width)
                    } else {
                        (spec.width, spec.length)
                    };
                    offcuts.extend(Offcut::leftovers(stock_w, stock_h, w, h, tol));
                }
            }

            placements.push(Placement {
                x,
                y,
                width: w,
                height: h,
                rotated,
                cut,
                from_offcut,
            });

            course_h.get_or_insert(h);
            x += w;
        }

        let Some(h) = course_h else { break };
        debug!(y, course_height = h, "Course laid");
        y += h;
    }

    let covered_area: f64 = placements.iter().map(Placement::area).sum();
    let purchased = panels as f64 * spec.area();
    let utilization = if purchased > 0.0 {
        (covered_area / purchased * 100.0).min(100.0)
    } else {
        0.0
    };

    let layout = WallPanelLayout {
        wall_width,
        wall_height,
        size,
        placements,
        panels,
        covered_area,
        utilization,
        supports: panels as u32 * spec.supports,
        fasteners: panels as u32 * spec.fasteners,
        weight: panels as f64 * spec.weight,
    };

    info!(
        "Wall {:.2}x{:.2}m with {} panels: {} panel(s), {:.1}% utilization",
        wall_width, wall_height, size, layout.panels, layout.utilization
    );
    Ok(layout)
}
