//! Panel catalogs: wall panels with their fixing specs, and modular ceiling tiles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Static catalog entry for a wall panel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelSpec {
    /// Catalog name, e.g. `120x240`.
    pub name: &'static str,
    /// Thickness in metres.
    pub thickness: f64,
    /// Short side in metres.
    pub width: f64,
    /// Long side in metres.
    pub length: f64,
    /// Weight of one panel in kilograms.
    pub weight: f64,
    /// Supports required per panel.
    pub supports: u32,
    /// Fasteners required per panel.
    pub fasteners: u32,
}

impl PanelSpec {
    /// Face area of one panel.
    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Whether a `width` x `length` piece can be cut from this panel, rotated or not.
    pub fn fits(&self, width: f64, length: f64) -> bool {
        let eps = crate::config::EPS;
        (width <= self.width + eps && length <= self.length + eps)
            || (width <= self.length + eps && length <= self.width + eps)
    }
}

const SPEC_60X120: PanelSpec = PanelSpec {
    name: "60x120",
    thickness: 0.0125,
    width: 0.60,
    length: 1.20,
    weight: 6.5,
    supports: 2,
    fasteners: 12,
};

const SPEC_120X240: PanelSpec = PanelSpec {
    name: "120x240",
    thickness: 0.0125,
    width: 1.20,
    length: 2.40,
    weight: 26.0,
    supports: 3,
    fasteners: 30,
};

const SPEC_120X300: PanelSpec = PanelSpec {
    name: "120x300",
    thickness: 0.0125,
    width: 1.20,
    length: 3.00,
    weight: 32.5,
    supports: 4,
    fasteners: 36,
};

/// Wall panel sizes available in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallPanelSize {
    #[serde(rename = "60x120")]
    P60x120,
    #[default]
    #[serde(rename = "120x240")]
    P120x240,
    #[serde(rename = "120x300")]
    P120x300,
}

impl WallPanelSize {
    /// Every catalog entry.
    pub const ALL: [WallPanelSize; 3] = [
        WallPanelSize::P60x120,
        WallPanelSize::P120x240,
        WallPanelSize::P120x300,
    ];

    /// Catalog entry for this size.
    pub fn spec(&self) -> &'static PanelSpec {
        match self {
            WallPanelSize::P60x120 => &SPEC_60X120,
            WallPanelSize::P120x240 => &SPEC_120X240,
            WallPanelSize::P120x300 => &SPEC_120X300,
        }
    }
}

impl FromStr for WallPanelSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        WallPanelSize::ALL
            .into_iter()
            .find(|size| size.spec().name == name)
            .ok_or(CalcError::UnknownPanel {
                name: s.to_string(),
            })
    }
}

impl std::fmt::Display for WallPanelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec().name)
    }
}

/// Modular ceiling tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CeilingPanel {
    /// 625 x 625 mm tile.
    #[default]
    #[serde(rename = "625x625")]
    Square625,
    /// 1250 x 625 mm tile, long side along the room length.
    #[serde(rename = "1250x625")]
    Rect1250,
}

impl CeilingPanel {
    /// Tile size across the room width.
    pub fn module_width(&self) -> f64 {
        0.625
    }

    /// Tile size along the room length.
    pub fn module_length(&self) -> f64 {
        match self {
            CeilingPanel::Square625 => 0.625,
            CeilingPanel::Rect1250 => 1.25,
        }
    }

    /// Face area of one tile.
    pub fn area(&self) -> f64 {
        self.module_width() * self.module_length()
    }

    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            CeilingPanel::Square625 => "625x625",
            CeilingPanel::Rect1250 => "1250x625",
        }
    }
}

impl FromStr for CeilingPanel {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "625x625" | "625" => Ok(CeilingPanel::Square625),
            "1250x625" | "625x1250" | "1250" => Ok(CeilingPanel::Rect1250),
            _ => Err(CalcError::UnknownPanel {
                name: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CeilingPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
