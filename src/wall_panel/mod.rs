//! Wall panel layout calculator.

mod layout;

pub use layout::{layout_wall, Placement, WallPanelLayout};
