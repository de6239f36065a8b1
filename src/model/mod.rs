//! Data model types shared by the calculators.

mod cut_option;
mod panel;
mod room;
mod trim;

pub use cut_option::{CutOption, FillPattern, Viability};
pub use panel::{CeilingPanel, PanelSpec, WallPanelSize};
pub use room::{Measurement, Room};
pub use trim::{Orientation, TrimBar, WallSegment, MAX_SEGMENTS_PER_BAR};
