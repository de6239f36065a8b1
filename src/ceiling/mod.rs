//! Modular ceiling calculators: tiles, T-profiles and perimeter trim.

pub mod modular;
pub mod trim;

pub use modular::{
    calculate_ceiling, calculate_ceilings, CeilingEstimate, CeilingSummary, ProfileTally,
};
pub use trim::{allocate_room_trim, allocate_trim, perimeter_segments, TrimAllocation};
