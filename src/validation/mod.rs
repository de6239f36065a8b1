//! Input validation.

mod validate;

pub use validate::{
    quick_validate, validate_job, validate_measurements, validate_rooms, validate_wall_height,
    ValidationResult, MAX_ROOM_DIMENSION, MAX_WALL_HEIGHT,
};
