//! Validation of calculator inputs.
//!
//! Validators never fail on bad measurements; they collect every problem into
//! a [`ValidationResult`] so a whole batch can be reported at once.

use tracing::warn;

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::model::{Measurement, PanelSpec, Room};
use crate::parser::Job;

/// Rooms larger than this in either direction are flagged.
pub const MAX_ROOM_DIMENSION: f64 = 50.0;

/// Walls taller than this are flagged.
pub const MAX_WALL_HEIGHT: f64 = 8.0;

/// Validation result with warnings.
#[derive(Debug, Default, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Check that every measurement can be cut from the panel.
pub fn validate_measurements(measurements: &[Measurement], spec: &PanelSpec) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (idx, m) in measurements.iter().enumerate() {
        let label = match &m.label {
            Some(label) => format!("Measurement {} ({})", idx + 1, label),
            None => format!("Measurement {}", idx + 1),
        };

        if !is_positive(m.width) || !is_positive(m.length) {
            result.add_error(format!(
                "{}: Invalid dimensions ({}x{})",
                label, m.width, m.length
            ));
            continue;
        }

        if !spec.fits(m.width, m.length) {
            result.add_error(format!(
                "{}: {:.2}x{:.2} exceeds panel {} ({:.2}x{:.2})",
                label, m.width, m.length, spec.name, spec.width, spec.length
            ));
        }
    }

    result
}

/// Check room footprints.
pub fn validate_rooms(rooms: &[Room]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (idx, room) in rooms.iter().enumerate() {
        let label = room.label(idx);
        if !is_positive(room.width) || !is_positive(room.length) {
            result.add_error(format!(
                "{}: Invalid dimensions ({}x{})",
                label, room.width, room.length
            ));
        } else if room.width > MAX_ROOM_DIMENSION || room.length > MAX_ROOM_DIMENSION {
            result.add_warning(format!(
                "{}: Unusually large room ({}x{})",
                label, room.width, room.length
            ));
        }
    }

    result
}

/// Check a drywall wall height.
pub fn validate_wall_height(height: f64, config: &CalcConfig) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if !is_positive(height) {
        result.add_error(format!("Invalid wall height {}", height));
    } else if height > MAX_WALL_HEIGHT {
        result.add_warning(format!("Unusually tall wall ({}m)", height));
    } else if height < config.min_joint_distance {
        result.add_warning(format!(
            "Wall height {}m is below the minimum joint distance ({}m)",
            height, config.min_joint_distance
        ));
    }

    result
}

/// Validate every calculation in a job.
pub fn validate_job(job: &Job) -> Result<ValidationResult> {
    if job.is_empty() {
        return Err(CalcError::EmptyInput {
            what: "job has no calculations".to_string(),
        });
    }

    let mut result = ValidationResult::ok();
    if let Err(err) = job.config.validate() {
        result.add_error(err.to_string());
    }

    for (idx, wall) in job.drywall.iter().enumerate() {
        let mut wall_result = validate_wall_height(wall.wall_height, &job.config);
        if let Some(length) = wall.wall_length {
            if !is_positive(length) {
                wall_result.add_error(format!("Invalid wall length {}", length));
            }
        }
        prefix_messages(&mut wall_result, &format!("Drywall {}", idx + 1));
        result.merge(wall_result);
    }

    for (idx, ceiling) in job.ceilings.iter().enumerate() {
        let mut ceiling_result = validate_rooms(&ceiling.rooms);
        if ceiling.rooms.is_empty() {
            ceiling_result.add_error("No rooms defined");
        }
        prefix_messages(&mut ceiling_result, &format!("Ceiling {}", idx + 1));
        result.merge(ceiling_result);
    }

    for (idx, wall) in job.wall_panels.iter().enumerate() {
        let mut wall_result = ValidationResult::ok();
        if !is_positive(wall.width) || !is_positive(wall.height) {
            wall_result.add_error(format!(
                "Invalid dimensions ({}x{})",
                wall.width, wall.height
            ));
        }
        prefix_messages(&mut wall_result, &format!("Wall panels {}", idx + 1));
        result.merge(wall_result);
    }

    // Oversized pieces are reported per check, not as job errors.
    for (idx, check) in job.cut_checks.iter().enumerate() {
        let mut check_result = ValidationResult::ok();
        if check.pieces.is_empty() {
            check_result.add_error("No pieces defined");
        }
        for (piece_idx, m) in check.pieces.iter().enumerate() {
            if !is_positive(m.width) || !is_positive(m.length) {
                check_result.add_error(format!(
                    "Measurement {}: Invalid dimensions ({}x{})",
                    piece_idx + 1,
                    m.width,
                    m.length
                ));
            }
        }
        prefix_messages(&mut check_result, &format!("Cut check {}", idx + 1));
        result.merge(check_result);
    }

    Ok(result)
}

fn prefix_messages(result: &mut ValidationResult, prefix: &str) {
    for message in result.warnings.iter_mut().chain(result.errors.iter_mut()) {
        *message = format!("{}: {}", prefix, message);
    }
}

/// Quick validation check for the command-line `job --validate` mode.
///
/// Warnings are logged; errors are folded into one `CalcError`.
pub fn quick_validate(job: &Job) -> Result<()> {
    let result = validate_job(job)?;
    for warning in &result.warnings {
        warn!("{}", warning);
    }

    if !result.passed {
        let error_msg = result.errors.join("; ");
        return Err(CalcError::ParseError { message: error_msg });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WallPanelSize;
    use crate::parser::{CeilingJob, CutCheckJob, DrywallJob};

    fn create_basic_job() -> Job {
        Job {
            drywall: vec![DrywallJob {
                wall_height: 2.7,
                sheet_height: Default::default(),
                wall_length: Some(4.8),
            }],
            ..Default::default()
        }
    }

    // ==================== ValidationResult tests ====================

    #[test]
    fn test_validation_result_ok() {
        let result = ValidationResult::ok();
        assert!(result.passed);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validation_result_error() {
        let result = ValidationResult::error("Something went wrong");
        assert!(!result.passed);
        assert_eq!(result.errors, vec!["Something went wrong".to_string()]);
    }

    #[test]
    fn test_validation_result_add_warning() {
        let mut result = ValidationResult::ok();
        result.add_warning("This is a warning");
        assert!(result.passed); // Warnings don't fail validation
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_validation_result_merge() {
        let mut result1 = ValidationResult::ok();
        result1.add_warning("Warning 1");

        let mut result2 = ValidationResult::ok();
        result2.add_error("Error 1");
        result2.add_warning("Warning 2");

        result1.merge(result2);
        assert!(!result1.passed);
        assert_eq!(result1.warnings.len(), 2);
        assert_eq!(result1.errors.len(), 1);
    }

    // ==================== validate_measurements tests ====================

    #[test]
    fn test_measurements_within_panel() {
        let spec = WallPanelSize::P120x240.spec();
        let result = validate_measurements(
            &[Measurement::new(1.0, 2.0), Measurement::new(2.3, 0.6)],
            spec,
        );
        assert!(result.passed);
    }

    #[test]
    fn test_measurement_exceeding_both_bounds() {
        let spec = WallPanelSize::P120x240.spec();
        let result = validate_measurements(&[Measurement::new(2.5, 2.6)], spec);
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("exceeds panel 120x240"));
    }

    #[test]
    fn test_measurement_must_fit_in_one_orientation() {
        let spec = WallPanelSize::P120x240.spec();
        // Shorter than the long side but wider than the short side: too long
        // upright, too wide rotated.
        let result = validate_measurements(&[Measurement::new(2.5, 0.6)], spec);
        assert!(!result.passed);
        assert!(result.errors[0].contains("2.50x0.60 exceeds panel 120x240"));

        let result = validate_measurements(&[Measurement::new(2.4, 1.2)], spec);
        assert!(result.passed);
    }

    #[test]
    fn test_measurements_batch_collects_every_error() {
        let spec = WallPanelSize::P60x120.spec();
        let mut labelled = Measurement::new(1.5, 1.5);
        labelled.label = Some("door head".to_string());
        let result = validate_measurements(
            &[
                Measurement::new(0.5, 0.5),
                labelled,
                Measurement::new(-1.0, 0.5),
            ],
            spec,
        );
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].starts_with("Measurement 2 (door head)"));
        assert!(result.errors[1].contains("Invalid dimensions"));
    }

    // ==================== validate_rooms tests ====================

    #[test]
    fn test_validate_rooms() {
        let rooms = [
            Room::new(3.8, 2.7),
            Room::new(0.0, 2.0).named("Hall"),
            Room::new(60.0, 2.0),
        ];
        let result = validate_rooms(&rooms);
        assert!(!result.passed);
        assert!(result.errors[0].starts_with("Hall"));
        assert!(result.warnings[0].contains("Room 3"));
    }

    // ==================== validate_wall_height tests ====================

    #[test]
    fn test_validate_wall_height() {
        let config = CalcConfig::default();
        assert!(validate_wall_height(2.7, &config).warnings.is_empty());
        assert!(!validate_wall_height(-2.7, &config).passed);
        assert_eq!(validate_wall_height(9.0, &config).warnings.len(), 1);
        assert_eq!(validate_wall_height(0.3, &config).warnings.len(), 1);
    }

    // ==================== validate_job tests ====================

    #[test]
    fn test_validate_job_empty() {
        let result = validate_job(&Job::default());
        assert!(matches!(result, Err(CalcError::EmptyInput { .. })));
    }

    #[test]
    fn test_validate_job_valid() {
        let result = validate_job(&create_basic_job()).expect("Should succeed");
        assert!(result.passed);
    }

    #[test]
    fn test_validate_job_prefixes_messages() {
        let mut job = create_basic_job();
        job.ceilings.push(CeilingJob {
            panel: Default::default(),
            rooms: vec![],
        });
        job.cut_checks.push(CutCheckJob {
            panel: WallPanelSize::P120x240,
            pieces: vec![Measurement::new(2.5, 2.6), Measurement::new(-1.0, 0.5)],
        });
        let result = validate_job(&job).unwrap();
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().any(|e| e == "Ceiling 1: No rooms defined"));
        assert!(result
            .errors
            .iter()
            .any(|e| e.starts_with("Cut check 1: Measurement 2: Invalid dimensions")));
    }

    #[test]
    fn test_validate_job_bad_config() {
        let mut job = create_basic_job();
        job.config.min_joint_distance = 0.0;
        let result = validate_job(&job).unwrap();
        assert!(!result.passed);
    }

    #[test]
    fn test_quick_validate() {
        assert!(quick_validate(&create_basic_job()).is_ok());

        let mut job = create_basic_job();
        job.drywall[0].wall_height = -1.0;
        job.drywall[0].wall_length = Some(0.0);
        let err = quick_validate(&job).unwrap_err();
        assert!(matches!(err, CalcError::ParseError { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid job file: Drywall 1: Invalid wall height -1; Drywall 1: Invalid wall length 0"
        );

        // Warnings alone pass.
        let mut job = create_basic_job();
        job.drywall[0].wall_height = 9.0;
        assert!(quick_validate(&job).is_ok());
    }
}
