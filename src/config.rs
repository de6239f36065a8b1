//! Configuration constants and tunable parameters for the calculators.

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Fill patterns must match their target height within this tolerance (1cm).
pub const PATTERN_TOLERANCE: f64 = 0.01;

/// Minimum vertical distance between joints of adjacent courses.
pub const DEFAULT_MIN_JOINT_DISTANCE: f64 = 0.40;

/// Preferred stagger between joints of adjacent courses.
pub const DEFAULT_IDEAL_OFFSET: f64 = 0.60;

/// Utilization percentage required for an `optimal` cut option.
pub const DEFAULT_OPTIMAL_UTILIZATION: f64 = 95.0;

/// Utilization percentage required for a `good` cut option.
pub const DEFAULT_GOOD_UTILIZATION: f64 = 90.0;

/// Utilization percentage required for an `acceptable` cut option.
pub const DEFAULT_ACCEPTABLE_UTILIZATION: f64 = 80.0;

/// Standard drywall sheet width in metres.
pub const DEFAULT_SHEET_WIDTH: f64 = 1.20;

/// Standard cantoneira bar length in metres.
pub const DEFAULT_TRIM_BAR_LENGTH: f64 = 3.00;

/// Standard ceiling T-profile length in metres.
pub const DEFAULT_PROFILE_LENGTH: f64 = 1.25;

/// Tunable parameters shared by every calculator.
///
/// Every field has a default, so a job file only needs to list the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Tolerance for pattern sums and negligible remainders.
    pub tolerance: f64,
    /// Minimum joint stagger; also the smallest usable recut.
    pub min_joint_distance: f64,
    /// Stagger the optimizer prefers when everything else ties.
    pub ideal_offset: f64,
    /// Utilization threshold (%) for `optimal`.
    pub optimal_utilization: f64,
    /// Utilization threshold (%) for `good`.
    pub good_utilization: f64,
    /// Utilization threshold (%) for `acceptable`.
    pub acceptable_utilization: f64,
    /// Drywall sheet width, used to count columns along a wall.
    pub sheet_width: f64,
    /// Cantoneira stock bar length.
    pub trim_bar_length: f64,
    /// Ceiling T-profile stock length.
    pub profile_length: f64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            tolerance: PATTERN_TOLERANCE,
            min_joint_distance: DEFAULT_MIN_JOINT_DISTANCE,
            ideal_offset: DEFAULT_IDEAL_OFFSET,
            optimal_utilization: DEFAULT_OPTIMAL_UTILIZATION,
            good_utilization: DEFAULT_GOOD_UTILIZATION,
            acceptable_utilization: DEFAULT_ACCEPTABLE_UTILIZATION,
            sheet_width: DEFAULT_SHEET_WIDTH,
            trim_bar_length: DEFAULT_TRIM_BAR_LENGTH,
            profile_length: DEFAULT_PROFILE_LENGTH,
        }
    }
}

impl CalcConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum joint distance.
    pub fn with_min_joint_distance(mut self, distance: f64) -> Self {
        self.min_joint_distance = distance;
        self
    }

    /// Set the ideal offset.
    pub fn with_ideal_offset(mut self, offset: f64) -> Self {
        self.ideal_offset = offset;
        self
    }

    /// Set the three utilization thresholds, best tier first.
    pub fn with_utilization_thresholds(mut self, optimal: f64, good: f64, acceptable: f64) -> Self {
        self.optimal_utilization = optimal;
        self.good_utilization = good;
        self.acceptable_utilization = acceptable;
        self
    }

    /// Set the cantoneira bar length.
    pub fn with_trim_bar_length(mut self, length: f64) -> Self {
        self.trim_bar_length = length;
        self
    }

    /// Set the ceiling profile length.
    pub fn with_profile_length(mut self, length: f64) -> Self {
        self.profile_length = length;
        self
    }

    /// Set the drywall sheet width.
    pub fn with_sheet_width(mut self, width: f64) -> Self {
        self.sheet_width = width;
        self
    }

    /// Check that lengths are positive and thresholds descend.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("tolerance", self.tolerance),
            ("min_joint_distance", self.min_joint_distance),
            ("ideal_offset", self.ideal_offset),
            ("sheet_width", self.sheet_width),
            ("trim_bar_length", self.trim_bar_length),
            ("profile_length", self.profile_length),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::InvalidConfig {
                    message: format!("{} must be positive, got {}", name, value),
                });
            }
        }

        if !(self.optimal_utilization >= self.good_utilization
            && self.good_utilization >= self.acceptable_utilization
            && self.acceptable_utilization >= 0.0
            && self.optimal_utilization <= 100.0)
        {
            return Err(CalcError::InvalidConfig {
                message: format!(
                    "utilization thresholds must descend within 0-100, got {}/{}/{}",
                    self.optimal_utilization, self.good_utilization, self.acceptable_utilization
                ),
            });
        }

        Ok(())
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Floor of `a / b`, treating values within epsilon of the next integer as reaching it.
    #[inline]
    pub fn floor_div(a: f64, b: f64) -> usize {
        ((a + EPS) / b).floor().max(0.0) as usize
    }

    /// Ceiling of `a / b`, ignoring overshoot within epsilon.
    #[inline]
    pub fn ceil_div(a: f64, b: f64) -> usize {
        ((a - EPS) / b).ceil().max(0.0) as usize
    }
}

/// Round a length to millimetre precision for display and reporting.
#[inline]
pub fn round_mm(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Reject non-finite or non-positive dimensions.
pub fn require_positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::InvalidDimension {
            field: field.to_string(),
            value,
        })
    }
}
