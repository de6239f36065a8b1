//! cutplan - Material cut-optimization calculators.
//!
//! This library estimates and optimizes material cuts for interior finishing:
//! drywall sheet division with staggered joints, modular ceiling tiles and
//! T-profiles, perimeter corner trim (cantoneira) and wall panel layouts.
//!
//! # Example
//!
//! ```
//! use cutplan::{optimize_sheet_cuts, CalcConfig, SheetHeight};
//!
//! let config = CalcConfig::default();
//! let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &config).unwrap();
//! let best = plan.recommendation().unwrap();
//! println!("{} divisions, offset {:.2}m", best.divisions, best.offset);
//! ```

pub mod ceiling;
pub mod config;
pub mod drywall;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod report;
pub mod validation;
pub mod wall_panel;

// Re-exports for convenience
pub use ceiling::{
    allocate_room_trim, allocate_trim, calculate_ceiling, calculate_ceilings, perimeter_segments,
    CeilingEstimate, CeilingSummary, ProfileTally, TrimAllocation,
};
pub use config::CalcConfig;
pub use drywall::{optimize_sheet_cuts, SheetCutPlan, SheetHeight, WallSheetEstimate};
pub use error::{CalcError, Result};
pub use generator::render_report;
pub use model::{
    CeilingPanel, CutOption, FillPattern, Measurement, Orientation, PanelSpec, Room, TrimBar,
    Viability, WallPanelSize, WallSegment,
};
pub use parser::{parse_job_file, parse_job_str, Job};
pub use report::{run_job, JobReport};
pub use validation::{validate_job, validate_measurements, ValidationResult};
pub use wall_panel::{layout_wall, WallPanelLayout};

/// Run a job file and render its report as text.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Parse the job file
/// 2. Validate every calculation
/// 3. Run the calculators
/// 4. Render the text report
///
/// # Arguments
///
/// * `input_path` - Path to the JSON job file
///
/// # Returns
///
/// The report and its text rendering.
pub fn plan_job_file(input_path: &std::path::Path) -> Result<(JobReport, String)> {
    let job = parse_job_file(input_path)?;
    let report = run_job(&job)?;

    if !report.validation.passed {
        for error in &report.validation.errors {
            tracing::warn!("{}", error);
        }
    }

    let text = render_report(&report);
    Ok((report, text))
}
