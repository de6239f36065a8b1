//! Running jobs and collecting their results.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ceiling::{calculate_ceilings, CeilingSummary};
use crate::drywall::{optimize_sheet_cuts, SheetCutPlan, WallSheetEstimate};
use crate::error::Result;
use crate::model::WallPanelSize;
use crate::parser::Job;
use crate::validation::{validate_job, validate_measurements, ValidationResult};
use crate::wall_panel::{layout_wall, WallPanelLayout};

/// Result of one drywall calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrywallReport {
    pub plan: SheetCutPlan,
    /// Present when the job gave a wall length.
    pub estimate: Option<WallSheetEstimate>,
}

/// Result of one batch of piece checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutCheckReport {
    pub panel: WallPanelSize,
    pub validation: ValidationResult,
}

/// Everything a job produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    pub validation: ValidationResult,
    pub drywall: Vec<DrywallReport>,
    pub ceilings: Vec<CeilingSummary>,
    pub wall_panels: Vec<WallPanelLayout>,
    pub cut_checks: Vec<CutCheckReport>,
}

/// Validate a job, then run every calculation in it.
///
/// Validation errors stop the run before any calculation; they are returned
/// in the report rather than as an `Err`, so callers can show all of them.
pub fn run_job(job: &Job) -> Result<JobReport> {
    let validation = validate_job(job)?;
    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    let mut report = JobReport {
        validation,
        drywall: Vec::new(),
        ceilings: Vec::new(),
        wall_panels: Vec::new(),
        cut_checks: Vec::new(),
    };

    if !report.validation.passed {
        warn!(
            "Job has {} validation error(s), skipping calculations",
            report.validation.errors.len()
        );
        return Ok(report);
    }

    let config = &job.config;

    for wall in &job.drywall {
        let plan = optimize_sheet_cuts(wall.wall_height, wall.sheet_height, config)?;
        let estimate = match wall.wall_length {
            Some(length) => Some(plan.wall_estimate(length, config)?),
            None => None,
        };
        report.drywall.push(DrywallReport { plan, estimate });
    }

    for ceiling in &job.ceilings {
        report
            .ceilings
            .push(calculate_ceilings(&ceiling.rooms, ceiling.panel, config)?);
    }

    for wall in &job.wall_panels {
        report
            .wall_panels
            .push(layout_wall(wall.width, wall.height, wall.panel, config)?);
    }

    for check in &job.cut_checks {
        report.cut_checks.push(CutCheckReport {
            panel: check.panel,
            validation: validate_measurements(&check.pieces, check.panel.spec()),
        });
    }

    info!(
        "Job done: {} drywall, {} ceiling, {} wall panel, {} cut check",
        report.drywall.len(),
        report.ceilings.len(),
        report.wall_panels.len(),
        report.cut_checks.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use crate::model::{CeilingPanel, Measurement, Room};
    use crate::parser::{CeilingJob, CutCheckJob, DrywallJob, WallPanelJob};

    fn full_job() -> Job {
        Job {
            drywall: vec![DrywallJob {
                wall_height: 2.7,
                sheet_height: Default::default(),
                wall_length: Some(4.8),
            }],
            ceilings: vec![CeilingJob {
                panel: CeilingPanel::Square625,
                rooms: vec![Room::new(3.8, 2.7)],
            }],
            wall_panels: vec![WallPanelJob {
                panel: WallPanelSize::P120x240,
                width: 4.0,
                height: 2.7,
            }],
            cut_checks: vec![CutCheckJob {
                panel: WallPanelSize::P120x240,
                pieces: vec![Measurement::new(1.0, 2.0)],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_run_job_runs_everything() {
        let report = run_job(&full_job()).unwrap();
        assert!(report.validation.passed);
        assert_eq!(report.drywall.len(), 1);
        assert_eq!(report.drywall[0].estimate.as_ref().unwrap().sheets, 5);
        assert_eq!(report.ceilings[0].trim.total_bars(), 5);
        assert_eq!(report.wall_panels[0].panels, 4);
        assert!(report.cut_checks[0].validation.passed);
    }

    #[test]
    fn test_run_job_stops_on_validation_errors() {
        let mut job = full_job();
        job.wall_panels[0].width = 0.0;
        let report = run_job(&job).unwrap();
        assert!(!report.validation.passed);
        assert!(report.drywall.is_empty());
        assert!(report.wall_panels.is_empty());
    }

    #[test]
    fn test_run_job_empty() {
        assert!(matches!(
            run_job(&Job::default()),
            Err(CalcError::EmptyInput { .. })
        ));
    }
}
