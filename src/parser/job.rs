//! JSON job files batching several calculations.
//!
//! ```json
//! {
//!   "config": { "trim_bar_length": 3.0 },
//!   "drywall": [{ "wall_height": 2.7, "sheet_height": 2.4, "wall_length": 4.8 }],
//!   "ceilings": [{ "panel": "625x625", "rooms": [{ "name": "Office", "width": 3.8, "length": 2.7 }] }],
//!   "wall_panels": [{ "panel": "120x240", "width": 4.0, "height": 2.7 }],
//!   "cut_checks": [{ "panel": "120x240", "pieces": [{ "width": 1.0, "length": 2.0 }] }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CalcConfig;
use crate::drywall::SheetHeight;
use crate::error::{CalcError, Result};
use crate::model::{CeilingPanel, Measurement, Room, WallPanelSize};

/// A batch of calculations sharing one configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Job {
    pub config: CalcConfig,
    pub drywall: Vec<DrywallJob>,
    pub ceilings: Vec<CeilingJob>,
    pub wall_panels: Vec<WallPanelJob>,
    pub cut_checks: Vec<CutCheckJob>,
}

impl Job {
    /// Whether the job asks for nothing.
    pub fn is_empty(&self) -> bool {
        self.drywall.is_empty()
            && self.ceilings.is_empty()
            && self.wall_panels.is_empty()
            && self.cut_checks.is_empty()
    }
}

/// A drywall partition to optimize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrywallJob {
    pub wall_height: f64,
    #[serde(default)]
    pub sheet_height: SheetHeight,
    /// When set, sheets are counted for the whole wall.
    #[serde(default)]
    pub wall_length: Option<f64>,
}

/// Rooms sharing one ceiling tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CeilingJob {
    #[serde(default)]
    pub panel: CeilingPanel,
    pub rooms: Vec<Room>,
}

/// A wall to cover with panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallPanelJob {
    #[serde(default)]
    pub panel: WallPanelSize,
    pub width: f64,
    pub height: f64,
}

/// Piece sizes to check against a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CutCheckJob {
    pub panel: WallPanelSize,
    pub pieces: Vec<Measurement>,
}

/// Parse a job from JSON text.
pub fn parse_job_str(content: &str) -> Result<Job> {
    if content.trim().is_empty() {
        return Err(CalcError::ParseError {
            message: "empty job file".to_string(),
        });
    }

    let job: Job = serde_json::from_str(content)?;
    debug!(
        drywall = job.drywall.len(),
        ceilings = job.ceilings.len(),
        wall_panels = job.wall_panels.len(),
        cut_checks = job.cut_checks.len(),
        "Parsed job"
    );
    Ok(job)
}

/// Read and parse a job file.
pub fn parse_job_file(path: &Path) -> Result<Job> {
    if !path.exists() {
        return Err(CalcError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    parse_job_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_job() {
        let job = parse_job_str(
            r#"{
                "config": { "trim_bar_length": 2.5 },
                "drywall": [{ "wall_height": 2.7, "sheet_height": 1.8, "wall_length": 4.8 }],
                "ceilings": [{ "panel": "1250x625", "rooms": [{ "name": "Office", "width": 3.8, "length": 2.7 }] }],
                "wall_panels": [{ "panel": "60x120", "width": 4.0, "height": 2.7 }],
                "cut_checks": [{ "panel": "120x240", "pieces": [{ "label": "A", "width": 1.0, "length": 2.0 }] }]
            }"#,
        )
        .unwrap();

        assert_eq!(job.config.trim_bar_length, 2.5);
        assert_eq!(job.drywall[0].sheet_height, SheetHeight::H180);
        assert_eq!(job.ceilings[0].panel, CeilingPanel::Rect1250);
        assert_eq!(job.ceilings[0].rooms[0].name.as_deref(), Some("Office"));
        assert_eq!(job.wall_panels[0].panel, WallPanelSize::P60x120);
        assert_eq!(job.cut_checks[0].pieces[0].label.as_deref(), Some("A"));
    }

    #[test]
    fn test_parse_defaults() {
        let job = parse_job_str(r#"{ "drywall": [{ "wall_height": 3.0 }] }"#).unwrap();
        assert_eq!(job.config, CalcConfig::default());
        assert_eq!(job.drywall[0].sheet_height, SheetHeight::H240);
        assert_eq!(job.drywall[0].wall_length, None);
        assert!(job.ceilings.is_empty());
        assert!(!job.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let err = parse_job_str(r#"{ "drywal": [] }"#).unwrap_err();
        assert!(matches!(err, CalcError::ParseError { .. }));
    }

    #[test]
    fn test_parse_rejects_unsupported_sheet() {
        let err = parse_job_str(r#"{ "drywall": [{ "wall_height": 2.7, "sheet_height": 2.0 }] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("Unsupported sheet height"));
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse_job_str("  \n").is_err());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_job_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CalcError::FileNotFound { .. }));
    }
}
