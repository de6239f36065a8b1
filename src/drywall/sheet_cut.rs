//! Sheet cut optimization for drywall partitions.
//!
//! Columns of sheets are stacked bottom to top. Odd columns start with whole
//! sheets; even columns start with a piece of a "donor" sheet divided into
//! equal parts, which shifts every joint of the even column and staggers it
//! against its neighbours. Each division count is simulated and ranked by:
//!
//! 1. offset feasibility (stagger at least the minimum joint distance)
//! 2. waste, ascending
//! 3. utilization, descending
//! 4. distance of the offset from the ideal offset
//!
//! Division counts whose even-column top piece would be thinner than the
//! minimum joint distance are discarded.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{float_cmp, require_positive, round_mm, CalcConfig, EPS};
use crate::error::{CalcError, Result};
use crate::model::{CutOption, FillPattern, Viability};

/// Sheet heights stocked for partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum SheetHeight {
    /// 1.80 m sheet.
    H180,
    /// 2.40 m sheet.
    #[default]
    H240,
}

impl SheetHeight {
    /// Height in metres.
    pub fn meters(&self) -> f64 {
        match self {
            SheetHeight::H180 => 1.80,
            SheetHeight::H240 => 2.40,
        }
    }

    /// Map a height in metres onto the catalog.
    pub fn from_meters(height: f64) -> Result<Self> {
        if float_cmp::approx_eq(height, 1.80) {
            Ok(SheetHeight::H180)
        } else if float_cmp::approx_eq(height, 2.40) {
            Ok(SheetHeight::H240)
        } else {
            Err(CalcError::UnsupportedSheetHeight { height })
        }
    }
}

impl TryFrom<f64> for SheetHeight {
    type Error = CalcError;

    fn try_from(value: f64) -> Result<Self> {
        SheetHeight::from_meters(value)
    }
}

impl From<SheetHeight> for f64 {
    fn from(sheet: SheetHeight) -> f64 {
        sheet.meters()
    }
}

impl std::fmt::Display for SheetHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}m", self.meters())
    }
}

/// Ranked cut options for one wall height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetCutPlan {
    /// Wall height being covered.
    pub wall_height: f64,
    /// Sheet height used.
    pub sheet_height: f64,
    /// Surviving options, best first.
    pub options: Vec<CutOption>,
    /// Division counts dropped because their recut was too thin.
    pub discarded: Vec<usize>,
}

impl SheetCutPlan {
    /// The top-ranked option, if any division survived.
    pub fn recommendation(&self) -> Option<&CutOption> {
        self.options.first()
    }

    /// Whether at least one option staggers the joints far enough.
    pub fn has_feasible_option(&self) -> bool {
        self.options.iter().any(|o| o.feasible)
    }

    /// Estimate sheets for a wall of the given length.
    ///
    /// Uses the recommendation; without one, falls back to stacking whole
    /// sheets in every column.
    pub fn wall_estimate(
        &self,
        wall_length: f64,
        config: &CalcConfig,
    ) -> Result<WallSheetEstimate> {
        let length = require_positive("wall_length", wall_length)?;
        let s = self.sheet_height;
        let columns = float_cmp::ceil_div(length, config.sheet_width).max(1);
        let odd_columns = columns.div_ceil(2);
        let even_columns = columns / 2;

        let Some(option) = self.recommendation() else {
            warn!(
                "No viable cut plan for {:.2}m wall, falling back to whole sheets",
                self.wall_height
            );
            return Ok(self.whole_sheet_estimate(columns, config));
        };

        let shared = if option.shared_top {
            odd_columns.min(even_columns)
        } else {
            0
        };
        let sheet_count = odd_columns * option.odd_sheets + even_columns * option.even_sheets
            - shared;
        let material = sheet_count as f64 * s + even_columns as f64 * option.piece_height;

        Ok(WallSheetEstimate {
            columns,
            odd_columns,
            even_columns,
            sheets: float_cmp::ceil_div(material, s),
            divisions: Some(option.divisions),
            staggered: !option.is_whole_sheet(),
        })
    }

    fn whole_sheet_estimate(&self, columns: usize, config: &CalcConfig) -> WallSheetEstimate {
        let s = self.sheet_height;
        let course = stack_course(self.wall_height, s, None, config.tolerance);
        let mut sheets = columns * course.whole_sheets;
        if let Some(top) = course.top {
            let tops_per_sheet = float_cmp::floor_div(s, top).max(1);
            sheets += columns.div_ceil(tops_per_sheet);
        }

        WallSheetEstimate {
            columns,
            odd_columns: columns,
            even_columns: 0,
            sheets,
            divisions: None,
            staggered: false,
        }
    }
}

/// Sheet count for a whole wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSheetEstimate {
    /// Sheet columns along the wall.
    pub columns: usize,
    /// Columns starting with whole sheets.
    pub odd_columns: usize,
    /// Columns starting with a donor piece.
    pub even_columns: usize,
    /// Sheets to buy.
    pub sheets: usize,
    /// Division count of the plan used, `None` for the whole-sheet fallback.
    pub divisions: Option<usize>,
    /// Whether adjacent columns have staggered joints.
    pub staggered: bool,
}

/// One simulated column.
#[derive(Debug, Clone)]
struct Course {
    pattern: FillPattern,
    /// Whole sheets stacked after the optional first piece.
    whole_sheets: usize,
    /// Top piece, cut from a fresh sheet.
    top: Option<f64>,
}

impl Course {
    /// Sheets opened by this column, excluding any donor piece.
    fn sheets(&self) -> usize {
        self.whole_sheets + usize::from(self.top.is_some())
    }
}

/// Stack an optional first piece, then whole sheets, then a top piece.
fn stack_course(height: f64, sheet: f64, first: Option<f64>, tolerance: f64) -> Course {
    let mut pattern = FillPattern::new(height);
    let mut rest = height;

    if let Some(piece) = first {
        let piece = piece.min(rest);
        pattern.push(piece);
        rest -= piece;
    }

    let whole_sheets = if rest > tolerance {
        float_cmp::floor_div(rest, sheet)
    } else {
        0
    };
    for _ in 0..whole_sheets {
        pattern.push(sheet);
    }
    rest -= whole_sheets as f64 * sheet;

    let top = if rest > tolerance {
        pattern.push(rest);
        Some(rest)
    } else {
        None
    };

    Course {
        pattern,
        whole_sheets,
        top,
    }
}

/// Smallest distance between the joints of two adjacent columns.
fn joint_offset(odd: &FillPattern, even: &FillPattern, piece_height: f64, sheet: f64) -> f64 {
    let odd_joints = odd.joints();
    let even_joints = even.joints();

    if odd_joints.is_empty() || even_joints.is_empty() {
        let shift = piece_height % sheet;
        return shift.min(sheet - shift).max(0.0);
    }

    odd_joints
        .iter()
        .flat_map(|a| even_joints.iter().map(move |b| (a - b).abs()))
        .fold(f64::INFINITY, f64::min)
}

fn classify(feasible: bool, utilization: f64, config: &CalcConfig) -> Viability {
    if !feasible {
        Viability::Poor
    } else if utilization >= config.optimal_utilization - EPS {
        Viability::Optimal
    } else if utilization >= config.good_utilization - EPS {
        Viability::Good
    } else if utilization >= config.acceptable_utilization - EPS {
        Viability::Acceptable
    } else {
        Viability::Poor
    }
}

/// Simulate one division count; `None` when the even-column recut is too thin.
fn evaluate_division(
    divisions: usize,
    wall_height: f64,
    sheet: f64,
    config: &CalcConfig,
) -> Option<CutOption> {
    let piece_height = sheet / divisions as f64;
    let odd = stack_course(wall_height, sheet, None, config.tolerance);
    let even = stack_course(wall_height, sheet, Some(piece_height), config.tolerance);

    if let Some(recut) = even.top {
        if recut < config.min_joint_distance - EPS {
            debug!(
                divisions,
                recut = round_mm(recut),
                "Discarding division: recut below minimum joint distance"
            );
            return None;
        }
    }

    let mut donor_pattern = FillPattern::new(sheet);
    for _ in 0..divisions {
        donor_pattern.push(piece_height);
    }

    let shared_top = match (odd.top, even.top) {
        (Some(a), Some(b)) => a + b <= sheet + EPS,
        _ => false,
    };

    let sheet_count = odd.sheets() + even.sheets() - usize::from(shared_top);
    let material = sheet_count as f64 * sheet + piece_height;
    let covered = 2.0 * wall_height;
    let waste = (material - covered).max(0.0);
    let utilization = (covered / material * 100.0).min(100.0);

    let offset = joint_offset(&odd.pattern, &even.pattern, piece_height, sheet);
    let feasible = offset >= config.min_joint_distance - EPS;
    let viability = classify(feasible, utilization, config);

    debug!(
        divisions,
        piece = round_mm(piece_height),
        waste = round_mm(waste),
        utilization = round_mm(utilization),
        offset = round_mm(offset),
        %viability,
        "Evaluated division"
    );

    Some(CutOption {
        divisions,
        piece_height,
        recut_height: even.top,
        odd_sheets: odd.sheets(),
        even_sheets: even.sheets(),
        odd_pattern: odd.pattern,
        even_pattern: even.pattern,
        donor_pattern,
        shared_top,
        sheets_per_pair: sheet_count as f64 + piece_height / sheet,
        waste,
        utilization,
        offset,
        feasible,
        viability,
    })
}

/// Total order used to rank options, best first.
pub fn compare_options(a: &CutOption, b: &CutOption, ideal_offset: f64) -> Ordering {
    b.feasible
        .cmp(&a.feasible)
        .then_with(|| round_mm(a.waste).total_cmp(&round_mm(b.waste)))
        .then_with(|| round_mm(b.utilization).total_cmp(&round_mm(a.utilization)))
        .then_with(|| {
            round_mm((a.offset - ideal_offset).abs())
                .total_cmp(&round_mm((b.offset - ideal_offset).abs()))
        })
        .then_with(|| a.divisions.cmp(&b.divisions))
}

/// Enumerate and rank every sheet division for a wall height.
pub fn optimize_sheet_cuts(
    wall_height: f64,
    sheet: SheetHeight,
    config: &CalcConfig,
) -> Result<SheetCutPlan> {
    let wall_height = require_positive("wall_height", wall_height)?;
    config.validate()?;

    let s = sheet.meters();
    let max_divisions = float_cmp::floor_div(s, config.min_joint_distance);

    let mut options = Vec::with_capacity(max_divisions);
    let mut discarded = Vec::new();
    for divisions in 1..=max_divisions {
        match evaluate_division(divisions, wall_height, s, config) {
            Some(option) => options.push(option),
            None => discarded.push(divisions),
        }
    }

    options.sort_by(|a, b| compare_options(a, b, config.ideal_offset));

    match options.first() {
        Some(best) => info!(
            "Wall {:.2}m with {} sheets: {} division(s), offset {:.2}m, waste {:.2}m ({})",
            wall_height, sheet, best.divisions, best.offset, best.waste, best.viability
        ),
        None => warn!(
            "Wall {:.2}m with {} sheets: no viable cut option",
            wall_height, sheet
        ),
    }

    Ok(SheetCutPlan {
        wall_height,
        sheet_height: s,
        options,
        discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> CalcConfig {
        CalcConfig::default()
    }

    // ==================== SheetHeight tests ====================

    #[test]
    fn test_sheet_height_from_meters() {
        assert_eq!(SheetHeight::from_meters(1.8).unwrap(), SheetHeight::H180);
        assert_eq!(SheetHeight::from_meters(2.40).unwrap(), SheetHeight::H240);
        assert!(matches!(
            SheetHeight::from_meters(2.0),
            Err(CalcError::UnsupportedSheetHeight { .. })
        ));
    }

    #[test]
    fn test_sheet_height_serde_as_number() {
        let sheet: SheetHeight = serde_json::from_str("1.8").unwrap();
        assert_eq!(sheet, SheetHeight::H180);
        assert_eq!(serde_json::to_string(&SheetHeight::H240).unwrap(), "2.4");
        assert!(serde_json::from_str::<SheetHeight>("3.0").is_err());
    }

    // ==================== stack_course tests ====================

    #[test]
    fn test_stack_course_whole_sheets_then_top() {
        let course = stack_course(2.7, 2.4, None, 0.01);
        assert_eq!(course.whole_sheets, 1);
        assert_eq!(course.sheets(), 2);
        assert!((course.top.unwrap() - 0.3).abs() < EPS);
        assert!(course.pattern.is_within(0.01));
    }

    #[test]
    fn test_stack_course_exact_multiple_has_no_top() {
        let course = stack_course(4.8, 2.4, None, 0.01);
        assert_eq!(course.whole_sheets, 2);
        assert!(course.top.is_none());
        assert_eq!(course.pattern.joints().len(), 1);
    }

    #[test]
    fn test_stack_course_first_piece_taller_than_wall() {
        let course = stack_course(1.0, 2.4, Some(1.2), 0.01);
        assert_eq!(course.pattern.pieces, vec![1.0]);
        assert_eq!(course.sheets(), 0);
    }

    // ==================== optimize_sheet_cuts tests ====================

    #[test]
    fn test_rejects_non_positive_height() {
        let err = optimize_sheet_cuts(0.0, SheetHeight::H240, &config()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidDimension { .. }));
    }

    #[test]
    fn test_enumerates_up_to_sheet_over_min_joint() {
        // 2.40 / 0.40 = 6 divisions at most
        let plan = optimize_sheet_cuts(4.8, SheetHeight::H240, &config()).unwrap();
        let mut seen: Vec<usize> = plan
            .options
            .iter()
            .map(|o| o.divisions)
            .chain(plan.discarded.iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_exact_multiple_whole_sheet_has_zero_waste() {
        let plan = optimize_sheet_cuts(4.8, SheetHeight::H240, &config()).unwrap();
        let whole = plan
            .options
            .iter()
            .find(|o| o.is_whole_sheet())
            .expect("1-division option should be evaluated");
        assert!(whole.waste.abs() < EPS);
        assert!(whole.recut_height.is_none());
        // Same joints in both columns: no stagger.
        assert!(!whole.feasible);
        assert_eq!(whole.viability, Viability::Poor);
    }

    #[test]
    fn test_patterns_sum_to_targets() {
        for sheet in [SheetHeight::H180, SheetHeight::H240] {
            for wall in [1.5, 2.5, 2.7, 2.8, 3.0, 3.6, 4.2, 5.1] {
                let plan = optimize_sheet_cuts(wall, sheet, &config()).unwrap();
                for option in &plan.options {
                    assert!(option.odd_pattern.is_within(0.01), "{wall} {sheet}");
                    assert!(option.even_pattern.is_within(0.01), "{wall} {sheet}");
                    assert!((option.donor_pattern.total() - sheet.meters()).abs() <= 0.01);
                }
            }
        }
    }

    #[test]
    fn test_recommendation_has_best_viability() {
        for sheet in [SheetHeight::H180, SheetHeight::H240] {
            for wall in [2.2, 2.6, 2.7, 2.95, 3.3, 4.0] {
                let plan = optimize_sheet_cuts(wall, sheet, &config()).unwrap();
                if let Some(best) = plan.recommendation() {
                    for other in &plan.options {
                        assert!(best.viability >= other.viability, "{wall} {sheet}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_thin_recut_is_discarded() {
        // Whole-sheet donor leaves a 0.30m recut on top of the even column.
        let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &config()).unwrap();
        assert!(plan.discarded.contains(&1));
        assert!(plan.options.iter().all(|o| o.divisions != 1));
        for option in &plan.options {
            if let Some(recut) = option.recut_height {
                assert!(recut >= 0.40 - EPS);
            }
        }
    }

    #[test]
    fn test_quarter_division_for_2_70_wall() {
        // 0.60 donor piece + 2.10 recut; the recut shares a sheet with the
        // odd column's 0.30 top piece, so nothing is wasted.
        let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &config()).unwrap();
        let best = plan.recommendation().unwrap();
        assert_eq!(best.divisions, 4);
        assert!(best.shared_top);
        assert!(best.waste < EPS);
        assert!((best.utilization - 100.0).abs() < 1e-6);
        assert_eq!(best.viability, Viability::Optimal);
        assert!((best.recut_height.unwrap() - 2.1).abs() < EPS);
    }

    #[test]
    fn test_ranking_is_sorted() {
        let cfg = config();
        let plan = optimize_sheet_cuts(3.0, SheetHeight::H180, &cfg).unwrap();
        for pair in plan.options.windows(2) {
            assert_ne!(
                compare_options(&pair[0], &pair[1], cfg.ideal_offset),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn test_ideal_offset_breaks_ties() {
        let a = CutOption {
            divisions: 2,
            piece_height: 1.2,
            recut_height: None,
            odd_pattern: FillPattern::new(1.0),
            even_pattern: FillPattern::new(1.0),
            donor_pattern: FillPattern::new(2.4),
            odd_sheets: 1,
            even_sheets: 1,
            shared_top: false,
            sheets_per_pair: 2.5,
            waste: 0.5,
            utilization: 80.0,
            offset: 1.2,
            feasible: true,
            viability: Viability::Acceptable,
        };
        let b = CutOption {
            divisions: 4,
            offset: 0.6,
            ..a.clone()
        };
        assert_eq!(compare_options(&b, &a, 0.6), Ordering::Less);
        assert_eq!(compare_options(&a, &b, 1.2), Ordering::Less);
    }

    #[test]
    fn test_configurable_min_joint_distance() {
        let cfg = CalcConfig::new().with_min_joint_distance(0.60);
        let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &cfg).unwrap();
        // 2.40 / 0.60 = 4 divisions at most
        assert!(plan
            .options
            .iter()
            .map(|o| o.divisions)
            .chain(plan.discarded.iter().copied())
            .all(|d| d <= 4));
    }

    #[test]
    fn test_min_joint_above_sheet_height_leaves_no_divisions() {
        let cfg = CalcConfig::new().with_min_joint_distance(3.0);
        let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &cfg).unwrap();
        assert!(plan.options.is_empty());
        assert!(plan.discarded.is_empty());
        assert!(plan.recommendation().is_none());
        assert!(!plan.has_feasible_option());
    }

    #[test]
    fn test_has_feasible_option() {
        let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &config()).unwrap();
        assert!(plan.has_feasible_option());

        // Only the whole-sheet division is allowed, and it lines joints up.
        let cfg = CalcConfig::new().with_min_joint_distance(1.3);
        let plan = optimize_sheet_cuts(2.4, SheetHeight::H240, &cfg).unwrap();
        assert_eq!(plan.options.len(), 1);
        assert!(!plan.has_feasible_option());
        assert_eq!(plan.recommendation().unwrap().viability, Viability::Poor);
    }

    // ==================== wall_estimate tests ====================

    #[test]
    fn test_wall_estimate_uses_recommendation() {
        let cfg = config();
        let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &cfg).unwrap();
        let estimate = plan.wall_estimate(4.8, &cfg).unwrap();
        assert_eq!(estimate.columns, 4);
        assert_eq!(estimate.odd_columns, 2);
        assert_eq!(estimate.even_columns, 2);
        assert_eq!(estimate.divisions, Some(4));
        assert!(estimate.staggered);
        // 2 odd columns x 2 sheets + 2 even columns x 1 sheet - 2 shared
        // + two 0.60 donor pieces out of one sheet.
        assert_eq!(estimate.sheets, 5);
    }

    #[test]
    fn test_wall_estimate_falls_back_without_options() {
        let cfg = config();
        let plan = SheetCutPlan {
            wall_height: 2.7,
            sheet_height: 2.4,
            options: vec![],
            discarded: vec![1, 2, 3],
        };
        let estimate = plan.wall_estimate(3.6, &cfg).unwrap();
        assert_eq!(estimate.columns, 3);
        assert_eq!(estimate.divisions, None);
        assert!(!estimate.staggered);
        // 3 whole sheets + three 0.30 tops out of one sheet.
        assert_eq!(estimate.sheets, 4);
    }

    #[test]
    fn test_wall_estimate_rejects_zero_length() {
        let cfg = config();
        let plan = optimize_sheet_cuts(2.7, SheetHeight::H240, &cfg).unwrap();
        assert!(plan.wall_estimate(0.0, &cfg).is_err());
    }
}
