//! Plain-text rendering of job reports.

use std::fmt::{self, Write};

use crate::ceiling::CeilingSummary;
use crate::report::{CutCheckReport, DrywallReport, JobReport};
use crate::validation::ValidationResult;
use crate::wall_panel::WallPanelLayout;

/// Display adapter rendering a report as sections of text.
pub struct TextReport<'a>(pub &'a JobReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_validation(f, "VALIDATION", &report.validation)?;

        for (idx, drywall) in report.drywall.iter().enumerate() {
            write_drywall(f, idx + 1, drywall)?;
        }
        for (idx, ceiling) in report.ceilings.iter().enumerate() {
            write_ceiling(f, idx + 1, ceiling)?;
        }
        for (idx, layout) in report.wall_panels.iter().enumerate() {
            write_wall_panels(f, idx + 1, layout)?;
        }
        for (idx, check) in report.cut_checks.iter().enumerate() {
            write_cut_check(f, idx + 1, check)?;
        }
        Ok(())
    }
}

/// Render a report as plain text.
pub fn render_report(report: &JobReport) -> String {
    TextReport(report).to_string()
}

fn write_validation(f: &mut impl Write, section: &str, result: &ValidationResult) -> fmt::Result {
    writeln!(f, "[{}]", section)?;
    writeln!(f, "; {}", if result.passed { "passed" } else { "failed" })?;
    for warning in &result.warnings {
        writeln!(f, "warning: {}", warning)?;
    }
    for error in &result.errors {
        writeln!(f, "error: {}", error)?;
    }
    writeln!(f)
}

fn write_drywall(f: &mut impl Write, num: usize, report: &DrywallReport) -> fmt::Result {
    let plan = &report.plan;
    writeln!(f, "[DRYWALL{:02}]", num)?;
    writeln!(
        f,
        "; Wall {:.2}m, sheet {:.2}m",
        plan.wall_height, plan.sheet_height
    )?;

    match plan.recommendation() {
        Some(best) => writeln!(
            f,
            "Recommended: {} division(s), offset {:.3}m, waste {:.3}m ({})",
            best.divisions, best.offset, best.waste, best.viability
        )?,
        None => writeln!(f, "Recommended: none, stack whole sheets")?,
    }
    if plan.recommendation().is_some() && !plan.has_feasible_option() {
        writeln!(f, "Note: no division staggers the joints by the minimum distance")?;
    }

    if !plan.options.is_empty() {
        writeln!(f, "Div  Piece   Recut   Offset  Waste   Util     Rank")?;
    }
    for option in &plan.options {
        let recut = option
            .recut_height
            .map(|r| format!("{:.3}", r))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            f,
            "{:>3}  {:<6.3}  {:<6}  {:<6.3}  {:<6.3}  {:>5.1}%  {}",
            option.divisions,
            option.piece_height,
            recut,
            option.offset,
            option.waste,
            option.utilization,
            option.viability
        )?;
    }

    if !plan.discarded.is_empty() {
        let discarded: Vec<String> = plan.discarded.iter().map(|d| d.to_string()).collect();
        writeln!(f, "Discarded: {}", discarded.join(", "))?;
    }

    if let Some(estimate) = &report.estimate {
        writeln!(
            f,
            "Wall: {} column(s) ({} odd, {} even), {} sheet(s){}",
            estimate.columns,
            estimate.odd_columns,
            estimate.even_columns,
            estimate.sheets,
            if estimate.staggered { "" } else { ", not staggered" }
        )?;
    }
    writeln!(f)
}

fn write_ceiling(f: &mut impl Write, num: usize, summary: &CeilingSummary) -> fmt::Result {
    writeln!(f, "[CEILING{:02}]", num)?;
    writeln!(f, "; Tile {}", summary.panel)?;

    for (idx, estimate) in summary.rooms.iter().enumerate() {
        writeln!(
            f,
            "{} {:.2}x{:.2}m: {} whole, {} cut piece(s) from {} tile(s), {} total",
            estimate.room.label(idx),
            estimate.room.width,
            estimate.room.length,
            estimate.whole_panels,
            estimate.cut_pieces(),
            estimate.panels_for_cuts,
            estimate.total_panels
        )?;
    }

    let profiles = &summary.profiles;
    writeln!(f, "Tiles: {}", summary.total_panels)?;
    writeln!(
        f,
        "Profiles: {} full, {} half, {} quarter, {} bar(s)",
        profiles.full, profiles.half, profiles.quarter, profiles.bars
    )?;
    writeln!(
        f,
        "Trim: {}, offcut {:.2}m",
        summary.trim,
        summary.trim.total_offcut()
    )?;
    writeln!(f)
}

fn write_wall_panels(f: &mut impl Write, num: usize, layout: &WallPanelLayout) -> fmt::Result {
    writeln!(f, "[WALLPANEL{:02}]", num)?;
    writeln!(
        f,
        "; Wall {:.2}x{:.2}m, panel {} ({:.1}mm thick)",
        layout.wall_width,
        layout.wall_height,
        layout.size,
        layout.size.spec().thickness * 1000.0
    )?;
    writeln!(
        f,
        "Panels: {} ({} piece(s) placed), utilization {:.1}%",
        layout.panels,
        layout.placements.len(),
        layout.utilization
    )?;
    writeln!(
        f,
        "Supports: {}, fasteners: {}, weight: {:.1}kg",
        layout.supports, layout.fasteners, layout.weight
    )?;
    writeln!(f)
}

fn write_cut_check(f: &mut impl Write, num: usize, check: &CutCheckReport) -> fmt::Result {
    write_validation(f, &format!("CUTCHECK{:02} {}", num, check.panel), &check.validation)
}
