//! Drywall partition calculators.

mod sheet_cut;

pub use sheet_cut::{
    compare_options, optimize_sheet_cuts, SheetCutPlan, SheetHeight, WallSheetEstimate,
};
