//! Report output generators.

mod text;

pub use text::{render_report, TextReport};
