//! Job file parser module.

mod job;

pub use job::{
    parse_job_file, parse_job_str, CeilingJob, CutCheckJob, DrywallJob, Job, WallPanelJob,
};
