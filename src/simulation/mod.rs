mod estimator;
mod result_set;

pub use estimator::{run, run_parallel};
pub use result_set::{EXPORT_HEADER, ExportFormat, ResultSet};
