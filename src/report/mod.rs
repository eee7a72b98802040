pub mod outcome;

pub use outcome::{report, report_defense, Report, ReportCategory};
