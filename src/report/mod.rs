//! Session reports: durable list of completed lessons plus export

pub mod export;
pub mod store;

pub use export::{export_report, render_markdown};
pub use store::{NewReport, ReportStore};
