//! Show a saved report.

use std::path::Path;

use motionscope_report_model::store::ReportStore;

use super::analyze::print_summary;

pub fn run(reports_dir: &Path, id: &str) -> anyhow::Result<()> {
    let store = ReportStore::open(reports_dir)?;
    let result = store.load(id)?;
    print_summary(&result);
    Ok(())
}
