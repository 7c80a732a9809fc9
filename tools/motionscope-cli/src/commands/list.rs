//! List saved reports.

use std::path::Path;

use motionscope_report_model::store::ReportStore;

pub fn run(reports_dir: &Path) -> anyhow::Result<()> {
    let store = ReportStore::open(reports_dir)?;
    let ids = store.list()?;

    if ids.is_empty() {
        println!("No reports in {}", store.root().display());
        return Ok(());
    }

    for id in &ids {
        match store.load(id) {
            Ok(result) => println!(
                "{id}  {}  events={}",
                result.source_filename, result.motion_events
            ),
            Err(e) => {
                tracing::warn!(report_id = %id, error = %e, "Skipping unreadable report");
                println!("{id}  <unreadable>");
            }
        }
    }
    Ok(())
}
