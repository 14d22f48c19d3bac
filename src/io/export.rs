//! CSV export for cycle reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::grid::CycleReport;

/// Column header for CSV telemetry export.
const HEADER: &str = "cycle,total_power_kw,demand_before_kw,total_demand_kw,\
                      deficit,shed,reconnected,active_faults";

/// Exports cycle reports to a CSV file at the given path.
///
/// Writes a header row followed by one data row per cycle. List-valued
/// columns (`shed`, `reconnected`, `active_faults`) are semicolon-joined.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(reports: &[CycleReport], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(reports, buf)
}

/// Writes cycle reports as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(reports: &[CycleReport], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in reports {
        wtr.write_record(&[
            r.cycle.to_string(),
            format!("{:.4}", r.total_power_kw),
            format!("{:.4}", r.demand_before_kw),
            format!("{:.4}", r.total_demand_kw),
            r.deficit().to_string(),
            r.shed.join(";"),
            r.reconnected.join(";"),
            r.active_faults.join(";"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
