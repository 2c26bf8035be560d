use chrono::Local;
use csv::WriterBuilder;
use std::path::Path;

use crate::display::origin_note;
use crate::staffing::StaffingReport;

const HEADER: [&str; 7] = [
    "generated_at",
    "shift",
    "nurse",
    "workload",
    "bed",
    "ratio",
    "note",
];

/// Exports every nurse assignment of every shift to CSV, one row per bed.
///
/// The file is overwritten. All rows share a single generation timestamp.
pub fn export_assignments_to_csv(
    report: &StaffingReport,
    csv_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let generated_at = Local::now().format("%Y-%m-%d %H:%M").to_string();

    let mut wtr = WriterBuilder::new().has_headers(false).from_path(csv_path)?;
    wtr.write_record(HEADER)?;

    for plan in [&report.am, &report.pm, &report.night] {
        for nurse in &plan.assignments {
            let workload = format!("{:.2}", nurse.workload());
            for bed in &nurse.beds {
                let row = [
                    generated_at.clone(),
                    plan.shift.label().to_string(),
                    nurse.id.to_string(),
                    workload.clone(),
                    bed.id.to_string(),
                    format!("1:{}", bed.patient_count),
                    origin_note(bed.origin),
                ];
                wtr.write_record(&row)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitConfig;
    use crate::staffing::{recompute, Bed, BedStatus, StaffingSnapshot};

    #[test]
    fn test_export_rows() {
        let mut beds: Vec<Bed> = (1..=11).map(Bed::empty).collect();
        beds[0] = Bed::new(1, "1:2");
        beds[1] = Bed::new(2, "1:2").with_status(BedStatus::ComingIn);
        let report = recompute(&StaffingSnapshot::with_beds(beds), &UnitConfig::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assignments.csv");
        export_assignments_to_csv(&report, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        // two beds on each of three shifts
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][1], "AM Shift");
        assert_eq!(&rows[0][3], "1.00");
        assert_eq!(&rows[1][4], "2");
        assert_eq!(&rows[1][6], "[admission]");
        assert_eq!(&rows[0][6], "");
    }
}
