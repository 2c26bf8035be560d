use std::fs::File;
use std::io::Write;

use crate::staffing::{BedOrigin, EffectiveBed, NurseAssignment, ShiftPlan, StaffingReport, WorkloadBand};

/// Transition note shown after a bed, e.g. "[admission]". Empty for staying patients.
pub fn origin_note(origin: BedOrigin) -> String {
    match origin {
        BedOrigin::NewPatient => "[new patient]".to_string(),
        BedOrigin::Admission => "[admission]".to_string(),
        BedOrigin::MovedFrom(source) => format!("[from bed {}]", source),
        BedOrigin::Staying | BedOrigin::RatioChanged => String::new(),
    }
}

/// Formats a bed with its ratio and any transition note, e.g. "Bed 4 (1:2) [admission]"
pub fn format_bed(bed: &EffectiveBed) -> String {
    let note = origin_note(bed.origin);
    if note.is_empty() {
        format!("Bed {} (1:{})", bed.id, bed.patient_count)
    } else {
        format!("Bed {} (1:{}) {}", bed.id, bed.patient_count, note)
    }
}

/// Workload as a whole percentage, e.g. "83%"
pub fn format_workload(nurse: &NurseAssignment) -> String {
    format!("{:.0}%", nurse.workload() * 100.0)
}

fn band_marker(band: WorkloadBand) -> &'static str {
    match band {
        WorkloadBand::High => "!!",
        WorkloadBand::Moderate => "! ",
        WorkloadBand::Low => "  ",
    }
}

/// One line per nurse: "N2 [100%] Bed 1 (1:2), Bed 3 (1:2)"
pub fn format_assignment(nurse: &NurseAssignment) -> String {
    let beds: Vec<String> = nurse.beds.iter().map(format_bed).collect();
    format!(
        "{} N{} [{}] {}",
        band_marker(nurse.band()),
        nurse.id,
        format_workload(nurse),
        beds.join(", ")
    )
}

fn shift_lines(plan: &ShiftPlan, in_charge: bool) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("== {} ==", plan.shift.label()));
    lines.push(format!(
        "Nurses: {} (required {})",
        plan.headcount, plan.required_nurses
    ));
    for nurse in &plan.assignments {
        lines.push(format!("  {}", format_assignment(nurse)));
    }
    if in_charge {
        lines.push("  In-charge nurse (no beds)".to_string());
    }
    if let Some(capacity) = &plan.admission_capacity {
        lines.push("Admission capacity:".to_string());
        for option in capacity {
            lines.push(format!("  - {}", option));
        }
    }
    lines
}

/// Renders the whole report as text lines.
pub fn report_lines(report: &StaffingReport, in_charge: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for plan in [&report.am, &report.pm, &report.night] {
        lines.extend(shift_lines(plan, in_charge));
        lines.push(String::new());
    }

    let census = &report.census;
    lines.push("== Census ==".to_string());
    lines.push(format!(
        "Patients: {} (staying {}, ratio change {}, moving {}, to ward {}, coming in {}, turnover {}, discharges {})",
        census.total_patients,
        census.staying,
        census.ratio_changes,
        census.moves,
        census.to_ward,
        census.coming_in,
        census.turnover,
        census.discharges
    ));
    lines.push(format!("Occupied beds after movements: {}", census.expected_final));
    lines.push(format!("Available beds: {}", report.available_beds));
    lines.push(String::new());
    lines.push(format!("24-hour total: {:.1}h", report.total_hours));
    lines
}

/// Prints the report to stdout
pub fn print_report(report: &StaffingReport, in_charge: bool) {
    println!();
    for line in report_lines(report, in_charge) {
        println!("{}", line);
    }
}

/// Writes the report to a text file
pub fn write_report_to_file(
    report: &StaffingReport,
    in_charge: bool,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    for line in report_lines(report, in_charge) {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
