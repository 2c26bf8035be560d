use std::path::Path;

use ward_staffing::display::{print_report, write_report_to_file};
use ward_staffing::form::export_assignments_to_csv;
use ward_staffing::parser::{load_bed_sheet, normalize_beds};
use ward_staffing::{logging, recompute, StaffingSnapshot, UnitConfig};

/// Reads a snapshot from a JSON file, or a bed sheet from any other file.
fn load_snapshot(path: &str, config: &UnitConfig) -> Result<StaffingSnapshot, Box<dyn std::error::Error>> {
    if path.ends_with(".json") {
        let raw = std::fs::read_to_string(path)?;
        let mut snapshot: StaffingSnapshot = serde_json::from_str(&raw)?;
        snapshot.beds = normalize_beds(snapshot.beds, config.bed_count)?;
        Ok(snapshot)
    } else {
        Ok(StaffingSnapshot::with_beds(load_bed_sheet(path, config.bed_count)?))
    }
}

/// Applies `--am N`, `--pm N`, `--night N`, `--cne HHMM-HHMM`, `--ward-clerk`,
/// `--am515` and `--no-in-charge` on top of the loaded snapshot.
fn apply_flags(snapshot: &mut StaffingSnapshot, flags: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--ward-clerk" => snapshot.include_ward_clerk = true,
            "--am515" => snapshot.include_am515 = true,
            "--no-in-charge" => snapshot.include_in_charge = false,
            "--cne" => {
                let range = iter.next().ok_or("--cne needs a time range like 0700-1530")?;
                snapshot.include_cne = true;
                snapshot.cne_hours = range.clone();
            }
            "--am" | "--pm" | "--night" => {
                let count: u32 = iter
                    .next()
                    .and_then(|v| v.parse().ok())
                    .ok_or_else(|| format!("{} needs a nurse count", flag))?;
                match flag.as_str() {
                    "--am" => snapshot.am_nurses = Some(count),
                    "--pm" => snapshot.pm_nurses = Some(count),
                    _ => snapshot.night_nurses = Some(count),
                }
            }
            other => return Err(format!("unknown option: {}", other).into()),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let config = UnitConfig::from_env()?;

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args.get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        tracing::info!(port, "starting web server");
        println!("Access the API at http://localhost:{}/api/config", port);

        ward_staffing::web::start_server(port, config).await?;
        return Ok(());
    }

    // CLI mode
    let input = match args.get(1) {
        Some(path) => path.clone(),
        None if Path::new("data/beds.csv").exists() => "data/beds.csv".to_string(),
        None => {
            eprintln!("usage: ward-staffing <beds.csv|snapshot.json> [--am N] [--pm N] [--night N] [--cne HHMM-HHMM] [--ward-clerk] [--am515] [--no-in-charge]");
            eprintln!("       ward-staffing web [port]");
            return Ok(());
        }
    };

    println!("Loading beds from {}...", input);
    let mut snapshot = load_snapshot(&input, &config)?;
    if args.len() > 2 {
        apply_flags(&mut snapshot, &args[2..])?;
    }

    let report = recompute(&snapshot, &config)?;
    print_report(&report, snapshot.include_in_charge);

    println!("\n=== Writing Report to Files ===");
    write_report_to_file(&report, snapshot.include_in_charge, "staffing_report.txt")?;
    export_assignments_to_csv(&report, Path::new("staffing_assignments.csv"))?;
    println!("Report saved to:");
    println!("  - staffing_report.txt");
    println!("  - staffing_assignments.csv");

    Ok(())
}
