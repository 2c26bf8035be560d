use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, StaffingError};
use crate::staffing::{Bed, BedStatus};

/// Parses a "1:N" acuity ratio into N, the patients one nurse may carry.
///
/// Returns `None` for empty text, anything without exactly one `:`, a
/// left side other than 1, or N < 1.
pub fn parse_ratio(ratio: &str) -> Option<u32> {
    let (nurses, patients) = ratio.trim().split_once(':')?;
    if patients.contains(':') {
        return None;
    }

    let nurses: u32 = nurses.trim().parse().ok()?;
    let patients: u32 = patients.trim().parse().ok()?;
    if nurses != 1 || patients == 0 {
        return None;
    }

    Some(patients)
}

/// Converts a four-digit "HHMM" string to minutes since midnight.
/// Components are not range-checked, so "2599" is 25h99m.
fn hhmm_to_minutes(hhmm: &str) -> Option<u32> {
    if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = hhmm[..2].parse().ok()?;
    let minutes: u32 = hhmm[2..].parse().ok()?;
    Some(hours * 60 + minutes)
}

/// Elapsed hours in an "HHMM-HHMM" range, wrapping past midnight.
///
/// Malformed input yields 0.0.
pub fn parse_time_range_hours(range: &str) -> f64 {
    let Some((start, end)) = range.trim().split_once('-') else {
        return 0.0;
    };
    let (Some(start), Some(end)) = (hhmm_to_minutes(start), hhmm_to_minutes(end)) else {
        return 0.0;
    };

    let mut minutes = end as i64 - start as i64;
    if minutes < 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

/// Fills in missing bed ids with empty beds and sorts by id.
///
/// Duplicate ids and ids outside 1..=bed_count are rejected.
pub fn normalize_beds(beds: Vec<Bed>, bed_count: u8) -> Result<Vec<Bed>> {
    let mut by_id: BTreeMap<u8, Bed> = BTreeMap::new();
    for bed in beds {
        if bed.id == 0 || bed.id > bed_count {
            return Err(StaffingError::BedOutOfRange {
                id: bed.id,
                bed_count,
            });
        }
        if by_id.contains_key(&bed.id) {
            return Err(StaffingError::DuplicateBed { id: bed.id });
        }
        by_id.insert(bed.id, bed);
    }

    Ok((1..=bed_count)
        .map(|id| by_id.remove(&id).unwrap_or_else(|| Bed::empty(id)))
        .collect())
}

fn column(headers: &StringRecord, name: &str, fallback: usize) -> usize {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .unwrap_or(fallback)
}

fn field(record: &StringRecord, col: usize) -> String {
    record.get(col).unwrap_or("").trim().to_string()
}

/// Reads a bed sheet (CSV with a header row) from any reader.
///
/// Columns are found by header name, falling back to the default order
/// `bed,ratio,status,new_ratio,move_to_bed,move_new_ratio,admission_after_move,new_admission_after_ward`.
pub fn read_bed_sheet<R: Read>(input: R, bed_count: u8) -> Result<Vec<Bed>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let bed_col = column(&headers, "bed", 0);
    let ratio_col = column(&headers, "ratio", 1);
    let status_col = column(&headers, "status", 2);
    let new_ratio_col = column(&headers, "new_ratio", 3);
    let move_to_col = column(&headers, "move_to_bed", 4);
    let move_ratio_col = column(&headers, "move_new_ratio", 5);
    let after_move_col = column(&headers, "admission_after_move", 6);
    let after_ward_col = column(&headers, "new_admission_after_ward", 7);

    let mut beds = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let raw_id = field(&record, bed_col);
        let id = match raw_id.parse::<u8>() {
            Ok(id) if id >= 1 && id <= bed_count => id,
            _ => {
                tracing::warn!(row = row + 1, bed = %raw_id, "skipping row with invalid bed id");
                continue;
            }
        };

        let raw_status = field(&record, status_col);
        let status = if raw_status.is_empty() {
            BedStatus::Current
        } else {
            BedStatus::from_label(&raw_status).unwrap_or_else(|| {
                tracing::warn!(bed = id, status = %raw_status, "unknown status, treating as current");
                BedStatus::Current
            })
        };

        beds.push(Bed {
            id,
            ratio: field(&record, ratio_col),
            status,
            new_ratio: field(&record, new_ratio_col),
            move_to_bed: field(&record, move_to_col),
            move_new_ratio: field(&record, move_ratio_col),
            admission_after_move: field(&record, after_move_col),
            new_admission_after_ward: field(&record, after_ward_col),
        });
    }

    normalize_beds(beds, bed_count)
}

/// Loads a bed sheet from a CSV file.
pub fn load_bed_sheet<P: AsRef<Path>>(csv_path: P, bed_count: u8) -> Result<Vec<Bed>> {
    let file = std::fs::File::open(csv_path)?;
    read_bed_sheet(file, bed_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio_valid() {
        assert_eq!(parse_ratio("1:1"), Some(1));
        assert_eq!(parse_ratio("1:2"), Some(2));
        assert_eq!(parse_ratio("1:4"), Some(4));
        assert_eq!(parse_ratio(" 1:3 "), Some(3));
        assert_eq!(parse_ratio("1:12"), Some(12));
    }

    #[test]
    fn test_parse_ratio_invalid() {
        assert_eq!(parse_ratio(""), None);
        assert_eq!(parse_ratio("1"), None);
        assert_eq!(parse_ratio("1:"), None);
        assert_eq!(parse_ratio(":2"), None);
        assert_eq!(parse_ratio("2:4"), None);
        assert_eq!(parse_ratio("1:0"), None);
        assert_eq!(parse_ratio("1:-2"), None);
        assert_eq!(parse_ratio("-1:2"), None);
        assert_eq!(parse_ratio("1:2:3"), None);
        assert_eq!(parse_ratio("a:b"), None);
    }

    #[test]
    fn test_time_range_hours() {
        assert_eq!(parse_time_range_hours("1100-2100"), 10.0);
        assert_eq!(parse_time_range_hours("2200-0600"), 8.0);
        assert_eq!(parse_time_range_hours("0700-1530"), 8.5);
        assert_eq!(parse_time_range_hours("1030-1015"), 23.75);
        assert_eq!(parse_time_range_hours("0900-0900"), 0.0);
    }

    #[test]
    fn test_time_range_malformed() {
        assert_eq!(parse_time_range_hours(""), 0.0);
        assert_eq!(parse_time_range_hours("0700"), 0.0);
        assert_eq!(parse_time_range_hours("700-1530"), 0.0);
        assert_eq!(parse_time_range_hours("07a0-1530"), 0.0);
        assert_eq!(parse_time_range_hours("0700-1530-"), 0.0);
    }

    #[test]
    fn test_time_range_unchecked_components() {
        // 00:00 to 25:00 is not rejected
        assert_eq!(parse_time_range_hours("0000-2500"), 25.0);
    }

    #[test]
    fn test_normalize_fills_and_sorts() {
        let beds = normalize_beds(vec![Bed::new(5, "1:2"), Bed::new(2, "1:1")], 11).unwrap();
        assert_eq!(beds.len(), 11);
        assert_eq!(beds[1].ratio, "1:1");
        assert_eq!(beds[4].ratio, "1:2");
        assert!(beds[0].ratio.is_empty());
        assert!(beds.iter().enumerate().all(|(i, b)| b.id as usize == i + 1));
    }

    #[test]
    fn test_normalize_rejects_bad_ids() {
        assert!(matches!(
            normalize_beds(vec![Bed::new(12, "1:2")], 11),
            Err(StaffingError::BedOutOfRange { id: 12, .. })
        ));
        assert!(matches!(
            normalize_beds(vec![Bed::new(3, "1:2"), Bed::new(3, "1:1")], 11),
            Err(StaffingError::DuplicateBed { id: 3 })
        ));
    }

    #[test]
    fn test_read_bed_sheet_by_header_name() {
        let csv = "status,bed,ratio,new_ratio\n\
                   turnover,3,1:2,1:1\n\
                   ,1,1:3,\n\
                   flying,2,1:2,\n\
                   discharge,40,1:2,\n";
        let beds = read_bed_sheet(csv.as_bytes(), 11).unwrap();
        assert_eq!(beds.len(), 11);
        assert_eq!(beds[2].status, BedStatus::Turnover);
        assert_eq!(beds[2].new_ratio, "1:1");
        assert_eq!(beds[0].status, BedStatus::Current);
        assert_eq!(beds[1].status, BedStatus::Current);
        assert_eq!(beds[1].ratio, "1:2");
    }
}
