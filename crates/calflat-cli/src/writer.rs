//! CSV output.
//!
//! Records are serialized with a header row in field order. The file
//! starts with a UTF-8 byte order mark so spreadsheet applications detect
//! the encoding instead of guessing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use calflat_core::OutputRecord;

use crate::error::CliResult;

const UTF8_BOM: &[u8] = "\u{FEFF}".as_bytes();

/// The column header, in [`OutputRecord`] field order.
///
/// Written explicitly rather than relying on serde's lazy header so an
/// empty feed still produces a header row.
const HEADER: [&str; 12] = [
    "start_local_date",
    "start_local_time",
    "end_local_date",
    "end_local_time",
    "summary",
    "conference_link",
    "organizer_name",
    "organizer_email",
    "attendees",
    "description_plain",
    "uid",
    "is_recurring_instance",
];

/// Writes records as CSV to any sink. Returns the record count.
pub fn write_csv<W: Write>(mut sink: W, records: &[OutputRecord]) -> CliResult<usize> {
    sink.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Writes records as CSV to a file. The file is created or truncated.
pub fn write_csv_file(path: &Path, records: &[OutputRecord]) -> CliResult<usize> {
    let file = BufWriter::new(File::create(path)?);
    write_csv(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(uid: &str, date: &str, time: &str) -> OutputRecord {
        OutputRecord {
            start_local_date: date.to_string(),
            start_local_time: time.to_string(),
            end_local_date: date.to_string(),
            end_local_time: "10:00".to_string(),
            summary: "Standup".to_string(),
            conference_link: String::new(),
            organizer_name: String::new(),
            organizer_email: String::new(),
            attendees: String::new(),
            description_plain: String::new(),
            uid: uid.to_string(),
            is_recurring_instance: true,
        }
    }

    #[test]
    fn output_starts_with_bom_then_header() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[]).unwrap();

        assert_eq!(&buffer[..3], [0xEF, 0xBB, 0xBF]);
        let text = String::from_utf8(buffer).unwrap();
        // An empty feed still gets the header row, and nothing else.
        assert_eq!(text[3..].trim_end(), HEADER.join(","));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn header_matches_serde_field_order() {
        // serde derives its header from the record's field names; the
        // explicit header must stay in lockstep.
        let mut auto = csv::Writer::from_writer(Vec::new());
        auto.serialize(record("a", "2024-01-15", "09:00")).unwrap();
        let text = String::from_utf8(auto.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().next().unwrap(), HEADER.join(","));
    }

    #[test]
    fn count_and_rows_match() {
        let records = vec![
            record("a", "2024-01-15", "09:00"),
            record("b", "2024-01-16", "09:00"),
        ];
        let mut buffer = Vec::new();
        let count = write_csv(&mut buffer, &records).unwrap();

        assert_eq!(count, 2);
        let text = String::from_utf8(buffer).unwrap();
        // Header plus two data rows.
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("2024-01-16,09:00"));
    }

    #[test]
    fn booleans_render_as_true_false() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[record("a", "2024-01-15", "09:00")]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.lines().nth(1).unwrap().ends_with(",true"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let count = write_csv_file(&path, &[record("a", "2024-01-15", "09:00")]).unwrap();
        assert_eq!(count, 1);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF]);
    }
}
