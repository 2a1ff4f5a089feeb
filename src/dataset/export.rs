//! Export of the cleaned table.

use crate::models::CleanedRecord;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write cleaned records as CSV with the dataset's column names.
///
/// Dates are written as `DD-MM-YYYY` and delivery times as bare minutes,
/// so the export can be loaded and cleaned again unchanged.
pub fn write_cleaned<W: Write>(records: &[CleanedRecord], sink: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write cleaned records to a CSV file.
pub fn write_cleaned_csv(records: &[CleanedRecord], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_cleaned(records, file)
        .with_context(|| format!("Failed to write cleaned dataset to {}", path.display()))?;

    info!("Wrote {} cleaned rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::Normalizer;
    use crate::dataset::loader::read_raw_rows;
    use crate::fixtures::{cleaned, order};

    #[test]
    fn test_export_uses_dataset_formats() {
        let mut buffer = Vec::new();
        write_cleaned(&[cleaned()], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let header = text.lines().next().unwrap();
        assert!(header.starts_with("ID,Delivery_person_ID,Delivery_person_Age"));
        assert!(header.ends_with("City,Time_taken(min)"));
        assert!(text.contains("19-03-2022"));
        assert!(text.trim_end().ends_with(",Urban,24"));
    }

    #[test]
    fn test_export_reloads_to_same_records() {
        let records = vec![
            cleaned(),
            order("0x1", "BANGRES19DEL01", "Metropolitian", "Jam", 41),
            order("0x2", "COIMBRES13DEL02", "Semi-Urban", "Low", 12),
        ];

        let mut buffer = Vec::new();
        write_cleaned(&records, &mut buffer).unwrap();

        let rows = read_raw_rows(buffer.as_slice()).unwrap();
        let again = Normalizer::default().normalize(rows).unwrap();
        assert_eq!(again.records, records);
    }

    #[test]
    fn test_write_cleaned_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        write_cleaned_csv(&[cleaned()], &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
