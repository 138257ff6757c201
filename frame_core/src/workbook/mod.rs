//! # Workbook Extraction
//!
//! Loads the named result sheets of a structural-analysis export (`.xlsx`)
//! into typed [`Sheet`] tables. Pure I/O and shape validation: nothing in
//! here interprets the structural meaning of a row.
//!
//! ## Export layout convention
//!
//! Every sheet in the export carries a title in its first physical row and
//! the real header in its second row. Extraction skips the title and reads
//! the header, so downstream code addresses columns by name
//! (`"Unique Name"`, `"Global X"`, ...).
//!
//! ## Errors
//!
//! - [`ModelError::MissingSheet`] when a required sheet is absent
//! - [`ModelError::MalformedWorkbook`] when the container cannot be parsed
//!
//! Both are fatal to the ingestion pass (spreadsheet-level problems are
//! never silently recovered).

pub mod table;

pub use table::{CellValue, Row, Sheet};

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};

use crate::errors::{ModelError, ModelResult};

/// Sheets an export must contain to be ingested
pub const REQUIRED_SHEETS: [&str; 12] = [
    "Objects and Elements - Joints",
    "Group Assignments",
    "Beam Object Connectivity",
    "Frame Assigns - Sect Prop",
    "Element Joint Forces - Frame",
    "Column Object Connectivity",
    "Element Forces - Beams",
    "Element Forces - Columns",
    "Joint Displacements",
    "Joint Reactions",
    "Modal Periods And Frequencies",
    "Material List by Section Prop",
];

/// Number of physical rows above the header row (the title row)
const TITLE_ROWS: usize = 1;

/// All required sheets of one export, extracted into typed tables
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: HashMap<String, Sheet>,
}

impl Workbook {
    /// Extract all required sheets from raw workbook bytes.
    pub fn from_bytes(bytes: &[u8]) -> ModelResult<Workbook> {
        let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| ModelError::malformed_workbook(e.to_string()))?;

        let available = xlsx.sheet_names();
        let mut sheets = HashMap::with_capacity(REQUIRED_SHEETS.len());
        for &name in REQUIRED_SHEETS.iter() {
            if !available.iter().any(|s| s == name) {
                return Err(ModelError::missing_sheet(name));
            }
            let range = xlsx
                .worksheet_range(name)
                .map_err(|e| ModelError::malformed_workbook(e.to_string()))?;
            sheets.insert(name.to_string(), sheet_from_range(name, &range));
        }

        Ok(Workbook { sheets })
    }

    /// Extract from a workbook file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ModelResult<Workbook> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ModelError::file_error("read", path.display().to_string(), e.to_string())
        })?;
        Workbook::from_bytes(&bytes)
    }

    /// Look up an extracted sheet by name.
    pub fn sheet(&self, name: &str) -> ModelResult<&Sheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| ModelError::missing_sheet(name))
    }

    /// Names of the extracted sheets.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// Assemble a workbook from already-extracted sheets.
    ///
    /// Intended for tests and for callers that receive tabular data from
    /// somewhere other than an `.xlsx` container.
    pub fn from_sheets(sheets: impl IntoIterator<Item = Sheet>) -> Workbook {
        Workbook {
            sheets: sheets
                .into_iter()
                .map(|s| (s.name.clone(), s))
                .collect(),
        }
    }
}

/// Convert one calamine range into a [`Sheet`], skipping the title row.
fn sheet_from_range(name: &str, range: &calamine::Range<Data>) -> Sheet {
    let mut rows = range.rows().skip(TITLE_ROWS);
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|c| cell_to_value(c).display().trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let data: Vec<Vec<CellValue>> = rows
        .map(|r| r.iter().map(cell_to_value).collect())
        .collect();

    Sheet::new(name, headers, data)
}

fn cell_to_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_workbook() {
        let err = Workbook::from_bytes(b"this is not a zip archive").unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_WORKBOOK");
    }

    #[test]
    fn test_missing_file() {
        let err = Workbook::from_path("/no/such/model.xlsx").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_from_sheets_lookup() {
        let wb = Workbook::from_sheets(vec![Sheet::new(
            "Joint Reactions",
            vec!["Unique Name"],
            vec![],
        )]);
        assert!(wb.sheet("Joint Reactions").is_ok());
        let err = wb.sheet("Joint Displacements").unwrap_err();
        assert_eq!(err.error_code(), "MISSING_SHEET");
    }
}
