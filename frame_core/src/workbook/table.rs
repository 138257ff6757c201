//! # Tabular Sheet Data
//!
//! A lightweight, owned representation of one extracted sheet: a header row
//! plus typed cell rows. This is the boundary type between the calamine
//! reader and the model builders - builders never see calamine types, and
//! tests can construct synthetic sheets without touching a real workbook.

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, ModelResult};

/// One cell of an extracted sheet.
///
/// The export format only ever carries numbers, text, and blanks in the
/// positions we read; everything else (errors, dates) is normalized at
/// extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Blank or unreadable cell
    Empty,
    /// Any numeric cell (integers included; xlsx stores them as floats)
    Number(f64),
    /// Text cell
    Text(String),
    /// Boolean cell (rare in exports, kept for completeness)
    Bool(bool),
}

impl CellValue {
    /// Numeric value, if this cell is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text value, if this cell is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Identifier value: a non-negative integral number.
    ///
    /// Text cells are deliberately rejected - the export occasionally leaks
    /// sentinel labels (the literal "Global") into id columns, and those
    /// rows must be filtered, not parsed.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            CellValue::Number(v) if *v >= 0.0 && v.fract() == 0.0 => Some(*v as u64),
            _ => None,
        }
    }

    /// Whether the cell is blank
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Human-readable rendering for summaries and markdown tables
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    format!("{}", *v as i64)
                } else {
                    format!("{}", v)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

/// One extracted sheet: named columns over typed rows.
///
/// # Example
///
/// ```rust
/// use frame_core::workbook::{Sheet, CellValue};
///
/// let sheet = Sheet::new(
///     "Joint Reactions",
///     vec!["Unique Name", "Output Case", "FZ"],
///     vec![vec![
///         CellValue::Number(4.0),
///         CellValue::Text("EQX".to_string()),
///         CellValue::Number(-120.0),
///     ]],
/// );
///
/// let row = sheet.rows().next().unwrap();
/// assert_eq!(row.id("Unique Name"), Some(4));
/// assert_eq!(row.f64("FZ"), Some(-120.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as it appears in the workbook
    pub name: String,
    /// Header row (the export's second physical row)
    pub headers: Vec<String>,
    /// Data rows, each padded/truncated to the header width
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Build a sheet from headers and rows. Rows are normalized to the
    /// header width so positional access never goes out of bounds.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<impl Into<String>>,
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Sheet {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Index of a named column, if present
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Index of a named column, or a MissingColumn error
    pub fn require_column(&self, column: &str) -> ModelResult<usize> {
        self.column_index(column)
            .ok_or_else(|| ModelError::missing_column(&self.name, column))
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the sheet has zero data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate data rows with name-based cell access
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(move |(index, cells)| Row {
            sheet: self,
            index,
            cells,
        })
    }
}

/// A borrowed view of one data row with name-based access
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    sheet: &'a Sheet,
    /// Zero-based data row index (excludes the skipped title/header rows)
    pub index: usize,
    cells: &'a [CellValue],
}

impl<'a> Row<'a> {
    /// Cell under a named column, if the column exists
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.sheet
            .column_index(column)
            .and_then(|i| self.cells.get(i))
    }

    /// Numeric cell under a named column
    pub fn f64(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_f64)
    }

    /// Text cell under a named column
    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(CellValue::as_text)
    }

    /// Identifier cell under a named column (see [`CellValue::as_id`])
    pub fn id(&self, column: &str) -> Option<u64> {
        self.get(column).and_then(CellValue::as_id)
    }

    /// All cells in header order
    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }
}
