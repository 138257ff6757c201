//! # Conversational Model Context
//!
//! Assembles the markdown summary handed to the conversational layer with
//! every chat turn: the load-combination list, the modal table, and the
//! material takeoff. Plain text only - the LLM reads it, the UI never
//! renders it.

use crate::workbook::Sheet;

/// Rows of a sheet to include before truncating the markdown table
const MAX_TABLE_ROWS: usize = 30;

/// Build the markdown model summary.
pub fn build_context(modal: &Sheet, materials: &Sheet, load_combos: &[String]) -> String {
    let mut out = String::from("# Model Summary\n");

    out.push_str("\n## Load Combinations\n");
    if load_combos.is_empty() {
        out.push_str("_No combination results found._\n");
    } else {
        for combo in load_combos {
            out.push_str("- ");
            out.push_str(combo);
            out.push('\n');
        }
    }

    out.push_str("\n## Modal Periods and Frequencies\n");
    out.push_str(&sheet_to_markdown(modal));

    out.push_str("\n## Material Takeoff by Section\n");
    out.push_str(&sheet_to_markdown(materials));

    out
}

/// Render a sheet as a markdown table, truncated past [`MAX_TABLE_ROWS`].
fn sheet_to_markdown(sheet: &Sheet) -> String {
    if sheet.headers.is_empty() || sheet.is_empty() {
        return "_Not reported in this export._\n".to_string();
    }

    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&sheet.headers.join(" | "));
    out.push_str(" |\n|");
    for _ in &sheet.headers {
        out.push_str(" --- |");
    }
    out.push('\n');

    for row in sheet.rows().take(MAX_TABLE_ROWS) {
        let cells: Vec<String> = row.cells().iter().map(|c| c.display()).collect();
        out.push_str("| ");
        out.push_str(&cells.join(" | "));
        out.push_str(" |\n");
    }
    if sheet.len() > MAX_TABLE_ROWS {
        out.push_str(&format!(
            "\n_... {} more rows omitted._\n",
            sheet.len() - MAX_TABLE_ROWS
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::CellValue;

    fn modal_sheet() -> Sheet {
        Sheet::new(
            "Modal Periods And Frequencies",
            vec!["Case", "Mode", "Period", "Frequency"],
            vec![
                vec![
                    CellValue::Text("Modal".to_string()),
                    CellValue::Number(1.0),
                    CellValue::Number(0.82),
                    CellValue::Number(1.22),
                ],
                vec![
                    CellValue::Text("Modal".to_string()),
                    CellValue::Number(2.0),
                    CellValue::Number(0.64),
                    CellValue::Number(1.56),
                ],
            ],
        )
    }

    fn materials_sheet() -> Sheet {
        Sheet::new(
            "Material List by Section Prop",
            vec!["Section", "Object Type", "Total Weight"],
            vec![vec![
                CellValue::Text("W14X30".to_string()),
                CellValue::Text("Beam".to_string()),
                CellValue::Number(5120.5),
            ]],
        )
    }

    #[test]
    fn test_context_contains_all_sections() {
        let combos = vec!["1.2D+1.6L".to_string(), "EQX".to_string()];
        let ctx = build_context(&modal_sheet(), &materials_sheet(), &combos);

        assert!(ctx.contains("## Load Combinations"));
        assert!(ctx.contains("- 1.2D+1.6L"));
        assert!(ctx.contains("| Case | Mode | Period | Frequency |"));
        assert!(ctx.contains("| Modal | 2 | 0.64 | 1.56 |"));
        assert!(ctx.contains("| W14X30 | Beam | 5120.5 |"));
    }

    #[test]
    fn test_empty_sheets_noted_not_crashed() {
        let empty = Sheet::new("Modal Periods And Frequencies", Vec::<String>::new(), vec![]);
        let ctx = build_context(&empty, &materials_sheet(), &[]);
        assert!(ctx.contains("_No combination results found._"));
        assert!(ctx.contains("_Not reported in this export._"));
    }

    #[test]
    fn test_long_tables_truncate() {
        let rows: Vec<Vec<CellValue>> = (0..40)
            .map(|i| vec![CellValue::Number(i as f64)])
            .collect();
        let sheet = Sheet::new("Modal Periods And Frequencies", vec!["Mode"], rows);
        let md = sheet_to_markdown(&sheet);
        assert!(md.contains("10 more rows omitted"));
    }
}
