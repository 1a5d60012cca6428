use calamine::{open_workbook_auto, DataType, Reader};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::error::ReportError;
use crate::models::FormattedReport;
use crate::types::NormalizedValue;

pub const EXPORT_SHEET_NAME: &str = "Extraction";

/// Header row of the export, one column per `NormalizedValue` field after the attribute label.
pub const EXPORT_HEADERS: &[&str] = &[
    "Attribute",
    "Raw_Value",
    "Formatted_Value",
    "Numeric_Value",
    "Currency",
    "Status",
];

const NUMERIC_COLUMN: u16 = 3;
const NUMERIC_WIDTH: f64 = 18.0;

/// Remove or replace characters that can corrupt Excel's sheet XML.
/// Drops control chars (except tab, newline, CR).
fn sanitize_cell(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            let u = c as u32;
            c == '\t' || c == '\n' || c == '\r' || !(u < 0x20 || u == 0x7F || u == 0xFFFE || u == 0xFFFF)
        })
        .collect()
}

fn write_text_cell_safe(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    text: &str,
    format: &Format,
) -> Result<(), XlsxError> {
    let cleaned = sanitize_cell(text);
    worksheet.write_string_with_format(row, col, &cleaned, format).map(|_| ())
}

/// Estimate column width from text length (char count × 1.2, clamped 10–60).
fn estimate_text_width(text: &str) -> f64 {
    let w = text.chars().count() as f64 * 1.2;
    w.clamp(10.0, 60.0)
}

fn row_texts<'a>(attribute: &'a str, value: &'a NormalizedValue) -> [&'a str; 5] {
    [
        attribute,
        value.raw_value.as_deref().unwrap_or(""),
        value.formatted_value.as_deref().unwrap_or(""),
        value.currency.as_deref().unwrap_or(""),
        value.status.as_str(),
    ]
}

/// Text column index for each entry of `row_texts`.
const TEXT_COLUMNS: [u16; 5] = [0, 1, 2, 4, 5];

fn calculate_export_column_widths(report: &FormattedReport) -> Vec<f64> {
    let mut widths: Vec<f64> = EXPORT_HEADERS.iter().map(|h| estimate_text_width(h)).collect();
    for (attribute, value) in &report.extracted_data {
        for (text, &col) in row_texts(attribute, value).iter().zip(TEXT_COLUMNS.iter()) {
            let w = estimate_text_width(text);
            if w > widths[col as usize] {
                widths[col as usize] = w;
            }
        }
    }
    widths[NUMERIC_COLUMN as usize] = NUMERIC_WIDTH;
    widths
}

/// Write the report's extracted values to a new workbook at `path`, one row per attribute.
pub fn export_report_to_excel(report: &FormattedReport, path: &Path) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(rust_xlsxwriter::Color::RGB(0x2563EB))
        .set_font_color(rust_xlsxwriter::Color::RGB(0xFFFFFF));
    let text_format = Format::new().set_text_wrap();
    let amount_format = Format::new()
        .set_num_format("#,##0.00")
        .set_align(FormatAlign::Right);

    for (col, &w) in calculate_export_column_widths(report).iter().enumerate() {
        worksheet.set_column_width(col as u16, w)?;
    }
    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        write_text_cell_safe(worksheet, 0, col as u16, header, &header_format)?;
    }

    for (row_idx, (attribute, value)) in report.extracted_data.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (text, &col) in row_texts(attribute, value).iter().zip(TEXT_COLUMNS.iter()) {
            write_text_cell_safe(worksheet, row, col, text, &text_format)?;
        }
        if let Some(number) = value.numeric_value {
            worksheet.write_number_with_format(row, NUMERIC_COLUMN, number, &amount_format)?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    workbook.save(path)?;
    Ok(())
}

/// Read the attribute names to extract: column A below the 1-based `header_row`,
/// of `sheet_name` or the first sheet. Blank cells are skipped and repeats dropped.
pub fn read_attribute_list(
    path: &Path,
    sheet_name: Option<&str>,
    header_row: Option<u32>,
) -> Result<Vec<String>, ReportError> {
    if !path.exists() {
        return Err(ReportError::InvalidInput(format!(
            "Attribute file not found: {}",
            path.display()
        )));
    }
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReportError::Excel(format!("Could not open Excel file: {}", e)))?;
    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ReportError::Excel("Workbook has no sheets".to_string()))?,
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ReportError::Excel(format!("Sheet not found: {}", e)))?;

    let skip = header_row.unwrap_or(1) as usize;
    let mut attributes: Vec<String> = Vec::new();
    for row in range.rows().skip(skip) {
        let Some(cell) = row.first() else { continue };
        let text = cell.as_string().unwrap_or_default();
        let text = text.trim();
        if text.is_empty() || attributes.iter().any(|a| a == text) {
            continue;
        }
        attributes.push(text.to_string());
    }
    tracing::debug!(sheet = %sheet, count = attributes.len(), "Loaded attribute list");
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SourceFiles, SummarySection, ValidationResult};
    use crate::services::normalizer::normalize;
    use crate::types::ExtractedData;
    use chrono::Local;

    fn sample_report() -> FormattedReport {
        let extracted_data: ExtractedData = [
            ("Annual Premium", Some("$12,500.50")),
            ("Insured", Some("Acme\u{7} Holdings")),
            ("Broker", None),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), normalize(v)))
        .collect();
        FormattedReport {
            success: true,
            error: None,
            extraction_timestamp: Local::now(),
            source_files: Some(SourceFiles {
                pdf_filename: "quote.pdf".into(),
                excel_filename: "attributes.xlsx".into(),
            }),
            extracted_data,
            summary: SummarySection::Empty {},
            validation: ValidationResult::default(),
        }
    }

    #[test]
    fn sanitize_drops_control_chars() {
        assert_eq!(sanitize_cell("a\u{0}b\tc\u{7F}"), "ab\tc");
    }

    #[test]
    fn export_writes_one_row_per_attribute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        export_report_to_excel(&sample_report(), &path).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range(EXPORT_SHEET_NAME).unwrap();
        let rows: Vec<_> = range.rows().collect();
        assert_eq!(rows.len(), 4);

        let header: Vec<String> = rows[0].iter().map(|c| c.as_string().unwrap_or_default()).collect();
        assert_eq!(header, EXPORT_HEADERS);

        assert_eq!(rows[1][0].as_string().as_deref(), Some("Annual Premium"));
        assert_eq!(rows[1][2].as_string().as_deref(), Some("$12,500.50"));
        assert_eq!(rows[1][3].as_f64(), Some(12500.5));
        assert_eq!(rows[1][5].as_string().as_deref(), Some("extracted"));

        assert_eq!(rows[2][1].as_string().as_deref(), Some("Acme Holdings"));
        assert_eq!(rows[2][5].as_string().as_deref(), Some("extracted_non_numeric"));

        assert_eq!(rows[3][0].as_string().as_deref(), Some("Broker"));
        assert_eq!(rows[3][5].as_string().as_deref(), Some("not_found"));
    }

    #[test]
    fn attribute_list_skips_header_blanks_and_repeats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attributes.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (row, text) in [
            "Attributes",
            "Total Insured Value",
            "  Annual Premium ",
            "",
            "Premium due",
            "Annual Premium",
        ]
        .iter()
        .enumerate()
        {
            sheet.write_string(row as u32, 0, *text).unwrap();
        }
        workbook.save(&path).unwrap();

        let attributes = read_attribute_list(&path, None, None).unwrap();
        assert_eq!(
            attributes,
            vec!["Total Insured Value", "Annual Premium", "Premium due"]
        );
    }

    #[test]
    fn missing_attribute_file_is_invalid_input() {
        let err = read_attribute_list(Path::new("/nonexistent/attrs.xlsx"), None, None).unwrap_err();
        assert!(matches!(err, ReportError::InvalidInput(_)));
    }
}
