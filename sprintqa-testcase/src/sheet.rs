use rust_xlsxwriter::{Format, Workbook, XlsxError};
use sprintqa_core::{QaError, Result, TestCase};
use std::path::Path;

pub const WORKSHEET_NAME: &str = "TestCases";

/// MIME type of the generated workbook, used for uploads.
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const COLUMN_WIDTHS: [f64; 5] = [28.0, 14.0, 48.0, 60.0, 48.0];

fn sheet_error(e: XlsxError) -> QaError {
    QaError::Spreadsheet(format!("failed to build workbook: {e}"))
}

/// Build the workbook in memory: one header row plus one row per test case,
/// columns in schema order.
pub fn render_test_cases(cases: &[TestCase]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let wrap = Format::new().set_text_wrap();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME).map_err(sheet_error)?;

    for (col, (title, width)) in TestCase::COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header).map_err(sheet_error)?;
        worksheet.set_column_width(col, width).map_err(sheet_error)?;
    }

    for (idx, case) in cases.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in case.row().iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, value, &wrap)
                .map_err(sheet_error)?;
        }
    }

    workbook.save_to_buffer().map_err(sheet_error)
}

/// Render `cases` and write the workbook to `path`.
pub async fn write_test_cases(cases: &[TestCase], path: &Path) -> Result<()> {
    let bytes = render_test_cases(cases)?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| QaError::Spreadsheet(format!("failed to write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), rows = cases.len(), "test-case workbook written");
    Ok(())
}
