use crate::core::{Table, TableSource, Workbook};
use crate::utils::error::Result;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::PathBuf;

/// Spreadsheet file (xlsx, xlsm, xls, ods); the first used row of each sheet is its header.
#[derive(Debug, Clone)]
pub struct XlsxSource {
    path: PathBuf,
}

impl XlsxSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for XlsxSource {
    fn load(&self) -> Result<Workbook> {
        let mut spreadsheet = open_workbook_auto(&self.path)?;
        let mut workbook = Workbook::new();

        for name in spreadsheet.sheet_names() {
            let range = spreadsheet.worksheet_range(&name)?;
            let mut rows = range
                .rows()
                .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
            let headers = rows.next().unwrap_or_default();
            let table = Table::new(headers, rows.collect());
            tracing::debug!("Read sheet '{}' with {} rows", name, table.rows.len());
            workbook.insert(name, table);
        }

        Ok(workbook)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
