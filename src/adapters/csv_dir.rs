use crate::core::{Table, TableSource, Workbook};
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Directory holding one `<sheet name>.csv` per sheet.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TableSource for CsvDirectorySource {
    fn load(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            let Some(sheet) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_csv {
                continue;
            }

            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_path(&path)?;
            let headers = reader.headers()?.iter().map(String::from).collect();
            let mut rows = Vec::new();
            for record in reader.records() {
                rows.push(record?.iter().map(String::from).collect());
            }

            tracing::debug!("Read sheet '{}' with {} rows", sheet, rows.len());
            workbook.insert(sheet.to_string(), Table::new(headers, rows));
        }

        Ok(workbook)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_each_csv_as_a_sheet() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Online Courses(SCOFT).csv"),
            "S.No,\"Course_Title\n\"\n1,Machine Learning\n2,\"Data Structures, Advanced\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("CSE - Mapped, III & IV Years.csv"),
            "Course Title,Category\nCompiler Design,PC\nEthics\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let workbook = CsvDirectorySource::new(dir.path()).load().unwrap();
        assert_eq!(workbook.len(), 2);

        let catalog = &workbook["Online Courses(SCOFT)"];
        assert_eq!(catalog.column_index("Course_Title"), Some(1));
        assert_eq!(catalog.rows[1][1], "Data Structures, Advanced");

        let curriculum = &workbook["CSE - Mapped, III & IV Years"];
        assert_eq!(curriculum.rows.len(), 2);
        assert_eq!(curriculum.rows[1], vec!["Ethics".to_string()]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let source = CsvDirectorySource::new(dir.path().join("missing"));
        assert!(source.load().is_err());
    }
}
