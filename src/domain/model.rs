use crate::domain::departments::DepartmentDirectory;
use crate::utils::error::{EligibilityError, Result};
use std::collections::HashMap;

pub const CATALOG_TITLE_COLUMN: &str = "Course_Title";
pub const CURRICULUM_TITLE_COLUMN: &str = "Course Title";
pub const CATEGORY_COLUMN: &str = "Category";

/// Header text as the sheet authors intend it: trimmed, embedded newlines folded to spaces.
pub fn normalize_header(header: &str) -> String {
    header.trim().replace("\r\n", " ").replace('\n', " ")
}

/// Raw sheet contents, every cell rendered as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| normalize_header(h)).collect(),
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require_column(&self, sheet: &str, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| EligibilityError::SchemaError {
                sheet: sheet.to_string(),
                message: format!("missing column '{}'", name),
            })
    }

    fn cell(row: &[String], index: usize) -> &str {
        row.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Every sheet of a source file, keyed by sheet name.
pub type Workbook = HashMap<String, Table>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRecord {
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineCourseRecord {
    pub title: String,
}

/// Names of the sheets a workbook must carry.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub catalog_sheet: String,
    pub curriculum_sheets: Vec<String>,
}

impl TableSchema {
    pub fn new(catalog_sheet: impl Into<String>, directory: &DepartmentDirectory) -> Self {
        Self {
            catalog_sheet: catalog_sheet.into(),
            curriculum_sheets: directory.sheet_names(),
        }
    }
}

/// Validated snapshot of the catalog and every department curriculum.
#[derive(Debug, Clone, Default)]
pub struct CourseTables {
    catalog: Vec<OnlineCourseRecord>,
    curricula: HashMap<String, Vec<CourseRecord>>,
}

impl CourseTables {
    pub fn from_workbook(mut workbook: Workbook, schema: &TableSchema) -> Result<Self> {
        let catalog_table = take_sheet(&mut workbook, &schema.catalog_sheet)?;
        let title_idx = catalog_table.require_column(&schema.catalog_sheet, CATALOG_TITLE_COLUMN)?;
        let catalog = catalog_table
            .rows
            .iter()
            .map(|row| Table::cell(row, title_idx).trim())
            .filter(|title| !title.is_empty())
            .map(|title| OnlineCourseRecord {
                title: title.to_string(),
            })
            .collect();

        let mut curricula: HashMap<String, Vec<CourseRecord>> = HashMap::new();
        for sheet in &schema.curriculum_sheets {
            if curricula.contains_key(sheet) {
                continue;
            }
            let table = take_sheet(&mut workbook, sheet)?;
            let title_idx = table.require_column(sheet, CURRICULUM_TITLE_COLUMN)?;
            let category_idx = table.require_column(sheet, CATEGORY_COLUMN)?;
            let courses = table
                .rows
                .iter()
                .filter(|row| !Table::cell(row, title_idx).trim().is_empty())
                .map(|row| CourseRecord {
                    title: Table::cell(row, title_idx).trim().to_string(),
                    category: Table::cell(row, category_idx).trim().to_string(),
                })
                .collect();
            curricula.insert(sheet.clone(), courses);
        }

        Ok(Self { catalog, curricula })
    }

    pub fn catalog(&self) -> &[OnlineCourseRecord] {
        &self.catalog
    }

    pub fn curriculum(&self, sheet: &str) -> Option<&[CourseRecord]> {
        self.curricula.get(sheet).map(Vec::as_slice)
    }
}

fn take_sheet(workbook: &mut Workbook, name: &str) -> Result<Table> {
    if let Some(table) = workbook.remove(name) {
        return Ok(table);
    }
    // Sheet names in the source file are occasionally padded.
    let key = workbook
        .keys()
        .find(|k| k.trim() == name.trim())
        .cloned()
        .ok_or_else(|| EligibilityError::SheetMissing {
            sheet: name.to_string(),
        })?;
    workbook
        .remove(&key)
        .ok_or_else(|| EligibilityError::SheetMissing {
            sheet: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn schema() -> TableSchema {
        TableSchema {
            catalog_sheet: "Online Courses(SCOFT)".to_string(),
            curriculum_sheets: vec!["AIDS - Mapped".to_string()],
        }
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Course\nTitle "), "Course Title");
        assert_eq!(normalize_header("Category"), "Category");
    }

    #[test]
    fn test_from_workbook_builds_records() {
        let mut workbook = Workbook::new();
        workbook.insert(
            "Online Courses(SCOFT)".to_string(),
            Table::new(
                strings(&["S.No", " Course_Title\n"]),
                vec![
                    strings(&["1", "  Machine Learning "]),
                    strings(&["2", ""]),
                    strings(&["3", "Data Structures"]),
                ],
            ),
        );
        workbook.insert(
            "AIDS - Mapped".to_string(),
            Table::new(
                strings(&["Course\nTitle", "Category"]),
                vec![strings(&["Data Structures", "PC"]), strings(&["Ethics"])],
            ),
        );

        let tables = CourseTables::from_workbook(workbook, &schema()).unwrap();
        assert_eq!(
            tables.catalog(),
            &[
                OnlineCourseRecord {
                    title: "Machine Learning".to_string()
                },
                OnlineCourseRecord {
                    title: "Data Structures".to_string()
                },
            ]
        );
        let curriculum = tables.curriculum("AIDS - Mapped").unwrap();
        assert_eq!(curriculum.len(), 2);
        assert_eq!(curriculum[0].category, "PC");
        assert_eq!(curriculum[1].category, "");
        assert!(tables.curriculum("IT - II Years").is_none());
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let mut workbook = Workbook::new();
        workbook.insert(
            "Online Courses(SCOFT)".to_string(),
            Table::new(strings(&["Title"]), vec![]),
        );
        let err = CourseTables::from_workbook(workbook, &schema()).unwrap_err();
        assert!(matches!(err, EligibilityError::SchemaError { .. }));
    }

    #[test]
    fn test_missing_sheet() {
        let mut workbook = Workbook::new();
        workbook.insert(
            "Online Courses(SCOFT)".to_string(),
            Table::new(strings(&["Course_Title"]), vec![]),
        );
        let err = CourseTables::from_workbook(workbook, &schema()).unwrap_err();
        assert!(
            matches!(err, EligibilityError::SheetMissing { ref sheet } if sheet == "AIDS - Mapped")
        );
    }

    #[test]
    fn test_padded_sheet_name_is_found() {
        let mut workbook = Workbook::new();
        workbook.insert(
            "Online Courses(SCOFT) ".to_string(),
            Table::new(strings(&["Course_Title"]), vec![strings(&["Cloud"])]),
        );
        workbook.insert(
            "AIDS - Mapped".to_string(),
            Table::new(strings(&["Course Title", "Category"]), vec![]),
        );
        let tables = CourseTables::from_workbook(workbook, &schema()).unwrap();
        assert_eq!(tables.catalog().len(), 1);
    }
}
