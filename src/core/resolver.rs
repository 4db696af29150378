use crate::core::register::StudentYear;
use crate::domain::departments::{DepartmentDirectory, SheetSpec};

/// Curriculum sheet for a department cohort.
///
/// Single-sheet departments ignore the year of study; cohort departments
/// need a year in 1..=4.
pub fn resolve_sheet<'a>(
    directory: &'a DepartmentDirectory,
    department_code: &str,
    student_year: Option<StudentYear>,
) -> Option<&'a str> {
    let department = directory.get(department_code)?;
    match &department.sheet {
        SheetSpec::Single(name) => Some(name.as_str()),
        SheetSpec::Cohort {
            years_1_2,
            years_3_4,
        } => match student_year? {
            StudentYear::Year(1 | 2) => Some(years_1_2.as_str()),
            StudentYear::Year(3 | 4) => Some(years_3_4.as_str()),
            _ => None,
        },
    }
}

pub fn department_name<'a>(
    directory: &'a DepartmentDirectory,
    department_code: &str,
) -> Option<&'a str> {
    directory.get(department_code).map(|d| d.name.as_str())
}
