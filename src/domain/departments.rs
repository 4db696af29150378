use crate::utils::error::{EligibilityError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where a department's curriculum lives in the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetSpec {
    Single(String),
    Cohort { years_1_2: String, years_3_4: String },
}

impl SheetSpec {
    fn names(&self) -> Vec<&str> {
        match self {
            SheetSpec::Single(name) => vec![name.as_str()],
            SheetSpec::Cohort {
                years_1_2,
                years_3_4,
            } => vec![years_1_2.as_str(), years_3_4.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub code: String,
    pub name: String,
    pub sheet: SheetSpec,
}

impl Department {
    fn single(code: &str, name: &str, sheet: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            sheet: SheetSpec::Single(sheet.to_string()),
        }
    }

    fn cohort(code: &str, name: &str, years_1_2: &str, years_3_4: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            sheet: SheetSpec::Cohort {
                years_1_2: years_1_2.to_string(),
                years_3_4: years_3_4.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentDirectory {
    departments: Vec<Department>,
}

impl DepartmentDirectory {
    pub fn new(departments: Vec<Department>) -> Self {
        Self { departments }
    }

    /// The departments served by the current workbook layout.
    pub fn builtin() -> Self {
        Self::new(vec![
            Department::single(
                "23",
                "Artificial Intelligence and Data Science (AIDS)",
                "AIDS - Mapped",
            ),
            Department::single(
                "24",
                "Artificial Intelligence and Machine Learning (AIML)",
                "AIML - Mapped",
            ),
            Department::single("11", "CSE (Internet of Things)", "IOT - Mapped"),
            Department::single("10", "CSE (Cyber Security)", "Cyber Security(CS) - Mapped"),
            Department::cohort(
                "01",
                "Computer Science and Engineering",
                "CSE - II Years",
                "CSE - Mapped, III & IV Years",
            ),
            Department::cohort(
                "22",
                "Information Technology",
                "IT - II Years",
                "IT - Mapped III & IV Years",
            ),
        ])
    }

    pub fn get(&self, code: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.code == code)
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Every curriculum sheet referenced, without duplicates, in declaration order.
    pub fn sheet_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.departments
            .iter()
            .flat_map(|d| d.sheet.names())
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}

impl Default for DepartmentDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Validate for DepartmentDirectory {
    fn validate(&self) -> Result<()> {
        if self.departments.is_empty() {
            return Err(EligibilityError::ConfigError {
                message: "at least one department must be configured".to_string(),
            });
        }

        let mut codes = HashSet::new();
        for department in &self.departments {
            if department.code.len() != 2 || !department.code.is_ascii() {
                return Err(EligibilityError::InvalidConfigValueError {
                    field: "departments.code".to_string(),
                    value: department.code.clone(),
                    reason: "Department code must be exactly two ASCII characters".to_string(),
                });
            }
            if !codes.insert(department.code.as_str()) {
                return Err(EligibilityError::InvalidConfigValueError {
                    field: "departments.code".to_string(),
                    value: department.code.clone(),
                    reason: "Duplicate department code".to_string(),
                });
            }
            validate_non_empty_string("departments.name", &department.name)?;
            for sheet in department.sheet.names() {
                validate_non_empty_string("departments.sheet", sheet)?;
            }
        }
        Ok(())
    }
}
