use crate::core::cache::TableCache;
use crate::core::eligibility::{self, Eligibility};
use crate::core::register::{RegisterNumber, Regulation, StudentYear};
use crate::core::resolver::{department_name, resolve_sheet};
use crate::domain::departments::DepartmentDirectory;
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::{EligibilityError, Result};
use chrono::Datelike;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInfo {
    pub department: String,
    pub student_year: Option<StudentYear>,
    pub regulation: Regulation,
}

/// Entry points behind the HTTP handlers. All methods may block on a cache reload.
pub struct EligibilityService {
    cache: Arc<TableCache>,
    directory: Arc<DepartmentDirectory>,
    clock: Arc<dyn Clock>,
}

impl EligibilityService {
    pub fn new(cache: Arc<TableCache>, directory: Arc<DepartmentDirectory>) -> Self {
        Self::with_clock(cache, directory, Arc::new(SystemClock))
    }

    pub fn with_clock(
        cache: Arc<TableCache>,
        directory: Arc<DepartmentDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache,
            directory,
            clock,
        }
    }

    fn current_year(&self) -> u32 {
        self.clock.now().year().rem_euclid(100) as u32
    }

    pub fn student_info(&self, register_number: Option<&str>) -> Result<StudentInfo> {
        let register = parse_register(register_number)?;

        let department = department_name(&self.directory, register.department_code())
            .ok_or(EligibilityError::InvalidDepartment)?;

        let admission_year = register
            .admission_year()
            .ok_or(EligibilityError::InvalidAdmissionYear)?;
        let regulation = Regulation::for_admission_year(admission_year)
            .ok_or(EligibilityError::InvalidAdmissionYear)?;

        Ok(StudentInfo {
            department: department.to_string(),
            student_year: StudentYear::from_admission_year(admission_year, self.current_year()),
            regulation,
        })
    }

    pub fn check_eligibility(
        &self,
        register_number: Option<&str>,
        course_title: Option<&str>,
    ) -> Result<Eligibility> {
        let register = parse_register(register_number)?;
        let course_title = required_title(course_title)?;

        let admission_year = register
            .admission_year()
            .ok_or(EligibilityError::UnresolvedDepartment)?;
        let student_year = StudentYear::from_admission_year(admission_year, self.current_year());
        let sheet = resolve_sheet(&self.directory, register.department_code(), student_year)
            .ok_or(EligibilityError::UnresolvedDepartment)?;

        let tables = self.cache.tables()?;
        let curriculum = tables
            .curriculum(sheet)
            .ok_or_else(|| EligibilityError::SheetMissing {
                sheet: sheet.to_string(),
            })?;

        let outcome = eligibility::check_eligibility(tables.catalog(), curriculum, course_title);
        tracing::debug!(
            register = register.as_str(),
            sheet,
            course_title,
            ?outcome,
            "Eligibility checked"
        );
        Ok(outcome)
    }

    pub fn course_suggestions(
        &self,
        register_number: Option<&str>,
        partial_course_title: Option<&str>,
    ) -> Result<Vec<String>> {
        parse_register(register_number)?;
        let partial = required_title(partial_course_title)?;

        let tables = self.cache.tables()?;
        Ok(eligibility::unique_partial_matches(tables.catalog(), partial))
    }

    pub fn search(&self, course_title: Option<&str>) -> Result<Vec<String>> {
        let course_title = required_title(course_title)?;

        let tables = self.cache.tables()?;
        let relevant = eligibility::partial_matches(tables.catalog(), course_title);
        if relevant.is_empty() {
            return Err(EligibilityError::NoRelevantCourses);
        }
        Ok(relevant)
    }
}

fn parse_register(register_number: Option<&str>) -> Result<RegisterNumber> {
    register_number
        .ok_or(EligibilityError::InvalidRegisterNumber)
        .and_then(RegisterNumber::parse)
}

fn required_title(title: Option<&str>) -> Result<&str> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(EligibilityError::CourseTitleRequired),
    }
}
