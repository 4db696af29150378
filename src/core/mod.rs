pub mod cache;
pub mod eligibility;
pub mod register;
pub mod resolver;
pub mod service;

pub use crate::domain::model::{CourseRecord, CourseTables, OnlineCourseRecord, Table, Workbook};
pub use crate::domain::ports::{Clock, ConfigProvider, SystemClock, TableSource};
pub use crate::utils::error::Result;
