use crate::domain::departments::DepartmentDirectory;
use crate::domain::model::Workbook;
use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::path::Path;
use std::time::Duration;

/// Reads every sheet of the backing spreadsheet.
pub trait TableSource: Send + Sync {
    fn load(&self) -> Result<Workbook>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn workbook_path(&self) -> &Path;
    fn catalog_sheet(&self) -> &str;
    fn reload_interval(&self) -> Duration;
    fn departments(&self) -> DepartmentDirectory;
}
