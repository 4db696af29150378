// Adapters layer: concrete table sources.

pub mod csv_dir;
pub mod xlsx;

use crate::core::TableSource;
use std::path::Path;

pub use csv_dir::CsvDirectorySource;
pub use xlsx::XlsxSource;

/// A directory is read as one CSV per sheet, anything else as a spreadsheet file.
pub fn open_source(path: &Path) -> Box<dyn TableSource> {
    if path.is_dir() {
        Box::new(CsvDirectorySource::new(path))
    } else {
        Box::new(XlsxSource::new(path))
    }
}
