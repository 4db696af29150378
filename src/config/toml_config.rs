use crate::core::ConfigProvider;
use crate::domain::departments::{Department, DepartmentDirectory};
use crate::utils::error::{EligibilityError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_CATALOG_SHEET: &str = "Online Courses(SCOFT)";
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid")
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub departments: Option<Vec<Department>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub workbook_path: PathBuf,
    pub catalog_sheet: String,
    pub reload_interval_minutes: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from("updateddata2.xlsx"),
            catalog_sheet: DEFAULT_CATALOG_SHEET.to_string(),
            reload_interval_minutes: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
    pub error_log: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            json: false,
            error_log: Some(PathBuf::from("error.log")),
        }
    }
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EligibilityError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EligibilityError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute `${VAR}` placeholders from the environment; unset variables are left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Check that every configured value is usable.
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_positive_number("server.port", u64::from(self.server.port), 1)?;

        let workbook = self.data.workbook_path.to_string_lossy();
        validate_path("data.workbook_path", &workbook)?;
        if !self.data.workbook_path.is_dir() {
            validate_file_extension("data.workbook_path", &workbook, SPREADSHEET_EXTENSIONS)?;
        }

        validate_non_empty_string("data.catalog_sheet", &self.data.catalog_sheet)?;
        validate_positive_number(
            "data.reload_interval_minutes",
            self.data.reload_interval_minutes,
            1,
        )?;

        if let Some(level) = &self.logging.level {
            if level.parse::<tracing::Level>().is_err() {
                return Err(EligibilityError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.clone(),
                    reason: "Expected one of trace, debug, info, warn, error".to_string(),
                });
            }
        }

        self.departments().validate()
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn workbook_path(&self) -> &Path {
        &self.data.workbook_path
    }

    fn catalog_sheet(&self) -> &str {
        &self.data.catalog_sheet
    }

    fn reload_interval(&self) -> Duration {
        Duration::from_secs(self.data.reload_interval_minutes.saturating_mul(60))
    }

    fn departments(&self) -> DepartmentDirectory {
        match &self.departments {
            Some(departments) => DepartmentDirectory::new(departments.clone()),
            None => DepartmentDirectory::builtin(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::departments::SheetSpec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5001");
        assert_eq!(config.workbook_path(), Path::new("updateddata2.xlsx"));
        assert_eq!(config.catalog_sheet(), "Online Courses(SCOFT)");
        assert_eq!(config.reload_interval(), Duration::from_secs(600));
        assert_eq!(config.departments(), DepartmentDirectory::builtin());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8080

[data]
workbook_path = "./data/courses.xlsx"
catalog_sheet = "Online Courses"
reload_interval_minutes = 5

[logging]
level = "debug"
json = true

[[departments]]
code = "23"
name = "Artificial Intelligence and Data Science (AIDS)"
sheet = "AIDS - Mapped"

[[departments]]
code = "01"
name = "Computer Science and Engineering"
sheet = { years_1_2 = "CSE - II Years", years_3_4 = "CSE - Mapped, III & IV Years" }
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.reload_interval(), Duration::from_secs(300));
        assert!(config.logging.json);
        assert_eq!(config.logging.error_log, Some(PathBuf::from("error.log")));

        let directory = config.departments();
        assert_eq!(directory.departments().len(), 2);
        assert!(matches!(
            directory.get("01").map(|d| &d.sheet),
            Some(SheetSpec::Cohort { .. })
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCOFT_TEST_WORKBOOK", "/srv/scoft/courses.xlsx");

        let toml_content = r#"
[data]
workbook_path = "${SCOFT_TEST_WORKBOOK}"
catalog_sheet = "${SCOFT_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.workbook_path(),
            Path::new("/srv/scoft/courses.xlsx")
        );
        assert_eq!(config.catalog_sheet(), "${SCOFT_TEST_UNSET_VARIABLE}");

        std::env::remove_var("SCOFT_TEST_WORKBOOK");
    }

    #[test]
    fn test_config_validation() {
        let bad_extension =
            TomlConfig::from_toml_str("[data]\nworkbook_path = \"courses.txt\"").unwrap();
        assert!(bad_extension.validate().is_err());

        let zero_interval =
            TomlConfig::from_toml_str("[data]\nreload_interval_minutes = 0").unwrap();
        assert!(zero_interval.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap();
        assert!(bad_level.validate().is_err());

        let duplicate = TomlConfig::from_toml_str(
            r#"
[[departments]]
code = "23"
name = "A"
sheet = "S"

[[departments]]
code = "23"
name = "B"
sheet = "T"
"#,
        )
        .unwrap();
        assert!(duplicate.validate().is_err());
    }

    #[test]
    fn test_directory_workbook_skips_extension_check() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = TomlConfig::default();
        config.data.workbook_path = dir.path().to_path_buf();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[server\nport = 1"),
            Err(EligibilityError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 9000\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
