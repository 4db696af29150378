//! Decoding of student register numbers.
//!
//! A register number is twelve characters; positions `[4, 6)` hold the
//! two-digit admission year and `[6, 8)` the department code.

use crate::utils::error::{EligibilityError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

pub const REGISTER_NUMBER_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNumber(String);

impl RegisterNumber {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != REGISTER_NUMBER_LEN || !raw.is_ascii() {
            return Err(EligibilityError::InvalidRegisterNumber);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn department_code(&self) -> &str {
        &self.0[6..8]
    }

    pub fn admission_year_token(&self) -> &str {
        &self.0[4..6]
    }

    /// Two-digit admission year, `None` when the token is not numeric.
    pub fn admission_year(&self) -> Option<u32> {
        let token = self.admission_year_token();
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regulation {
    R2019,
    R2024,
}

impl Regulation {
    pub fn for_admission_year(admission_year: u32) -> Option<Self> {
        match admission_year {
            19..=22 => Some(Regulation::R2019),
            y if y >= 23 => Some(Regulation::R2024),
            _ => None,
        }
    }

    /// Name of the course-code column this regulation selects.
    pub fn column_label(&self) -> String {
        format!("Course Code {}", self)
    }
}

impl fmt::Display for Regulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regulation::R2019 => write!(f, "R2019"),
            Regulation::R2024 => write!(f, "R2024"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentYear {
    Year(u8),
    Graduated,
}

impl StudentYear {
    /// Year of study given the admission year and the current year, both mod 100.
    pub fn from_admission_year(admission_year: u32, current_year: u32) -> Option<Self> {
        let year_of_study = i64::from(current_year) - i64::from(admission_year) + 1;
        match year_of_study {
            1..=4 => Some(StudentYear::Year(year_of_study as u8)),
            y if y > 4 => Some(StudentYear::Graduated),
            _ => None,
        }
    }
}

impl Serialize for StudentYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StudentYear::Year(year) => serializer.serialize_u8(*year),
            StudentYear::Graduated => serializer.serialize_str("Graduated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(RegisterNumber::parse("").is_err());
        assert!(RegisterNumber::parse("73762123000").is_err());
        assert!(RegisterNumber::parse("7376212300011").is_err());
        assert!(RegisterNumber::parse("737621230001").is_ok());
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        assert!(RegisterNumber::parse("7376é1230001").is_err());
    }

    #[test]
    fn test_field_positions() {
        let reg = RegisterNumber::parse("737621230001").unwrap();
        assert_eq!(reg.admission_year_token(), "21");
        assert_eq!(reg.department_code(), "23");
        assert_eq!(reg.admission_year(), Some(21));
    }

    #[test]
    fn test_non_numeric_admission_year() {
        let reg = RegisterNumber::parse("7376AB230001").unwrap();
        assert_eq!(reg.admission_year(), None);
        let signed = RegisterNumber::parse("7376+1230001").unwrap();
        assert_eq!(signed.admission_year(), None);
    }

    #[test]
    fn test_regulation_boundaries() {
        assert_eq!(Regulation::for_admission_year(18), None);
        assert_eq!(Regulation::for_admission_year(0), None);
        assert_eq!(Regulation::for_admission_year(19), Some(Regulation::R2019));
        assert_eq!(Regulation::for_admission_year(22), Some(Regulation::R2019));
        assert_eq!(Regulation::for_admission_year(23), Some(Regulation::R2024));
        assert_eq!(Regulation::for_admission_year(99), Some(Regulation::R2024));
        assert_eq!(Regulation::R2019.column_label(), "Course Code R2019");
    }

    #[test]
    fn test_student_year() {
        assert_eq!(
            StudentYear::from_admission_year(24, 24),
            Some(StudentYear::Year(1))
        );
        assert_eq!(
            StudentYear::from_admission_year(21, 24),
            Some(StudentYear::Year(4))
        );
        assert_eq!(
            StudentYear::from_admission_year(20, 24),
            Some(StudentYear::Graduated)
        );
        assert_eq!(StudentYear::from_admission_year(25, 24), None);
    }

    #[test]
    fn test_student_year_is_monotonic() {
        let rank = |y: Option<StudentYear>| match y {
            None => 0,
            Some(StudentYear::Year(n)) => u32::from(n),
            Some(StudentYear::Graduated) => 5,
        };
        let ranks: Vec<u32> = (0..=99)
            .rev()
            .map(|admission| rank(StudentYear::from_admission_year(admission, 26)))
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_student_year_serialization() {
        assert_eq!(serde_json::to_string(&StudentYear::Year(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&StudentYear::Graduated).unwrap(),
            "\"Graduated\""
        );
    }
}
